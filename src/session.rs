//! User sessions and tokens

use axum_extra::extract::cookie::{Cookie, SameSite};
use common::{Error, RedisConn};
use redis::AsyncCommands;
use uuid::Uuid;

use crate::Config;

/// A logged in session, stored in redis as `id -> profile_id`
#[derive(Clone, Copy, Debug)]
pub struct Session {
	pub id:         Uuid,
	pub profile_id: i32,
}

impl Session {
	/// Create and store a new [`Session`] for a given profile
	#[instrument(skip(config, conn))]
	pub(crate) async fn create(
		config: &Config,
		profile_id: i32,
		conn: &mut RedisConn,
	) -> Result<Self, Error> {
		let id = Uuid::new_v4();

		let session = Self { id, profile_id };

		// Add a buffer of 10 seconds to ensure the cached session doesn't
		// expire before the session cookie does
		let expiry = config.access_token_lifetime.whole_seconds() + 10;

		let _: bool = conn.set(id, profile_id).await?;
		let _: bool = conn.expire(id, expiry).await?;

		// Track every session of a profile so they can be revoked together
		let index = Self::index_key(profile_id);
		let _: i32 = conn.sadd(&index, id).await?;
		let _: bool = conn.expire(&index, expiry).await?;

		debug!("stored session {id} in cache for profile {profile_id}");

		Ok(session)
	}

	/// Get a session from the cache
	#[instrument(skip(conn))]
	pub(crate) async fn get(
		id: &Uuid,
		conn: &mut RedisConn,
	) -> Result<Option<Self>, Error> {
		let profile_id: Option<i32> = conn.get(id).await?;

		Ok(profile_id.map(|profile_id| Self { id: *id, profile_id }))
	}

	/// Remove this session from the cache
	#[instrument(skip(conn))]
	pub(crate) async fn delete(
		self,
		conn: &mut RedisConn,
	) -> Result<(), Error> {
		let _: i32 = conn.del(self.id).await?;
		let _: i32 =
			conn.srem(Self::index_key(self.profile_id), self.id).await?;

		debug!("removed session {} from cache", self.id);

		Ok(())
	}

	/// Remove every session belonging to a profile
	#[instrument(skip(conn))]
	pub(crate) async fn delete_all_for_profile(
		profile_id: i32,
		conn: &mut RedisConn,
	) -> Result<(), Error> {
		let index = Self::index_key(profile_id);
		let ids: Vec<String> = conn.smembers(&index).await?;

		if !ids.is_empty() {
			let _: i32 = conn.del(&ids).await?;
		}

		let _: i32 = conn.del(&index).await?;

		debug!("removed {} sessions of profile {profile_id}", ids.len());

		Ok(())
	}

	fn index_key(profile_id: i32) -> String {
		format!("profile:{profile_id}:sessions")
	}

	/// Convert this [`Session`] into an access token cookie
	pub(crate) fn to_access_token_cookie(
		self,
		config: &Config,
	) -> Cookie<'static> {
		let secure = config.production;

		Cookie::build((config.access_token_name.clone(), self.id.to_string()))
			.http_only(true)
			.max_age(config.access_token_lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into()
	}
}
