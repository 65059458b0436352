//! Controllers for authorization

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use axum::{Extension, Json};
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use common::{DbPool, Error, RedisConn};
use models::{NewProfile, Profile};
use validator::Validate;

use crate::Config;
use crate::schemas::auth::{LoginRequest, RegisterRequest};
use crate::schemas::profile::ProfileResponse;
use crate::session::Session;

#[instrument(skip(pool))]
pub(crate) async fn register_profile(
	State(pool): State<DbPool>,
	Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let new_profile: NewProfile = request.into();
	let profile = new_profile.insert(&conn).await?;

	info!(
		"registered new profile id: {} username: {}",
		profile.profile.id, profile.profile.username
	);

	Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

#[instrument(skip(pool, r_conn, config, jar))]
pub(crate) async fn login_profile(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let profile = Profile::get_by_username(request.username, &conn).await?;

	profile.verify_password(&request.password)?;

	let session = Session::create(&config, profile.profile.id, &mut r_conn)
		.await?;
	let jar = jar.add(session.to_access_token_cookie(&config));

	let profile = profile.update_last_login(&conn).await?;

	info!("logged in profile {}", profile.profile.id);

	Ok((StatusCode::OK, jar, Json(ProfileResponse::from(profile))))
}

#[instrument(skip(r_conn, config, jar))]
pub(crate) async fn logout_profile(
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	Extension(session): Extension<Session>,
	jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	session.delete(&mut r_conn).await?;

	let jar = jar.remove(revoked_access_token(&config));

	info!("logged out profile {}", session.profile_id);

	Ok((jar, NoContent))
}

/// A cookie that clears the access token when sent back to the client
pub(crate) fn revoked_access_token(config: &Config) -> Cookie<'static> {
	Cookie::build((config.access_token_name.clone(), ""))
		.path("/")
		.into()
}
