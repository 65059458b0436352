use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use common::{DbConn, Error, LoginError};
use db::{profile, reservation, restaurant_admin};
use diesel::prelude::*;
use primitives::{PrimitiveProfile, PrimitiveRestaurantAdmin};
use serde::{Deserialize, Serialize};

pub type JoinedProfileData =
	(PrimitiveProfile, Option<PrimitiveRestaurantAdmin>);

/// Check if a profile may manage the restaurant
///
/// Superusers always can, anyone else needs an active restaurant admin record
#[must_use]
pub fn is_radmin(
	profile: &PrimitiveProfile,
	admin: Option<&PrimitiveRestaurantAdmin>,
) -> bool {
	profile.is_superuser || admin.is_some_and(|a| a.is_active)
}

/// A profile along with its restaurant admin record, if it has one
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Profile {
	pub profile:          PrimitiveProfile,
	pub restaurant_admin: Option<PrimitiveRestaurantAdmin>,
}

/// What was removed when deleting a [`Profile`]
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDeletion {
	pub reservations:     usize,
	pub restaurant_admin: bool,
}

mod auto_type_helpers {
	pub use diesel::dsl::{LeftJoin as LeftOuterJoin, *};
}

impl Profile {
	/// Build a query with all required joins to select a full profile data
	/// tuple
	#[diesel::dsl::auto_type(no_type_alias, dsl_path = "auto_type_helpers")]
	fn joined_query() -> _ {
		profile::table.left_outer_join(
			restaurant_admin::table
				.on(restaurant_admin::profile_id.eq(profile::id)),
		)
	}

	fn from_joined(data: JoinedProfileData) -> Self {
		Self { profile: data.0, restaurant_admin: data.1 }
	}

	/// Whether this profile may manage the restaurant
	#[must_use]
	pub fn is_radmin(&self) -> bool {
		is_radmin(&self.profile, self.restaurant_admin.as_ref())
	}

	/// Get a [`Profile`] given its id
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if no profile with this id exists
	#[instrument(skip(conn))]
	pub async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let query = Self::joined_query();

		let profile = conn
			.interact(move |conn| {
				query
					.filter(profile::id.eq(query_id))
					.select((
						PrimitiveProfile::as_select(),
						Option::<PrimitiveRestaurantAdmin>::as_select(),
					))
					.get_result(conn)
					.optional()
			})
			.await??
			.map(Self::from_joined);

		profile.ok_or_else(|| {
			Error::NotFound(format!("no profile with id {query_id}"))
		})
	}

	/// Get a [`Profile`] given its username
	///
	/// # Errors
	/// Fails with [`LoginError::UnknownUsername`] if no profile carries this
	/// username
	#[instrument(skip(conn))]
	pub async fn get_by_username(
		query_username: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let query = Self::joined_query();
		let search = query_username.clone();

		let profile = conn
			.interact(move |conn| {
				query
					.filter(profile::username.eq(search))
					.select((
						PrimitiveProfile::as_select(),
						Option::<PrimitiveRestaurantAdmin>::as_select(),
					))
					.first(conn)
					.optional()
			})
			.await??
			.map(Self::from_joined);

		profile
			.ok_or_else(|| LoginError::UnknownUsername(query_username).into())
	}

	/// Hash a password using Argon2
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hashed_password = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hashed_password)
	}

	/// Check a password against the stored hash of this profile
	///
	/// # Errors
	/// Fails with [`LoginError::InvalidPassword`] if the password is wrong
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let password_hash = PasswordHash::new(&self.profile.password_hash)?;

		Argon2::default()
			.verify_password(password.as_bytes(), &password_hash)?;

		Ok(())
	}

	/// Set the `last_login_at` field to the current datetime for this
	/// [`Profile`]
	#[instrument(skip(conn))]
	pub async fn update_last_login(self, conn: &DbConn) -> Result<Self, Error> {
		let self_id = self.profile.id;
		let now = Utc::now().naive_utc();

		conn.interact(move |conn| {
			use self::profile::dsl::*;

			diesel::update(profile.find(self_id))
				.set(last_login_at.eq(now))
				.execute(conn)
		})
		.await??;

		Self::get(self_id, conn).await
	}

	/// Delete a [`Profile`] along with its reservations and restaurant admin
	/// record
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		p_id: i32,
		conn: &DbConn,
	) -> Result<ProfileDeletion, Error> {
		let (profiles, deletion) = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let reservations = diesel::delete(
						reservation::table
							.filter(reservation::customer_id.eq(p_id)),
					)
					.execute(conn)?;

					let admins = diesel::delete(
						restaurant_admin::table
							.filter(restaurant_admin::profile_id.eq(p_id)),
					)
					.execute(conn)?;

					let profiles = diesel::delete(profile::table.find(p_id))
						.execute(conn)?;

					let deletion = ProfileDeletion {
						reservations,
						restaurant_admin: admins > 0,
					};

					Ok((profiles, deletion))
				})
			})
			.await??;

		if profiles == 0 {
			return Err(Error::NotFound(format!("no profile with id {p_id}")));
		}

		info!("deleted profile with id {p_id} -- {deletion:?}");

		Ok(deletion)
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewProfile {
	pub username: String,
	pub password: String,
	pub email:    Option<String>,
	pub name:     Option<String>,
	pub phone:    Option<String>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = profile)]
struct NewProfileHashed {
	username:      String,
	password_hash: String,
	email:         Option<String>,
	name:          Option<String>,
	phone:         Option<String>,
}

impl NewProfile {
	/// Insert this [`NewProfile`]
	#[instrument(skip_all)]
	pub async fn insert(self, conn: &DbConn) -> Result<Profile, Error> {
		let hash = Profile::hash_password(&self.password)?;

		let insertable = NewProfileHashed {
			username:      self.username,
			password_hash: hash,
			email:         self.email,
			name:          self.name,
			phone:         self.phone,
		};

		let profile = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				diesel::insert_into(profile)
					.values(insertable)
					.returning(PrimitiveProfile::as_returning())
					.get_result(conn)
			})
			.await??;

		let profile = Profile::get(profile.id, conn).await?;

		info!("created profile {}", profile.profile.username);

		Ok(profile)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = profile)]
pub struct ProfileUpdate {
	pub email: Option<String>,
	pub name:  Option<String>,
	pub phone: Option<String>,
}

impl ProfileUpdate {
	/// Update a [`Profile`] with the given changes
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		target_id: i32,
		conn: &DbConn,
	) -> Result<Profile, Error> {
		if self.email.is_none() && self.name.is_none() && self.phone.is_none()
		{
			return Profile::get(target_id, conn).await;
		}

		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				diesel::update(profile.find(target_id))
					.set(self)
					.returning(PrimitiveProfile::as_returning())
					.get_result(conn)
			})
			.await??;

		let profile = Profile::get(profile.id, conn).await?;

		Ok(profile)
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDateTime;

	use super::*;

	fn timestamp() -> NaiveDateTime {
		"2026-01-01T12:00:00".parse().unwrap()
	}

	fn profile(is_superuser: bool) -> PrimitiveProfile {
		PrimitiveProfile {
			id: 1,
			username: "alice".to_string(),
			email: None,
			password_hash: String::new(),
			name: None,
			phone: None,
			is_superuser,
			created_at: timestamp(),
			last_login_at: timestamp(),
		}
	}

	fn admin(is_active: bool) -> PrimitiveRestaurantAdmin {
		PrimitiveRestaurantAdmin {
			id: 1,
			profile_id: 1,
			name: "Alice".to_string(),
			role: "manager".to_string(),
			phone: "01234567890".to_string(),
			is_active,
			created_at: timestamp(),
			updated_at: timestamp(),
		}
	}

	#[test]
	fn superuser_is_radmin() {
		assert!(is_radmin(&profile(true), None));
		assert!(is_radmin(&profile(true), Some(&admin(false))));
	}

	#[test]
	fn active_admin_is_radmin() {
		assert!(is_radmin(&profile(false), Some(&admin(true))));
	}

	#[test]
	fn inactive_admin_is_not_radmin() {
		assert!(!is_radmin(&profile(false), Some(&admin(false))));
	}

	#[test]
	fn plain_customer_is_not_radmin() {
		assert!(!is_radmin(&profile(false), None));
	}

	#[test]
	fn password_hash_verifies() {
		let hash = Profile::hash_password("correct horse").unwrap();

		let mut primitive = profile(false);
		primitive.password_hash = hash;

		let profile = Profile { profile: primitive, restaurant_admin: None };

		assert!(profile.verify_password("correct horse").is_ok());
		assert!(matches!(
			profile.verify_password("battery staple"),
			Err(Error::LoginError(LoginError::InvalidPassword))
		));
	}
}
