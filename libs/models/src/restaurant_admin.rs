use common::{DbConn, Error};
use db::{profile, restaurant_admin};
use diesel::prelude::*;
use primitives::{PrimitiveProfile, PrimitiveRestaurantAdmin};
use serde::{Deserialize, Serialize};

pub type JoinedRestaurantAdminData =
	(PrimitiveRestaurantAdmin, PrimitiveProfile);

/// A restaurant admin record along with the profile it belongs to
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RestaurantAdmin {
	pub admin:   PrimitiveRestaurantAdmin,
	pub profile: PrimitiveProfile,
}

impl RestaurantAdmin {
	#[diesel::dsl::auto_type(no_type_alias)]
	fn joined_query() -> _ {
		let profile_join =
			profile::table.on(restaurant_admin::profile_id.eq(profile::id));

		restaurant_admin::table.inner_join(profile_join)
	}

	fn from_joined(data: JoinedRestaurantAdminData) -> Self {
		Self { admin: data.0, profile: data.1 }
	}

	/// Get all [`RestaurantAdmin`]s ordered by username
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let admins = conn
			.interact(move |conn| {
				query
					.order(profile::username)
					.select((
						PrimitiveRestaurantAdmin::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(admins)
	}

	/// Get the [`RestaurantAdmin`] belonging to a profile
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if the profile is no restaurant admin
	#[instrument(skip(conn))]
	pub async fn get_for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let query = Self::joined_query();

		let admin = conn
			.interact(move |conn| {
				query
					.filter(restaurant_admin::profile_id.eq(p_id))
					.select((
						PrimitiveRestaurantAdmin::as_select(),
						PrimitiveProfile::as_select(),
					))
					.first(conn)
					.optional()
			})
			.await??
			.map(Self::from_joined);

		admin.ok_or_else(|| {
			Error::NotFound(format!("profile {p_id} is no restaurant admin"))
		})
	}

	/// Remove the restaurant admin record of a profile, the profile itself
	/// is kept
	#[instrument(skip(conn))]
	pub async fn delete_for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::restaurant_admin::dsl::*;

				diesel::delete(restaurant_admin.filter(profile_id.eq(p_id)))
					.execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!(
				"profile {p_id} is no restaurant admin"
			)));
		}

		info!("revoked restaurant admin rights of profile {p_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = restaurant_admin)]
#[diesel(check_for_backend(Pg))]
pub struct NewRestaurantAdmin {
	pub profile_id: i32,
	pub name:       String,
	pub role:       String,
	pub phone:      String,
	pub is_active:  bool,
}

impl NewRestaurantAdmin {
	/// Insert this [`NewRestaurantAdmin`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<RestaurantAdmin, Error> {
		let p_id = self.profile_id;

		conn.interact(|conn| {
			use self::restaurant_admin::dsl::*;

			diesel::insert_into(restaurant_admin).values(self).execute(conn)
		})
		.await??;

		let admin = RestaurantAdmin::get_for_profile(p_id, conn).await?;

		info!("granted restaurant admin rights to profile {p_id}");

		Ok(admin)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = restaurant_admin)]
pub struct RestaurantAdminUpdate {
	pub name:      Option<String>,
	pub role:      Option<String>,
	pub phone:     Option<String>,
	pub is_active: Option<bool>,
}

impl RestaurantAdminUpdate {
	/// Update the restaurant admin record of the given profile
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		p_id: i32,
		conn: &DbConn,
	) -> Result<RestaurantAdmin, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::restaurant_admin::dsl::*;

				diesel::update(restaurant_admin.filter(profile_id.eq(p_id)))
					.set((self, updated_at.eq(diesel::dsl::now)))
					.execute(conn)
			})
			.await??;

		if updated == 0 {
			return Err(Error::NotFound(format!(
				"profile {p_id} is no restaurant admin"
			)));
		}

		RestaurantAdmin::get_for_profile(p_id, conn).await
	}
}
