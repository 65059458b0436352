use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::restaurant_admin;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant management rights granted to a profile
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = restaurant_admin)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveRestaurantAdmin {
	pub id:         i32,
	pub profile_id: i32,
	pub name:       String,
	pub role:       String,
	pub phone:      String,
	pub is_active:  bool,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl PrimitiveRestaurantAdmin {
	/// Get the [`PrimitiveRestaurantAdmin`] record of a profile, if any
	#[instrument(skip(conn))]
	pub async fn get_for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let admin = conn
			.interact(move |conn| {
				use self::restaurant_admin::dsl::*;

				restaurant_admin
					.filter(profile_id.eq(p_id))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(admin)
	}
}
