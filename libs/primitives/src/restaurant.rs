use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::restaurant;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveRestaurant {
	pub id:             i32,
	pub name:           String,
	pub opening_hour:   NaiveTime,
	pub closing_hour:   NaiveTime,
	pub email:          Option<String>,
	pub contact_number: Option<String>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl fmt::Display for PrimitiveRestaurant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name)
	}
}

impl PrimitiveRestaurant {
	/// Get a [`PrimitiveRestaurant`] by its id
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if no restaurant with this id exists
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let restaurant = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				restaurant
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		restaurant.ok_or_else(|| {
			Error::NotFound(format!("no restaurant with id {r_id}"))
		})
	}
}
