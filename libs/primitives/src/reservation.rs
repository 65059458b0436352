use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::reservation;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
	Clone,
	Debug,
	Deserialize,
	Eq,
	Identifiable,
	PartialEq,
	Queryable,
	Selectable,
	Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservation {
	pub id:               Uuid,
	pub customer_id:      i32,
	pub table_id:         Uuid,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub message:          String,
	pub created_at:       NaiveDateTime,
}

impl PrimitiveReservation {
	/// Whether this reservation is not in the past relative to `today`
	#[must_use]
	pub fn is_valid_date(&self, today: NaiveDate) -> bool {
		self.reservation_date >= today
	}

	/// Get a [`PrimitiveReservation`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: Uuid, conn: &DbConn) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		reservation.ok_or_else(|| {
			Error::NotFound(format!("no reservation with id {r_id}"))
		})
	}
}
