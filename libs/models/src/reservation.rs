use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use common::{CreateReservationError, DbConn, Error};
use db::{dining_table, profile, reservation};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Bool;
use primitives::{PrimitiveProfile, PrimitiveReservation, PrimitiveTable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BoxedCondition, ToFilter};

/// Unique constraint on (customer, date, time)
const CUSTOMER_SLOT_CONSTRAINT: &str = "reservation_customer_slot_key";

pub type JoinedReservationData =
	(PrimitiveReservation, PrimitiveTable, PrimitiveProfile);

/// The date ranges reservations get listed by
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationPeriod {
	/// Reservations for the current date
	Today,
	/// Reservations for the current date or later
	Upcoming,
	/// Reservations before the current date
	Past,
}

impl ReservationPeriod {
	/// Check if a reservation date falls within this period
	#[must_use]
	pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
		match self {
			Self::Today => date == today,
			Self::Upcoming => date >= today,
			Self::Past => date < today,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
	pub period: Option<ReservationPeriod>,
	pub today:  NaiveDate,
}

impl<S> ToFilter<S> for ReservationFilter
where
	S: 'static,
	reservation::reservation_date: SelectableExpression<S>,
{
	type SqlType = Bool;

	fn to_filter(&self) -> BoxedCondition<S, Self::SqlType> {
		let today = self.today;

		match self.period {
			Some(ReservationPeriod::Today) => {
				Box::new(reservation::reservation_date.eq(today))
			},
			Some(ReservationPeriod::Upcoming) => {
				Box::new(reservation::reservation_date.ge(today))
			},
			Some(ReservationPeriod::Past) => {
				Box::new(reservation::reservation_date.lt(today))
			},
			None => Box::new(true.into_sql::<Bool>()),
		}
	}
}

/// A reservation together with the table it holds and the customer who made
/// it
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Reservation {
	pub reservation: PrimitiveReservation,
	pub table:       PrimitiveTable,
	pub customer:    PrimitiveProfile,
}

impl fmt::Display for Reservation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}'s reservation for {}",
			self.customer.username,
			self.table.label()
		)
	}
}

impl Reservation {
	/// Build a query with all required joins to select a full reservation
	/// data tuple
	#[diesel::dsl::auto_type(no_type_alias)]
	fn joined_query() -> _ {
		let table_join =
			dining_table::table.on(reservation::table_id.eq(dining_table::id));

		let customer_join =
			profile::table.on(reservation::customer_id.eq(profile::id));

		reservation::table.inner_join(table_join).inner_join(customer_join)
	}

	/// Construct a full [`Reservation`] struct from the data returned by a
	/// joined query
	fn from_joined(data: JoinedReservationData) -> Self {
		Self { reservation: data.0, table: data.1, customer: data.2 }
	}

	/// Get a [`Reservation`] given its id
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if no reservation with this id exists
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: Uuid, conn: &DbConn) -> Result<Self, Error> {
		let query = Self::joined_query();

		let reservation = conn
			.interact(move |conn| {
				query
					.filter(reservation::id.eq(r_id))
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveTable::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_result(conn)
					.optional()
			})
			.await??
			.map(Self::from_joined);

		reservation.ok_or_else(|| {
			Error::NotFound(format!("no reservation with id {r_id}"))
		})
	}

	/// Get all reservations, ordered by date and time
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let reservations = conn
			.interact(move |conn| {
				query
					.order((
						reservation::reservation_date,
						reservation::reservation_time,
					))
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveTable::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(reservations)
	}

	/// Get all the reservations made by a specific customer
	#[instrument(skip(conn))]
	pub async fn for_customer(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let reservations = conn
			.interact(move |conn| {
				query
					.filter(reservation::customer_id.eq(p_id))
					.order((
						reservation::reservation_date,
						reservation::reservation_time,
					))
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveTable::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(reservations)
	}

	/// Get all the reservations falling within a period
	///
	/// Past reservations are listed most recent first, all other periods
	/// in chronological order
	#[instrument(skip(conn))]
	pub async fn for_period(
		filter: ReservationFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let condition = filter.to_filter();
		let query = Self::joined_query();

		let mut reservations: Vec<Self> = conn
			.interact(move |conn| {
				query
					.filter(condition)
					.order((
						reservation::reservation_date,
						reservation::reservation_time,
					))
					.select((
						PrimitiveReservation::as_select(),
						PrimitiveTable::as_select(),
						PrimitiveProfile::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		if filter.period == Some(ReservationPeriod::Past) {
			reservations.reverse();
		}

		Ok(reservations)
	}

	/// Get the earliest reservation on a table that is not in the past
	#[instrument(skip(conn))]
	pub async fn next_for_table(
		t_id: Uuid,
		today: NaiveDate,
		conn: &DbConn,
	) -> Result<Option<PrimitiveReservation>, Error> {
		let next = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(table_id.eq(t_id))
					.filter(reservation_date.ge(today))
					.order((reservation_date, reservation_time))
					.select(PrimitiveReservation::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(next)
	}

	/// Get all the reservations at exactly this date and time
	#[instrument(skip(conn))]
	pub async fn on_slot(
		date: NaiveDate,
		time: NaiveTime,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveReservation>, Error> {
		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(reservation_date.eq(date))
					.filter(reservation_time.eq(time))
					.select(PrimitiveReservation::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Check if a customer already holds a reservation at this date and time
	#[instrument(skip(conn))]
	pub async fn exists_for_customer_slot(
		p_id: i32,
		date: NaiveDate,
		time: NaiveTime,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let exists = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::select(diesel::dsl::exists(
					reservation
						.filter(customer_id.eq(p_id))
						.filter(reservation_date.eq(date))
						.filter(reservation_time.eq(time)),
				))
				.get_result(conn)
			})
			.await??;

		Ok(exists)
	}

	/// Delete a [`Reservation`] given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(r_id: Uuid, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::delete(reservation.find(r_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!(
				"no reservation with id {r_id}"
			)));
		}

		info!("deleted reservation with id {r_id}");

		Ok(())
	}
}

/// Reject a reservation date that lies before `today`
///
/// # Errors
/// Fails with [`CreateReservationError::InPast`] for any date before `today`
pub fn check_reservation_date(
	date: NaiveDate,
	today: NaiveDate,
) -> Result<(), Error> {
	if date < today {
		return Err(CreateReservationError::InPast(date).into());
	}

	Ok(())
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub customer_id:      i32,
	pub table_id:         Uuid,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub message:          String,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	///
	/// A concurrent booking for the same customer and slot is rejected by the
	/// `reservation_customer_slot_key` constraint and surfaces as
	/// [`CreateReservationError::AlreadyReserved`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let date = self.reservation_date;
		let time = self.reservation_time;

		let reservation = conn
			.interact(|conn| {
				use self::reservation::dsl::*;

				diesel::insert_into(reservation)
					.values(self)
					.returning(PrimitiveReservation::as_returning())
					.get_result(conn)
			})
			.await?
			.map_err(|e| {
				match &e {
					DieselError::DatabaseError(
						DatabaseErrorKind::UniqueViolation,
						info,
					) if info.constraint_name()
						== Some(CUSTOMER_SLOT_CONSTRAINT) =>
					{
						CreateReservationError::AlreadyReserved { date, time }
							.into()
					},
					_ => Error::from(e),
				}
			})?;

		let reservation = Reservation::get_by_id(reservation.id, conn).await?;

		info!("created reservation {reservation:?}");

		Ok(reservation)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

	#[test]
	fn period_contains() {
		let today = date("2026-05-20");
		let yesterday = date("2026-05-19");
		let tomorrow = date("2026-05-21");

		assert!(ReservationPeriod::Today.contains(today, today));
		assert!(!ReservationPeriod::Today.contains(tomorrow, today));

		assert!(ReservationPeriod::Upcoming.contains(today, today));
		assert!(ReservationPeriod::Upcoming.contains(tomorrow, today));
		assert!(!ReservationPeriod::Upcoming.contains(yesterday, today));

		assert!(ReservationPeriod::Past.contains(yesterday, today));
		assert!(!ReservationPeriod::Past.contains(today, today));
	}

	#[test]
	fn period_deserializes_lowercase() {
		let period: ReservationPeriod =
			serde_json::from_str("\"upcoming\"").unwrap();

		assert_eq!(period, ReservationPeriod::Upcoming);
	}

	#[test]
	fn reservation_date_today_is_accepted() {
		let today = date("2026-05-20");

		assert!(check_reservation_date(today, today).is_ok());
		assert!(check_reservation_date(date("2027-01-01"), today).is_ok());
	}

	#[test]
	fn reservation_date_in_past_is_rejected() {
		let today = date("2026-05-20");
		let err =
			check_reservation_date(date("2026-05-19"), today).unwrap_err();

		assert!(matches!(
			err,
			Error::CreateReservationError(CreateReservationError::InPast(_))
		));
		assert_eq!(err.to_string(), "You can't reserve a table in the past");
	}
}
