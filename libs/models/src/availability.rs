//! Read-only availability queries over a set of tables and reservations
//!
//! These functions never touch the database, the callers decide which rows
//! to load and which date counts as "today".

use chrono::{NaiveDate, NaiveTime};
use primitives::{PrimitiveReservation, PrimitiveTable};
use serde::Serialize;
use uuid::Uuid;

use crate::{Reservation, ReservationPeriod};

/// Anything that occupies a table at a given date and time
pub trait Slotted {
	fn table_id(&self) -> Uuid;
	fn date(&self) -> NaiveDate;
	fn time(&self) -> NaiveTime;
}

impl Slotted for PrimitiveReservation {
	fn table_id(&self) -> Uuid { self.table_id }

	fn date(&self) -> NaiveDate { self.reservation_date }

	fn time(&self) -> NaiveTime { self.reservation_time }
}

impl Slotted for Reservation {
	fn table_id(&self) -> Uuid { self.reservation.table_id }

	fn date(&self) -> NaiveDate { self.reservation.reservation_date }

	fn time(&self) -> NaiveTime { self.reservation.reservation_time }
}

/// Reservations split up by [`ReservationPeriod`]
///
/// The partitions overlap, reservations for today are part of both `today`
/// and `upcoming`
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReservationPartitions<R> {
	pub today:    Vec<R>,
	pub upcoming: Vec<R>,
	pub past:     Vec<R>,
}

impl<R> ReservationPartitions<R> {
	/// Get the partition belonging to a period
	#[must_use]
	pub fn get(&self, period: ReservationPeriod) -> &[R] {
		match period {
			ReservationPeriod::Today => &self.today,
			ReservationPeriod::Upcoming => &self.upcoming,
			ReservationPeriod::Past => &self.past,
		}
	}
}

/// Find the earliest reservation for a table that is not in the past
///
/// Ties are broken by date first and time second, equal slots keep the order
/// in which they were given
pub fn next_reservation<R: Slotted>(
	table_id: Uuid,
	reservations: &[R],
	today: NaiveDate,
) -> Option<&R> {
	reservations
		.iter()
		.filter(|r| r.table_id() == table_id && r.date() >= today)
		.min_by_key(|r| (r.date(), r.time()))
}

/// Split reservations into today/upcoming/past relative to `today`
pub fn partition<R: Slotted + Clone>(
	reservations: &[R],
	today: NaiveDate,
) -> ReservationPartitions<R> {
	let mut partitions = ReservationPartitions {
		today:    vec![],
		upcoming: vec![],
		past:     vec![],
	};

	for reservation in reservations {
		let date = reservation.date();

		if ReservationPeriod::Today.contains(date, today) {
			partitions.today.push(reservation.clone());
		}

		if ReservationPeriod::Upcoming.contains(date, today) {
			partitions.upcoming.push(reservation.clone());
		}

		if ReservationPeriod::Past.contains(date, today) {
			partitions.past.push(reservation.clone());
		}
	}

	partitions
}

/// Get the tables that hold no reservation at exactly this date and time
pub fn free_tables<'t, R: Slotted>(
	tables: &'t [PrimitiveTable],
	reservations: &[R],
	date: NaiveDate,
	time: NaiveTime,
) -> Vec<&'t PrimitiveTable> {
	tables
		.iter()
		.filter(|t| {
			!reservations.iter().any(|r| {
				r.table_id() == t.id && r.date() == date && r.time() == time
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use chrono::{NaiveDateTime, NaiveTime};

	use super::*;

	fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

	fn time(s: &str) -> NaiveTime { s.parse().unwrap() }

	fn created() -> NaiveDateTime {
		date("2026-01-01").and_hms_opt(9, 0, 0).unwrap()
	}

	fn table(number: i32) -> PrimitiveTable {
		PrimitiveTable {
			id:            Uuid::new_v4(),
			restaurant_id: 1,
			table_number:  number,
			seats:         4,
			created_at:    created(),
			updated_at:    created(),
		}
	}

	fn reservation(
		table_id: Uuid,
		customer_id: i32,
		on: &str,
		at: &str,
	) -> PrimitiveReservation {
		PrimitiveReservation {
			id: Uuid::new_v4(),
			customer_id,
			table_id,
			reservation_date: date(on),
			reservation_time: time(at),
			message: String::new(),
			created_at: created(),
		}
	}

	#[test]
	fn next_reservation_picks_earliest_upcoming() {
		let t = table(1);
		let today = date("2026-03-10");

		let reservations = vec![
			reservation(t.id, 1, "2026-03-12", "18:00:00"),
			reservation(t.id, 2, "2026-03-11", "20:00:00"),
			reservation(t.id, 3, "2026-03-11", "12:00:00"),
			reservation(t.id, 4, "2026-03-09", "12:00:00"),
		];

		let next = next_reservation(t.id, &reservations, today).unwrap();

		assert_eq!(next.customer_id, 3);
	}

	#[test]
	fn next_reservation_includes_today() {
		let t = table(1);
		let today = date("2026-03-10");

		let reservations = vec![
			reservation(t.id, 1, "2026-03-11", "10:00:00"),
			reservation(t.id, 2, "2026-03-10", "21:00:00"),
		];

		let next = next_reservation(t.id, &reservations, today).unwrap();

		assert_eq!(next.customer_id, 2);
	}

	#[test]
	fn next_reservation_never_returns_the_past() {
		let t = table(1);
		let today = date("2026-03-10");

		let reservations = vec![
			reservation(t.id, 1, "2026-03-09", "23:00:00"),
			reservation(t.id, 2, "2025-12-31", "12:00:00"),
		];

		assert!(next_reservation(t.id, &reservations, today).is_none());
	}

	#[test]
	fn next_reservation_ignores_other_tables() {
		let a = table(1);
		let b = table(2);
		let today = date("2026-03-10");

		let reservations = vec![
			reservation(b.id, 1, "2026-03-10", "12:00:00"),
			reservation(a.id, 2, "2026-03-15", "12:00:00"),
		];

		let next = next_reservation(a.id, &reservations, today).unwrap();

		assert_eq!(next.customer_id, 2);
	}

	#[test]
	fn partition_overlaps_today_and_upcoming() {
		let t = table(1);
		let today = date("2026-03-10");

		let reservations = vec![
			reservation(t.id, 1, "2026-03-10", "12:00:00"),
			reservation(t.id, 2, "2026-03-11", "12:00:00"),
			reservation(t.id, 3, "2026-03-09", "12:00:00"),
		];

		let parts = partition(&reservations, today);

		let ids = |rs: &[PrimitiveReservation]| {
			rs.iter().map(|r| r.customer_id).collect::<Vec<_>>()
		};

		assert_eq!(ids(&parts.today), vec![1]);
		assert_eq!(ids(&parts.upcoming), vec![1, 2]);
		assert_eq!(ids(&parts.past), vec![3]);
		assert_eq!(parts.get(ReservationPeriod::Upcoming).len(), 2);
	}

	#[test]
	fn partition_of_nothing_is_empty() {
		let parts = partition::<PrimitiveReservation>(&[], date("2026-03-10"));

		assert!(parts.today.is_empty());
		assert!(parts.upcoming.is_empty());
		assert!(parts.past.is_empty());
	}

	#[test]
	fn free_tables_excludes_exact_slot_only() {
		let tables = vec![table(1), table(2), table(3)];

		let reservations = vec![
			reservation(tables[0].id, 1, "2026-03-10", "12:00:00"),
			reservation(tables[1].id, 2, "2026-03-10", "12:30:00"),
			reservation(tables[2].id, 3, "2026-03-11", "12:00:00"),
		];

		let free = free_tables(
			&tables,
			&reservations,
			date("2026-03-10"),
			time("12:00:00"),
		);

		let numbers: Vec<_> = free.iter().map(|t| t.table_number).collect();

		assert_eq!(numbers, vec![2, 3]);
	}
}
