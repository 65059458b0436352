use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use models::{PrimitiveReservation, PrimitiveTable, Reservation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	#[validate(range(
		min = 1,
		message = "table number must be a positive number",
		code = "table-number-range"
	))]
	pub table_number:     i32,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	#[serde(default)]
	#[validate(length(
		max = 500,
		message = "message can be at most 500 characters long",
		code = "message-length"
	))]
	pub message:          String,
}

/// Confirmation returned after a successful booking
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationConfirmation {
	pub id:               Uuid,
	pub table_number:     i32,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub message:          String,
}

impl From<Reservation> for ReservationConfirmation {
	fn from(value: Reservation) -> Self {
		let reservation = value.reservation;

		Self {
			id:               reservation.id,
			table_number:     value.table.table_number,
			reservation_date: reservation.reservation_date,
			reservation_time: reservation.reservation_time,
			message:          reservation.message,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:               Uuid,
	pub display:          String,
	pub table_id:         Uuid,
	pub table_number:     i32,
	pub customer_id:      i32,
	pub customer:         String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub message:          String,
	pub created_at:       NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
	fn from(value: Reservation) -> Self {
		let display = value.to_string();
		let reservation = value.reservation;

		Self {
			id: reservation.id,
			display,
			table_id: reservation.table_id,
			table_number: value.table.table_number,
			customer_id: reservation.customer_id,
			customer: value.customer.username,
			reservation_date: reservation.reservation_date,
			reservation_time: reservation.reservation_time,
			message: reservation.message,
			created_at: reservation.created_at,
		}
	}
}

/// A date and time a table is taken
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
	pub reservation_id:   Uuid,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
}

impl From<&PrimitiveReservation> for SlotResponse {
	fn from(value: &PrimitiveReservation) -> Self {
		Self {
			reservation_id:   value.id,
			reservation_date: value.reservation_date,
			reservation_time: value.reservation_time,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationResponse {
	pub message:          String,
	pub table_number:     i32,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
}

impl CancellationResponse {
	#[must_use]
	pub fn new(
		table: &PrimitiveTable,
		reservation: &PrimitiveReservation,
	) -> Self {
		let message = format!(
			"Reservation for table {} on {} at {} has been cancelled",
			table.label(),
			reservation.reservation_date,
			reservation.reservation_time,
		);

		Self {
			message,
			table_number: table.table_number,
			reservation_date: reservation.reservation_date,
			reservation_time: reservation.reservation_time,
		}
	}
}
