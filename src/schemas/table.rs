use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use models::{PrimitiveTable, Table, TableUpdate};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;
use validator_derive::Validate;

use crate::schemas::reservation::SlotResponse;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
	pub id:               Uuid,
	pub restaurant_id:    i32,
	pub table_number:     i32,
	pub label:            String,
	pub display:          String,
	pub seats:            i32,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
	pub next_reservation: Option<SlotResponse>,
}

impl From<PrimitiveTable> for TableResponse {
	fn from(value: PrimitiveTable) -> Self {
		Self {
			id:               value.id,
			restaurant_id:    value.restaurant_id,
			table_number:     value.table_number,
			label:            value.label(),
			display:          value.to_string(),
			seats:            value.seats,
			created_at:       value.created_at,
			updated_at:       value.updated_at,
			next_reservation: None,
		}
	}
}

impl From<Table> for TableResponse {
	fn from(value: Table) -> Self { value.table.into() }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
	#[validate(range(
		min = 1,
		message = "table number must be a positive number",
		code = "table-number-range"
	))]
	pub table_number: i32,
	#[validate(range(
		min = 1,
		message = "a table needs at least one seat",
		code = "seats-range"
	))]
	pub seats:        i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableRequest {
	#[validate(range(
		min = 1,
		message = "table number must be a positive number",
		code = "table-number-range"
	))]
	pub table_number: Option<i32>,
	#[validate(range(
		min = 1,
		message = "a table needs at least one seat",
		code = "seats-range"
	))]
	pub seats:        Option<i32>,
}

impl From<UpdateTableRequest> for TableUpdate {
	fn from(value: UpdateTableRequest) -> Self {
		Self { table_number: value.table_number, seats: value.seats }
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct AvailabilityQuery {
	pub date: NaiveDate,
	pub time: NaiveTime,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDeletionResponse {
	pub removed_reservations: usize,
}
