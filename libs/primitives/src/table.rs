use std::fmt;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::dining_table;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical table in the restaurant
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
#[diesel(table_name = dining_table)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveTable {
	pub id:            Uuid,
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub seats:         i32,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl fmt::Display for PrimitiveTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Table {}", self.label())
	}
}

impl PrimitiveTable {
	/// The short label customers know this table by, e.g. `#4`
	#[must_use]
	pub fn label(&self) -> String { format!("#{}", self.table_number) }

	/// Get a [`PrimitiveTable`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(t_id: Uuid, conn: &DbConn) -> Result<Self, Error> {
		let table = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				dining_table
					.find(t_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		table.ok_or_else(|| {
			Error::NotFound(format!("no table with id {t_id}"))
		})
	}

	/// Get a [`PrimitiveTable`] by its table number
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if no table carries this number
	#[instrument(skip(conn))]
	pub async fn get_by_number(
		number: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let table = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				dining_table
					.filter(table_number.eq(number))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		table.ok_or_else(|| {
			Error::NotFound(format!("no table with number {number}"))
		})
	}
}
