use chrono::{NaiveDate, NaiveTime};
use common::{DbConn, Error};
use db::{dining_table, reservation, restaurant};
use diesel::prelude::*;
use primitives::{PrimitiveRestaurant, PrimitiveTable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Reservation, free_tables};

pub type JoinedTableData = (PrimitiveTable, PrimitiveRestaurant);

/// A table together with the restaurant it belongs to
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Table {
	pub table:      PrimitiveTable,
	pub restaurant: PrimitiveRestaurant,
}

impl Table {
	#[diesel::dsl::auto_type(no_type_alias)]
	fn joined_query() -> _ {
		let restaurant_join = restaurant::table
			.on(dining_table::restaurant_id.eq(restaurant::id));

		dining_table::table.inner_join(restaurant_join)
	}

	fn from_joined(data: JoinedTableData) -> Self {
		Self { table: data.0, restaurant: data.1 }
	}

	/// Get a [`Table`] given its id
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if no table with this id exists
	#[instrument(skip(conn))]
	pub async fn get_by_id(t_id: Uuid, conn: &DbConn) -> Result<Self, Error> {
		let query = Self::joined_query();

		let table = conn
			.interact(move |conn| {
				query
					.filter(dining_table::id.eq(t_id))
					.select((
						PrimitiveTable::as_select(),
						PrimitiveRestaurant::as_select(),
					))
					.get_result(conn)
					.optional()
			})
			.await??
			.map(Self::from_joined);

		table.ok_or_else(|| {
			Error::NotFound(format!("no table with id {t_id}"))
		})
	}

	/// Get all the tables of a restaurant ordered by their table number
	#[instrument(skip(conn))]
	pub async fn get_all(r_id: i32, conn: &DbConn) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let tables = conn
			.interact(move |conn| {
				query
					.filter(dining_table::restaurant_id.eq(r_id))
					.order(dining_table::table_number)
					.select((
						PrimitiveTable::as_select(),
						PrimitiveRestaurant::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(tables)
	}

	/// Get the tables of a restaurant that are free at exactly this date and
	/// time
	#[instrument(skip(conn))]
	pub async fn available_at(
		r_id: i32,
		date: NaiveDate,
		time: NaiveTime,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveTable>, Error> {
		let tables = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				dining_table
					.filter(restaurant_id.eq(r_id))
					.order(table_number)
					.select(PrimitiveTable::as_select())
					.get_results(conn)
			})
			.await??;

		let taken = Reservation::on_slot(date, time, conn).await?;

		let free = free_tables(&tables, &taken, date, time)
			.into_iter()
			.cloned()
			.collect();

		Ok(free)
	}

	/// Delete a [`Table`] and every reservation held on it
	///
	/// Returns the amount of reservations that were removed
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		t_id: Uuid,
		conn: &DbConn,
	) -> Result<usize, Error> {
		let (tables, reservations) = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let reservations = diesel::delete(
						reservation::table
							.filter(reservation::table_id.eq(t_id)),
					)
					.execute(conn)?;

					let tables =
						diesel::delete(dining_table::table.find(t_id))
							.execute(conn)?;

					Ok((tables, reservations))
				})
			})
			.await??;

		if tables == 0 {
			return Err(Error::NotFound(format!("no table with id {t_id}")));
		}

		info!(
			"deleted table with id {t_id} along with {reservations} \
			 reservations"
		);

		Ok(reservations)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = dining_table)]
#[diesel(check_for_backend(Pg))]
pub struct NewTable {
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub seats:         i32,
}

impl NewTable {
	/// Insert this [`NewTable`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Table, Error> {
		let table = conn
			.interact(|conn| {
				use self::dining_table::dsl::*;

				diesel::insert_into(dining_table)
					.values(self)
					.returning(PrimitiveTable::as_returning())
					.get_result(conn)
			})
			.await??;

		let table = Table::get_by_id(table.id, conn).await?;

		info!("created table {}", table.table);

		Ok(table)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = dining_table)]
pub struct TableUpdate {
	pub table_number: Option<i32>,
	pub seats:        Option<i32>,
}

impl TableUpdate {
	/// Update the [`Table`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		t_id: Uuid,
		conn: &DbConn,
	) -> Result<Table, Error> {
		let table = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				diesel::update(dining_table.find(t_id))
					.set((self, updated_at.eq(diesel::dsl::now)))
					.returning(PrimitiveTable::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??;

		let Some(table) = table else {
			return Err(Error::NotFound(format!("no table with id {t_id}")));
		};

		let table = Table::get_by_id(table.id, conn).await?;

		info!("updated table {}", table.table);

		Ok(table)
	}
}
