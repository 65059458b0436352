use chrono::NaiveTime;
use common::{DbConn, Error};
use db::{dining_table, reservation, restaurant};
use diesel::prelude::*;
use primitives::{PrimitiveRestaurant, PrimitiveTable};
use serde::{Deserialize, Serialize};

/// The restaurant along with all of its tables
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Restaurant {
	pub restaurant: PrimitiveRestaurant,
	pub tables:     Vec<PrimitiveTable>,
}

/// What was removed when deleting a [`Restaurant`]
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDeletion {
	pub tables:       usize,
	pub reservations: usize,
}

impl Restaurant {
	/// Get the [`Restaurant`] with the given id and its tables ordered by
	/// table number
	///
	/// # Errors
	/// Fails with [`Error::NotFound`] if no restaurant with this id exists
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let restaurant = PrimitiveRestaurant::get_by_id(r_id, conn).await?;

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

		Ok(Self { restaurant, tables })
	}

	/// Delete a [`Restaurant`] together with its tables and their
	/// reservations
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		r_id: i32,
		conn: &DbConn,
	) -> Result<RestaurantDeletion, Error> {
		let (restaurants, deletion) = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let table_ids = dining_table::table
						.filter(dining_table::restaurant_id.eq(r_id))
						.select(dining_table::id);

					let reservations = diesel::delete(
						reservation::table
							.filter(reservation::table_id.eq_any(table_ids)),
					)
					.execute(conn)?;

					let tables = diesel::delete(
						dining_table::table
							.filter(dining_table::restaurant_id.eq(r_id)),
					)
					.execute(conn)?;

					let restaurants =
						diesel::delete(restaurant::table.find(r_id))
							.execute(conn)?;

					let deletion = RestaurantDeletion { tables, reservations };

					Ok((restaurants, deletion))
				})
			})
			.await??;

		if restaurants == 0 {
			return Err(Error::NotFound(format!(
				"no restaurant with id {r_id}"
			)));
		}

		info!("deleted restaurant with id {r_id} -- {deletion:?}");

		Ok(deletion)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(Pg))]
pub struct NewRestaurant {
	pub name:           String,
	pub opening_hour:   NaiveTime,
	pub closing_hour:   NaiveTime,
	pub email:          Option<String>,
	pub contact_number: Option<String>,
}

impl NewRestaurant {
	/// Insert this [`NewRestaurant`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Restaurant, Error> {
		let restaurant = conn
			.interact(|conn| {
				use self::restaurant::dsl::*;

				diesel::insert_into(restaurant)
					.values(self)
					.returning(PrimitiveRestaurant::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created restaurant {restaurant} with id {}", restaurant.id);

		Ok(Restaurant { restaurant, tables: vec![] })
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = restaurant)]
pub struct RestaurantUpdate {
	pub name:           Option<String>,
	pub opening_hour:   Option<NaiveTime>,
	pub closing_hour:   Option<NaiveTime>,
	pub email:          Option<String>,
	pub contact_number: Option<String>,
}

impl RestaurantUpdate {
	/// Update the [`Restaurant`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<Restaurant, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				diesel::update(restaurant.find(r_id))
					.set((self, updated_at.eq(diesel::dsl::now)))
					.execute(conn)
			})
			.await??;

		if updated == 0 {
			return Err(Error::NotFound(format!(
				"no restaurant with id {r_id}"
			)));
		}

		let restaurant = Restaurant::get_by_id(r_id, conn).await?;

		info!("updated restaurant {}", restaurant.restaurant);

		Ok(restaurant)
	}
}
