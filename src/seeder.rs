use std::path::PathBuf;

use chrono::NaiveTime;
use common::{DbConn, Error};
use db::{dining_table, profile, restaurant, restaurant_admin};
use diesel::prelude::*;
use models::Profile;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub struct Seeder<'c> {
	connection: &'c DbConn,
}

impl<'c> Seeder<'c> {
	#[must_use]
	pub fn new(connection: &'c DbConn) -> Self { Self { connection } }

	/// Read a file into a series of deserializable items
	///
	/// # Panics
	/// Panics if reading or deserializing the file fails
	fn read_file_records<T, I>(filename: &str) -> I
	where
		T: DeserializeOwned,
		I: IntoIterator<Item = T> + DeserializeOwned,
	{
		let path = std::env::var("CARGO_MANIFEST_DIR")
			.map(PathBuf::from)
			.unwrap_or_default()
			.join(filename);

		let s = std::fs::read_to_string(path)
			.unwrap_or_else(|_| panic!("COULD NOT READ SEED FILE {filename}"));

		serde_json::from_str(&s)
			.unwrap_or_else(|_| panic!("COULD NOT MAP SEED FILE {filename}"))
	}

	/// Load a file and populate the database with it
	///
	/// # Panics
	/// Panics if reading the file or interacting with the database fails
	pub async fn populate<T, F>(&self, filename: &str, loader: F) -> &Self
	where
		T: DeserializeOwned + std::fmt::Debug,
		F: AsyncFnOnce(&DbConn, Vec<T>) -> Result<(), Error>,
	{
		let records = Self::read_file_records(filename);

		loader(self.connection, records).await.unwrap_or_else(|e| {
			panic!("COULD NOT LOAD RECORDS FOR {filename} -- {e:?}")
		});

		info!("seeded database from {filename}");

		self
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRestaurantAdmin {
	pub name:      String,
	pub role:      String,
	pub phone:     String,
	#[serde(default = "SeedRestaurantAdmin::default_active")]
	pub is_active: bool,
}

impl SeedRestaurantAdmin {
	fn default_active() -> bool { true }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProfile {
	pub username:         String,
	pub password:         String,
	pub email:            Option<String>,
	pub name:             Option<String>,
	pub phone:            Option<String>,
	#[serde(default)]
	pub is_superuser:     bool,
	pub restaurant_admin: Option<SeedRestaurantAdmin>,
}

#[derive(Clone, Debug, Insertable, AsChangeset)]
#[diesel(table_name = profile)]
struct InsertableSeedProfile {
	username:      String,
	password_hash: String,
	email:         Option<String>,
	name:          Option<String>,
	phone:         Option<String>,
	is_superuser:  bool,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = restaurant_admin)]
struct InsertableSeedRestaurantAdmin {
	profile_id: i32,
	name:       String,
	role:       String,
	phone:      String,
	is_active:  bool,
}

impl SeedProfile {
	/// Insert this [`SeedProfile`] and its restaurant admin record, if any
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let hash = Profile::hash_password(&self.password)?;
		let insertable = InsertableSeedProfile {
			username:      self.username,
			password_hash: hash,
			email:         self.email,
			name:          self.name,
			phone:         self.phone,
			is_superuser:  self.is_superuser,
		};

		let admin = self.restaurant_admin;

		conn.interact(|conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let p_id = diesel::insert_into(profile::table)
					.values(insertable.clone())
					.on_conflict(profile::username)
					.do_update()
					.set(insertable)
					.returning(profile::id)
					.get_result(conn)?;

				if let Some(admin) = admin {
					let admin = InsertableSeedRestaurantAdmin {
						profile_id: p_id,
						name:       admin.name,
						role:       admin.role,
						phone:      admin.phone,
						is_active:  admin.is_active,
					};

					diesel::insert_into(restaurant_admin::table)
						.values(admin)
						.on_conflict_do_nothing()
						.execute(conn)?;
				}

				Ok(())
			})
		})
		.await??;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTable {
	pub table_number: i32,
	pub seats:        i32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRestaurant {
	pub name:           String,
	pub opening_hour:   NaiveTime,
	pub closing_hour:   NaiveTime,
	pub email:          Option<String>,
	pub contact_number: Option<String>,
	#[serde(default)]
	pub tables:         Vec<SeedTable>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = restaurant)]
struct InsertableSeedRestaurant {
	name:           String,
	opening_hour:   NaiveTime,
	closing_hour:   NaiveTime,
	email:          Option<String>,
	contact_number: Option<String>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = dining_table)]
struct InsertableSeedTable {
	restaurant_id: i32,
	table_number:  i32,
	seats:         i32,
}

impl SeedRestaurant {
	/// Insert this [`SeedRestaurant`] together with its tables
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let insertable = InsertableSeedRestaurant {
			name:           self.name,
			opening_hour:   self.opening_hour,
			closing_hour:   self.closing_hour,
			email:          self.email,
			contact_number: self.contact_number,
		};

		let tables = self.tables;

		conn.interact(|conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let r_id = diesel::insert_into(restaurant::table)
					.values(insertable)
					.returning(restaurant::id)
					.get_result(conn)?;

				let tables: Vec<_> = tables
					.into_iter()
					.map(|t| {
						InsertableSeedTable {
							restaurant_id: r_id,
							table_number:  t.table_number,
							seats:         t.seats,
						}
					})
					.collect();

				diesel::insert_into(dining_table::table)
					.values(tables)
					.execute(conn)?;

				Ok(())
			})
		})
		.await??;

		Ok(())
	}
}
