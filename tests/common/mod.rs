use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};
use common::{DbConn, DbPool};
use models::{NewReservation, PrimitiveTable, Profile, Reservation};
use restobook::schemas::auth::LoginRequest;
use restobook::{AppState, Config, SeedProfile, SeedRestaurant, Seeder, routes};

mod mock_db;
mod mock_redis;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};
use mock_redis::{RedisGuard, RedisProvider};

/// Password shared by every seeded profile
pub const SEED_PASSWORD: &str = "restobook-password";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:         TestServer,
	pub db_guard:    DatabaseGuard,
	pub redis_guard: RedisGuard,
}

#[allow(dead_code)]
impl TestEnv {
	/// Get a test environment with mocked resources for running tests
	///
	/// # Panics
	/// Panics if building a test server fails
	pub async fn new() -> Self {
		let config = Config { restaurant_id: 1, ..Config::from_env() };

		let db_guard = (*DATABASE_PROVIDER).acquire().await;

		{
			let conn = db_guard.pool.get().await.unwrap();
			let seeder = Seeder::new(&conn);

			seeder
				.populate("seed/profiles.json", async |conn, profiles| {
					for profile in profiles {
						SeedProfile::insert(profile, conn).await?;
					}

					Ok(())
				})
				.await
				.populate("seed/restaurants.json", async |conn, restaurants| {
					for restaurant in restaurants {
						SeedRestaurant::insert(restaurant, conn).await?;
					}

					Ok(())
				})
				.await;
		}

		let redis_guard = RedisProvider::acquire();
		let redis_connection = redis_guard.connect().await;

		let cookie_jar_key = Key::from(&[0u8; 64]);

		let state = AppState {
			config,
			database_pool: db_guard.pool.clone(),
			redis_connection,
			cookie_jar_key,
		};
		let app = routes::get_app_router(state);

		let app = TestServer::builder().save_cookies().build(app).unwrap();

		TestEnv { app, db_guard, redis_guard }
	}

	/// Log in as one of the seeded profiles
	///
	/// # Panics
	/// Panics if logging in fails
	pub async fn login(self, username: &str) -> Self {
		let response = self
			.app
			.post("/auth/login")
			.json(&LoginRequest {
				username: username.to_string(),
				password: SEED_PASSWORD.to_string(),
			})
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);

		self
	}

	pub fn pool(&self) -> &DbPool { &self.db_guard.pool }

	pub async fn conn(&self) -> DbConn { self.pool().get().await.unwrap() }

	pub async fn profile(&self, username: &str) -> Profile {
		let conn = self.conn().await;

		Profile::get_by_username(username.to_string(), &conn).await.unwrap()
	}

	pub async fn table(&self, number: i32) -> PrimitiveTable {
		let conn = self.conn().await;

		PrimitiveTable::get_by_number(number, &conn).await.unwrap()
	}

	/// Store a reservation without going through the booking checks
	pub async fn reserve(
		&self,
		username: &str,
		table_number: i32,
		date: NaiveDate,
		time: NaiveTime,
	) -> Reservation {
		let customer = self.profile(username).await;
		let table = self.table(table_number).await;

		let conn = self.conn().await;

		NewReservation {
			customer_id:      customer.profile.id,
			table_id:         table.id,
			reservation_date: date,
			reservation_time: time,
			message:          String::new(),
		}
		.insert(&conn)
		.await
		.unwrap()
	}

	pub async fn reservations(&self) -> Vec<Reservation> {
		let conn = self.conn().await;

		Reservation::get_all(&conn).await.unwrap()
	}
}
