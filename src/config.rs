use axum_extra::extract::cookie::Key;
use common::{DbPool, RedisConn};
use deadpool_diesel::postgres::{Manager, Pool};
use time::Duration;

/// Minimum length of the secret the cookie jar key is derived from
const SECRET_KEY_MIN_LEN: usize = 64;

#[derive(Clone, Debug)]
pub struct Config {
	pub production: bool,

	pub database_url: String,
	pub redis_url:    String,
	pub bind_address: String,

	/// The restaurant this instance serves
	pub restaurant_id: i32,

	pub access_token_name:     String,
	pub access_token_lifetime: Duration,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_default(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or if a variable
	/// can not be parsed
	#[must_use]
	pub fn from_env() -> Self {
		let production = Self::get_env_default("PRODUCTION", "false") == "true";

		let database_url = Self::get_env_var("DATABASE_URL");
		let redis_url = Self::get_env_var("REDIS_URL");
		let bind_address = Self::get_env_default("BIND_ADDRESS", "0.0.0.0:80");

		let restaurant_id = Self::get_env_default("RESTAURANT_ID", "1")
			.parse::<i32>()
			.unwrap_or_else(|_| panic!("RESTAURANT_ID must be an integer"));

		let access_token_name = Self::get_env_default(
			"ACCESS_TOKEN_NAME",
			"restobook_access_token",
		);
		let access_token_lifetime = Duration::minutes(
			Self::get_env_default("ACCESS_TOKEN_LIFETIME_MINUTES", "1440")
				.parse::<i64>()
				.unwrap_or_else(|_| {
					panic!("ACCESS_TOKEN_LIFETIME_MINUTES must be an integer")
				}),
		);

		Self {
			production,
			database_url,
			redis_url,
			bind_address,
			restaurant_id,
			access_token_name,
			access_token_lifetime,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Create a redis connection for the given config
	///
	/// # Panics
	/// Panics if creating the connection fails
	pub async fn create_redis_connection(&self) -> RedisConn {
		let client = redis::Client::open(self.redis_url.to_string()).unwrap();

		client.get_multiplexed_async_connection().await.unwrap()
	}

	/// Derive the key used to encrypt private cookies from `SECRET_KEY`
	///
	/// # Panics
	/// Panics if `SECRET_KEY` is missing or shorter than 64 bytes
	#[must_use]
	pub fn create_cookie_jar_key() -> Key {
		let secret = Self::get_env_var("SECRET_KEY");

		assert!(
			secret.len() >= SECRET_KEY_MIN_LEN,
			"SECRET_KEY must be at least {SECRET_KEY_MIN_LEN} bytes long"
		);

		Key::from(secret.as_bytes())
	}
}
