use std::sync::{LazyLock, Mutex, MutexGuard};

use common::RedisConn;
use redis::cmd;

/// Redis ships with 16 logical databases
const REDIS_DATABASES: usize = 16;

static REDIS_DATABASE_LOCKS: LazyLock<[Mutex<String>; REDIS_DATABASES]> =
	LazyLock::new(|| {
		let redis_url = std::env::var("REDIS_URL").unwrap();

		std::array::from_fn(|i| Mutex::new(format!("{redis_url}/{i}")))
	});

/// Hands out logical redis databases so parallel tests never share sessions
pub struct RedisProvider;

/// Exclusive access to one logical redis database, flushed on drop
pub struct RedisGuard(MutexGuard<'static, String>);

impl RedisProvider {
	/// Spin over all databases until a free one is found
	pub fn acquire() -> RedisGuard {
		let mut i = 0;

		loop {
			match REDIS_DATABASE_LOCKS[i].try_lock() {
				Ok(lock) => return RedisGuard(lock),
				// A test panicked while holding this database, it gets
				// flushed on drop regardless
				Err(std::sync::TryLockError::Poisoned(e)) => {
					return RedisGuard(e.into_inner());
				},
				Err(std::sync::TryLockError::WouldBlock) => {
					i = (i + 1) % REDIS_DATABASES;
				},
			}
		}
	}
}

impl RedisGuard {
	pub async fn connect(&self) -> RedisConn {
		let client = redis::Client::open(self.0.as_str()).unwrap();

		client.get_multiplexed_async_connection().await.unwrap()
	}
}

impl Drop for RedisGuard {
	fn drop(&mut self) {
		futures::executor::block_on(async {
			let mut conn = self.connect().await;

			let _: () = cmd("FLUSHDB").query_async(&mut conn).await.unwrap();
		});
	}
}
