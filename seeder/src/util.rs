use std::collections::HashSet;

use clap::Error;
use clap::error::ErrorKind;
use common::DbConn;
use diesel::PgConnection;
use rand::distr::Alphanumeric;
use rand::{Rng, rng};

/// Generate `count` unique strings, suffixing each generated value with a
/// short random tag so small fake pools don't run dry
pub fn generate_unique_set<F>(count: usize, mut f: F) -> Vec<String>
where
	F: FnMut() -> String,
{
	let mut set = HashSet::with_capacity(count);
	let mut rng = rng();

	while set.len() < count {
		let raw = f();
		let tag: String =
			(0..6).map(|_| rng.sample(Alphanumeric) as char).collect();

		let value = match raw.split_once('@') {
			Some((local, domain)) => format!("{local}.{tag}@{domain}"),
			None => format!("{raw}_{tag}"),
		};

		set.insert(value);
	}

	set.into_iter().collect()
}

/// Insert `items` in chunks of `chunk_size`, each chunk on its own
/// round trip
///
/// Fails as soon as a chunk inserts fewer rows than it holds
pub async fn batch_insert<T, F>(
	conn: &DbConn,
	mut items: Vec<T>,
	chunk_size: usize,
	inserter: F,
) -> Result<usize, Error>
where
	T: Send + 'static,
	F: Fn(&mut PgConnection, &[T]) -> Result<usize, diesel::result::Error>
		+ Send
		+ Copy
		+ 'static,
{
	let size = items.len();
	let mut total = 0;

	while !items.is_empty() {
		let chunk: Vec<T> =
			items.drain(..chunk_size.min(items.len())).collect();
		let expected = chunk.len();

		let inserted = conn
			.interact(move |c| inserter(c, &chunk))
			.await
			.map_err(|e| Error::raw(ErrorKind::Io, e))?
			.map_err(|e| Error::raw(ErrorKind::Io, e))?;

		total += inserted;

		println!("  {total}/{size}");

		if inserted != expected {
			return Err(Error::raw(
				ErrorKind::Io,
				format!("chunk of {expected} only inserted {inserted} rows"),
			));
		}
	}

	Ok(total)
}
