mod util;

use std::collections::HashSet;
use std::env;

use chrono::{Days, Local, NaiveDate, NaiveTime};
use clap::error::ErrorKind;
use clap::{Error, Parser};
use common::DbConn;
use db::{dining_table, profile, reservation};
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::prelude::*;
use fake::Fake;
use fake::faker::internet::raw::{FreeEmail, Username};
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::Name;
use fake::locales::EN;
use models::{NewReservation, Profile};
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use uuid::Uuid;

use crate::util::{batch_insert, generate_unique_set};

/// Password every generated customer can log in with
const CUSTOMER_PASSWORD: &str = "restobook-password";

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'c', default_value_t = 1_000)]
	customers:    usize,
	#[arg(long, short = 'r', default_value_t = 10_000)]
	reservations: usize,
	/// How many days around today reservations are spread over
	#[arg(long, short = 'd', default_value_t = 30)]
	days:         u64,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	if cli.customers > 0 {
		println!("Seeding {} customers…", cli.customers);
		let inserted = seed_customers(&conn, cli.customers).await?;
		println!("Inserted {inserted} unique customers");
	}

	if cli.reservations > 0 {
		println!("Seeding {} reservations…", cli.reservations);
		let inserted =
			seed_reservations(&conn, cli.reservations, cli.days).await?;
		println!("Inserted {inserted} reservations");
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

fn io_error<E: std::fmt::Display>(e: E) -> Error {
	Error::raw(ErrorKind::Io, e.to_string())
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = profile)]
struct NewCustomer {
	username:      String,
	password_hash: String,
	email:         Option<String>,
	name:          Option<String>,
	phone:         Option<String>,
}

/// Seed customers with unique usernames and emails
async fn seed_customers(conn: &DbConn, count: usize) -> Result<usize, Error> {
	// Hashing is slow, every customer shares the same password
	let password_hash =
		Profile::hash_password(CUSTOMER_PASSWORD).map_err(io_error)?;

	let usernames =
		generate_unique_set(count, || Username(EN).fake::<String>());
	let emails = generate_unique_set(count, || FreeEmail(EN).fake::<String>());

	let mut rng = rng();

	let customers: Vec<NewCustomer> = usernames
		.into_iter()
		.zip(emails)
		.map(|(username, email)| {
			let phone = format!("080{:08}", rng.random_range(0..100_000_000));

			NewCustomer {
				username,
				password_hash: password_hash.clone(),
				email: Some(email),
				name: Some(Name(EN).fake()),
				phone: Some(phone),
			}
		})
		.collect();

	batch_insert(conn, customers, 8192, |conn, chunk| {
		diesel::insert_into(profile::table).values(chunk).execute(conn)
	})
	.await
}

/// Pick a random slot on the half hour between 10:00 and 20:00
fn random_time(rng: &mut impl Rng) -> NaiveTime {
	let hour = rng.random_range(10..20);
	let minute = if rng.random_bool(0.5) { 0 } else { 30 };

	NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Pick a random date at most `days` away from today
fn random_date(rng: &mut impl Rng, today: NaiveDate, days: u64) -> NaiveDate {
	let offset = Days::new(rng.random_range(0..=days));

	if rng.random_bool(0.5) { today + offset } else { today - offset }
}

/// Seed reservations for random customers on random tables
///
/// A customer never gets two reservations at the same date and time
async fn seed_reservations(
	conn: &DbConn,
	count: usize,
	days: u64,
) -> Result<usize, Error> {
	let customer_ids: Vec<i32> = conn
		.interact(|c| profile::table.select(profile::id).load::<i32>(c))
		.await
		.map_err(io_error)?
		.map_err(io_error)?;

	let table_ids: Vec<Uuid> = conn
		.interact(|c| {
			dining_table::table.select(dining_table::id).load::<Uuid>(c)
		})
		.await
		.map_err(io_error)?
		.map_err(io_error)?;

	if customer_ids.is_empty() || table_ids.is_empty() {
		return Err(Error::raw(
			ErrorKind::Io,
			"reservations need at least one customer and one table",
		));
	}

	let today = Local::now().date_naive();
	let mut rng = rng();
	let mut slots = HashSet::with_capacity(count);
	let mut attempts = 0;

	// Give up eventually if the date range is too small to fit every slot
	while slots.len() < count && attempts < count * 10 {
		attempts += 1;

		let customer_id = *customer_ids.choose(&mut rng).unwrap_or(&0);
		let date = random_date(&mut rng, today, days);
		let time = random_time(&mut rng);

		slots.insert((customer_id, date, time));
	}

	let reservations: Vec<NewReservation> = slots
		.into_iter()
		.map(|(customer_id, reservation_date, reservation_time)| {
			let table_id = *table_ids.choose(&mut rng).unwrap_or(&Uuid::nil());

			let message = if rng.random_bool(0.3) {
				Sentence(EN, 3..8).fake()
			} else {
				String::new()
			};

			NewReservation {
				customer_id,
				table_id,
				reservation_date,
				reservation_time,
				message,
			}
		})
		.collect();

	batch_insert(conn, reservations, 4096, |conn, chunk| {
		diesel::insert_into(reservation::table).values(chunk).execute(conn)
	})
	.await
}
