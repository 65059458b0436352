use ::common::{CreateReservationError, Error};
use axum::http::StatusCode;
use chrono::{Days, NaiveTime};
use models::NewReservation;
use restobook::schemas::reservation::{
	CancellationResponse,
	CreateReservationRequest,
	ReservationConfirmation,
	ReservationResponse,
};
use restobook::today;

mod common;

use common::TestEnv;

fn hour(h: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, 0, 0).unwrap() }

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation() {
	let env = TestEnv::new().await.login("alice").await;

	let next_week = today() + Days::new(7);

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     1,
			reservation_date: next_week,
			reservation_time: hour(12),
			message:          "window seat please".to_string(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<ReservationConfirmation>();

	assert_eq!(body.table_number, 1);
	assert_eq!(body.reservation_date, next_week);
	assert_eq!(body.reservation_time, hour(12));

	let stored = env.reservations().await;

	assert_eq!(stored.len(), 1);
	assert_eq!(stored[0].reservation.id, body.id);
	assert_eq!(stored[0].reservation.reservation_date, next_week);
	assert_eq!(stored[0].reservation.reservation_time, hour(12));
	assert_eq!(stored[0].reservation.message, "window seat please");
	assert_eq!(stored[0].customer.username, "alice");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_today() {
	let env = TestEnv::new().await.login("alice").await;

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     2,
			reservation_date: today(),
			reservation_time: hour(19),
			message:          String::new(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_without_message() {
	let env = TestEnv::new().await.login("alice").await;

	let date = today() + Days::new(2);

	let response = env
		.app
		.post("/reservations")
		.json(&serde_json::json!({
			"tableNumber": 3,
			"reservationDate": date,
			"reservationTime": "18:30:00",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(response.json::<ReservationConfirmation>().message, "");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_duplicate() {
	let env = TestEnv::new().await.login("alice").await;

	let request = CreateReservationRequest {
		table_number:     1,
		reservation_date: today() + Days::new(7),
		reservation_time: hour(12),
		message:          String::new(),
	};

	let response = env.app.post("/reservations").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env.app.post("/reservations").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
	assert_eq!(env.reservations().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn insert_duplicate_slot_rejected_by_database() {
	let env = TestEnv::new().await;

	let customer = env.profile("alice").await;
	let first = env.table(1).await;
	let second = env.table(2).await;
	let date = today() + Days::new(7);

	let conn = env.conn().await;

	NewReservation {
		customer_id:      customer.profile.id,
		table_id:         first.id,
		reservation_date: date,
		reservation_time: hour(12),
		message:          String::new(),
	}
	.insert(&conn)
	.await
	.unwrap();

	// Skips the existence check done by the booking endpoint
	let result = NewReservation {
		customer_id:      customer.profile.id,
		table_id:         second.id,
		reservation_date: date,
		reservation_time: hour(12),
		message:          String::new(),
	}
	.insert(&conn)
	.await;

	assert!(matches!(
		result,
		Err(Error::CreateReservationError(
			CreateReservationError::AlreadyReserved { date: d, time: t }
		)) if d == date && t == hour(12)
	));
	assert_eq!(env.reservations().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_same_slot_other_table() {
	let env = TestEnv::new().await.login("alice").await;

	let date = today() + Days::new(7);

	env.reserve("alice", 1, date, hour(12)).await;

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     2,
			reservation_date: date,
			reservation_time: hour(12),
			message:          String::new(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
	assert_eq!(env.reservations().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_same_table_other_customer() {
	let env = TestEnv::new().await.login("alice").await;

	let date = today() + Days::new(7);

	env.reserve("bob", 1, date, hour(12)).await;

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     1,
			reservation_date: date,
			reservation_time: hour(12),
			message:          String::new(),
		})
		.await;

	// Only the customer, date and time are unique, tables can be double
	// booked
	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(env.reservations().await.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_in_past() {
	let env = TestEnv::new().await.login("alice").await;

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     1,
			reservation_date: today() - Days::new(1),
			reservation_time: hour(12),
			message:          String::new(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	assert!(response.text().contains("You can't reserve a table in the past"));
	assert!(env.reservations().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_unknown_table() {
	let env = TestEnv::new().await.login("alice").await;

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     42,
			reservation_date: today() + Days::new(1),
			reservation_time: hour(12),
			message:          String::new(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
	assert!(env.reservations().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_unauthenticated() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/reservations")
		.json(&CreateReservationRequest {
			table_number:     1,
			reservation_date: today() + Days::new(1),
			reservation_time: hour(12),
			message:          String::new(),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
	assert!(env.reservations().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_own_reservations() {
	let env = TestEnv::new().await.login("bob").await;

	let tomorrow = today() + Days::new(1);

	env.reserve("bob", 2, tomorrow + Days::new(1), hour(12)).await;
	env.reserve("bob", 1, tomorrow, hour(19)).await;
	env.reserve("bob", 1, tomorrow, hour(12)).await;
	env.reserve("alice", 3, tomorrow, hour(12)).await;

	let response = env.app.get("/reservations/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<ReservationResponse>>();

	let slots: Vec<_> = body
		.iter()
		.map(|r| (r.reservation_date, r.reservation_time))
		.collect();

	assert_eq!(slots, vec![
		(tomorrow, hour(12)),
		(tomorrow, hour(19)),
		(tomorrow + Days::new(1), hour(12)),
	]);
	assert_eq!(body[0].display, "bob's reservation for #1".to_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_reservation() {
	let env = TestEnv::new().await.login("alice").await;

	let date = today() + Days::new(3);

	let kept = env.reserve("alice", 1, date, hour(12)).await;
	let cancelled = env.reserve("alice", 4, date, hour(19)).await;
	let other = env.reserve("bob", 4, date, hour(19)).await;

	let response = env
		.app
		.delete(&format!("/reservations/{}", cancelled.reservation.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<CancellationResponse>();

	assert_eq!(body.table_number, 4);
	assert_eq!(
		body.message,
		format!(
			"Reservation for table #4 on {date} at 19:00:00 has been \
			 cancelled"
		)
	);

	let mut remaining: Vec<_> = env
		.reservations()
		.await
		.into_iter()
		.map(|r| r.reservation.id)
		.collect();
	remaining.sort();

	let mut expected = vec![kept.reservation.id, other.reservation.id];
	expected.sort();

	assert_eq!(remaining, expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_reservation_of_other_customer() {
	let env = TestEnv::new().await.login("alice").await;

	let reservation =
		env.reserve("bob", 1, today() + Days::new(1), hour(12)).await;

	let response = env
		.app
		.delete(&format!("/reservations/{}", reservation.reservation.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
	assert_eq!(env.reservations().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_reservation_as_restaurant_admin() {
	let env = TestEnv::new().await.login("manager").await;

	let reservation =
		env.reserve("bob", 1, today() + Days::new(1), hour(12)).await;

	let response = env
		.app
		.delete(&format!("/reservations/{}", reservation.reservation.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(env.reservations().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_unknown_reservation() {
	let env = TestEnv::new().await.login("alice").await;

	let response = env
		.app
		.delete(&format!("/reservations/{}", uuid::Uuid::new_v4()))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
