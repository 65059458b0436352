use axum::http::StatusCode;
use chrono::{Days, NaiveTime};
use restobook::schemas::table::{
	CreateTableRequest,
	TableDeletionResponse,
	TableResponse,
	UpdateTableRequest,
};
use restobook::today;

mod common;

use common::TestEnv;

fn hour(h: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, 0, 0).unwrap() }

#[tokio::test(flavor = "multi_thread")]
async fn get_tables() {
	let env = TestEnv::new().await;

	let response = env.app.get("/tables").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<TableResponse>>();

	assert_eq!(body.len(), 4);
	assert_eq!(body[0].label, "#1".to_string());
	assert_eq!(body[0].display, "Table #1".to_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_table() {
	let env = TestEnv::new().await;

	let table = env.table(2).await;

	let response = env.app.get(&format!("/tables/{}", table.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<TableResponse>();

	assert_eq!(body.table_number, 2);
	assert_eq!(body.seats, 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_table_next_reservation() {
	let env = TestEnv::new().await;

	let tomorrow = today() + Days::new(1);

	env.reserve("alice", 3, today() - Days::new(1), hour(12)).await;
	env.reserve("alice", 3, tomorrow + Days::new(1), hour(12)).await;
	let next = env.reserve("bob", 3, tomorrow, hour(18)).await;

	let table = env.table(3).await;

	let response = env.app.get(&format!("/tables/{}", table.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let slot = response.json::<TableResponse>().next_reservation.unwrap();

	assert_eq!(slot.reservation_id, next.reservation.id);
	assert_eq!(slot.reservation_date, tomorrow);
	assert_eq!(slot.reservation_time, hour(18));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_available_tables() {
	let env = TestEnv::new().await;

	let tomorrow = today() + Days::new(1);

	env.reserve("alice", 1, tomorrow, hour(12)).await;
	env.reserve("bob", 3, tomorrow, hour(12)).await;
	env.reserve("bob", 2, tomorrow, hour(13)).await;

	let response = env
		.app
		.get("/tables/available")
		.add_query_param("date", tomorrow)
		.add_query_param("time", "12:00:00")
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let numbers: Vec<i32> = response
		.json::<Vec<TableResponse>>()
		.iter()
		.map(|t| t.table_number)
		.collect();

	assert_eq!(numbers, vec![2, 4]);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_table() {
	let env = TestEnv::new().await.login("manager").await;

	let response = env
		.app
		.post("/tables")
		.json(&CreateTableRequest { table_number: 5, seats: 8 })
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<TableResponse>();

	assert_eq!(body.table_number, 5);
	assert_eq!(body.restaurant_id, 1);

	let response = env.app.get("/tables").await;

	assert_eq!(response.json::<Vec<TableResponse>>().len(), 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_table_duplicate_number() {
	let env = TestEnv::new().await.login("manager").await;

	let response = env
		.app
		.post("/tables")
		.json(&CreateTableRequest { table_number: 1, seats: 2 })
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_table_no_seats() {
	let env = TestEnv::new().await.login("manager").await;

	let response = env
		.app
		.post("/tables")
		.json(&CreateTableRequest { table_number: 5, seats: 0 })
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_table_as_customer() {
	let env = TestEnv::new().await.login("alice").await;

	let response = env
		.app
		.post("/tables")
		.json(&CreateTableRequest { table_number: 5, seats: 2 })
		.await;

	assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

	let response = env.app.get("/tables").await;

	assert_eq!(response.json::<Vec<TableResponse>>().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_table_as_inactive_admin() {
	let env = TestEnv::new().await.login("retired").await;

	let response = env
		.app
		.post("/tables")
		.json(&CreateTableRequest { table_number: 5, seats: 2 })
		.await;

	assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_table_unauthenticated() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/tables")
		.json(&CreateTableRequest { table_number: 5, seats: 2 })
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_table() {
	let env = TestEnv::new().await.login("admin").await;

	let table = env.table(4).await;

	let response = env
		.app
		.patch(&format!("/tables/{}", table.id))
		.json(&UpdateTableRequest { table_number: None, seats: Some(10) })
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<TableResponse>();

	assert_eq!(body.table_number, 4);
	assert_eq!(body.seats, 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_table_cascades() {
	let env = TestEnv::new().await.login("manager").await;

	let tomorrow = today() + Days::new(1);

	env.reserve("alice", 1, tomorrow, hour(12)).await;
	env.reserve("bob", 1, tomorrow, hour(18)).await;
	env.reserve("bob", 2, tomorrow, hour(12)).await;

	let table = env.table(1).await;

	let response = env.app.delete(&format!("/tables/{}", table.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<TableDeletionResponse>().removed_reservations,
		2
	);

	let remaining = env.reservations().await;

	assert_eq!(remaining.len(), 1);
	assert_eq!(remaining[0].table.table_number, 2);

	let response = env.app.get(&format!("/tables/{}", table.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
