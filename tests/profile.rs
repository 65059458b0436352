use axum::http::StatusCode;
use restobook::schemas::auth::LoginRequest;
use chrono::{Days, NaiveTime};
use restobook::schemas::profile::{
	ProfileDeletionResponse,
	ProfileResponse,
	UpdateProfileRequest,
};
use restobook::today;

mod common;

use common::{SEED_PASSWORD, TestEnv};

#[tokio::test(flavor = "multi_thread")]
async fn get_current_profile() {
	let env = TestEnv::new().await.login("manager").await;

	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ProfileResponse>();

	assert_eq!(body.username, "manager".to_string());
	assert!(body.is_radmin);
	assert!(!body.is_superuser);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_current_profile_unauthenticated() {
	let env = TestEnv::new().await;

	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_current_profile() {
	let env = TestEnv::new().await.login("bob").await;

	let response = env
		.app
		.patch("/profile/me")
		.json(&UpdateProfileRequest {
			email: None,
			name:  Some("Robert Customer".to_string()),
			phone: Some("08044444444".to_string()),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ProfileResponse>();

	assert_eq!(body.name, Some("Robert Customer".to_string()));
	assert_eq!(body.phone, Some("08044444444".to_string()));
	assert_eq!(body.email, Some("bob@restobook.test".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_current_profile_invalid_phone() {
	let env = TestEnv::new().await.login("bob").await;

	let response = env
		.app
		.patch("/profile/me")
		.json(&UpdateProfileRequest {
			email: None,
			name:  None,
			phone: Some("+32 123".to_string()),
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_current_profile_invalid_name() {
	let env = TestEnv::new().await.login("bob").await;

	let response = env
		.app
		.patch("/profile/me")
		.json(&UpdateProfileRequest {
			email: None,
			name:  Some("b0b".to_string()),
			phone: None,
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_current_profile() {
	let env = TestEnv::new().await.login("alice").await;

	let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
	let tomorrow = today() + Days::new(1);

	env.reserve("alice", 1, tomorrow, noon).await;
	env.reserve("alice", 2, tomorrow + Days::new(1), noon).await;
	env.reserve("bob", 3, tomorrow, noon).await;

	let response = env.app.delete("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ProfileDeletionResponse>();

	assert_eq!(body.removed_reservations, 2);
	assert!(!body.was_restaurant_admin);

	let remaining = env.reservations().await;

	assert_eq!(remaining.len(), 1);
	assert_eq!(remaining[0].customer.username, "bob");

	let response = env.app.get("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_current_profile_restaurant_admin() {
	let env = TestEnv::new().await.login("manager").await;

	let response = env.app.delete("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ProfileDeletionResponse>();

	assert_eq!(body.removed_reservations, 0);
	assert!(body.was_restaurant_admin);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_current_profile_revokes_other_sessions() {
	let env = TestEnv::new().await;

	let login = LoginRequest {
		username: "alice".to_string(),
		password: SEED_PASSWORD.to_string(),
	};

	// Two separate logins, e.g. from a phone and a laptop
	let response = env.app.post("/auth/login").json(&login).await;
	let other_device = response.cookie("restobook_access_token");

	let response = env.app.post("/auth/login").json(&login).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env.app.delete("/profile/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env
		.app
		.get("/profile/me")
		.clear_cookies()
		.add_cookie(other_device)
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
