//! Controllers for the restaurant management dashboard

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbConn, DbPool, Error, LoginError};
use models::{
	NewRestaurantAdmin,
	Profile,
	Reservation,
	ReservationFilter,
	ReservationPeriod,
	Restaurant,
	RestaurantAdmin,
	RestaurantAdminUpdate,
	next_reservation,
	partition,
};
use validator::Validate;

use crate::schemas::admin::{
	CreateRestaurantAdminRequest,
	DashboardResponse,
	RestaurantAdminResponse,
	UpdateRestaurantAdminRequest,
};
use crate::schemas::reservation::{ReservationResponse, SlotResponse};
use crate::schemas::restaurant::RestaurantResponse;
use crate::schemas::table::TableResponse;
use crate::{Config, today};

#[instrument(skip(pool))]
pub(crate) async fn get_dashboard(
	State(config): State<Config>,
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let restaurant =
		Restaurant::get_by_id(config.restaurant_id, &conn).await?;
	let reservations = Reservation::get_all(&conn).await?;

	let today = today();
	let partitions = partition(&reservations, today);

	let tables = restaurant
		.tables
		.iter()
		.map(|t| {
			let next = next_reservation(t.id, &reservations, today)
				.map(|r| SlotResponse::from(&r.reservation));

			TableResponse {
				next_reservation: next,
				..TableResponse::from(t.clone())
			}
		})
		.collect();

	let response = DashboardResponse {
		today,
		restaurant: RestaurantResponse::from(restaurant),
		tables,
		today_count: partitions.today.len(),
		upcoming_count: partitions.upcoming.len(),
		past_count: partitions.past.len(),
	};

	Ok((StatusCode::OK, Json(response)))
}

/// List the reservations of today, all upcoming ones or all past ones
#[instrument(skip(pool))]
pub(crate) async fn get_reservations_for_period(
	State(pool): State<DbPool>,
	Path(period): Path<ReservationPeriod>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let filter = ReservationFilter { period: Some(period), today: today() };
	let reservations = Reservation::for_period(filter, &conn).await?;

	let response: Vec<ReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_restaurant_admins(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let admins = RestaurantAdmin::get_all(&conn).await?;

	let response: Vec<RestaurantAdminResponse> =
		admins.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Look up a profile by username for admin management, an unknown username
/// is [`NotFound`](Error::NotFound) rather than a login failure
async fn profile_by_username(
	username: String,
	conn: &DbConn,
) -> Result<Profile, Error> {
	match Profile::get_by_username(username, conn).await {
		Err(Error::LoginError(LoginError::UnknownUsername(username))) => {
			Err(Error::NotFound(format!("no profile with username {username}")))
		},
		result => result,
	}
}

#[instrument(skip(pool))]
pub(crate) async fn create_restaurant_admin(
	State(pool): State<DbPool>,
	Json(request): Json<CreateRestaurantAdminRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let profile = profile_by_username(request.username, &conn).await?;

	let new_admin = NewRestaurantAdmin {
		profile_id: profile.profile.id,
		name:       request.name,
		role:       request.role,
		phone:      request.phone,
		is_active:  request.is_active,
	};

	let admin = new_admin.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(RestaurantAdminResponse::from(admin))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_restaurant_admin(
	State(pool): State<DbPool>,
	Path(username): Path<String>,
	Json(request): Json<UpdateRestaurantAdminRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let profile = profile_by_username(username, &conn).await?;

	let update: RestaurantAdminUpdate = request.into();
	let admin = update.apply_to(profile.profile.id, &conn).await?;

	info!("updated restaurant admin {}", profile.profile.username);

	Ok((StatusCode::OK, Json(RestaurantAdminResponse::from(admin))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_restaurant_admin(
	State(pool): State<DbPool>,
	Path(username): Path<String>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;
	let profile = profile_by_username(username, &conn).await?;

	RestaurantAdmin::delete_for_profile(profile.profile.id, &conn).await?;

	Ok(NoContent)
}
