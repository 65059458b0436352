use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{NewRestaurant, Restaurant, RestaurantUpdate};
use validator::Validate;

use crate::Config;
use crate::schemas::restaurant::{
	CreateRestaurantRequest,
	RestaurantDeletionResponse,
	RestaurantResponse,
	UpdateRestaurantRequest,
};

/// Get the restaurant served by this instance along with its tables
#[instrument(skip(pool))]
pub(crate) async fn get_restaurant(
	State(config): State<Config>,
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let restaurant =
		Restaurant::get_by_id(config.restaurant_id, &conn).await?;

	Ok((StatusCode::OK, Json(RestaurantResponse::from(restaurant))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_restaurant(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Json(request): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let new_restaurant = NewRestaurant {
		name:           request.name,
		opening_hour:   request.opening_hour,
		closing_hour:   request.closing_hour,
		email:          request.email,
		contact_number: request.contact_number,
	};

	let conn = pool.get().await?;
	let restaurant = new_restaurant.insert(&conn).await?;

	if restaurant.restaurant.id != config.restaurant_id {
		warn!(
			"created restaurant {} but this instance serves restaurant {}",
			restaurant.restaurant.id, config.restaurant_id,
		);
	}

	Ok((StatusCode::CREATED, Json(RestaurantResponse::from(restaurant))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_restaurant(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Json(request): Json<UpdateRestaurantRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let current = Restaurant::get_by_id(config.restaurant_id, &conn).await?;
	let opening =
		request.opening_hour.unwrap_or(current.restaurant.opening_hour);
	let closing =
		request.closing_hour.unwrap_or(current.restaurant.closing_hour);

	if opening >= closing {
		return Err(Error::ValidationError(
			"the restaurant must open before it closes".to_string(),
		));
	}

	let update: RestaurantUpdate = request.into();
	let restaurant = update.apply_to(config.restaurant_id, &conn).await?;

	Ok((StatusCode::OK, Json(RestaurantResponse::from(restaurant))))
}

/// Delete the restaurant, its tables and all of their reservations
#[instrument(skip(pool))]
pub(crate) async fn delete_restaurant(
	State(config): State<Config>,
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let deletion =
		Restaurant::delete_by_id(config.restaurant_id, &conn).await?;

	Ok((StatusCode::OK, Json(RestaurantDeletionResponse::from(deletion))))
}
