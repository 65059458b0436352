use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{
	NewTable,
	PrimitiveRestaurant,
	Reservation,
	Table,
	TableUpdate,
};
use uuid::Uuid;
use validator::Validate;

use crate::schemas::reservation::SlotResponse;
use crate::schemas::table::{
	AvailabilityQuery,
	CreateTableRequest,
	TableDeletionResponse,
	TableResponse,
	UpdateTableRequest,
};
use crate::{Config, today};

#[instrument(skip(pool))]
pub(crate) async fn get_tables(
	State(config): State<Config>,
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let tables = Table::get_all(config.restaurant_id, &conn).await?;

	let response: Vec<TableResponse> =
		tables.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Get a single table along with its next reservation, if any
#[instrument(skip(pool))]
pub(crate) async fn get_table(
	State(pool): State<DbPool>,
	Path(t_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let table = Table::get_by_id(t_id, &conn).await?;
	let next = Reservation::next_for_table(t_id, today(), &conn).await?;

	let response = TableResponse {
		next_reservation: next.as_ref().map(SlotResponse::from),
		..TableResponse::from(table)
	};

	Ok((StatusCode::OK, Json(response)))
}

/// Get the tables nobody reserved at exactly the requested date and time
#[instrument(skip(pool))]
pub(crate) async fn get_available_tables(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let tables = Table::available_at(
		config.restaurant_id,
		query.date,
		query.time,
		&conn,
	)
	.await?;

	let response: Vec<TableResponse> =
		tables.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Create a table in the restaurant served by this instance
#[instrument(skip(pool))]
pub(crate) async fn create_table(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	Json(request): Json<CreateTableRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	// Make sure there is a restaurant to bind the table to
	let restaurant =
		PrimitiveRestaurant::get_by_id(config.restaurant_id, &conn).await?;

	let new_table = NewTable {
		restaurant_id: restaurant.id,
		table_number:  request.table_number,
		seats:         request.seats,
	};

	let table = new_table.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(TableResponse::from(table))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_table(
	State(pool): State<DbPool>,
	Path(t_id): Path<Uuid>,
	Json(request): Json<UpdateTableRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let update: TableUpdate = request.into();
	let table = update.apply_to(t_id, &conn).await?;

	Ok((StatusCode::OK, Json(TableResponse::from(table))))
}

/// Delete a table along with every reservation held on it
#[instrument(skip(pool))]
pub(crate) async fn delete_table(
	State(pool): State<DbPool>,
	Path(t_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let removed_reservations = Table::delete_by_id(t_id, &conn).await?;

	Ok((StatusCode::OK, Json(TableDeletionResponse { removed_reservations })))
}
