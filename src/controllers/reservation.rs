use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use common::{CreateReservationError, DbPool, Error};
use models::{
	NewReservation,
	PrimitiveTable,
	Profile,
	Reservation,
	check_reservation_date,
};
use uuid::Uuid;
use validator::Validate;

use crate::schemas::reservation::{
	CancellationResponse,
	CreateReservationRequest,
	ReservationConfirmation,
	ReservationResponse,
};
use crate::{ProfileId, today};

/// Book a table for the logged in customer
///
/// The request is rejected if the table does not exist, the date lies in the
/// past or the customer already holds a reservation at this date and time
#[instrument(skip(pool))]
pub(crate) async fn create_reservation(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let date = request.reservation_date;
	let time = request.reservation_time;

	debug!(
		"received booking for table #{} on {date} at {time} by {profile_id}",
		request.table_number,
	);

	let conn = pool.get().await?;

	let table = PrimitiveTable::get_by_number(request.table_number, &conn)
		.await?;

	if let Err(e) = check_reservation_date(date, today()) {
		info!("rejected booking by {profile_id}, {date} is in the past");

		return Err(e);
	}

	if Reservation::exists_for_customer_slot(*profile_id, date, time, &conn)
		.await?
	{
		info!("rejected booking by {profile_id}, slot {date} {time} is taken");

		let error = CreateReservationError::AlreadyReserved { date, time };

		return Err(error.into());
	}

	debug!("validated booking for {table} by {profile_id}");

	let new_reservation = NewReservation {
		customer_id:      *profile_id,
		table_id:         table.id,
		reservation_date: date,
		reservation_time: time,
		message:          request.message,
	};

	let reservation = new_reservation.insert(&conn).await?;

	info!("persisted booking {}", reservation.reservation.id);

	Ok((StatusCode::CREATED, Json(ReservationConfirmation::from(reservation))))
}

/// Get the reservations of the logged in customer
#[instrument(skip(pool))]
pub(crate) async fn get_own_reservations(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let reservations = Reservation::for_customer(*profile_id, &conn).await?;

	let response: Vec<ReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Cancel a reservation
///
/// Only the customer who made the reservation or a restaurant admin may
/// cancel it
#[instrument(skip(pool))]
pub(crate) async fn cancel_reservation(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
	Path(r_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let reservation = Reservation::get_by_id(r_id, &conn).await?;

	if reservation.reservation.customer_id != *profile_id {
		let profile = Profile::get(*profile_id, &conn).await?;

		if !profile.is_radmin() {
			warn!("profile {profile_id} tried to cancel reservation {r_id}");

			return Err(Error::Forbidden);
		}
	}

	Reservation::delete_by_id(r_id, &conn).await?;

	let response =
		CancellationResponse::new(&reservation.table, &reservation.reservation);

	info!("{}", response.message);

	Ok((StatusCode::OK, Json(response)))
}
