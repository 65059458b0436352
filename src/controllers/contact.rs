use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models::{NewContactMessage, get_all_contact_messages};
use validator::Validate;

use crate::schemas::contact::{ContactMessageResponse, ContactRequest};

/// Leave a message for the restaurant
#[instrument(skip(pool))]
pub(crate) async fn create_contact_message(
	State(pool): State<DbPool>,
	Json(request): Json<ContactRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let new_message: NewContactMessage = request.into();
	let message = new_message.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(ContactMessageResponse::from(message))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_contact_messages(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let messages = get_all_contact_messages(&conn).await?;

	let response: Vec<ContactMessageResponse> =
		messages.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}
