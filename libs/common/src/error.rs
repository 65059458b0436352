//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::LOGIN_PATH;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to creating a reservation
	#[error(transparent)]
	CreateReservationError(#[from] CreateReservationError),
	/// The acting profile is not allowed to manage the restaurant
	#[error("you need to be logged in as a restaurant admin")]
	Unauthorized,
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownUsername(_) => 6,
					LoginError::InvalidPassword => 7,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 8,
					TokenError::MissingSession => 9,
				}
			},
			Self::CreateReservationError(e) => {
				match e {
					CreateReservationError::InPast(_) => 10,
					CreateReservationError::AlreadyReserved { .. } => 11,
				}
			},
			Self::Unauthorized => 12,
			Self::ValidationError(_) => 13,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownUsername(m))
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::CreateReservationError(e) => {
				match e {
					CreateReservationError::InPast(date) => {
						Some(serde_json::json!({"date": date}).to_string())
					},
					CreateReservationError::AlreadyReserved { date, time } => {
						Some(
							serde_json::json!({"date": date, "time": time})
								.to_string(),
						)
					},
				}
			},
			Self::Unauthorized => Some(LOGIN_PATH.to_string()),
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::CreateReservationError(
				CreateReservationError::AlreadyReserved { .. },
			) => StatusCode::CONFLICT,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::CreateReservationError(CreateReservationError::InPast(_)) => {
				StatusCode::BAD_REQUEST
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Self::Unauthorized => {
				return (
					StatusCode::SEE_OTHER,
					[(header::LOCATION, LOGIN_PATH)],
					axum::Json(data),
				)
					.into_response();
			},
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no profile with username '{0}' was found")]
	UnknownUsername(String),
	#[error("invalid password")]
	InvalidPassword,
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
}

#[derive(Debug, Error)]
pub enum CreateReservationError {
	/// The requested date lies before the current date
	#[error("You can't reserve a table in the past")]
	InPast(NaiveDate),
	/// The customer already holds a reservation for this date and time
	#[error("you already have a reservation at this date and time")]
	AlreadyReserved { date: NaiveDate, time: NaiveTime },
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Attempted to read the current profile from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of unique constraint names to user facing messages
static CONSTRAINT_TO_MESSAGE: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("profile_username_key", "username is already in use"),
			("profile_email_key", "email is already in use"),
			("dining_table_table_number_key", "table number is already in use"),
			(
				"restaurant_admin_profile_id_key",
				"this profile is already a restaurant admin",
			),
			(
				"reservation_customer_slot_key",
				"you already have a reservation at this date and time",
			),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let Some(constraint_name) = info.constraint_name() else {
					return InternalServerError::DatabaseError(err).into();
				};

				match CONSTRAINT_TO_MESSAGE.get(constraint_name) {
					Some(message) => Self::Duplicate((*message).to_string()),
					None => {
						InternalServerError::ConstraintError(
							constraint_name.to_string(),
						)
						.into()
					},
				}
			},
			// Foreign key or check constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation
				| DatabaseErrorKind::CheckViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalServerError::RedisError(err).into()
	}
}
