use chrono::NaiveDateTime;
use models::{NewContactMessage, PrimitiveContactMessage};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::{NAME_REGEX, PHONE_REGEX};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct ContactRequest {
	#[validate(regex(
		path = *NAME_REGEX,
		message = "name may only contain letters and spaces",
		code = "name-regex"
	))]
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long",
		code = "name-length"
	))]
	pub name:    String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:   String,
	#[validate(regex(
		path = *PHONE_REGEX,
		message = "phone number must be exactly 11 digits",
		code = "phone-regex"
	))]
	pub phone:   String,
	#[validate(length(
		min = 1,
		max = 2000,
		message = "message must be between 1 and 2000 characters long",
		code = "message-length"
	))]
	pub message: String,
}

impl From<ContactRequest> for NewContactMessage {
	fn from(value: ContactRequest) -> Self {
		Self {
			name:    value.name,
			email:   value.email,
			phone:   value.phone,
			message: value.message,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageResponse {
	pub id:         i32,
	pub name:       String,
	pub email:      String,
	pub phone:      String,
	pub message:    String,
	pub created_at: NaiveDateTime,
}

impl From<PrimitiveContactMessage> for ContactMessageResponse {
	fn from(value: PrimitiveContactMessage) -> Self {
		Self {
			id:         value.id,
			name:       value.name,
			email:      value.email,
			phone:      value.phone,
			message:    value.message,
			created_at: value.created_at,
		}
	}
}
