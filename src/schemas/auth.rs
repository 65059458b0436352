use std::sync::LazyLock;

use models::NewProfile;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

static USERNAME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-_]*$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	#[validate(regex(
		path = *USERNAME_REGEX,
		message = "username must start with a letter and only contain letters, numbers, dashes, or underscores",
		code = "username-regex"
	))]
	#[validate(length(
		min = 2,
		max = 32,
		message = "username must be between 2 and 32 characters long",
		code = "username-length"
	))]
	pub username: String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password: String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:    Option<String>,
}

impl From<RegisterRequest> for NewProfile {
	fn from(value: RegisterRequest) -> Self {
		Self {
			username: value.username,
			password: value.password,
			email:    value.email,
			name:     None,
			phone:    None,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}
