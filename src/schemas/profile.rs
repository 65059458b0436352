use chrono::NaiveDateTime;
use models::{Profile, ProfileDeletion, ProfileUpdate};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::{NAME_REGEX, PHONE_REGEX};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id:            i32,
	pub username:      String,
	pub email:         Option<String>,
	pub name:          Option<String>,
	pub phone:         Option<String>,
	pub is_superuser:  bool,
	pub is_radmin:     bool,
	pub created_at:    NaiveDateTime,
	pub last_login_at: NaiveDateTime,
}

impl From<Profile> for ProfileResponse {
	fn from(value: Profile) -> Self {
		let is_radmin = value.is_radmin();
		let profile = value.profile;

		Self {
			id: profile.id,
			username: profile.username,
			email: profile.email,
			name: profile.name,
			phone: profile.phone,
			is_superuser: profile.is_superuser,
			is_radmin,
			created_at: profile.created_at,
			last_login_at: profile.last_login_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	#[validate(email(message = "invalid email", code = "email"))]
	pub email: Option<String>,
	#[validate(regex(
		path = *NAME_REGEX,
		message = "name may only contain letters and spaces",
		code = "name-regex"
	))]
	#[validate(length(
		max = 100,
		message = "name can be at most 100 characters long",
		code = "name-length"
	))]
	pub name:  Option<String>,
	#[validate(regex(
		path = *PHONE_REGEX,
		message = "phone number must be exactly 11 digits",
		code = "phone-regex"
	))]
	pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
	fn from(value: UpdateProfileRequest) -> Self {
		Self { email: value.email, name: value.name, phone: value.phone }
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDeletionResponse {
	pub removed_reservations: usize,
	pub was_restaurant_admin: bool,
}

impl From<ProfileDeletion> for ProfileDeletionResponse {
	fn from(value: ProfileDeletion) -> Self {
		Self {
			removed_reservations: value.reservations,
			was_restaurant_admin: value.restaurant_admin,
		}
	}
}
