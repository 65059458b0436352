use chrono::{NaiveDate, NaiveDateTime};
use models::{RestaurantAdmin, RestaurantAdminUpdate};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::restaurant::RestaurantResponse;
use crate::schemas::table::TableResponse;
use crate::schemas::{NAME_REGEX, PHONE_REGEX};

/// Overview of the restaurant for its admins
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
	pub today:          NaiveDate,
	pub restaurant:     RestaurantResponse,
	/// Every table along with its next reservation
	pub tables:         Vec<TableResponse>,
	pub today_count:    usize,
	pub upcoming_count: usize,
	pub past_count:     usize,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantAdminResponse {
	pub id:         i32,
	pub profile_id: i32,
	pub username:   String,
	pub name:       String,
	pub role:       String,
	pub phone:      String,
	pub is_active:  bool,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<RestaurantAdmin> for RestaurantAdminResponse {
	fn from(value: RestaurantAdmin) -> Self {
		let admin = value.admin;

		Self {
			id:         admin.id,
			profile_id: admin.profile_id,
			username:   value.profile.username,
			name:       admin.name,
			role:       admin.role,
			phone:      admin.phone,
			is_active:  admin.is_active,
			created_at: admin.created_at,
			updated_at: admin.updated_at,
		}
	}
}

fn default_active() -> bool { true }

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantAdminRequest {
	pub username:  String,
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
	pub name:      String,
	#[validate(length(
		min = 1,
		max = 50,
		message = "role must be between 1 and 50 characters long",
		code = "role-length"
	))]
	pub role:      String,
	#[validate(regex(
		path = *PHONE_REGEX,
		message = "phone number must be exactly 11 digits",
		code = "phone-regex"
	))]
	pub phone:     String,
	#[serde(default = "default_active")]
	pub is_active: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantAdminRequest {
	#[validate(regex(
		path = *NAME_REGEX,
		message = "name may only contain letters and spaces",
		code = "name-regex"
	))]
	pub name:      Option<String>,
	#[validate(length(
		min = 1,
		max = 50,
		message = "role must be between 1 and 50 characters long",
		code = "role-length"
	))]
	pub role:      Option<String>,
	#[validate(regex(
		path = *PHONE_REGEX,
		message = "phone number must be exactly 11 digits",
		code = "phone-regex"
	))]
	pub phone:     Option<String>,
	pub is_active: Option<bool>,
}

impl From<UpdateRestaurantAdminRequest> for RestaurantAdminUpdate {
	fn from(value: UpdateRestaurantAdminRequest) -> Self {
		Self {
			name:      value.name,
			role:      value.role,
			phone:     value.phone,
			is_active: value.is_active,
		}
	}
}
