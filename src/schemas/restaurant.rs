use chrono::{NaiveDateTime, NaiveTime};
use models::{Restaurant, RestaurantDeletion, RestaurantUpdate};
use serde::{Deserialize, Serialize};
use validator::ValidationError;
use validator_derive::Validate;

use crate::schemas::PHONE_REGEX;
use crate::schemas::table::TableResponse;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
	pub id:             i32,
	pub name:           String,
	pub opening_hour:   NaiveTime,
	pub closing_hour:   NaiveTime,
	pub email:          Option<String>,
	pub contact_number: Option<String>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
	pub tables:         Vec<TableResponse>,
}

impl From<Restaurant> for RestaurantResponse {
	fn from(value: Restaurant) -> Self {
		let restaurant = value.restaurant;

		Self {
			id:             restaurant.id,
			name:           restaurant.name,
			opening_hour:   restaurant.opening_hour,
			closing_hour:   restaurant.closing_hour,
			email:          restaurant.email,
			contact_number: restaurant.contact_number,
			created_at:     restaurant.created_at,
			updated_at:     restaurant.updated_at,
			tables:         value.tables.into_iter().map(Into::into).collect(),
		}
	}
}

fn validate_opening_hours(
	request: &CreateRestaurantRequest,
) -> Result<(), ValidationError> {
	if request.opening_hour >= request.closing_hour {
		return Err(ValidationError::new("opening-hours").with_message(
			"the restaurant must open before it closes".into(),
		));
	}

	Ok(())
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_opening_hours"))]
pub struct CreateRestaurantRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long",
		code = "name-length"
	))]
	pub name:           String,
	pub opening_hour:   NaiveTime,
	pub closing_hour:   NaiveTime,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:          Option<String>,
	#[validate(regex(
		path = *PHONE_REGEX,
		message = "contact number must be exactly 11 digits",
		code = "phone-regex"
	))]
	pub contact_number: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long",
		code = "name-length"
	))]
	pub name:           Option<String>,
	pub opening_hour:   Option<NaiveTime>,
	pub closing_hour:   Option<NaiveTime>,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:          Option<String>,
	#[validate(regex(
		path = *PHONE_REGEX,
		message = "contact number must be exactly 11 digits",
		code = "phone-regex"
	))]
	pub contact_number: Option<String>,
}

impl From<UpdateRestaurantRequest> for RestaurantUpdate {
	fn from(value: UpdateRestaurantRequest) -> Self {
		Self {
			name:           value.name,
			opening_hour:   value.opening_hour,
			closing_hour:   value.closing_hour,
			email:          value.email,
			contact_number: value.contact_number,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDeletionResponse {
	pub removed_tables:       usize,
	pub removed_reservations: usize,
}

impl From<RestaurantDeletion> for RestaurantDeletionResponse {
	fn from(value: RestaurantDeletion) -> Self {
		Self {
			removed_tables:       value.tables,
			removed_reservations: value.reservations,
		}
	}
}
