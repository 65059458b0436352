use std::sync::LazyLock;

use chrono::NaiveDateTime;
use models::{MenuUpdate, NewMenu, PrimitiveMenu};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator_derive::Validate;

static FOOD_ITEMS_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[, a-zA-Z]*$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
	pub id:             Uuid,
	pub name:           String,
	pub food_items:     String,
	pub food_item_list: Vec<String>,
	pub price:          i32,
	pub price_display:  String,
	pub created_at:     NaiveDateTime,
}

impl From<PrimitiveMenu> for MenuResponse {
	fn from(value: PrimitiveMenu) -> Self {
		Self {
			food_item_list: value.food_item_list(),
			price_display:  value.price_in_dollars(),
			id:             value.id,
			name:           value.name,
			food_items:     value.food_items,
			price:          value.price,
			created_at:     value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long",
		code = "name-length"
	))]
	pub name:       String,
	#[validate(regex(
		path = *FOOD_ITEMS_REGEX,
		message = "food items may only contain letters, spaces and commas",
		code = "food-items-regex"
	))]
	pub food_items: String,
	#[validate(range(
		min = 0,
		message = "price can not be negative",
		code = "price-range"
	))]
	pub price:      i32,
}

impl From<CreateMenuRequest> for NewMenu {
	fn from(value: CreateMenuRequest) -> Self {
		Self {
			name:       value.name,
			food_items: value.food_items,
			price:      value.price,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long",
		code = "name-length"
	))]
	pub name:       Option<String>,
	#[validate(regex(
		path = *FOOD_ITEMS_REGEX,
		message = "food items may only contain letters, spaces and commas",
		code = "food-items-regex"
	))]
	pub food_items: Option<String>,
	#[validate(range(
		min = 0,
		message = "price can not be negative",
		code = "price-range"
	))]
	pub price:      Option<i32>,
}

impl From<UpdateMenuRequest> for MenuUpdate {
	fn from(value: UpdateMenuRequest) -> Self {
		Self {
			name:       value.name,
			food_items: value.food_items,
			price:      value.price,
		}
	}
}
