use std::fmt;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::menu;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = menu)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveMenu {
	pub id:         Uuid,
	pub name:       String,
	pub food_items: String,
	pub price:      i32,
	pub created_at: NaiveDateTime,
}

impl fmt::Display for PrimitiveMenu {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name)
	}
}

impl PrimitiveMenu {
	/// The individual food items on this menu
	#[must_use]
	pub fn food_item_list(&self) -> Vec<String> {
		self.food_items
			.split(',')
			.map(str::trim)
			.filter(|item| !item.is_empty())
			.map(ToString::to_string)
			.collect()
	}

	#[must_use]
	pub fn price_in_dollars(&self) -> String { format!("${}", self.price) }

	/// Get a [`PrimitiveMenu`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(m_id: Uuid, conn: &DbConn) -> Result<Self, Error> {
		let menu = conn
			.interact(move |conn| {
				use self::menu::dsl::*;

				menu.find(m_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		menu.ok_or_else(|| Error::NotFound(format!("no menu with id {m_id}")))
	}
}
