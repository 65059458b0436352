use common::{DbConn, Error};
use db::menu;
use diesel::prelude::*;
use primitives::PrimitiveMenu;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Get all menus, newest first
#[instrument(skip(conn))]
pub async fn get_all_menus(conn: &DbConn) -> Result<Vec<PrimitiveMenu>, Error> {
	let menus = conn
		.interact(|conn| {
			use self::menu::dsl::*;

			menu.order(created_at.desc())
				.select(PrimitiveMenu::as_select())
				.get_results(conn)
		})
		.await??;

	Ok(menus)
}

/// Delete a menu given its id
#[instrument(skip(conn))]
pub async fn delete_menu(m_id: Uuid, conn: &DbConn) -> Result<(), Error> {
	let deleted = conn
		.interact(move |conn| {
			use self::menu::dsl::*;

			diesel::delete(menu.find(m_id)).execute(conn)
		})
		.await??;

	if deleted == 0 {
		return Err(Error::NotFound(format!("no menu with id {m_id}")));
	}

	info!("deleted menu with id {m_id}");

	Ok(())
}

/// Normalize a comma separated list of food items for storage
#[must_use]
pub fn normalize_food_items(items: &str) -> String { items.to_lowercase() }

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = menu)]
#[diesel(check_for_backend(Pg))]
pub struct NewMenu {
	pub name:       String,
	pub food_items: String,
	pub price:      i32,
}

impl NewMenu {
	/// Insert this [`NewMenu`], food items are stored lower-cased
	#[instrument(skip(conn))]
	pub async fn insert(
		mut self,
		conn: &DbConn,
	) -> Result<PrimitiveMenu, Error> {
		self.food_items = normalize_food_items(&self.food_items);

		let menu = conn
			.interact(|conn| {
				use self::menu::dsl::*;

				diesel::insert_into(menu)
					.values(self)
					.returning(PrimitiveMenu::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created menu {menu}");

		Ok(menu)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = menu)]
pub struct MenuUpdate {
	pub name:       Option<String>,
	pub food_items: Option<String>,
	pub price:      Option<i32>,
}

impl MenuUpdate {
	/// Update the menu with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		mut self,
		m_id: Uuid,
		conn: &DbConn,
	) -> Result<PrimitiveMenu, Error> {
		if self.name.is_none()
			&& self.food_items.is_none()
			&& self.price.is_none()
		{
			return PrimitiveMenu::get_by_id(m_id, conn).await;
		}

		self.food_items = self.food_items.as_deref().map(normalize_food_items);

		let menu = conn
			.interact(move |conn| {
				use self::menu::dsl::*;

				diesel::update(menu.find(m_id))
					.set(self)
					.returning(PrimitiveMenu::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??;

		menu.ok_or_else(|| Error::NotFound(format!("no menu with id {m_id}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn food_items_are_lowercased() {
		assert_eq!(
			normalize_food_items("Rice, Beans, FRIED Plantain"),
			"rice, beans, fried plantain"
		);
	}
}
