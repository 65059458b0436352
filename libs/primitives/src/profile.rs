use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::profile;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveProfile {
	pub id:            i32,
	pub username:      String,
	pub email:         Option<String>,
	#[serde(skip)]
	pub password_hash: String,
	pub name:          Option<String>,
	pub phone:         Option<String>,
	pub is_superuser:  bool,
	pub created_at:    NaiveDateTime,
	pub last_login_at: NaiveDateTime,
}

impl PrimitiveProfile {
	/// Get a [`PrimitiveProfile`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(p_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile.find(p_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(profile)
	}
}
