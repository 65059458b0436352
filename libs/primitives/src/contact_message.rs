use chrono::NaiveDateTime;
use db::contact_message;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A message left through the contact form
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = contact_message)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveContactMessage {
	pub id:         i32,
	pub name:       String,
	pub email:      String,
	pub phone:      String,
	pub message:    String,
	pub created_at: NaiveDateTime,
}
