use common::{DbConn, Error};
use db::contact_message;
use diesel::prelude::*;
use primitives::PrimitiveContactMessage;
use serde::{Deserialize, Serialize};

/// Get all contact messages, newest first
#[instrument(skip(conn))]
pub async fn get_all_contact_messages(
	conn: &DbConn,
) -> Result<Vec<PrimitiveContactMessage>, Error> {
	let messages = conn
		.interact(|conn| {
			use self::contact_message::dsl::*;

			contact_message
				.order(created_at.desc())
				.select(PrimitiveContactMessage::as_select())
				.get_results(conn)
		})
		.await??;

	Ok(messages)
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = contact_message)]
#[diesel(check_for_backend(Pg))]
pub struct NewContactMessage {
	pub name:    String,
	pub email:   String,
	pub phone:   String,
	pub message: String,
}

impl NewContactMessage {
	/// Insert this [`NewContactMessage`]
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveContactMessage, Error> {
		let message = conn
			.interact(|conn| {
				use self::contact_message::dsl::*;

				diesel::insert_into(contact_message)
					.values(self)
					.returning(PrimitiveContactMessage::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("stored contact message {} from {}", message.id, message.email);

		Ok(message)
	}
}
