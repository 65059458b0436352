#[macro_use]
extern crate tracing;

use diesel::BoxableExpression;
use diesel::pg::Pg;
use diesel::sql_types::{Bool, Nullable};

mod availability;
mod contact_message;
mod menu;
mod profile;
mod reservation;
mod restaurant;
mod restaurant_admin;
mod table;

pub use availability::*;
pub use contact_message::*;
pub use menu::*;
pub use primitives::*;
pub use profile::*;
pub use reservation::*;
pub use restaurant::*;
pub use restaurant_admin::*;
pub use table::*;

pub type BoxedCondition<S, T = Nullable<Bool>> =
	Box<dyn BoxableExpression<S, Pg, SqlType = T>>;

pub trait ToFilter<S> {
	type SqlType;

	fn to_filter(&self) -> BoxedCondition<S, Self::SqlType>;
}
