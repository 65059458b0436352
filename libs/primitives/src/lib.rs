//! Plain row types, one for each table in the database

#[macro_use]
extern crate tracing;

mod contact_message;
mod menu;
mod profile;
mod reservation;
mod restaurant;
mod restaurant_admin;
mod table;

pub use contact_message::*;
pub use menu::*;
pub use profile::*;
pub use reservation::*;
pub use restaurant::*;
pub use restaurant_admin::*;
pub use table::*;
