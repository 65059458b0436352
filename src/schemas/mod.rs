use std::sync::LazyLock;

use regex::Regex;

pub mod admin;
pub mod auth;
pub mod contact;
pub mod menu;
pub mod profile;
pub mod reservation;
pub mod restaurant;
pub mod table;

/// Personal names, letters and spaces only
pub(crate) static NAME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z ]*$").unwrap());

/// Phone numbers, exactly 11 digits
pub(crate) static PHONE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]{11}$").unwrap());
