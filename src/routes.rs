use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::admin::{
	create_restaurant_admin,
	delete_restaurant_admin,
	get_dashboard,
	get_reservations_for_period,
	get_restaurant_admins,
	update_restaurant_admin,
};
use crate::controllers::auth::{
	login_profile,
	logout_profile,
	register_profile,
};
use crate::controllers::contact::{
	create_contact_message,
	get_contact_messages,
};
use crate::controllers::healthcheck;
use crate::controllers::menu::{
	create_menu,
	delete_menu,
	get_menu,
	get_menus,
	update_menu,
};
use crate::controllers::profile::{
	delete_current_profile,
	get_current_profile,
	update_current_profile,
};
use crate::controllers::reservation::{
	cancel_reservation,
	create_reservation,
	get_own_reservations,
};
use crate::controllers::restaurant::{
	create_restaurant,
	delete_restaurant,
	get_restaurant,
	update_restaurant,
};
use crate::controllers::table::{
	create_table,
	delete_table,
	get_available_tables,
	get_table,
	get_tables,
	update_table,
};
use crate::middleware::{AdminLayer, AuthLayer};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/restaurant", restaurant_routes(&state))
		.nest("/tables", table_routes(&state))
		.nest("/reservations", reservation_routes(&state))
		.nest("/admin", admin_routes(&state))
		.nest("/admins", restaurant_admin_routes(&state))
		.nest("/menus", menu_routes(&state))
		.nest("/contact", contact_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/register", post(register_profile))
		.route("/login", post(login_profile))
		.route(
			"/logout",
			post(logout_profile).route_layer(AuthLayer::new(state.clone())),
		)
}

/// Routes for the profile of the logged in user
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route(
			"/me",
			get(get_current_profile)
				.patch(update_current_profile)
				.delete(delete_current_profile),
		)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Restaurant routes, only reading is public
fn restaurant_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route(
			"/",
			post(create_restaurant)
				.patch(update_restaurant)
				.delete(delete_restaurant),
		)
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new().route("/", get(get_restaurant)).merge(protected)
}

/// Table routes, only reading is public
fn table_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_table))
		.route("/{id}", patch(update_table).delete(delete_table))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_tables))
		.route("/available", get(get_available_tables))
		.route("/{id}", get(get_table))
		.merge(protected)
}

/// Booking and cancellation routes
fn reservation_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", post(create_reservation))
		.route("/me", get(get_own_reservations))
		.route("/{id}", delete(cancel_reservation))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Restaurant management dashboard
fn admin_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/dashboard", get(get_dashboard))
		.route("/reservations/{period}", get(get_reservations_for_period))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Managing who may manage the restaurant, superusers only
fn restaurant_admin_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_restaurant_admins).post(create_restaurant_admin))
		.route(
			"/{username}",
			patch(update_restaurant_admin).delete(delete_restaurant_admin),
		)
		.route_layer(AdminLayer::superuser(state.clone()))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Menu routes, only reading is public
fn menu_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_menu))
		.route("/{id}", patch(update_menu).delete(delete_menu))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_menus))
		.route("/{id}", get(get_menu))
		.merge(protected)
}

/// Contact routes, anyone may leave a message
fn contact_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", get(get_contact_messages))
		.route_layer(AdminLayer::new(state.clone()))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new().route("/", post(create_contact_message)).merge(protected)
}
