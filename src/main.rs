#[macro_use]
extern crate tracing;

use restobook::{AppState, Config, routes};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	// Load the configuration from the environment
	let config = Config::from_env();

	let level = if config.production { Level::INFO } else { Level::DEBUG };

	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(level)
		.init();

	let database_pool = config.create_database_pool();
	let redis_connection = config.create_redis_connection().await;
	let cookie_jar_key = Config::create_cookie_jar_key();

	let bind_address = config.bind_address.clone();

	let router = routes::get_app_router(AppState {
		config,
		database_pool,
		redis_connection,
		cookie_jar_key,
	});

	let listener = TcpListener::bind(&bind_address).await.unwrap();

	info!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

/// Gracefully shutdown the server on SIGINT or SIGTERM.
async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	info!("shutting down");
}
