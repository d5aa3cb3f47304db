pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use axum::{
	Router,
	http::{HeaderValue, Method, header},
};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{
	cors::{AllowOrigin, CorsLayer},
	services::ServeDir,
	trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = parfum_cli::VERSION,
	about = parfum_cli::ABOUT,
	rename_all = "kebab",
	styles = parfum_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = parfum_config::load(&args.config)?;

	init_tracing(&config)?;

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let state = AppState::new(config).await?;
	let app = app(state)?;
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

/// The API router with request tracing, CORS, and static files applied per the `[http]` config.
pub fn app(state: AppState) -> color_eyre::Result<Router> {
	let http = &state.service.cfg.http;
	let cors = cors_layer(&http.cors_allowed_origins)?;
	let static_dir = http.static_dir.clone();
	let mut app = routes::router(state);

	if let Some(dir) = static_dir {
		app = app.nest_service("/static", ServeDir::new(dir));
	}
	if let Some(cors) = cors {
		app = app.layer(cors);
	}

	Ok(app.layer(TraceLayer::new_for_http()))
}

fn cors_layer(origins: &[String]) -> color_eyre::Result<Option<CorsLayer>> {
	if origins.is_empty() {
		return Ok(None);
	}

	let origins = origins
		.iter()
		.map(|origin| HeaderValue::from_str(origin))
		.collect::<Result<Vec<_>, _>>()?;
	let layer = CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
		.allow_headers([header::CONTENT_TYPE, header::ACCEPT])
		.allow_credentials(true);

	Ok(Some(layer))
}

fn init_tracing(config: &parfum_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	Ok(())
}
