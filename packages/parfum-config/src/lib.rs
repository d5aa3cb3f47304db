mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Http, Postgres, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address such as 127.0.0.1:8000."
				.to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for origin in &cfg.http.cors_allowed_origins {
		if !(origin.starts_with("http://") || origin.starts_with("https://")) {
			return Err(Error::Validation {
				message: format!(
					"http.cors_allowed_origins entry {origin:?} must start with http:// or https://."
				),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.http.cors_allowed_origins = cfg
		.http
		.cors_allowed_origins
		.iter()
		.map(|origin| origin.trim().trim_end_matches('/').to_string())
		.filter(|origin| !origin.is_empty())
		.collect();

	if cfg.http.static_dir.as_deref().map(|dir| dir.trim().is_empty()).unwrap_or(false) {
		cfg.http.static_dir = None;
	}
}
