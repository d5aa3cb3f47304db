use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub http: Http,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct Http {
	/// Origins allowed by the CORS layer, e.g. "http://localhost:3000". Empty disables CORS.
	#[serde(default)]
	pub cors_allowed_origins: Vec<String>,
	/// Directory served under `/static`. Omitted or blank disables static serving.
	pub static_dir: Option<String>,
}

fn default_log_level() -> String {
	"info".to_string()
}
