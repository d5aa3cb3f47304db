use std::sync::Arc;

use parfum_service::CatalogService;
use parfum_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogService>,
}
impl AppState {
	pub async fn new(config: parfum_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(CatalogService::new(config, db)))
	}

	pub fn from_service(service: CatalogService) -> Self {
		Self { service: Arc::new(service) }
	}
}
