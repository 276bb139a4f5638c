use std::sync::Arc;

use notarium_service::NotariumService;
use notarium_storage::{db::Db, qdrant::QdrantStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NotariumService>,
}
impl AppState {
	pub async fn new(config: notarium_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let qdrant = QdrantStore::new(&config.storage.qdrant)?;

		qdrant.ensure_collection().await?;

		let service = NotariumService::new(config, db, qdrant);

		Ok(Self { service: Arc::new(service) })
	}
}
