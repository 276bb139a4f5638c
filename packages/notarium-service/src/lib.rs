pub mod answer;
pub mod create;
pub mod delete;
pub mod list;
pub mod time_serde;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use create::{CreateNoteRequest, CreateNoteResponse};
pub use list::{ListResponse, NoteView};

use notarium_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use notarium_providers::{embedding, generation};
use notarium_storage::{
	db::Db,
	models::Note,
	qdrant::{IndexAck, IndexEntry, IndexMatch, QdrantStore},
	queries,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	Validation { message: String },
	#[error("Record store write failed: {message}")]
	StoreWrite { message: String },
	#[error("Record store read failed: {message}")]
	StoreRead { message: String },
	#[error("Embedding failed: {message}")]
	Embedding { message: String },
	#[error("Vector index write failed: {message}")]
	IndexWrite { message: String },
	#[error("Vector index query failed: {message}")]
	IndexQuery { message: String },
	#[error("Answer generation failed: {message}")]
	Generation { message: String },
}

/// Maps text to fixed-dimension vectors, one per input, input order preserved.
pub trait EmbeddingClient
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

/// Turns a conversation into answer text.
pub trait AnswerGenerator
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

/// The durable source of truth for note content.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn insert_returning<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<Note>>>;
	/// Idempotent; deleting an absent id is success.
	fn delete_by_id<'a>(&'a self, id: i64) -> BoxFuture<'a, color_eyre::Result<()>>;
	fn select_by_ids<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Note>>>;
	fn select_all<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<Note>>>;
}

/// Similarity index over note embeddings, keyed by record id in string form.
pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn upsert<'a>(
		&'a self,
		entries: &'a [IndexEntry],
	) -> BoxFuture<'a, color_eyre::Result<IndexAck>>;
	/// Idempotent; deleting absent ids is success.
	fn delete_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, color_eyre::Result<()>>;
	/// Up to `top_k` matches, descending by the index's native similarity.
	fn query<'a>(
		&'a self,
		vector: &'a [f32],
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<IndexMatch>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingClient>,
	pub answerer: Arc<dyn AnswerGenerator>,
}

#[derive(Clone)]
pub struct Stores {
	pub records: Arc<dyn RecordStore>,
	pub index: Arc<dyn VectorIndex>,
}

pub struct NotariumService {
	pub cfg: Config,
	pub stores: Stores,
	pub providers: Providers,
}

struct DefaultProviders;

struct PgRecords {
	db: Db,
}

struct QdrantIndex {
	store: QdrantStore,
}

impl EmbeddingClient for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl AnswerGenerator for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(generation::generate(cfg, messages))
	}
}

impl RecordStore for PgRecords {
	fn insert_returning<'a>(
		&'a self,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<Note>>> {
		Box::pin(async move { Ok(queries::insert_note_returning(&self.db, text).await?) })
	}

	fn delete_by_id<'a>(&'a self, id: i64) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { Ok(queries::delete_note(&self.db, id).await?) })
	}

	fn select_by_ids<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Note>>> {
		Box::pin(async move { Ok(queries::select_notes_by_ids(&self.db, ids).await?) })
	}

	fn select_all<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Vec<Note>>> {
		Box::pin(async move { Ok(queries::select_all_notes(&self.db).await?) })
	}
}

impl VectorIndex for QdrantIndex {
	fn upsert<'a>(
		&'a self,
		entries: &'a [IndexEntry],
	) -> BoxFuture<'a, color_eyre::Result<IndexAck>> {
		Box::pin(async move { Ok(self.store.upsert_entries(entries).await?) })
	}

	fn delete_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { Ok(self.store.delete_ids(ids).await?) })
	}

	fn query<'a>(
		&'a self,
		vector: &'a [f32],
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<IndexMatch>>> {
		Box::pin(async move { Ok(self.store.query_nearest(vector, top_k).await?) })
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingClient>, answerer: Arc<dyn AnswerGenerator>) -> Self {
		Self { embedding, answerer }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), answerer: provider }
	}
}

impl Stores {
	pub fn new(records: Arc<dyn RecordStore>, index: Arc<dyn VectorIndex>) -> Self {
		Self { records, index }
	}

	pub fn postgres_qdrant(db: Db, qdrant: QdrantStore) -> Self {
		Self { records: Arc::new(PgRecords { db }), index: Arc::new(QdrantIndex { store: qdrant }) }
	}
}

impl NotariumService {
	pub fn new(cfg: Config, db: Db, qdrant: QdrantStore) -> Self {
		Self { cfg, stores: Stores::postgres_qdrant(db, qdrant), providers: Providers::default() }
	}

	pub fn with_collaborators(cfg: Config, stores: Stores, providers: Providers) -> Self {
		Self { cfg, stores, providers }
	}

	/// Embeds a single text and checks the vector against the configured
	/// dimension before anything is written with it.
	pub(crate) async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
		let texts = [text.to_string()];
		let embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &texts)
			.await
			.map_err(|err| Error::Embedding { message: err.to_string() })?;
		let Some(vector) = embeddings.into_iter().next() else {
			return Err(Error::Embedding {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(Error::Embedding {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vector)
	}
}
