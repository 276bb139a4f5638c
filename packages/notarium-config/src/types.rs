use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub query: Query,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub answerer: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

/// Query-time knobs. Every value the retrieval pipeline once hard-coded
/// lives here so deployments can tune them without a rebuild.
#[derive(Debug, Deserialize)]
pub struct Query {
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	#[serde(default = "default_question")]
	pub default_question: String,
	#[serde(default = "default_system_prompt")]
	pub system_prompt: String,
	#[serde(default = "default_no_answer_sentinel")]
	pub no_answer_sentinel: String,
}

impl Default for Query {
	fn default() -> Self {
		Self {
			top_k: default_top_k(),
			default_question: default_question(),
			system_prompt: default_system_prompt(),
			no_answer_sentinel: default_no_answer_sentinel(),
		}
	}
}

fn default_top_k() -> u32 {
	5
}

fn default_question() -> String {
	"What is the square root of 9?".to_string()
}

fn default_system_prompt() -> String {
	"You are a note assistant. Answer concisely based on the content provided below:".to_string()
}

fn default_no_answer_sentinel() -> String {
	"{NONE}".to_string()
}
