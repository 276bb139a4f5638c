use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Map;
use tower::util::ServiceExt;

use notarium_api::{routes, state::AppState};
use notarium_config::{
	Config, EmbeddingProviderConfig, LlmProviderConfig, Postgres, Providers, Qdrant, Query,
	Service, Storage,
};
use notarium_testkit::TestDatabase;

fn test_config(dsn: String, qdrant_url: String, collection: String) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn, pool_max_conns: 1 },
			qdrant: Qdrant { url: qdrant_url, collection, vector_dim: 8 },
		},
		providers: Providers {
			embedding: dummy_embedding_provider(),
			answerer: dummy_llm_provider(),
		},
		query: Query::default(),
	}
}

fn dummy_embedding_provider() -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/v1/embeddings".to_string(),
		model: "test-embed".to_string(),
		dimensions: 8,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

fn dummy_llm_provider() -> LlmProviderConfig {
	LlmProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/v1/chat/completions".to_string(),
		model: "test-llm".to_string(),
		temperature: 0.1,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

async fn test_env() -> Option<(TestDatabase, String, String)> {
	let base_dsn = match notarium_testkit::env_dsn() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set NOTARIUM_PG_DSN to run this test.");

			return None;
		},
	};
	let qdrant_url = match notarium_testkit::env_qdrant_url() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set NOTARIUM_QDRANT_URL to run this test.");

			return None;
		},
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let collection = test_db.collection_name("notarium_http");

	Some((test_db, qdrant_url, collection))
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set NOTARIUM_PG_DSN and NOTARIUM_QDRANT_URL to run."]
async fn health_ok() {
	let Some((test_db, qdrant_url, collection)) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string(), qdrant_url, collection);
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set NOTARIUM_PG_DSN and NOTARIUM_QDRANT_URL to run."]
async fn rejects_blank_text_on_create() {
	let Some((test_db, qdrant_url, collection)) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string(), qdrant_url, collection);
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let payload = serde_json::json!({ "text": "" });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/notes")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call create note.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value = serde_json::from_slice(&body).expect("Failed to parse response.");

	assert_eq!(json["error_code"], "invalid_request");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set NOTARIUM_PG_DSN and NOTARIUM_QDRANT_URL to run."]
async fn note_pages_render() {
	let Some((test_db, qdrant_url, collection)) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string(), qdrant_url, collection);
	let state = AppState::new(config).await.expect("Failed to initialize app state.");

	for uri in ["/notes", "/write"] {
		let app = routes::router(state.clone());
		let response = app
			.oneshot(
				Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."),
			)
			.await
			.expect("Failed to call page route.");

		assert_eq!(response.status(), StatusCode::OK);
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set NOTARIUM_PG_DSN and NOTARIUM_QDRANT_URL to run."]
async fn notes_json_lists_empty_store() {
	let Some((test_db, qdrant_url, collection)) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string(), qdrant_url, collection);
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/notes.json")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /notes.json.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value = serde_json::from_slice(&body).expect("Failed to parse response.");

	assert_eq!(json, serde_json::json!([]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
