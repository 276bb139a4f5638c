use notarium_config::Postgres;
use notarium_storage::{db::Db, queries};
use notarium_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set NOTARIUM_PG_DSN to run."]
async fn notes_table_exists_after_bootstrap() {
	let Some(base_dsn) = notarium_testkit::env_dsn() else {
		eprintln!("Skipping notes_table_exists_after_bootstrap; set NOTARIUM_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'notes'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	// Bootstrap twice; every statement must be idempotent.
	db.ensure_schema().await.expect("Failed to re-ensure schema.");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set NOTARIUM_PG_DSN to run."]
async fn note_crud_roundtrip() {
	let Some(base_dsn) = notarium_testkit::env_dsn() else {
		eprintln!("Skipping note_crud_roundtrip; set NOTARIUM_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let first = queries::insert_note_returning(&db, "Paris is the capital of France")
		.await
		.expect("Failed to insert note.")
		.expect("Insert returned no record.");
	let second = queries::insert_note_returning(&db, "The sky is blue")
		.await
		.expect("Failed to insert note.")
		.expect("Insert returned no record.");

	assert!(second.id > first.id);
	assert_eq!(first.text, "Paris is the capital of France");

	let fetched = queries::select_notes_by_ids(&db, &[second.id, first.id])
		.await
		.expect("Failed to select notes by ids.");

	assert_eq!(fetched.len(), 2);

	// Unknown ids are simply absent from the result, not errors.
	let sparse = queries::select_notes_by_ids(&db, &[first.id, i64::MAX])
		.await
		.expect("Failed to select notes by ids.");

	assert_eq!(sparse.len(), 1);
	assert_eq!(sparse[0].id, first.id);

	queries::delete_note(&db, first.id).await.expect("Failed to delete note.");
	// Deleting an id that no longer exists is a no-op.
	queries::delete_note(&db, first.id).await.expect("Second delete should be a no-op.");

	let remaining = queries::select_all_notes(&db).await.expect("Failed to list notes.");

	assert_eq!(remaining.len(), 1);
	assert_eq!(remaining[0].id, second.id);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
