use crate::{Result, db::Db, models::Note};

/// Inserts a note and returns the created row, id included. `None` means the
/// database accepted the statement but produced no row, which callers treat
/// as a failed write.
pub async fn insert_note_returning(db: &Db, text: &str) -> Result<Option<Note>> {
	let note = sqlx::query_as::<_, Note>(
		"INSERT INTO notes (text) VALUES ($1) RETURNING id, text, created_at",
	)
	.bind(text)
	.fetch_optional(&db.pool)
	.await?;

	Ok(note)
}

pub async fn delete_note(db: &Db, id: i64) -> Result<()> {
	sqlx::query("DELETE FROM notes WHERE id = $1").bind(id).execute(&db.pool).await?;

	Ok(())
}

/// Fetches the notes whose ids appear in `ids`, in no particular order. The id
/// set is bound as an array parameter, never spliced into the statement text.
pub async fn select_notes_by_ids(db: &Db, ids: &[i64]) -> Result<Vec<Note>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let notes = sqlx::query_as::<_, Note>(
		"SELECT id, text, created_at FROM notes WHERE id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(notes)
}

pub async fn select_all_notes(db: &Db) -> Result<Vec<Note>> {
	let notes =
		sqlx::query_as::<_, Note>("SELECT id, text, created_at FROM notes ORDER BY id")
			.fetch_all(&db.pool)
			.await?;

	Ok(notes)
}
