use serde::{Deserialize, Serialize};

use crate::{Error, NotariumService, Result};
use notarium_storage::qdrant::{IndexAck, IndexEntry};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
	pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateNoteResponse {
	pub id: i64,
	pub text: String,
	pub indexed: IndexAck,
}

impl NotariumService {
	/// Creates a note as record insert, then embedding, then index upsert.
	/// The order is load-bearing: the record must exist before its embedding
	/// is computed, and the embedding before the index write, so a failure
	/// part-way leaves an orphan record (listed, never retrieved) rather than
	/// an index entry pointing at nothing.
	pub async fn create_note(&self, req: CreateNoteRequest) -> Result<CreateNoteResponse> {
		if req.text.trim().is_empty() {
			return Err(Error::Validation { message: "text must be non-empty.".to_string() });
		}

		let record = self
			.stores
			.records
			.insert_returning(&req.text)
			.await
			.map_err(|err| Error::StoreWrite { message: err.to_string() })?
			.ok_or_else(|| Error::StoreWrite {
				message: "Insert returned no record.".to_string(),
			})?;
		let vector = self.embed_one(&record.text).await?;
		let entry = IndexEntry { id: record.id.to_string(), vector };
		let indexed = self
			.stores
			.index
			.upsert(std::slice::from_ref(&entry))
			.await
			.map_err(|err| Error::IndexWrite { message: err.to_string() })?;

		Ok(CreateNoteResponse { id: record.id, text: record.text, indexed })
	}
}
