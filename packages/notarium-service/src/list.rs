use serde::{Deserialize, Serialize};

use crate::{Error, NotariumService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteView {
	pub id: i64,
	pub text: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub notes: Vec<NoteView>,
}

impl NotariumService {
	pub async fn list_notes(&self) -> Result<ListResponse> {
		let notes = self
			.stores
			.records
			.select_all()
			.await
			.map_err(|err| Error::StoreRead { message: err.to_string() })?;
		let notes = notes
			.into_iter()
			.map(|note| NoteView { id: note.id, text: note.text, created_at: note.created_at })
			.collect();

		Ok(ListResponse { notes })
	}
}
