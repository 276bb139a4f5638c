use crate::{Error, NotariumService, Result};

impl NotariumService {
	/// Deletes the record first, then the index entry. Both sides are
	/// idempotent, so deleting an absent id succeeds. No rollback spans the
	/// two stores: if the index delete fails, the surviving point is a
	/// dangling entry the answer pipeline tolerates and skips.
	pub async fn delete_note(&self, id: i64) -> Result<()> {
		self.stores
			.records
			.delete_by_id(id)
			.await
			.map_err(|err| Error::StoreWrite { message: err.to_string() })?;
		self.stores
			.index
			.delete_by_ids(&[id.to_string()])
			.await
			.map_err(|err| Error::IndexWrite { message: err.to_string() })?;

		Ok(())
	}
}
