use std::collections::HashMap;

use qdrant_client::{
	Payload,
	qdrant::{
		CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId, PointStruct,
		PointsIdsList, Query, QueryPointsBuilder, UpdateStatus, UpsertPointsBuilder, Value,
		VectorParamsBuilder, point_id::PointIdOptions,
	},
};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A point queued for upsert. `id` is the record store id in string form.
#[derive(Clone, Debug)]
pub struct IndexEntry {
	pub id: String,
	pub vector: Vec<f32>,
}

/// Acknowledgment returned by the index for a write.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexAck {
	pub operation_id: Option<u64>,
	pub status: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexMatch {
	pub id: String,
	pub score: f32,
}

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &notarium_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(self.collection.clone()).await? {
			return Ok(());
		}

		self.client
			.create_collection(
				CreateCollectionBuilder::new(self.collection.clone()).vectors_config(
					VectorParamsBuilder::new(self.vector_dim.into(), Distance::Cosine),
				),
			)
			.await?;

		Ok(())
	}

	pub async fn upsert_entries(&self, entries: &[IndexEntry]) -> Result<IndexAck> {
		let mut points = Vec::with_capacity(entries.len());

		for entry in entries {
			let mut payload_map = HashMap::new();

			payload_map.insert("note_id".to_string(), Value::from(entry.id.clone()));

			let payload = Payload::from(payload_map);

			points.push(PointStruct::new(point_id_for(&entry.id), entry.vector.clone(), payload));
		}

		let upsert = UpsertPointsBuilder::new(self.collection.clone(), points).wait(true);
		let response = self.client.upsert_points(upsert).await?;
		let ack = match response.result {
			Some(result) => IndexAck {
				operation_id: result.operation_id,
				status: update_status_label(result.status()).to_string(),
			},
			None => IndexAck { operation_id: None, status: "unknown".to_string() },
		};

		Ok(ack)
	}

	pub async fn delete_ids(&self, ids: &[String]) -> Result<()> {
		if ids.is_empty() {
			return Ok(());
		}

		let points: Vec<PointId> = ids.iter().map(|id| point_id_for(id)).collect();
		let delete = DeletePointsBuilder::new(self.collection.clone())
			.points(PointsIdsList { ids: points })
			.wait(true);

		self.client.delete_points(delete).await?;

		Ok(())
	}

	pub async fn query_nearest(&self, vector: &[f32], limit: u32) -> Result<Vec<IndexMatch>> {
		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector.to_vec()))
			.limit(u64::from(limit));
		let response = self.client.query(search).await?;
		let mut matches = Vec::with_capacity(response.result.len());

		for point in response.result {
			let Some(id) = point.id.and_then(|id| id.point_id_options).map(|options| {
				match options {
					PointIdOptions::Num(num) => num.to_string(),
					PointIdOptions::Uuid(uuid) => uuid,
				}
			}) else {
				continue;
			};

			matches.push(IndexMatch { id, score: point.score });
		}

		Ok(matches)
	}
}

fn point_id_for(id: &str) -> PointId {
	match id.parse::<u64>() {
		Ok(num) => PointId::from(num),
		Err(_) => PointId::from(id.to_string()),
	}
}

fn update_status_label(status: UpdateStatus) -> &'static str {
	match status {
		UpdateStatus::Acknowledged => "acknowledged",
		UpdateStatus::Completed => "completed",
		UpdateStatus::ClockRejected => "clock_rejected",
		UpdateStatus::UnknownUpdateStatus => "unknown",
	}
}
