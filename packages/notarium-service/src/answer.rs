use serde_json::Value;
use tracing::warn;

use crate::{Error, NotariumService, Result};
use notarium_storage::models::Note;

const DOCUMENT_LABEL: &str = "DOCUMENT:";
const QUESTION_LABEL: &str = "QUESTION:";

impl NotariumService {
	/// Answers a question from the most similar notes. A blank question is
	/// replaced by the configured default question, so the call always
	/// produces an answer. Retrieval shortfalls never fail the call: index
	/// matches that no longer resolve to a record are dropped and the context
	/// shrinks, down to empty, down to the generator returning the configured
	/// no-answer sentinel.
	pub async fn answer(&self, question: &str) -> Result<String> {
		let question = if question.trim().is_empty() {
			self.cfg.query.default_question.as_str()
		} else {
			question
		};
		let vector = self.embed_one(question).await?;
		let matches = self
			.stores
			.index
			.query(&vector, self.cfg.query.top_k)
			.await
			.map_err(|err| Error::IndexQuery { message: err.to_string() })?;
		let ranked_ids: Vec<i64> = matches
			.iter()
			.filter_map(|found| match found.id.parse::<i64>() {
				Ok(id) => Some(id),
				Err(_) => {
					warn!(id = %found.id, "Skipping index match with a non-record id.");

					None
				},
			})
			.collect();
		let notes = if ranked_ids.is_empty() {
			Vec::new()
		} else {
			self.stores
				.records
				.select_by_ids(&ranked_ids)
				.await
				.map_err(|err| Error::StoreRead { message: err.to_string() })?
		};
		let context = assemble_context(&ranked_ids, &notes);
		let conversation = build_conversation(&self.cfg.query, &context, question);
		let answer = self
			.providers
			.answerer
			.generate(&self.cfg.providers.answerer, &conversation)
			.await
			.map_err(|err| Error::Generation { message: err.to_string() })?;

		Ok(answer)
	}
}

/// Orders note texts by retrieval rank, not store return order. Ids without a
/// surviving record are dropped silently; they cost a context slot, nothing
/// more.
fn assemble_context(ranked_ids: &[i64], notes: &[Note]) -> Vec<String> {
	ranked_ids
		.iter()
		.filter_map(|id| notes.iter().find(|note| note.id == *id))
		.map(|note| note.text.clone())
		.collect()
}

/// The system turn is present only when there is context to steer the model
/// toward; an empty document gets no system instruction.
fn build_conversation(
	cfg: &notarium_config::Query,
	context: &[String],
	question: &str,
) -> Vec<Value> {
	let mut messages = Vec::with_capacity(4);

	if !context.is_empty() {
		messages.push(serde_json::json!({ "role": "system", "content": cfg.system_prompt }));
	}

	messages.push(serde_json::json!({
		"role": "user",
		"content": format!("{DOCUMENT_LABEL}\n{}", context.join("\n")),
	}));
	messages.push(serde_json::json!({
		"role": "user",
		"content": format!("{QUESTION_LABEL} {question}"),
	}));
	messages.push(serde_json::json!({
		"role": "user",
		"content": format!(
			"INSTRUCTIONS: Answer the QUESTION using the DOCUMENT text above. Keep your answer grounded in the facts of the DOCUMENT. If the DOCUMENT does not contain the facts to answer the QUESTION, return {}.",
			cfg.no_answer_sentinel,
		),
	}));

	messages
}
