use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Single-shot chat completion. Callers own retry policy; this function
/// performs exactly one request and surfaces any failure as-is.
pub async fn generate(
	cfg: &notarium_config::LlmProviderConfig,
	messages: &[Value],
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_generation_response(json)
}

fn parse_generation_response(json: Value) -> Result<String> {
	if let Some(content) = json
		.get("choices")
		.and_then(|value| value.as_array())
		.and_then(|choices| choices.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|message| message.get("content"))
		.and_then(|content| content.as_str())
	{
		return Ok(content.to_string());
	}

	Err(eyre::eyre!("Generation response is missing message content."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "role": "assistant", "content": "Paris." } },
				{ "message": { "role": "assistant", "content": "ignored" } }
			]
		});
		let answer = parse_generation_response(json).expect("parse failed");

		assert_eq!(answer, "Paris.");
	}

	#[test]
	fn surfaces_sentinel_content_verbatim() {
		let json = serde_json::json!({
			"choices": [{ "message": { "content": "{NONE}" } }]
		});
		let answer = parse_generation_response(json).expect("parse failed");

		assert_eq!(answer, "{NONE}");
	}

	#[test]
	fn rejects_empty_choices() {
		let json = serde_json::json!({ "choices": [] });

		assert!(parse_generation_response(json).is_err());
	}
}
