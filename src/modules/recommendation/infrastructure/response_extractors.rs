//! Text extraction from recommendation proxy payloads
//!
//! The proxy has shipped several response shapes (raw chat completions,
//! reasoning-model output, legacy completions, a normalized `{titles}` body),
//! and nothing pins it to one. Extractors run in this order; the first
//! non-empty string wins.

use serde_json::Value;

type Extractor = fn(&Value) -> Option<String>;

pub const EXTRACTORS: &[(&str, Extractor)] = &[
    ("choices[0].message.content", message_content),
    ("choices[0].message.reasoning", message_reasoning),
    ("choices[0].message.reasoning_details[0].text", reasoning_details_text),
    ("choices[0].text", legacy_completion_text),
    ("content", top_level_content),
    ("text", top_level_text),
    ("response", top_level_response),
    ("titles", normalized_titles),
];

/// First non-empty text in `payload`, with the name of the field it came from
pub fn extract_text(payload: &Value) -> Option<(&'static str, String)> {
    EXTRACTORS
        .iter()
        .find_map(|(field, extractor)| extractor(payload).map(|text| (*field, text)))
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn first_choice(payload: &Value) -> Option<&Value> {
    payload.get("choices")?.get(0)
}

fn message_content(payload: &Value) -> Option<String> {
    non_empty(first_choice(payload)?.get("message")?.get("content"))
}

fn message_reasoning(payload: &Value) -> Option<String> {
    non_empty(first_choice(payload)?.get("message")?.get("reasoning"))
}

fn reasoning_details_text(payload: &Value) -> Option<String> {
    non_empty(
        first_choice(payload)?
            .get("message")?
            .get("reasoning_details")?
            .get(0)?
            .get("text"),
    )
}

fn legacy_completion_text(payload: &Value) -> Option<String> {
    non_empty(first_choice(payload)?.get("text"))
}

fn top_level_content(payload: &Value) -> Option<String> {
    non_empty(payload.get("content"))
}

fn top_level_text(payload: &Value) -> Option<String> {
    non_empty(payload.get("text"))
}

fn top_level_response(payload: &Value) -> Option<String> {
    non_empty(payload.get("response"))
}

/// `{ "titles": [...] }` from proxies that already parsed the completion
fn normalized_titles(payload: &Value) -> Option<String> {
    let titles: Vec<&str> = payload
        .get("titles")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .collect();

    (!titles.is_empty()).then(|| titles.join(", "))
}

/// `{ "error": "..." }` body, if the proxy reported one
pub fn proxy_error(payload: &Value) -> Option<String> {
    non_empty(payload.get("error"))
}
