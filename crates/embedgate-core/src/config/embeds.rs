//! Embed allowlist parsing.

use std::collections::HashMap;

/// Parse the embed allowlist mapping from its JSON source.
///
/// The expected shape is an object mapping embed id to an array of origin
/// strings. Anything else degrades to an empty mapping so the process
/// stays available; affected embeds then surface as unknown.
pub fn parse_embed_map(raw: &str) -> HashMap<String, Vec<String>> {
    match serde_json::from_str::<HashMap<String, Vec<String>>>(raw) {
        Ok(map) => map,
        Err(err) => {
            tracing::warn!(error = %err, "EMBEDGATE_EMBEDS is not a valid embed map; treating as empty");
            HashMap::new()
        }
    }
}
