//! Shared test utilities for the denylint workspace.
//!
//! Reports carry wall-clock timestamps and the tool version; golden comparisons need both
//! pinned.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Replace run timestamps, `duration_ms`, and `tool.version` with fixed placeholders.
///
/// Only the envelope's own `run` and `tool` objects are touched; finding `data` payloads are
/// left alone even when they happen to contain keys with the same names.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(root) = value.as_object_mut() else {
        return value;
    };

    if let Some(tool) = root.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }

    if let Some(run) = root.get_mut("run").and_then(Value::as_object_mut) {
        for key in ["started_at", "finished_at"] {
            if run.contains_key(key) {
                run.insert(
                    key.to_string(),
                    Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                );
            }
        }
        if run.contains_key("duration_ms") {
            run.insert("duration_ms".to_string(), Value::from(0));
        }
    }

    value
}

/// `(check_id, code, line)` for every finding, in report order.
pub fn finding_triples(report: &Value) -> Vec<(String, String, Option<u64>)> {
    report["findings"]
        .as_array()
        .map(|findings| {
            findings
                .iter()
                .map(|f| {
                    (
                        f["check_id"].as_str().unwrap_or_default().to_string(),
                        f["code"].as_str().unwrap_or_default().to_string(),
                        f["location"]["line"].as_u64(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
