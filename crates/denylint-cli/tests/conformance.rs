//! Conformance tests for denylint.
//!
//! - every check ID and code has an explanation
//! - every ID the engine can emit is registered
//! - fixture reports validate against the report shape

use denylint_types::{explain, ids};
use serde_json::Value;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("denylint-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
}

fn fixture_names() -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().join("deny.toml").is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

#[test]
fn all_check_ids_and_codes_have_explanations() {
    for id in explain::all_check_ids().iter().chain(explain::all_codes()) {
        let exp = explain::lookup_explanation(id)
            .unwrap_or_else(|| panic!("'{id}' has no explanation in registry"));
        assert!(!exp.title.is_empty(), "'{id}' has empty title");
        assert!(!exp.description.is_empty(), "'{id}' has empty description");
        assert!(!exp.remediation.is_empty(), "'{id}' has empty remediation");
        assert!(!exp.examples.before.is_empty(), "'{id}' has no flagged example");
        assert!(!exp.examples.after.is_empty(), "'{id}' has no accepted example");
    }
}

#[test]
fn check_ids_are_namespaced_and_codes_are_snake_case() {
    for id in explain::all_check_ids() {
        let (namespace, name) = id.split_once('.').expect("namespaced id");
        assert!(
            ["licenses", "bans", "schema"].contains(&namespace),
            "unexpected namespace in {id}"
        );
        assert!(!name.is_empty());
    }
    for code in explain::all_codes() {
        assert!(
            code.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
            "code '{code}' is not snake_case"
        );
    }
}

#[test]
fn registry_lists_every_emitted_id() {
    for id in [
        ids::CHECK_LICENSES_ALLOW_IDENTIFIERS,
        ids::CHECK_LICENSES_CONFIDENCE_THRESHOLD,
        ids::CHECK_LICENSES_EXCEPTIONS,
        ids::CHECK_LICENSES_CLARIFY,
        ids::CHECK_BANS_SKIP,
        ids::CHECK_SCHEMA_UNKNOWN_KEY,
    ] {
        assert!(explain::all_check_ids().contains(&id), "{id} not registered");
    }
    for code in [
        ids::CODE_INVALID_LICENSE_ID,
        ids::CODE_DUPLICATE_LICENSE,
        ids::CODE_THRESHOLD_OUT_OF_RANGE,
        ids::CODE_MISSING_NAME,
        ids::CODE_INVALID_VERSION_REQ,
        ids::CODE_EMPTY_ALLOW,
        ids::CODE_DUPLICATE_EXCEPTION,
        ids::CODE_INVALID_EXPRESSION,
        ids::CODE_MISSING_LICENSE_FILES,
        ids::CODE_INVALID_LICENSE_FILE,
        ids::CODE_DUPLICATE_SKIP,
        ids::CODE_UNKNOWN_KEY,
    ] {
        assert!(explain::all_codes().contains(&code), "{code} not registered");
    }
}

#[test]
fn fixture_expectations_reference_known_ids() {
    let names = fixture_names();
    assert!(names.len() >= 8, "fixtures missing: {names:?}");

    for name in names {
        let path = fixtures_dir().join(&name).join("expected.json");
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("{name}: read expected.json: {e}"));
        let expected: Value = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("{name}: invalid expected.json: {e}"));

        let verdict = expected["verdict"].as_str().expect("verdict");
        assert!(["pass", "warn", "fail"].contains(&verdict), "{name}: {verdict}");

        for finding in expected["findings"].as_array().expect("findings") {
            let check_id = finding[0].as_str().expect("check_id");
            let code = finding[1].as_str().expect("code");
            if check_id == ids::CHECK_TOOL_RUNTIME {
                assert!(
                    [ids::CODE_RUNTIME_ERROR, ids::CODE_POLICY_PARSE].contains(&code),
                    "{name}: {code}"
                );
                continue;
            }
            assert!(explain::all_check_ids().contains(&check_id), "{name}: {check_id}");
            assert!(explain::all_codes().contains(&code), "{name}: {code}");
        }
    }
}

#[test]
fn report_schema_requires_envelope_fields() {
    let schema = serde_json::to_value(denylint_types::report_schema()).expect("schema json");
    let required: Vec<&str> = schema["required"]
        .as_array()
        .expect("required")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    for field in ["schema", "tool", "run", "verdict", "counts", "findings", "data"] {
        assert!(required.contains(&field), "{field} not required");
    }
}
