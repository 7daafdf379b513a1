use crate::checks::utils::{FindingBuilder, build_allowlist, is_allowed};
use crate::model::PolicyModel;
use crate::config::LintConfig;
use denylint_types::{Finding, ids};
use serde_json::json;

pub fn run(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    let Some(rule) = cfg.rule(ids::CHECK_SCHEMA_UNKNOWN_KEY) else {
        return;
    };
    let allow = build_allowlist(&rule.allow);
    let builder = FindingBuilder {
        check_id: ids::CHECK_SCHEMA_UNKNOWN_KEY,
        rule,
        policy_path: model.path.as_str(),
    };

    for key in &model.unknown_keys {
        if is_allowed(allow.as_ref(), &key.path) {
            continue;
        }
        builder.push(
            out,
            ids::CODE_UNKNOWN_KEY,
            &key.path,
            format!("'{}' is not a known policy key and will be ignored", key.path),
            model.location_at_line(key.line),
            "Check the spelling against the policy schema or remove the key.",
            json!({ "key": key.key, "path": key.path }),
        );
    }
}
