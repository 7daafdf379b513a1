use crate::checks::utils::FindingBuilder;
use crate::model::PolicyModel;
use crate::config::LintConfig;
use denylint_types::{Finding, ids};
use serde_json::json;

pub fn run(model: &PolicyModel, cfg: &LintConfig, out: &mut Vec<Finding>) {
    let Some(rule) = cfg.rule(ids::CHECK_LICENSES_CONFIDENCE_THRESHOLD) else {
        return;
    };
    let Some(threshold) = model
        .document
        .licenses
        .as_ref()
        .and_then(|l| l.confidence_threshold.as_ref())
    else {
        return;
    };

    let value = *threshold.get_ref();
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        return;
    }

    let builder = FindingBuilder {
        check_id: ids::CHECK_LICENSES_CONFIDENCE_THRESHOLD,
        rule,
        policy_path: model.path.as_str(),
    };
    builder.push(
        out,
        ids::CODE_THRESHOLD_OUT_OF_RANGE,
        "confidence-threshold",
        format!("licenses.confidence-threshold is {value}, expected a value between 0.0 and 1.0"),
        model.location(Some(threshold.span())),
        "Use a fraction such as 0.93 instead of a percentage.",
        // NaN and infinities are not representable in JSON; record the text form.
        json!({ "value": value.to_string() }),
    );
}
