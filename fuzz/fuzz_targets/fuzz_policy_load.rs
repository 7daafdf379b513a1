//! Fuzz target for policy file loading and evaluation.
//!
//! Loading may fail on arbitrary input; nothing in load, the unknown-key walk, or
//! evaluation may panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_load
//! ```

#![no_main]

use denylint_domain::config::{FailOn, LintConfig};
use denylint_domain::model::PolicyModel;
use denylint_types::{ConfigPath, Severity, Verdict};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = denylint_policy::unknown_keys(text);

    let Ok(model) = PolicyModel::from_source(ConfigPath::new("deny.toml"), text) else {
        return;
    };

    let mut cfg = LintConfig::uniform("strict", Severity::Warning, FailOn::Warning);
    cfg.max_findings = 5;

    let report = denylint_domain::evaluate(&model, &cfg);
    assert!(report.findings.len() <= cfg.max_findings);
    assert_eq!(
        report.verdict == Verdict::Fail,
        report.data.findings_total > 0
    );
});
