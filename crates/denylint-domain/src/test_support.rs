use crate::config::{CheckRule, FailOn, LintConfig};
use crate::model::PolicyModel;
use denylint_types::{ConfigPath, Severity};

pub fn load(text: &str) -> PolicyModel {
    PolicyModel::from_source(ConfigPath::new("deny.toml"), text).expect("policy should load")
}

/// Every check enabled at error severity.
pub fn strict_config() -> LintConfig {
    LintConfig::uniform("strict", Severity::Error, FailOn::Error)
}

/// Only `check_id` enabled.
pub fn config_with_check(check_id: &str, severity: Severity) -> LintConfig {
    config_with_check_allow(check_id, severity, Vec::new())
}

pub fn config_with_check_allow(check_id: &str, severity: Severity, allow: Vec<&str>) -> LintConfig {
    let mut cfg = LintConfig::uniform("test", severity, FailOn::Error);
    cfg.rules.clear();
    cfg.rules.insert(
        check_id.to_string(),
        CheckRule {
            allow: allow.into_iter().map(str::to_string).collect(),
            ..CheckRule::at(severity)
        },
    );
    cfg
}
