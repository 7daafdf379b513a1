use crate::model::ProfileName;
use denylint_domain::config::{FailOn, LintConfig};
use denylint_types::{Severity, ids};

/// Starting point for a profile before `denylint.toml` and CLI overrides apply.
pub fn preset(profile: ProfileName) -> LintConfig {
    let name = profile.as_str();
    match profile {
        ProfileName::Strict => LintConfig::uniform(name, Severity::Error, FailOn::Error),
        ProfileName::Warn => LintConfig::uniform(name, Severity::Warning, FailOn::Warning),
        ProfileName::Compat => {
            // Older policy files carry keys from earlier schema revisions.
            let mut cfg = LintConfig::uniform(name, Severity::Warning, FailOn::Error);
            if let Some(rule) = cfg.rules.get_mut(ids::CHECK_SCHEMA_UNKNOWN_KEY) {
                rule.severity = Severity::Info;
            }
            cfg
        }
    }
}
