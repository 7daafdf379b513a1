use denylint_domain::config::FailOn;
use denylint_types::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// `denylint.toml` schema v1.
///
/// Every key is optional: an empty file (or no file at all) means the `strict` profile.
/// Misspelled keys are rejected rather than ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DenylintConfigV1 {
    /// Optional schema string for tooling (`denylint.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<FailOnLevel>,

    /// How many findings the report lists. The verdict always counts all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Per-check settings keyed by check id, e.g. `[checks."bans.skip"]`.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLevel>,

    /// Glob patterns matched against the package name, license id, or key a finding is
    /// about. Matching findings are suppressed.
    #[serde(default)]
    pub allow: Vec<String>,
}

/// Preset profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    /// Every check reports errors.
    #[default]
    Strict,
    /// Every check reports warnings, and warnings fail the run.
    Warn,
    /// Warnings that do not fail the run; unknown keys are informational.
    Compat,
}

impl ProfileName {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileName::Strict => "strict",
            ProfileName::Warn => "warn",
            ProfileName::Compat => "compat",
        }
    }
}

impl FromStr for ProfileName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ProfileName::Strict),
            "warn" => Ok(ProfileName::Warn),
            "compat" => Ok(ProfileName::Compat),
            other => anyhow::bail!("unknown profile: {other} (expected strict|warn|compat)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl From<SeverityLevel> for Severity {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Info => Severity::Info,
            SeverityLevel::Warning => Severity::Warning,
            SeverityLevel::Error => Severity::Error,
        }
    }
}

/// Lowest severity that fails the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FailOnLevel {
    Error,
    #[serde(alias = "warn")]
    Warning,
}

impl From<FailOnLevel> for FailOn {
    fn from(level: FailOnLevel) -> Self {
        match level {
            FailOnLevel::Error => FailOn::Error,
            FailOnLevel::Warning => FailOn::Warning,
        }
    }
}

impl FromStr for FailOnLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(FailOnLevel::Error),
            "warning" | "warn" => Ok(FailOnLevel::Warning),
            other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
        }
    }
}
