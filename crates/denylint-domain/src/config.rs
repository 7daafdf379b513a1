//! Linter settings as the engine sees them, after profile and `denylint.toml` resolution.
//!
//! "Policy" in this crate always means the audited policy file; these types describe how
//! denylint itself is configured.

use denylint_types::{Severity, Verdict, VerdictCounts, explain};
use std::collections::BTreeMap;

/// Findings emitted per report unless the profile or config says otherwise.
pub const DEFAULT_MAX_FINDINGS: usize = 200;

/// Lowest severity that makes a run fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

impl FailOn {
    pub fn as_str(self) -> &'static str {
        match self {
            FailOn::Error => "error",
            FailOn::Warning => "warning",
        }
    }

    /// Verdict for a run that produced `counts`. Info findings never affect it.
    pub fn verdict(self, counts: &VerdictCounts) -> Verdict {
        match self {
            _ if counts.error > 0 => Verdict::Fail,
            FailOn::Warning if counts.warn > 0 => Verdict::Fail,
            FailOn::Error if counts.warn > 0 => Verdict::Warn,
            _ => Verdict::Pass,
        }
    }
}

/// How one check runs: whether at all, at which severity, and which subjects it skips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckRule {
    pub enabled: bool,
    pub severity: Severity,
    /// Globs matched against the package name or license id a finding is about.
    pub allow: Vec<String>,
}

impl CheckRule {
    pub fn at(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
            allow: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LintConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    /// Keyed by check id; every registered check has an entry.
    pub rules: BTreeMap<String, CheckRule>,
}

impl LintConfig {
    /// Every registered check enabled at `severity`.
    pub fn uniform(profile: &str, severity: Severity, fail_on: FailOn) -> Self {
        Self {
            profile: profile.to_string(),
            fail_on,
            max_findings: DEFAULT_MAX_FINDINGS,
            rules: explain::all_check_ids()
                .iter()
                .map(|id| (id.to_string(), CheckRule::at(severity)))
                .collect(),
        }
    }

    /// The rule for `check_id`, or `None` when the check is disabled or unknown.
    pub fn rule(&self, check_id: &str) -> Option<&CheckRule> {
        self.rules.get(check_id).filter(|r| r.enabled)
    }

    pub fn enabled_checks(&self) -> usize {
        self.rules.values().filter(|r| r.enabled).count()
    }
}
