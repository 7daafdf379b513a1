use crate::checks;
use crate::config::LintConfig;
use crate::model::PolicyModel;
use denylint_types::{DenylintData, Finding, Severity, Verdict, VerdictCounts};
use std::cmp::Ordering;

/// Result of linting one policy file.
#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// Sorted and capped at `max_findings`.
    pub findings: Vec<Finding>,
    pub data: DenylintData,
    /// Counts over every finding, including any cut by `max_findings`.
    pub counts: VerdictCounts,
}

pub fn evaluate(model: &PolicyModel, cfg: &LintConfig) -> DomainReport {
    let mut findings: Vec<Finding> = Vec::new();
    checks::run_all(model, cfg, &mut findings);
    findings.sort_by(compare_findings);

    // The verdict must see findings that truncation drops.
    let counts = tally(&findings);
    let verdict = cfg.fail_on.verdict(&counts);

    let total = findings.len();
    let truncated_reason = (total > cfg.max_findings).then(|| {
        findings.truncate(cfg.max_findings);
        format!("findings truncated to max_findings={}", cfg.max_findings)
    });

    let data = DenylintData {
        profile: cfg.profile.clone(),
        policy_path: model.path.clone(),
        sections: model
            .document
            .section_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        licenses_declared: model.licenses_declared() as u32,
        clarifications: model.clarifications() as u32,
        skip_entries: model.skip_entries() as u32,
        findings_total: total as u32,
        findings_emitted: findings.len() as u32,
        truncated_reason,
    };

    DomainReport {
        verdict,
        findings,
        data,
        counts,
    }
}

fn tally(findings: &[Finding]) -> VerdictCounts {
    findings
        .iter()
        .fold(VerdictCounts::default(), |mut counts, f| {
            match f.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warn += 1,
                Severity::Info => counts.info += 1,
            }
            counts
        })
}

/// Report order: severity (errors first), path, line (findings without one last), check id,
/// code, message.
pub(crate) fn compare_findings(a: &Finding, b: &Finding) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(f: &Finding) -> (u8, &str, u32, &str, &str, &str) {
    let rank = match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let (path, line) = f
        .location
        .as_ref()
        .map_or(("~", u32::MAX), |l| (l.path.as_str(), l.line.unwrap_or(u32::MAX)));
    (
        rank,
        path,
        line,
        f.check_id.as_str(),
        f.code.as_str(),
        f.message.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailOn;
    use crate::test_support::{config_with_check, load};
    use denylint_types::ids;

    #[test]
    fn clean_policy_passes_with_summary_data() {
        let model = load(
            r#"
[licenses]
allow = ["MIT", "Apache-2.0"]
deny = ["GPL-3.0"]

[[licenses.clarify]]
name = "ring"
expression = "MIT AND ISC AND OpenSSL"
license-files = [{ path = "LICENSE", hash = 0xbd0eed23 }]

[bans]
skip = [{ name = "syn", version = "1" }]
"#,
        );
        let cfg = crate::test_support::strict_config();

        let report = evaluate(&model, &cfg);
        assert_eq!(report.verdict, Verdict::Pass, "{:?}", report.findings);
        assert!(report.findings.is_empty());
        assert_eq!(report.data.sections, vec!["licenses", "bans"]);
        assert_eq!(report.data.licenses_declared, 3);
        assert_eq!(report.data.clarifications, 1);
        assert_eq!(report.data.skip_entries, 1);
        assert_eq!(report.data.policy_path.as_str(), "deny.toml");
    }

    #[test]
    fn verdict_warn_becomes_fail_when_fail_on_warning() {
        let model = load("[licenses]\nallow = [\"MIT\", \"MIT\"]\n");

        let mut cfg = config_with_check(ids::CHECK_LICENSES_ALLOW_IDENTIFIERS, Severity::Warning);
        assert_eq!(evaluate(&model, &cfg).verdict, Verdict::Warn);

        cfg.fail_on = FailOn::Warning;
        assert_eq!(evaluate(&model, &cfg).verdict, Verdict::Fail);
    }

    #[test]
    fn info_findings_never_fail() {
        let model = load("[bans]\nmultiple-version = \"deny\"\n");
        let mut cfg = config_with_check(ids::CHECK_SCHEMA_UNKNOWN_KEY, Severity::Info);
        cfg.fail_on = FailOn::Warning;

        let report = evaluate(&model, &cfg);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.counts.info, 1);
    }

    #[test]
    fn findings_are_sorted_and_truncated() {
        let model = load(
            "[licenses]\nallow = [\"not a license\", \"MIT\", \"MIT\"]\nconfidence-threshold = 2.0\n",
        );
        let mut cfg = crate::test_support::strict_config();
        cfg.max_findings = 2;

        let report = evaluate(&model, &cfg);
        assert_eq!(report.data.findings_total, 3);
        assert_eq!(report.data.findings_emitted, 2);
        assert_eq!(
            report.data.truncated_reason.as_deref(),
            Some("findings truncated to max_findings=2")
        );
        let lines: Vec<_> = report
            .findings
            .iter()
            .map(|f| f.location.as_ref().and_then(|l| l.line))
            .collect();
        assert_eq!(lines, vec![Some(2), Some(2)]);
    }

    #[test]
    fn truncation_never_hides_a_failing_verdict() {
        let model = load("[licenses]\nallow = [\"not a license\"]\n");
        let mut cfg = crate::test_support::strict_config();
        cfg.max_findings = 0;

        let report = evaluate(&model, &cfg);
        assert!(report.findings.is_empty());
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.counts.error, 1);
        assert_eq!(report.data.findings_total, 1);
        assert_eq!(report.data.findings_emitted, 0);
        assert_eq!(
            report.data.truncated_reason.as_deref(),
            Some("findings truncated to max_findings=0")
        );
    }

    #[test]
    fn counts_include_truncated_findings() {
        let model = load(
            "[licenses]\nallow = [\"not a license\", \"MIT\", \"MIT\"]\nconfidence-threshold = 2.0\n",
        );
        let mut cfg = crate::test_support::strict_config();
        cfg.max_findings = 1;

        let report = evaluate(&model, &cfg);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.counts.error, 3);
    }
}
