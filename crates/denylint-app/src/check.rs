//! The `check` use case: load the policy file, lint it, and produce a report.

use anyhow::Context;
use denylint_domain::model::PolicyModel;
use denylint_settings::{Overrides, ResolvedConfig};
use denylint_types::{
    ConfigPath, DenylintReport, RunMeta, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::report::policy_parse_report;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Path of the policy file as it should appear in findings.
    pub policy_path: ConfigPath,
    /// Policy file contents.
    pub policy_text: &'a str,
    /// Linter config contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: DenylintReport,
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, load the policy, evaluate checks, produce report.
///
/// A policy file that does not load is reported as a `tool.runtime` finding rather than an
/// error so callers still get a report; only linter config problems return `Err`.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = denylint_settings::parse_config_toml(input.config_text).context("parse config")?;
    let resolved = denylint_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    debug!(
        profile = %resolved.effective.profile,
        max_findings = resolved.effective.max_findings,
        fail_on = resolved.effective.fail_on.as_str(),
        checks = resolved.effective.enabled_checks(),
        "resolved config"
    );

    let model = match PolicyModel::from_source(input.policy_path.clone(), input.policy_text) {
        Ok(model) => model,
        Err(err) => {
            info!(policy = %input.policy_path, error = %err, "policy file failed to load");
            let report = policy_parse_report(&input.policy_path, &resolved.effective.profile, &err);
            return Ok(CheckOutput {
                report,
                resolved_config: resolved,
            });
        }
    };
    debug!(
        sections = ?model.document.section_names(),
        unknown_keys = model.unknown_keys.len(),
        "loaded policy"
    );

    let denylint_domain::DomainReport {
        verdict,
        findings,
        data,
        counts,
    } = denylint_domain::evaluate(&model, &resolved.effective);

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    info!(
        verdict = ?verdict,
        errors = counts.error,
        warnings = counts.warn,
        info = counts.info,
        "check finished"
    );

    let report = DenylintReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "denylint".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            finished_at,
            duration_ms,
        },
        verdict,
        counts,
        findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use denylint_types::ids;

    fn input<'a>(policy_text: &'a str, config_text: &'a str) -> CheckInput<'a> {
        CheckInput {
            policy_path: ConfigPath::new("deny.toml"),
            policy_text,
            config_text,
            overrides: Overrides::default(),
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let output = run_check(input("[licenses]\nallow = [\"MIT\"]\n", "")).expect("run_check");
        assert_eq!(output.resolved_config.effective.profile, "strict");
        assert_eq!(output.report.schema, SCHEMA_REPORT_V1);
        assert_eq!(output.report.tool.name, "denylint");
        assert_eq!(output.report.verdict, Verdict::Pass);
        assert_eq!(output.report.data.sections, vec!["licenses"]);
    }

    #[test]
    fn findings_and_counts_flow_into_report() {
        let output = run_check(input(
            "[licenses]\nconfidence-threshold = 93.0\n\n[bans]\nskip = [{ version = \"1\" }]\n",
            "profile = \"warn\"\nfail_on = \"error\"\n",
        ))
        .expect("run_check");

        let report = output.report;
        assert_eq!(report.verdict, Verdict::Warn);
        assert_eq!(report.counts.warn, 2);
        assert_eq!(report.findings[0].code, ids::CODE_THRESHOLD_OUT_OF_RANGE);
        assert_eq!(report.findings[1].code, ids::CODE_MISSING_NAME);
        assert_eq!(verdict_exit_code(report.verdict), 0);
    }

    #[test]
    fn unloadable_policy_becomes_policy_parse_report() {
        let output =
            run_check(input("[licenses]\nallow = \"MIT\"\n", "")).expect("run_check");
        let report = output.report;

        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.check_id, ids::CHECK_TOOL_RUNTIME);
        assert_eq!(finding.code, ids::CODE_POLICY_PARSE);
        assert_eq!(finding.location.as_ref().and_then(|l| l.line), Some(2));
    }

    #[test]
    fn bad_config_is_an_error() {
        let err = run_check(input("", "profile = \"nope\"\n")).expect_err("bad profile");
        assert!(format!("{err:#}").contains("nope"));

        let mut bad_override = input("", "");
        bad_override.overrides.profile = Some("nope".to_string());
        let err = run_check(bad_override).expect_err("bad profile override");
        assert!(format!("{err:#}").contains("unknown profile"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Warn), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }
}
