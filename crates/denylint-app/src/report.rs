use anyhow::Context;
use denylint_policy::PolicyError;
use denylint_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdict,
};
use denylint_types::{
    ConfigPath, DenylintData, DenylintReport, Finding, Location, RunMeta, SCHEMA_REPORT_V1,
    Severity, ToolMeta, Verdict, VerdictCounts, ids,
};
use serde_json::json;
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<DenylintReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse denylint report")
}

pub fn serialize_report(report: &DenylintReport) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn to_renderable(report: &DenylintReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Warn => RenderableVerdict::Warn,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            policy_path: report.data.policy_path.as_str().to_string(),
            profile: report.data.profile.clone(),
            sections: report.data.sections.clone(),
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
        }),
        help: f.help.clone(),
    }
}

/// Report for a run that could not complete (unreadable files, bad linter config).
pub fn runtime_error_report(policy_path: &ConfigPath, message: &str) -> DenylintReport {
    failure_report(
        policy_path,
        "unknown",
        Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run denylint.".to_string()),
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        },
    )
}

/// Report for a policy file that is not valid TOML or does not match the schema's types.
pub fn policy_parse_report(
    policy_path: &ConfigPath,
    profile: &str,
    err: &PolicyError,
) -> DenylintReport {
    failure_report(
        policy_path,
        profile,
        Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_POLICY_PARSE.to_string(),
            message: err.to_string(),
            location: Some(Location {
                path: policy_path.clone(),
                line: err.line(),
                col: None,
            }),
            help: Some(
                "Fix the TOML syntax or the value type at the reported line.".to_string(),
            ),
            url: None,
            fingerprint: None,
            data: json!({ "line": err.line() }),
        },
    )
}

fn failure_report(policy_path: &ConfigPath, profile: &str, finding: Finding) -> DenylintReport {
    let now = OffsetDateTime::now_utc();
    DenylintReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "denylint".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at: now,
            finished_at: now,
            duration_ms: 0,
        },
        verdict: Verdict::Fail,
        counts: VerdictCounts {
            info: 0,
            warn: 0,
            error: 1,
        },
        findings: vec![finding],
        data: DenylintData {
            profile: profile.to_string(),
            policy_path: policy_path.clone(),
            findings_total: 1,
            findings_emitted: 1,
            ..DenylintData::default()
        },
    }
}
