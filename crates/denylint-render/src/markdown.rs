use crate::{RenderableFinding, RenderableReport, RenderableVerdict};

/// Render a report as a Markdown summary suitable for a PR comment or job summary.
pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();
    let data = &report.data;

    out.push_str("# Denylint report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Warn => "WARN",
        RenderableVerdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Policy: `{}` (profile `{}`)\n",
        data.policy_path, data.profile
    ));
    if data.sections.is_empty() {
        out.push_str("- Sections: none\n");
    } else {
        out.push_str(&format!("- Sections: {}\n", data.sections.join(", ")));
    }
    out.push_str(&format!(
        "- Verdict: **{}**\n- Findings: {} emitted / {} total\n\n",
        verdict, data.findings_emitted, data.findings_total
    ));

    if let Some(reason) = &data.truncated_reason {
        out.push_str(&format!("> Note: {reason}\n\n"));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    out.push_str("| Severity | Check | Location | Message |\n");
    out.push_str("| --- | --- | --- | --- |\n");
    for f in &report.findings {
        out.push_str(&format!(
            "| {} | `{}` / `{}` | {} | {} |\n",
            f.severity.label(),
            f.check_id,
            f.code,
            location_cell(f),
            escape_cell(&f.message)
        ));
    }

    let helps: Vec<_> = report
        .findings
        .iter()
        .filter_map(|f| f.help.as_deref().map(|h| (f, h)))
        .collect();
    if !helps.is_empty() {
        out.push_str("\n## How to fix\n\n");
        let mut seen = std::collections::BTreeSet::new();
        for (f, help) in helps {
            // One hint per check/code pair; the table already lists every occurrence.
            if seen.insert((f.check_id.as_str(), f.code.as_str())) {
                out.push_str(&format!("- `{}` / `{}`: {}\n", f.check_id, f.code, help));
            }
        }
    }

    out
}

fn location_cell(f: &RenderableFinding) -> String {
    match &f.location {
        Some(loc) => match loc.line {
            Some(line) => format!("`{}:{}`", loc.path, line),
            None => format!("`{}`", loc.path),
        },
        None => "-".to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
