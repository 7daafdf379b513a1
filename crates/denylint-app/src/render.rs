//! Render use cases: markdown and GitHub annotations from in-memory reports.

use crate::report::to_renderable;
use denylint_types::DenylintReport;

pub fn render_markdown(report: &DenylintReport) -> String {
    denylint_render::render_markdown(&to_renderable(report))
}

/// GitHub annotations, capped at `max` lines (the runner drops anything past its own limit).
pub fn render_annotations(report: &DenylintReport, max: usize) -> Vec<String> {
    denylint_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}
