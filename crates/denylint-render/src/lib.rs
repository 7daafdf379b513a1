//! Rendering utilities for CI surfaces (Markdown summaries, GitHub annotations).
//!
//! Renderers take a [`RenderableReport`] and return strings; they never touch the filesystem.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdict,
};
