//! Pure policy-file linting (no IO).
//!
//! Input: a policy model constructed from file text elsewhere.
//! Output: findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod config;
pub mod model;

pub mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod test_support;

pub use engine::{DomainReport, evaluate};
pub use fingerprint::fingerprint_for;
