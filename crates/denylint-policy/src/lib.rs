//! Policy file model and loading.
//!
//! This crate is IO-free: it turns the text of a `deny.toml`-style policy file into a typed
//! [`PolicyDocument`], keeping source spans so later layers can point findings at lines.
//! It never evaluates the policy against a dependency graph.

#![forbid(unsafe_code)]

pub mod expression;
mod level;
mod load;
mod model;
mod schema;

#[cfg(test)]
mod prop_tests;

pub use expression::{
    ExpressionError, ExpressionErrorKind, LicenseExpr, LicenseReq, MAX_NESTING, MAX_OPERATORS,
    is_valid_license_id,
};
pub use level::{LintLevel, OsiFsfFree};
pub use load::{PolicyError, line_of, load_policy};
pub use model::{
    BansSection, Clarification, LicenseException, LicenseFile, LicensesSection, PackageSpec,
    PolicyDocument, SourcesSection, TreeSkip,
};
pub use schema::{UnknownKey, unknown_keys};
pub use toml::Spanned;
