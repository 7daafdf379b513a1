//! Property-based tests for policy loading and license expressions.
//!
//! These tests use proptest to verify invariants around:
//! - The expression parser never panicking on arbitrary input
//! - Canonical rendering being stable under re-parsing
//! - Policy loading never panicking

use crate::expression::{LicenseExpr, LicenseReq, is_valid_license_id};
use crate::load::load_policy;
use crate::schema::unknown_keys;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for valid SPDX-style identifiers.
fn arb_license_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("MIT".to_string()),
        Just("Apache-2.0".to_string()),
        Just("BSD-3-Clause".to_string()),
        Just("Unicode-3.0".to_string()),
        prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9.-]{0,15}")
            .unwrap()
            .prop_filter("operators and ref prefixes are not plain identifiers", |s| {
                !["and", "or", "with"].contains(&s.to_ascii_lowercase().as_str())
                    && !s.starts_with("LicenseRef-")
                    && !s.starts_with("DocumentRef-")
            }),
        prop::string::string_regex("[a-z0-9]{1,8}")
            .unwrap()
            .prop_map(|s| format!("LicenseRef-{s}")),
    ]
}

fn arb_req() -> impl Strategy<Value = LicenseReq> {
    (
        arb_license_id(),
        any::<bool>(),
        prop::option::of(Just("LLVM-exception".to_string())),
    )
        .prop_map(|(id, or_later, exception)| LicenseReq {
            id,
            or_later,
            exception,
        })
}

/// Strategy for arbitrary expression trees.
fn arb_expr() -> impl Strategy<Value = LicenseExpr> {
    let leaf = arb_req().prop_map(LicenseExpr::License);
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| LicenseExpr::And(Box::new(a), Box::new(b))),
            (inner.clone(), inner).prop_map(|(a, b)| LicenseExpr::Or(Box::new(a), Box::new(b))),
        ]
    })
}

proptest! {
    /// The parser may reject input but must never panic.
    #[test]
    fn parse_never_panics(input in "\\PC{0,64}") {
        let _ = LicenseExpr::parse(&input);
    }

    /// Rendering is canonical: render -> parse -> render is a fixed point.
    #[test]
    fn display_is_a_fixed_point(expr in arb_expr()) {
        let rendered = expr.to_string();
        let reparsed = LicenseExpr::parse(&rendered)
            .map_err(|e| TestCaseError::fail(format!("{rendered:?}: {e}")))?;
        prop_assert_eq!(reparsed.to_string(), rendered);
        prop_assert_eq!(reparsed.requirements().len(), expr.requirements().len());
    }

    /// Generated identifiers are accepted by the identifier check.
    #[test]
    fn generated_ids_are_valid(id in arb_license_id()) {
        prop_assert!(is_valid_license_id(&id));
    }

    /// Identifiers containing whitespace are never valid.
    #[test]
    fn ids_with_spaces_are_invalid(a in "[A-Za-z0-9]{1,8}", b in "[A-Za-z0-9]{1,8}") {
        let id = format!("{a} {b}");
        prop_assert!(!is_valid_license_id(&id));
    }

    /// Loading arbitrary text never panics, and neither does the unknown-key scan.
    #[test]
    fn load_never_panics(input in "\\PC{0,128}") {
        let _ = load_policy(&input);
        let _ = unknown_keys(&input);
    }
}
