//! Fuzz target for SPDX license expressions.
//!
//! Any expression that parses must print to a canonical form that parses again and
//! prints identically.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_license_expression
//! ```

#![no_main]

use denylint_policy::LicenseExpr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(expr) = LicenseExpr::parse(text) else {
        return;
    };

    let canonical = expr.to_string();
    let reparsed = LicenseExpr::parse(&canonical).expect("canonical form must parse");
    assert_eq!(reparsed.to_string(), canonical);
});
