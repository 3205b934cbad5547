// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::rules::Rules;
use rstest::rstest;

fn normalizer() -> Normalizer {
    Rules::builtin().unwrap().normalizer().clone()
}

#[rstest]
#[case("3f2504e0-4f89-11d3-9a0c-0305e82c3301", "<uuid>")]
#[case("3F2504E0-4F89-11D3-9A0C-0305E82C3301", "<uuid>")]
#[case("2026-01-15T10:30:00Z", "<timestamp>")]
#[case("2026-01-15T10:30:00.123+02:00", "<timestamp>")]
#[case("1736937000", "<unix_ts>")]
#[case("1736937000123", "<unix_ts>")]
#[case("https://app.example.com/monitors/1", "<url>")]
#[case("http://localhost:8080", "<url>")]
#[case("d41d8cd98f00b204e9800998ecf8427e", "<hash>")]
#[case("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855", "<hash>")]
#[case("svc", "string")]
#[case("", "string")]
#[case("123456789", "string")]
#[case("2026-01-15", "string")]
#[case("ftp://example.com", "string")]
fn test_builtin_categories(#[case] leaf: &str, #[case] expected: &str) {
    assert_eq!(normalizer().normalize(leaf), expected);
}

#[test]
fn test_first_rule_wins() {
    // 32 decimal digits look like a hash but are also all digits; the epoch rule
    // needs 10-13 digits so the hash rule is the one that fires.
    let n = normalizer();
    assert_eq!(n.normalize("12345678901234567890123456789012"), "<hash>");

    let ordered = Normalizer::new(vec![
        (Regex::new(r"^\d+$").unwrap(), "<number>".to_string()),
        (Regex::new(r"^\d{10,13}$").unwrap(), "<unix_ts>".to_string()),
    ]);
    assert_eq!(ordered.normalize("1736937000"), "<number>");
}

#[test]
fn test_placeholder_equivalence_set() {
    let n = normalizer();
    for token in ["string", "<uuid>", "<timestamp>", "<unix_ts>", "<url>", "<hash>"] {
        assert!(n.is_placeholder(token), "{} should be a placeholder", token);
    }
    for token in ["bool", "int", "float", "null", "<...>"] {
        assert!(!n.is_placeholder(token), "{} should not be a placeholder", token);
    }
}
