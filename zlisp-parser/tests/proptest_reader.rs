// zlisp-parser - Property-based tests for the reader
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for reading and printing.
//!
//! Tests the following properties:
//! - printing a parsed literal form reproduces its source
//! - the parser never panics and always terminates on arbitrary input
//! - every top-level form survives when separated by malformed ones

use proptest::prelude::*;
use zlisp_parser::{Value, parse};

// =============================================================================
// Strategies for generating source text
// =============================================================================

fn arb_int() -> impl Strategy<Value = String> {
    any::<i64>().prop_map(|n| n.to_string())
}

fn arb_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,8}".prop_map(|s| format!("\"{}\"", s))
}

fn arb_symbol() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9?-]{0,6}"
}

fn arb_keyword() -> impl Strategy<Value = String> {
    "[a-z]{1,5}".prop_map(|s| format!(":{}", s))
}

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_int(),
        arb_string(),
        arb_symbol(),
        arb_keyword(),
        Just("nil".to_string()),
        Just("true".to_string()),
    ]
}

/// Nested literal forms in canonical printed layout.
fn arb_form() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(4, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|items| format!("({})", items.join(" "))),
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|items| format!("[{}]", items.join(" "))),
            // Sorted, distinct keys print in the order they are generated.
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|entries| {
                let pairs: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("\"{}\" {}", k, v))
                    .collect();
                format!("{{{}}}", pairs.join(" "))
            }),
        ]
    })
}

// =============================================================================
// Round-trip tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// print(parse(f)) = f
    #[test]
    fn print_parse_round_trip(src in arb_form()) {
        let (doc, sink) = parse(&src);
        prop_assert!(sink.is_empty(), "diagnostics for {}: {:?}", src, sink);
        let doc = doc.unwrap();
        prop_assert_eq!(doc.children.len(), 1);
        prop_assert_eq!(doc.children[0].to_string(), src);
    }

    /// Extra whitespace and comments do not change the parsed form
    #[test]
    fn whitespace_is_insignificant(src in arb_form()) {
        let spaced = format!("  ; leading comment\n\t{}\n  ", src);
        let (a, _) = parse(&src);
        let (b, sink) = parse(&spaced);
        prop_assert!(sink.is_empty());
        prop_assert_eq!(a.unwrap().children, b.unwrap().children);
    }

    /// A malformed form between two good ones costs one diagnostic and is
    /// kept with the elements read before the error
    #[test]
    fn good_forms_survive_recovery(a in arb_form(), b in arb_form()) {
        let src = format!("{} (oops ] x) {}", a, b);
        let (doc, sink) = parse(&src);
        prop_assert_eq!(sink.len(), 1);
        let children = doc.unwrap().children;
        prop_assert_eq!(children.len(), 3);
        prop_assert_eq!(children[0].to_string(), a);
        prop_assert_eq!(children[1].to_string(), "(oops)");
        prop_assert_eq!(children[2].to_string(), b);
    }

    /// An error deep inside a form leaves the forms around it intact
    #[test]
    fn nested_error_keeps_outer_form(a in arb_form(), b in arb_form()) {
        let src = format!("(outer {} (inner ]) {})", a, b);
        let (doc, sink) = parse(&src);
        prop_assert_eq!(sink.len(), 1);
        let children = doc.unwrap().children;
        prop_assert_eq!(children.len(), 1);
        prop_assert_eq!(children[0].to_string(), format!("(outer {} (inner) {})", a, b));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Arbitrary input always yields a result
    #[test]
    fn parse_never_panics(src in "[()\\[\\]{}a-z0-9 \"':;`~@^&.#\\n-]{0,40}") {
        let (doc, sink) = parse(&src);
        if doc.is_none() {
            prop_assert!(sink.has_fatal());
        }
    }

    /// Integers read back as themselves
    #[test]
    fn integers_read_exactly(n in any::<i64>()) {
        let (doc, _) = parse(&n.to_string());
        prop_assert_eq!(doc.unwrap().children, vec![Value::int(n)]);
    }
}
