#![allow(dead_code)]

use jcl::{Atom, AtomValue, parse};

pub fn parse_ok(input: &str) -> Atom {
    parse(input.as_bytes()).unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"))
}

/// Compact structural rendering: `batch(cmd(echo 1))`.
pub fn shape(atom: &Atom) -> String {
    match &atom.value {
        AtomValue::Null => "null".to_string(),
        AtomValue::Symbol(s) | AtomValue::String(s) => s.clone(),
        AtomValue::Int(n) => n.to_string(),
        _ => {
            let children: Vec<String> = atom.children().iter().map(shape).collect();
            format!(
                "{}({})",
                atom.kind().to_string().to_lowercase(),
                children.join(" ")
            )
        }
    }
}

/// Helper: assert every child span lies inside its parent and that
/// siblings are ordered without overlap.
pub fn assert_spans_nested(atom: &Atom) {
    let mut prev_end = atom.span.start;
    for child in atom.children() {
        assert!(
            atom.span.contains(child.span),
            "child {:?} escapes parent {:?}",
            child.span,
            atom.span
        );
        assert!(
            child.span.start >= prev_end,
            "child {:?} overlaps previous sibling ending at {prev_end}",
            child.span
        );
        prev_end = child.span.end;
        assert_spans_nested(child);
    }
}
