//! Outline printer for atom trees.
//!
//! Each atom is one line: two spaces of indentation per level of
//! depth, a ` * ` bullet, then the atom's kind and value.

use crate::ast::{Atom, AtomValue};

/// Format an atom tree as an indented outline.
#[must_use]
pub fn format(atom: &Atom) -> String {
    let mut out = String::new();
    format_atom(&mut out, atom, 0);
    out
}

fn format_atom(out: &mut String, atom: &Atom, depth: usize) {
    write_indent(out, depth);
    out.push_str(" * ");
    out.push_str(&describe(atom));
    out.push('\n');

    for child in atom.children() {
        format_atom(out, child, depth + 1);
    }
}

fn describe(atom: &Atom) -> String {
    match &atom.value {
        AtomValue::Null => "NULL".to_string(),
        AtomValue::Symbol(s) => format!("SYMBOL '{s}'"),
        AtomValue::String(s) => format!("STRING '{s}'"),
        AtomValue::Int(n) => format!("INT '{n}'"),
        AtomValue::Batch(_) | AtomValue::Inline(_) | AtomValue::List(_) | AtomValue::Cmd(_) => {
            format!("{}:", atom.kind())
        }
    }
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
