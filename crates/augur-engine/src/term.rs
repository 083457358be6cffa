//! Rendering of answer terms

use augur_domain::term::is_atom_name;
use scryer_prolog::Term;
use std::fmt::Write;

/// Render a value as reported in a solution binding
///
/// A top-level atom is given by its name alone; nested atoms are quoted
/// when they would not read back as plain atoms.
pub(crate) fn to_value(term: &Term) -> String {
    match term {
        Term::Atom(name) => name.clone(),
        other => to_text(other),
    }
}

/// Render a term in canonical syntax
pub(crate) fn to_text(term: &Term) -> String {
    let mut out = String::new();
    write_term(&mut out, term);
    out
}

fn write_term(out: &mut String, term: &Term) {
    match term {
        Term::Atom(name) => write_atom(out, name),
        Term::Var(name) => out.push_str(name),
        Term::Integer(n) => out.push_str(&n.to_string()),
        Term::Float(f) => {
            let _ = write!(out, "{:?}", f);
        }
        Term::String(s) => {
            let _ = write!(out, "{:?}", s);
        }
        Term::List(items) => {
            out.push('[');
            write_args(out, items);
            out.push(']');
        }
        Term::Compound(functor, args) => {
            write_atom(out, functor);
            out.push('(');
            write_args(out, args);
            out.push(')');
        }
        other => {
            let _ = write!(out, "{:?}", other);
        }
    }
}

fn write_args(out: &mut String, args: &[Term]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_term(out, arg);
    }
}

fn write_atom(out: &mut String, name: &str) {
    if is_atom_name(name) || name == "[]" {
        out.push_str(name);
    } else {
        out.push('\'');
        out.push_str(&name.replace('\\', "\\\\").replace('\'', "\\'"));
        out.push('\'');
    }
}
