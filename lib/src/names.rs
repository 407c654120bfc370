//! Short-name extraction and the heuristics that separate authored classes from the
//! anonymous scaffolding nodes an ontology library generates.

use lazy_static::lazy_static;
use oxigraph::model::Term;
use regex::Regex;

lazy_static! {
    // auto-generated blank node labels look like N0a1b2c3d...
    static ref GENERATED_LABEL: Regex = Regex::new(r"^N[0-9a-fA-F]{8,}").unwrap();
}

/// Returns the local part of an identifier: everything after the last `#` or `/`.
pub fn local_name(identifier: &str) -> &str {
    match identifier.rfind(|c| c == '#' || c == '/') {
        Some(idx) => &identifier[idx + 1..],
        None => identifier,
    }
}

/// Short name of an ontology node. IRIs give their local name, blank nodes their label,
/// literals their lexical value. An absent node gives the empty string.
pub fn short_name(node: Option<&Term>) -> String {
    match node {
        Some(Term::NamedNode(n)) => local_name(n.as_str()).to_string(),
        Some(Term::BlankNode(b)) => local_name(b.as_str()).to_string(),
        Some(Term::Literal(l)) => local_name(l.value()).to_string(),
        _ => String::new(),
    }
}

/// Convenience wrapper over [`short_name`] for a node that is known to be present.
pub fn short_name_of(node: &Term) -> String {
    short_name(Some(node))
}

/// False for empty names and for names matching the generated blank-node label pattern
/// (`N` followed by 8 or more hex digits).
pub fn is_named_class(local_name: &str) -> bool {
    !local_name.is_empty() && !GENERATED_LABEL.is_match(local_name)
}

/// Turns a property's local name into a member identifier: keep the segment after the
/// last `.` (CIM names properties `Class.property`) and upper-case its first letter.
pub fn property_identifier(raw: &str) -> String {
    let segment = match raw.rfind('.') {
        Some(idx) => &raw[idx + 1..],
        None => raw,
    };
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
