//! Read-only query surface over a loaded ontology graph.
//!
//! The extraction pipeline never touches a concrete RDF store directly; it only asks the
//! questions in [`OntologyGraph`]. The oxigraph in-memory [`Graph`] implements it, which is
//! what the loaders in [`crate::util`] produce.

use crate::consts::{FIRST, NIL, REST, TYPE};
use oxigraph::model::{Graph, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef, TripleRef};
use std::collections::HashSet;

/// Minimal triple-pattern capability required to extract a class model.
///
/// Nodes are plain oxigraph [`Term`]s. Literals never have outgoing edges, so asking for
/// their objects yields nothing instead of an error.
pub trait OntologyGraph {
    /// All subjects `s` with `s rdf:type class`.
    fn subjects_of_type(&self, class: NamedNodeRef<'_>) -> Vec<Term>;
    /// All objects `o` with `node predicate o`.
    fn objects_of(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Vec<Term>;
    /// One object `o` with `node predicate o`, if any.
    fn value_of(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Option<Term>;
    /// True if `node rdf:type class` is asserted.
    fn has_type(&self, node: &Term, class: NamedNodeRef<'_>) -> bool;
}

fn as_subject(node: &Term) -> Option<NamedOrBlankNodeRef<'_>> {
    match node {
        Term::NamedNode(n) => Some(NamedOrBlankNodeRef::NamedNode(n.as_ref())),
        Term::BlankNode(b) => Some(NamedOrBlankNodeRef::BlankNode(b.as_ref())),
        _ => None,
    }
}

impl OntologyGraph for Graph {
    fn subjects_of_type(&self, class: NamedNodeRef<'_>) -> Vec<Term> {
        self.subjects_for_predicate_object(TYPE, class)
            .map(|s| match s {
                NamedOrBlankNodeRef::NamedNode(n) => Term::NamedNode(n.into_owned()),
                NamedOrBlankNodeRef::BlankNode(b) => Term::BlankNode(b.into_owned()),
            })
            .collect()
    }

    fn objects_of(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        match as_subject(node) {
            Some(subject) => self
                .objects_for_subject_predicate(subject, predicate)
                .map(TermRef::into_owned)
                .collect(),
            None => Vec::new(),
        }
    }

    fn value_of(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Option<Term> {
        let subject = as_subject(node)?;
        self.object_for_subject_predicate(subject, predicate)
            .map(TermRef::into_owned)
    }

    fn has_type(&self, node: &Term, class: NamedNodeRef<'_>) -> bool {
        match as_subject(node) {
            Some(subject) => self.contains(TripleRef::new(subject, TYPE, class)),
            None => false,
        }
    }
}

/// Collects the members of an RDF list (`rdf:first`/`rdf:rest` chain) starting at `head`.
///
/// The walk stops at `rdf:nil`, at a cell without `rdf:rest`, or when a cell is revisited.
pub fn list_members<G: OntologyGraph + ?Sized>(graph: &G, head: &Term) -> Vec<Term> {
    let nil = Term::NamedNode(NIL.into_owned());
    let mut items = Vec::new();
    let mut seen: HashSet<Term> = HashSet::new();
    let mut current = Some(head.clone());
    while let Some(cell) = current {
        if cell == nil || !seen.insert(cell.clone()) {
            break;
        }
        if let Some(first) = graph.value_of(&cell, FIRST) {
            items.push(first);
        }
        current = graph.value_of(&cell, REST);
    }
    items
}
