//! Resolves the value type named by a restriction's `owl:allValuesFrom` target.
//!
//! A target is either one of the recognized XSD datatypes (directly or through
//! `owl:equivalentClass`), a catalog class, or an anonymous construct (union, restriction,
//! blank subclass) that has to be searched for the named class it stands for. Anything that
//! does not pin down exactly one named class falls back to [`PropertyType::Unknown`].

use crate::consts::{EQUIVALENT_CLASS, SUB_CLASS_OF, UNION_OF};
use crate::graph::{list_members, OntologyGraph};
use crate::model::{ClassCatalog, PropertyType, ScalarKind};
use crate::names::short_name_of;
use log::debug;
use oxigraph::model::Term;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Result of searching outward from a node for the named class it denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSearch {
    Unique(String),
    NotFound,
    Ambiguous(BTreeSet<String>),
}

impl ClassSearch {
    pub fn unique(self) -> Option<String> {
        match self {
            ClassSearch::Unique(name) => Some(name),
            _ => None,
        }
    }
}

fn scalar_of(node: &Term) -> Option<ScalarKind> {
    match node {
        Term::NamedNode(n) => ScalarKind::from_datatype(n.as_ref()),
        _ => None,
    }
}

/// Breadth-first search from `start` over `rdfs:subClassOf` targets and `owl:unionOf`
/// members, collecting every visited node whose short name is a catalog class. Each node
/// is expanded once, so cyclic graphs terminate.
pub fn find_named_class<G: OntologyGraph + ?Sized>(
    start: &Term,
    graph: &G,
    catalog: &ClassCatalog,
) -> ClassSearch {
    let mut visited: HashSet<Term> = HashSet::new();
    let mut queue: VecDeque<Term> = VecDeque::from([start.clone()]);
    let mut found: BTreeSet<String> = BTreeSet::new();

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        let name = short_name_of(&current);
        if catalog.contains(&name) {
            found.insert(name);
        }
        queue.extend(graph.objects_of(&current, SUB_CLASS_OF));
        for union in graph.objects_of(&current, UNION_OF) {
            queue.extend(list_members(graph, &union));
        }
    }

    match found.len() {
        0 => ClassSearch::NotFound,
        1 => match found.into_iter().next() {
            Some(name) => ClassSearch::Unique(name),
            None => ClassSearch::NotFound,
        },
        _ => ClassSearch::Ambiguous(found),
    }
}

/// Determines the type of a property whose values come from `target`. First match wins:
/// a scalar datatype, an `owl:equivalentClass` scalar datatype, a catalog class by short
/// name, the unique named class found by [`find_named_class`], else unknown.
pub fn resolve_type<G: OntologyGraph + ?Sized>(
    graph: &G,
    target: &Term,
    catalog: &ClassCatalog,
) -> PropertyType {
    resolve_type_with_search(graph, target, catalog).0
}

/// Like [`resolve_type`], but also hands back the ancestor search outcome when the
/// search was needed.
pub(crate) fn resolve_type_with_search<G: OntologyGraph + ?Sized>(
    graph: &G,
    target: &Term,
    catalog: &ClassCatalog,
) -> (PropertyType, Option<ClassSearch>) {
    if let Some(kind) = scalar_of(target) {
        return (PropertyType::Scalar(kind), None);
    }
    if let Some(kind) = graph
        .objects_of(target, EQUIVALENT_CLASS)
        .iter()
        .find_map(scalar_of)
    {
        return (PropertyType::Scalar(kind), None);
    }
    let name = short_name_of(target);
    if catalog.contains(&name) {
        return (PropertyType::ClassRef(name), None);
    }
    let search = find_named_class(target, graph, catalog);
    debug!("Searched ancestors of {}: {:?}", target, search);
    let resolved = match &search {
        ClassSearch::Unique(found) => PropertyType::ClassRef(found.clone()),
        _ => PropertyType::Unknown,
    };
    (resolved, Some(search))
}
