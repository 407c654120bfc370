//! Assigns each catalog class at most one parent from its `rdfs:subClassOf` edges and
//! keeps the resulting parent relation acyclic.

use crate::consts::{RESTRICTION, SUB_CLASS_OF};
use crate::graph::OntologyGraph;
use crate::model::{ClassCatalog, Diagnostic};
use crate::names::short_name_of;
use log::{debug, warn};
use oxigraph::model::Term;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{Graph as DiGraph, NodeIndex};

/// For every class, the first `rdfs:subClassOf` target (in graph order) that is not an
/// `owl:Restriction` and names another catalog class becomes its parent. Classes without
/// such a target stay roots.
pub fn resolve_parents<G: OntologyGraph + ?Sized>(
    catalog: &mut ClassCatalog,
    graph: &G,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut assignments: Vec<(String, String)> = Vec::new();
    for class in catalog.iter() {
        let node = Term::NamedNode(class.uri().into_owned());
        for target in graph.objects_of(&node, SUB_CLASS_OF) {
            if graph.has_type(&target, RESTRICTION) {
                continue;
            }
            let candidate = short_name_of(&target);
            if candidate != class.name() && catalog.contains(&candidate) {
                debug!("{} is a subclass of {}", class.name(), candidate);
                assignments.push((class.name().to_string(), candidate));
                break;
            }
        }
    }
    for (child, parent) in assignments {
        if let Some(class) = catalog.get_mut(&child) {
            class.parent_name = Some(parent);
        }
    }
    break_parent_cycles(catalog, diagnostics);
}

/// Clears one parent link on every cycle of the parent relation. The cycle member that
/// was discovered first loses its parent and becomes a root.
pub fn break_parent_cycles(catalog: &mut ClassCatalog, diagnostics: &mut Vec<Diagnostic>) {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..catalog.len()).map(|i| graph.add_node(i)).collect();
    for (idx, class) in catalog.iter().enumerate() {
        if let Some(parent) = class.parent_name().and_then(|p| catalog.get_index_of(p)) {
            graph.add_edge(nodes[idx], nodes[parent], ());
        }
    }

    // every class has at most one parent, so each non-trivial component is a simple cycle
    let mut to_clear: Vec<usize> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .filter_map(|component| component.iter().map(|n| graph[*n]).min())
        .collect();
    to_clear.sort_unstable();

    let names = catalog.names();
    for name in to_clear.into_iter().map(|idx| names[idx].clone()) {
        warn!("Parent cycle detected through {}; clearing its parent", name);
        if let Some(class) = catalog.get_mut(&name) {
            class.parent_name = None;
        }
        diagnostics.push(Diagnostic::ParentCycle { class: name });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::consts::{CLASS, TYPE};
    use crate::graph::ordered::{iri, OrderedTriples};
    use crate::util::graph_from_str;
    use oxigraph::io::RdfFormat;

    fn catalog_for(ttl: &str) -> (ClassCatalog, Vec<Diagnostic>) {
        let graph = graph_from_str(ttl, RdfFormat::Turtle).unwrap();
        let mut diagnostics = vec![];
        let mut catalog = build_catalog(&graph, &mut diagnostics);
        resolve_parents(&mut catalog, &graph, &mut diagnostics);
        (catalog, diagnostics)
    }

    #[test]
    fn test_parent_skips_restrictions_and_unknown_classes() {
        let (catalog, diagnostics) = catalog_for(
            r#"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix ex: <http://example.org/grid#> .
            ex:Equipment a owl:Class .
            ex:Switch a owl:Class ;
                rdfs:subClassOf ex:Equipment ,
                    [ a owl:Restriction ; owl:onProperty ex:open ] .
            ex:Breaker a owl:Class ; rdfs:subClassOf ex:Switch .
            ex:Fuse a owl:Class ; rdfs:subClassOf ex:External .
            ex:Loner a owl:Class ; rdfs:subClassOf ex:Loner .
        "#,
        );
        assert_eq!(catalog.get("Switch").unwrap().parent_name(), Some("Equipment"));
        assert_eq!(catalog.get("Breaker").unwrap().parent_name(), Some("Switch"));
        assert_eq!(catalog.get("Equipment").unwrap().parent_name(), None);
        assert_eq!(catalog.get("Fuse").unwrap().parent_name(), None);
        assert_eq!(catalog.get("Loner").unwrap().parent_name(), None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_qualifying_superclass_wins() {
        let class = Term::NamedNode(CLASS.into_owned());
        let (a, b, c) = (iri("A"), iri("B"), iri("C"));
        let mut triples = OrderedTriples::default();
        triples
            .add(&a, TYPE, &class)
            .add(&b, TYPE, &class)
            .add(&c, TYPE, &class)
            .add(&c, SUB_CLASS_OF, &iri("Unlisted"))
            .add(&c, SUB_CLASS_OF, &b)
            .add(&c, SUB_CLASS_OF, &a);
        let mut diagnostics = vec![];
        let mut catalog = build_catalog(&triples, &mut diagnostics);
        resolve_parents(&mut catalog, &triples, &mut diagnostics);
        assert_eq!(catalog.get("C").unwrap().parent_name(), Some("B"));
    }

    #[test]
    fn test_cycle_is_broken_at_first_discovered_member() {
        let class = Term::NamedNode(CLASS.into_owned());
        let (a, b, c, d) = (iri("A"), iri("B"), iri("C"), iri("D"));
        let mut triples = OrderedTriples::default();
        triples
            .add(&a, TYPE, &class)
            .add(&b, TYPE, &class)
            .add(&c, TYPE, &class)
            .add(&d, TYPE, &class)
            .add(&a, SUB_CLASS_OF, &b)
            .add(&b, SUB_CLASS_OF, &c)
            .add(&c, SUB_CLASS_OF, &a)
            .add(&d, SUB_CLASS_OF, &a);
        let mut diagnostics = vec![];
        let mut catalog = build_catalog(&triples, &mut diagnostics);
        resolve_parents(&mut catalog, &triples, &mut diagnostics);

        assert_eq!(catalog.get("A").unwrap().parent_name(), None);
        assert_eq!(catalog.get("B").unwrap().parent_name(), Some("C"));
        assert_eq!(catalog.get("C").unwrap().parent_name(), Some("A"));
        assert_eq!(catalog.get("D").unwrap().parent_name(), Some("A"));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::ParentCycle {
                class: "A".to_string()
            }]
        );
    }

    #[test]
    fn test_two_class_cycle() {
        let (catalog, diagnostics) = catalog_for(
            r#"
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix ex: <http://example.org/grid#> .
            ex:Left a owl:Class ; rdfs:subClassOf ex:Right .
            ex:Right a owl:Class ; rdfs:subClassOf ex:Left .
        "#,
        );
        let roots = catalog.iter().filter(|c| c.parent_name().is_none()).count();
        assert_eq!(roots, 1);
        assert_eq!(diagnostics.len(), 1);
    }
}
