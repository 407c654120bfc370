use crate::consts::CLASS;
use crate::graph::OntologyGraph;
use crate::model::{ClassCatalog, ClassInfo, Diagnostic};
use crate::names::{is_named_class, local_name};
use log::{debug, info, warn};
use oxigraph::model::Term;

/// Builds the initial catalog from every `owl:Class` in the graph whose short name passes
/// [`is_named_class`]. Blank nodes never become catalog entries. When two IRIs share a
/// short name, the one the graph returns first is kept.
pub fn build_catalog<G: OntologyGraph + ?Sized>(
    graph: &G,
    diagnostics: &mut Vec<Diagnostic>,
) -> ClassCatalog {
    let mut catalog = ClassCatalog::new();
    for node in graph.subjects_of_type(CLASS) {
        let uri = match node {
            Term::NamedNode(uri) => uri,
            _ => continue,
        };
        let name = local_name(uri.as_str()).to_string();
        if !is_named_class(&name) {
            debug!("Skipping anonymous class {}", uri);
            continue;
        }
        let uri_str = uri.as_str().to_string();
        if !catalog.insert(ClassInfo::new(uri, name.clone())) {
            warn!("Class name {} already taken; ignoring {}", name, uri_str);
            diagnostics.push(Diagnostic::DuplicateClassName {
                name,
                uri: uri_str,
            });
        }
    }
    info!("Discovered {} named classes", catalog.len());
    catalog
}
