//! Entry points for turning an ontology graph into a [`ClassModel`], and for loading,
//! extracting and rendering in one call.

use crate::catalog::build_catalog;
use crate::codegen::{render_csharp, render_json, OutputFormat};
use crate::config::Config;
use crate::emit::emit;
use crate::flatten::flatten;
use crate::graph::OntologyGraph;
use crate::hierarchy::resolve_parents;
use crate::model::{ClassModel, Diagnostic};
use crate::properties::extract_properties;
use crate::util::OntologySource;
use anyhow::Result;
use log::{debug, info};

/// Initializes logging for the owlmodel library.
///
/// If the `OWLMODEL_LOG` environment variable is set, `RUST_LOG` is set to its value, so
/// `OWLMODEL_LOG` takes precedence. The logger itself (e.g. `env_logger::init()`) must be
/// initialized after this call for the level to take effect.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("OWLMODEL_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}

/// Extracts the single-inheritance class model of `graph`.
///
/// Classes are catalogued, given a parent, populated with the properties their
/// restrictions declare, flattened against their ancestors and finally ordered so that
/// every class follows its parent. Nothing here fails: problems found along the way are
/// reported through [`ClassModel::diagnostics`].
pub fn extract_model<G: OntologyGraph + ?Sized>(graph: &G) -> ClassModel {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let mut catalog = build_catalog(graph, &mut diagnostics);
    resolve_parents(&mut catalog, graph, &mut diagnostics);
    extract_properties(&mut catalog, graph, &mut diagnostics);
    let removed = flatten(&mut catalog);
    debug!("Flattening removed {} inherited properties", removed);

    let classes = emit(&catalog);
    info!(
        "Extracted {} classes ({} diagnostics)",
        classes.len(),
        diagnostics.len()
    );
    ClassModel::new(classes, diagnostics)
}

/// Loads `source` and extracts its class model.
pub fn load_model(source: &OntologySource) -> Result<ClassModel> {
    info!("Loading ontology from {}", source);
    let graph = source.graph()?;
    Ok(extract_model(&graph))
}

/// Renders `model` in the format and with the namespace/header `config` asks for.
pub fn render(model: &ClassModel, config: &Config) -> Result<String> {
    match config.format {
        OutputFormat::CSharp => Ok(render_csharp(model, &config.csharp_options())),
        OutputFormat::Json => render_json(model),
    }
}
