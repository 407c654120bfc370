//! Loads ontology graphs from files, URLs and in-memory strings.

use crate::errors::UnsupportedSourceError;
use anyhow::Result;

use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::graph::Graph as OxigraphGraph;
use oxigraph::model::Triple;

use log::{debug, info};

fn parse_graph<R: Read>(
    reader: R,
    format: RdfFormat,
    base_iri: Option<&str>,
) -> Result<OxigraphGraph> {
    let mut parser = RdfParser::from_format(format);
    if let Some(base) = base_iri {
        parser = parser.with_base_iri(base)?;
    }
    let mut graph = OxigraphGraph::new();
    for quad in parser.for_reader(reader) {
        let quad = quad?;
        let triple = Triple::new(quad.subject, quad.predicate, quad.object);
        graph.insert(&triple);
    }
    Ok(graph)
}

/// Parses an ontology held in memory.
pub fn graph_from_str(data: &str, format: RdfFormat) -> Result<OxigraphGraph> {
    parse_graph(data.as_bytes(), format, None)
}

/// Picks the RDF syntax for a file from its extension.
pub fn format_for_path(path: &Path) -> Option<RdfFormat> {
    let ext = path.extension().and_then(|ext| ext.to_str())?;
    match ext.to_ascii_lowercase().as_str() {
        "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
        "ttl" | "n3" => Some(RdfFormat::Turtle),
        "nt" => Some(RdfFormat::NTriples),
        _ => None,
    }
}

pub fn read_file(file: &Path) -> Result<OxigraphGraph> {
    debug!("Reading file: {}", file.display());
    let format = format_for_path(file).unwrap_or(RdfFormat::Turtle);
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()?.join(file)
    };
    // relative rdf:about="#Class" references resolve against the file itself
    let base = Url::from_file_path(&absolute)
        .map_err(|_| anyhow::anyhow!("Cannot build a file URL for {}", absolute.display()))?;
    let content = BufReader::new(std::fs::File::open(file)?);
    let graph = parse_graph(content, format, Some(base.as_str()))?;
    info!("Read {} triples from {}", graph.len(), file.display());
    Ok(graph)
}

pub fn read_url(url: &str) -> Result<OxigraphGraph> {
    debug!("Reading url: {}", url);

    let client = reqwest::blocking::Client::new();
    let resp = client
        .get(url)
        .header(ACCEPT, "application/rdf+xml, text/turtle, application/n-triples")
        .send()?;
    if !resp.status().is_success() {
        return Err(anyhow::anyhow!("Failed to fetch ontology from {}", url));
    }
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_string());
    let preferred = content_type.as_deref().and_then(|ct| match ct {
        "application/rdf+xml" | "application/owl+xml" => Some(RdfFormat::RdfXml),
        "text/turtle" | "application/x-turtle" => Some(RdfFormat::Turtle),
        "application/n-triples" => Some(RdfFormat::NTriples),
        _ => {
            debug!("Unknown content type: {}", ct);
            None
        }
    });
    let bytes = resp.bytes()?;

    // unknown content types are tried against every supported syntax
    let mut candidates = vec![RdfFormat::RdfXml, RdfFormat::Turtle, RdfFormat::NTriples];
    if let Some(format) = preferred {
        candidates.retain(|f| *f != format);
        candidates.insert(0, format);
    }
    for format in candidates {
        match parse_graph(&bytes[..], format, Some(url)) {
            Ok(graph) => return Ok(graph),
            Err(e) => debug!("{} is not {:?}: {}", url, format, e),
        }
    }
    Err(UnsupportedSourceError {
        source: url.to_string(),
    }
    .into())
}

/// Where an ontology is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OntologySource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for OntologySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OntologySource::File(p) => write!(f, "file://{}", p.display()),
            OntologySource::Url(u) => write!(f, "{}", u),
        }
    }
}

impl std::str::FromStr for OntologySource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(OntologySource::Url(s.to_string()))
        } else {
            let s = s.trim_start_matches("file://");
            if s.is_empty() {
                return Err(anyhow::anyhow!("Empty ontology location"));
            }
            Ok(OntologySource::File(PathBuf::from(s)))
        }
    }
}

impl OntologySource {
    pub fn graph(&self) -> Result<OxigraphGraph> {
        match self {
            OntologySource::File(p) => read_file(p),
            OntologySource::Url(u) => read_url(u),
        }
    }
}
