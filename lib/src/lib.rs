extern crate derive_builder;

pub mod api;
pub mod catalog;
pub mod codegen;
pub mod config;
pub mod consts;
pub mod emit;
pub mod errors;
pub mod flatten;
pub mod graph;
pub mod hierarchy;
pub mod model;
pub mod names;
pub mod properties;
pub mod types;
pub mod util;

pub use api::{extract_model, init_logging, load_model, render};
pub use codegen::OutputFormat;
pub use config::Config;
pub use graph::OntologyGraph;
pub use model::{
    ClassInfo, ClassModel, Diagnostic, ObjectType, PropertyMap, PropertyType, ScalarKind,
};
pub use util::OntologySource;
