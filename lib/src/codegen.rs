//! Renders an extracted [`ClassModel`] as destination-language source.

use crate::model::{ClassModel, ObjectType, ScalarKind};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Output syntax for a rendered model.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    CSharp,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(OutputFormat::CSharp),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow::anyhow!(
                "Unknown output format '{}'; expected one of [csharp, json]",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::CSharp => write!(f, "csharp"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings for [`render_csharp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSharpOptions {
    pub namespace: String,
    pub header: String,
}

fn csharp_scalar(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String => "string",
        ScalarKind::Boolean => "bool",
        ScalarKind::Float => "float",
        ScalarKind::Double => "double",
    }
}

fn csharp_object(target: &ObjectType) -> &str {
    match target {
        ObjectType::Class(name) => name.as_str(),
        ObjectType::Unknown => "object",
    }
}

/// Emits one `public class` per model class, in model order, inside a namespace block.
/// Data properties come before object properties.
pub fn render_csharp(model: &ClassModel, options: &CSharpOptions) -> String {
    let mut out = String::new();
    for line in options.header.lines() {
        out.push_str(&format!("// {}\n", line));
    }
    out.push_str(&format!("namespace {}\n", options.namespace));
    out.push_str("{\n");
    for (i, class) in model.classes().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let parent = class
            .parent_name()
            .filter(|p| model.get(p).is_some())
            .map(|p| format!(" : {}", p))
            .unwrap_or_default();
        out.push_str(&format!("    public class {}{}\n", class.name(), parent));
        out.push_str("    {\n");
        for (name, kind) in class.data_properties.iter() {
            out.push_str(&format!(
                "        public {} {} {{ get; set; }}\n",
                csharp_scalar(*kind),
                name
            ));
        }
        for (name, target) in class.object_properties.iter() {
            out.push_str(&format!(
                "        public {} {} {{ get; set; }}\n",
                csharp_object(target),
                name
            ));
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

pub fn render_json(model: &ClassModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}
