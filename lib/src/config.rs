//! Defines the configuration for a class model generation run: the output format, the C#
//! namespace and header, and where rendered output is written.

use crate::codegen::{CSharpOptions, OutputFormat};
use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_NAMESPACE: &str = "CIMProfile";
pub const DEFAULT_HEADER: &str = "Auto-generated from OWL by owlmodel";

#[derive(Builder, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct Config {
    // namespace wrapping generated C# classes
    pub namespace: String,
    pub format: OutputFormat,
    // comment lines written above the namespace block
    pub header: String,
    // None writes to stdout
    #[builder(setter(into, strip_option))]
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            format: OutputFormat::default(),
            header: DEFAULT_HEADER.to_string(),
            output: None,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn csharp_options(&self) -> CSharpOptions {
        CSharpOptions {
            namespace: self.namespace.clone(),
            header: self.header.clone(),
        }
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Namespace: {}", self.namespace);
        println!("  Format: {}", self.format);
        println!("  Header: {}", self.header);
        match &self.output {
            Some(path) => println!("  Output: {}", path.display()),
            None => println!("  Output: <stdout>"),
        }
    }
}
