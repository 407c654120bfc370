use anyhow::{Error, Result};
use clap::{Parser, Subcommand};
use log::info;
use owlmodel::codegen::{render_json, OutputFormat};
use owlmodel::config::Config;
use owlmodel::model::ClassModel;
use owlmodel::util::OntologySource;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "owlmodel")]
#[command(about = "Single-inheritance class models from OWL ontologies")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// JSON configuration file; command line flags override its values
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate class definitions from an ontology
    Generate {
        /// Path or http(s) URL of the ontology
        source: String,
        /// The file to write to, defaults to stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
        /// Output format: csharp or json
        #[clap(long, short)]
        format: Option<OutputFormat>,
        /// Namespace for generated C# classes, defaults to 'CIMProfile'
        #[clap(long, short)]
        namespace: Option<String>,
    },
    /// Print the class hierarchy of an ontology with property counts and diagnostics
    Inspect {
        /// Path or http(s) URL of the ontology
        source: String,
        /// Output JSON instead of text
        #[clap(long, action, default_value = "false")]
        json: bool,
    },
    /// Prints the version of the owlmodel binary
    Version,
}

pub fn run() -> Result<()> {
    owlmodel::api::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    owlmodel::api::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn execute(cmd: Cli) -> Result<()> {
    // RUST_LOG is set by `init_logging` if OWLMODEL_LOG is present; the flags win over both
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    let base = match &cmd.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    match cmd.command {
        Commands::Generate {
            source,
            output,
            format,
            namespace,
        } => {
            let config = Config {
                namespace: namespace.unwrap_or(base.namespace),
                format: format.unwrap_or(base.format),
                header: base.header,
                output: output.or(base.output),
            };
            if cmd.verbose || cmd.debug {
                config.print();
            }
            let model = load(&source)?;
            let rendered = owlmodel::api::render(&model, &config)?;
            match &config.output {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    info!("Wrote {} classes to {}", model.len(), path.display());
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Inspect { source, json } => {
            let model = load(&source)?;
            if json {
                println!("{}", render_json(&model)?);
            } else {
                print!("{}", class_tree(&model));
            }
        }
        Commands::Version => {
            println!("owlmodel {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn load(source: &str) -> Result<ClassModel> {
    let source: OntologySource = source.parse()?;
    owlmodel::api::load_model(&source)
}

/// Renders the class hierarchy one class per line, indented by depth, followed by the
/// diagnostics gathered during extraction.
fn class_tree(model: &ClassModel) -> String {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut roots: Vec<&str> = Vec::new();
    for class in model.classes() {
        match class.parent_name().filter(|p| model.get(p).is_some()) {
            Some(parent) => children.entry(parent).or_default().push(class.name()),
            None => roots.push(class.name()),
        }
    }

    let mut out = String::new();
    let mut stack: Vec<(&str, usize)> = roots.into_iter().rev().map(|r| (r, 0)).collect();
    while let Some((name, depth)) = stack.pop() {
        if let Some(class) = model.get(name) {
            out.push_str(&format!(
                "{}{} ({} data, {} object)\n",
                "  ".repeat(depth),
                name,
                class.data_properties.len(),
                class.object_properties.len()
            ));
        }
        if let Some(kids) = children.get(name) {
            stack.extend(kids.iter().rev().map(|k| (*k, depth + 1)));
        }
    }

    if !model.diagnostics().is_empty() {
        out.push_str(&format!("\nFound {} issues:\n", model.diagnostics().len()));
        for diagnostic in model.diagnostics() {
            out.push_str(&format!("- {}\n", diagnostic));
        }
    }
    out
}
