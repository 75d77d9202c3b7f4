use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use schmuck::config::{Config, OutputFormat};
use schmuck::file::loader::{load_document, load_document_from_stdin};
use schmuck::path::Lexer;
use schmuck::value::convert::{to_json, to_yaml};
use schmuck::{PathCache, Value};

/// Schmuck - apply a path expression to a YAML or JSON document
#[derive(Parser)]
#[command(name = "schmuck")]
#[command(version)]
#[command(about = "Apply a path expression to a YAML or JSON document", long_about = None)]
struct Cli {
    /// Path expression, e.g. `[users][0][:name].upcase`
    expression: String,

    /// Document to read (omit to read from stdin)
    file: Option<PathBuf>,

    /// Apply the expression to every element of a top-level array
    #[arg(short, long)]
    each: bool,

    /// Output format (default: from config, yaml)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the token stream instead of evaluating
    #[arg(long)]
    tokens: bool,

    /// Read configuration from this file instead of ~/.config/schmuck/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn print_tokens(expression: &str) -> Result<()> {
    for token in Lexer::new(expression) {
        let token = token.with_context(|| format!("Invalid path expression `{}`", expression))?;
        println!(
            "{:>4}  {:<12} {:<16} {}{}",
            token.position(),
            token.kind().to_string(),
            token.lexeme(),
            token.matched_text(),
            if token.is_mandatory() { "  (mandatory)" } else { "" }
        );
    }
    Ok(())
}

fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&to_yaml(value))?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&to_json(value))?;
            json.push('\n');
            json
        }
    };
    print!("{}", rendered);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if cli.tokens {
        return print_tokens(&cli.expression);
    }

    // Compile before reading stdin so syntax errors surface immediately
    let cache = PathCache::from_config(&config);
    let accessor = cache
        .accessor(&cli.expression)
        .with_context(|| format!("Invalid path expression `{}`", cli.expression))?;

    let symbolize = config.symbolize_colon_strings;
    let document = match &cli.file {
        Some(path) => load_document(path, symbolize)?,
        None => load_document_from_stdin(symbolize)?,
    };

    let result = if cli.each {
        let items = match document {
            Value::Array(items) => items,
            other => bail!("--each needs a top-level array, got {}", other.class_name()),
        };
        let mut results = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let value = accessor(item).with_context(|| format!("Failed on element {}", index))?;
            results.push(Value::from(value));
        }
        Value::Array(results)
    } else {
        Value::from(accessor(&document)?)
    };

    print_value(&result, cli.format.unwrap_or(config.output_format))
}
