use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;
use vclc_compiler::{Config, LiteralValue, Output, compile};

use super::source_loader::load_source;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    C,
    Json,
}

pub struct EmitArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub port: String,
    pub strict: bool,
    pub color: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// JSON shape of `emit --format json`.
#[derive(Serialize)]
struct Summary<'a> {
    source: &'a str,
    errors: usize,
    warnings: usize,
    values: &'a [LiteralValue],
    artifact: &'a str,
}

pub fn run(args: EmitArgs) {
    let source = match load_source(args.source_path.as_deref(), args.source_text.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let config = Config::new().strict(args.strict).default_port(args.port);
    let output = compile(&source.text, config);

    // Warnings are shown even when the artifact is written.
    if !output.diagnostics.is_empty() {
        let rendered = output
            .diagnostics
            .printer(&source.text)
            .path(&source.name)
            .colored(args.color)
            .render();
        eprint!("{}", rendered);
    }
    if !output.is_valid() {
        std::process::exit(1);
    }

    let text = match render(&output, &source.name, args.format) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            debug!(path = %path.display(), bytes = text.len(), "writing artifact");
            if let Err(e) = fs::write(path, &text) {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", text),
    }
}

pub fn render(output: &Output, name: &str, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::C => Ok(output.artifact.clone()),
        OutputFormat::Json => {
            let summary = Summary {
                source: name,
                errors: output.diagnostics.error_count(),
                warnings: output.diagnostics.warning_count(),
                values: &output.values,
                artifact: &output.artifact,
            };
            let mut json = serde_json::to_string_pretty(&summary)?;
            json.push('\n');
            Ok(json)
        }
    }
}
