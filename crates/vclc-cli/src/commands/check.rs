use std::path::PathBuf;

use tracing::debug;
use vclc_compiler::{Config, compile};

use super::source_loader::load_source;

pub struct CheckArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub port: String,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = match load_source(args.source_path.as_deref(), args.source_text.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let config = Config::new().strict(args.strict).default_port(args.port);
    let output = compile(&source.text, config);
    debug!(
        values = output.values.len(),
        diagnostics = output.diagnostics.len(),
        "checked {}",
        source.name
    );

    if !output.is_valid() {
        let rendered = output
            .diagnostics
            .printer(&source.text)
            .path(&source.name)
            .colored(args.color)
            .render();
        eprint!("{}", rendered);
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
