//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::emit::{EmitArgs, OutputFormat};

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub port: String,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            port: parse_port(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            port: p.port,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EmitParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub port: String,
    pub strict: bool,
    pub color: ColorChoice,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            port: parse_port(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
            format: parse_format(m),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            port: p.port,
            strict: p.strict,
            color: p.color.should_colorize(),
            format: p.format,
            output: p.output,
        }
    }
}

/// `-v` count for the logging setup.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn parse_port(m: &ArgMatches) -> String {
    m.get_one::<String>("port")
        .cloned()
        .unwrap_or_else(|| "80".to_string())
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::C,
    }
}
