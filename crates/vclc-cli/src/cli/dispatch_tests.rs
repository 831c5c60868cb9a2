//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, emit_command};
use crate::commands::emit::OutputFormat;

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "literals.vcl"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("literals.vcl")));
    assert_eq!(params.source_text, None);
    assert_eq!(params.port, "80");
    assert!(!params.strict);
    assert_eq!(params.color, ColorChoice::Auto);
    assert_eq!(verbosity(&m), 0);
}

#[test]
fn check_flags() {
    let m = check_command()
        .try_get_matches_from([
            "check", "-e", "count 1;", "--strict", "--color", "never", "--port", "8080", "-vv",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.source_path, None);
    assert_eq!(params.source_text.as_deref(), Some("count 1;"));
    assert_eq!(params.port, "8080");
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Never);
    assert_eq!(verbosity(&m), 2);
}

#[test]
fn stdin_dash_is_a_path() {
    let m = check_command().try_get_matches_from(["check", "-"]).unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.source_path, Some(PathBuf::from("-")));
}

#[test]
fn file_and_expr_conflict() {
    let result = check_command().try_get_matches_from(["check", "a.vcl", "-e", "count 1;"]);
    assert!(result.is_err());
}

#[test]
fn bad_color_is_rejected() {
    let result = check_command().try_get_matches_from(["check", "a.vcl", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn emit_defaults() {
    let m = emit_command()
        .try_get_matches_from(["emit", "literals.vcl"])
        .unwrap();
    let params = EmitParams::from_matches(&m);

    assert_eq!(params.format, OutputFormat::C);
    assert_eq!(params.output, None);
}

#[test]
fn emit_json_to_file() {
    let m = emit_command()
        .try_get_matches_from(["emit", "literals.vcl", "--format", "json", "-o", "out.json"])
        .unwrap();
    let params = EmitParams::from_matches(&m);

    assert_eq!(params.format, OutputFormat::Json);
    assert_eq!(params.output, Some(PathBuf::from("out.json")));
}

#[test]
fn emit_rejects_unknown_format() {
    let result = emit_command().try_get_matches_from(["emit", "a.vcl", "--format", "asm"]);
    assert!(result.is_err());
}

#[test]
fn subcommand_required() {
    let result = build_cli().try_get_matches_from(["vclc"]);
    assert!(result.is_err());
}

#[test]
fn help_lists_commands() {
    let help = build_cli().render_help().to_string();
    assert!(help.contains("check"));
    assert!(help.contains("emit"));
}
