//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vclc")
        .about("Compile-time checker for regex, endpoint and unit literals")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(emit_command())
}

fn with_input_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg())
        .arg(source_text_arg())
        .arg(port_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Validate a program.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a program")
        .override_usage(
            "\
  vclc check <FILE>
  vclc check -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  vclc check literals.vcl             # validate a file
  vclc check - < literals.vcl         # read stdin
  vclc check -e 'duration 10s;'       # inline program
  vclc check literals.vcl --strict    # warnings fail too"#,
        );

    with_input_args(cmd)
}

/// Compile a program and write the artifact.
pub fn emit_command() -> Command {
    let cmd = Command::new("emit")
        .about("Compile a program and write the generated artifact")
        .override_usage(
            "\
  vclc emit <FILE> [-o <OUT>]
  vclc emit -e <TEXT> [--format json]",
        )
        .after_help(
            r#"EXAMPLES:
  vclc emit literals.vcl              # C artifact to stdout
  vclc emit literals.vcl -o vgc.c     # C artifact to a file
  vclc emit literals.vcl --format json
  vclc emit -e 'backend "localhost" port "8080";'"#,
        )
        .arg(format_arg())
        .arg(output_file_arg());

    with_input_args(cmd)
}
