mod cli;
mod commands;
mod logging;

use cli::{CheckParams, EmitParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();

    if let Some((_, m)) = matches.subcommand() {
        logging::init(verbosity(m));
    }

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            commands::emit::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
