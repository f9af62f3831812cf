use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the targets accepted by src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const TARGETS: &[&str] = &["model", "html"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert HTML fragments to and from the folio content model")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input HTML file")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Output target")
                .value_parser(clap::builder::PossibleValuesParser::new(TARGETS))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("no-normalize")
                .long("no-normalize")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue),
        );

    generate_to(Bash, &mut cmd, "folio", &outdir)?;
    generate_to(Zsh, &mut cmd, "folio", &outdir)?;
    generate_to(Fish, &mut cmd, "folio", &outdir)?;

    Ok(())
}
