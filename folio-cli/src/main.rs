// Command-line interface for folio
//
// This binary reads an HTML fragment, converts it into the folio content model and prints either
// the model (as JSON) or the markup written back from it.
//
// The conversion itself lives in folio-model; this crate only wires files, configuration and
// logging around it.
//
// Usage:
//  folio <input> [--to model|html] [--output <file>]   - Convert (model JSON by default)
//  folio <input> --to html                             - Read and write back (round trip)
//
// Configuration:
//
// Defaults come from folio-config. A folio.toml in the working directory is layered on top when
// present, then the file passed with --config. Flags such as --no-normalize override both.
//
// Logging:
//
// Diagnostics go to stderr. FOLIO_LOG takes an EnvFilter directive (e.g. "folio_model=trace");
// without it only warnings are shown, --verbose raises that to debug.

use clap::{Arg, ArgAction, Command, ValueHint};
use folio_config::{FolioConfig, Loader};
use folio_model::{
    content_model_to_dom, dom_to_content_model, DomToModelOptions, MarkupTree, ModelToDomOptions,
};
use std::fs;
use tracing_subscriber::EnvFilter;

const TARGETS: [&str; 2] = ["model", "html"];

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert HTML fragments to and from the folio content model")
        .long_about(
            "folio reads an HTML fragment and converts it into the folio content model.\n\n\
            Targets:\n  \
            - model: the content model as pretty printed JSON (default)\n  \
            - html:  the model written back into the markup it was read from\n\n\
            Examples:\n  \
            folio page.html                       # Model JSON to stdout\n  \
            folio page.html --to html             # Round trip through the model\n  \
            folio page.html -o page.json          # Write the model to a file",
        )
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
                .default_value("model")
                .value_parser(clap::builder::PossibleValuesParser::new(TARGETS))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path (defaults to stdout)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("no-normalize")
                .long("no-normalize")
                .help("Skip the cleanup pass after reading")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_flag("no-normalize"),
    );

    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let to = matches
        .get_one::<String>("to")
        .map(|s| s.as_str())
        .unwrap_or("model");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());

    handle_convert_command(input, to, output, &config);
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>, no_normalize: bool) -> FolioConfig {
    let loader = Loader::new().with_optional_file("folio.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = if no_normalize {
        loader.set_override("normalize.enabled", false)
    } else {
        Ok(loader)
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn handle_convert_command(input: &str, to: &str, output: Option<&str>, config: &FolioConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut tree = MarkupTree::parse_fragment(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let reading = DomToModelOptions::from(config);
    let mut model = dom_to_content_model(&mut tree, &reading, None);
    tracing::info!(input, blocks = model.blocks.len(), "read content model");

    let result = match to {
        "html" => {
            let writing = ModelToDomOptions::from(&config.model_to_dom);
            content_model_to_dom(&mut tree, &mut model, &writing, None);
            tree.inner_html().map_err(|e| e.to_string())
        }
        _ => serde_json::to_string_pretty(&model).map_err(|e| e.to_string()),
    };
    let text = result.unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_defaults_to_model() {
        let matches = build_cli().try_get_matches_from(["folio", "in.html"]).unwrap();
        assert_eq!(matches.get_one::<String>("to").map(String::as_str), Some("model"));
        assert!(!matches.get_flag("verbose"));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let result = build_cli().try_get_matches_from(["folio", "in.html", "--to", "pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_normalize_overrides_the_config() {
        let config = load_cli_config(None, true);
        assert!(!config.normalize.enabled);
        assert!(!DomToModelOptions::from(&config).normalize);
    }
}
