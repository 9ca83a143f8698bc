// Command-line interface for mkout
//
// Reads a document (markdown, or a JSON tree dump), and renders it through one
// of the mkout-babel formats.
//
// Usage:
//  mkout <input> --to <format> [--from <format>] [--output <file>]  - Convert (default)
//  mkout convert <input> --to <format> [--from <format>] [--output <file>]
//  mkout inspect <input> [<view>]        - Dump the parsed tree (defaults to "yaml")
//  mkout --list-formats                  - List available formats and views
//
// `-` as input reads stdin. Without --from the source format is detected from
// the file extension, and stdin is read as markdown.
//
// Extra Parameters:
//
// --extra-<name> <value> pairs are stripped before clap parsing and handed to the
// target format as per-call parameters.
// Example:
//  mkout README.md --to markdown --extra-link-style reference

mod inspect;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mkout_babel::formats::{JsonFormat, ManFormat, MarkdownFormat, TextFormat, YamlFormat};
use mkout_babel::{FormatRegistry, Tree};
use mkout_config::{Loader, MkoutConfig};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MKOUT_LOG";

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "help"];

/// Pull `--extra-<key> [value]` pairs out of the raw args before clap sees them.
///
/// A key with no value, or followed by another flag or by `-`, is set to "true".
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
                let value = args
                .get(i + 1)
                .filter(|next| !next.starts_with('-'))
                .cloned();
            match value {
                Some(value) => {
                    extra_params.insert(key.to_string(), value);
                    i += 2;
                }
                None => {
                    extra_params.insert(key.to_string(), "true".to_string());
                    i += 1;
                }
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or - for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("mkout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markdown documents as markdown, YAML, JSON, text or man pages")
        .long_about(
            "mkout parses CommonMark and renders the document tree through one of its formats.\n\n\
            Commands:\n  \
            - convert: Render a document in another format (default)\n  \
            - inspect: Dump the parsed tree as YAML or JSON\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mkout README.md --to markdown                      # Normalize markdown\n  \
            mkout README.md --to text --extra-autolink false   # Plain text, links inline\n  \
            mkout README.md --to man -o mkout.1                # Write a man page\n  \
            mkout inspect README.md yaml-full                  # Tree with every attribute",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect views")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mkout.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Render a document in another format.\n\n\
                    Formats:\n  \
                    - markdown: CommonMark (.md), read and write\n  \
                    - json:     Tree dump (.json), read and write\n  \
                    - yaml:     Structural dump (.yaml), write only\n  \
                    - text:     Plain text (.txt), write only\n  \
                    - man:      roff man page (.1), write only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Dump the parsed document tree")
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("view")
                        .help("Tree view to print. Defaults to 'yaml'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_VIEWS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);
    let matches = match_args(&cleaned_args);

    if let Err(err) = run(&matches, &extra_params) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

/// Parse args, injecting "convert" when the first argument is an input path.
fn match_args(args: &[String]) -> ArgMatches {
    let cli = build_cli();
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => match inject_convert(args) {
            Some(injected) => cli
                .try_get_matches_from(&injected)
                .unwrap_or_else(|err| err.exit()),
            None => err.exit(),
        },
    }
}

fn inject_convert(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    let is_input = first == "-" || !first.starts_with('-');
    if !is_input || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = vec![args[0].clone(), "convert".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

fn run(matches: &ArgMatches, extra_params: &HashMap<String, String>) -> Result<()> {
    let config = load_cli_config(matches.get_one::<String>("config").map(String::as_str))?;
    let registry = registry_from_config(&config);

    if matches.get_flag("list-formats") {
        print!("{}", list_formats(&registry));
        return Ok(());
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input")?;
            let to = required(sub_matches, "to")?;
            let from = source_format(&registry, input, sub_matches.get_one::<String>("from"))?;
            let output = sub_matches.get_one::<String>("output").map(String::as_str);
            handle_convert_command(&registry, input, &from, to, output, extra_params)
        }
        Some(("inspect", sub_matches)) => {
            let input = required(sub_matches, "input")?;
            let from = source_format(&registry, input, sub_matches.get_one::<String>("from"))?;
            let view = sub_matches
                .get_one::<String>("view")
                .map(String::as_str)
                .unwrap_or(inspect::DEFAULT_VIEW);
            handle_inspect_command(&registry, input, &from, view, extra_params, &config)
        }
        _ => bail!("Unknown subcommand. Use --help for usage information."),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing required argument '{name}'"))
}

/// Explicit `--from`, else detection from the extension; stdin defaults to markdown.
fn source_format(
    registry: &FormatRegistry,
    input: &str,
    explicit: Option<&String>,
) -> Result<String> {
    if let Some(from) = explicit {
        return Ok(from.clone());
    }
    if input == "-" {
        return Ok("markdown".to_string());
    }
    registry.detect_format_from_filename(input).ok_or_else(|| {
        anyhow!("Could not detect format from filename '{input}'. Please specify --from explicitly")
    })
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Error reading stdin")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("Error reading file '{input}'"))
}

fn load_tree(registry: &FormatRegistry, input: &str, from: &str) -> Result<Tree> {
    let source = read_input(input)?;
    let tree = registry.parse(&source, from)?;
    if tree.is_empty() {
        warn!(input, from, "document has no content");
    }
    debug!(input, from, nodes = tree.len(), "loaded document");
    Ok(tree)
}

fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) -> Result<()> {
    // Fail on a bad target before reading anything
    registry.get(to)?;

    let tree = load_tree(registry, input, from)?;
    let rendered = registry.serialize_with_options(&tree, to, extra_params)?;
    write_output(output, &rendered)
}

fn handle_inspect_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
    config: &MkoutConfig,
) -> Result<()> {
    let tree = load_tree(registry, input, from)?;
    let rendered = inspect::execute_view(&tree, view, config, extra_params)?;
    write_output(None, &rendered)
}

fn write_output(output: Option<&str>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Error writing file '{path}'"))
        }
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

fn list_formats(registry: &FormatRegistry) -> String {
    let mut listing = String::from("Conversion formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mode = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "read/write",
            (true, false) => "read",
            (false, true) => "write",
            (false, false) => "-",
        };
        listing.push_str(&format!(
            "  {name:<10} {mode:<10} {}\n",
            format.description()
        ));
    }
    listing.push_str("\nInspect views:\n");
    for view in inspect::AVAILABLE_VIEWS {
        listing.push_str(&format!("  {view}\n"));
    }
    listing
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<MkoutConfig> {
    let loader = Loader::new().with_optional_file("mkout.toml");
    let loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };
    loader.build().context("Failed to load configuration")
}

/// Every built-in format, configured from the loaded sections.
fn registry_from_config(config: &MkoutConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat::new(config.markdown.clone().into()));
    registry.register(JsonFormat::new(config.json.clone().into()));
    registry.register(YamlFormat::new(config.yaml.clone().into()));
    registry.register(
        TextFormat::new(config.text.clone().into())
            .with_markdown_options(config.markdown.clone().into()),
    );
    registry.register(ManFormat::new(config.man.clone().into()));
    registry
}
