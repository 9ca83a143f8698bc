use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of src/inspect.rs; build scripts can't reach src/ modules
const AVAILABLE_VIEWS: &[&str] = &["yaml", "yaml-full", "json"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let input = || {
        Arg::new("input")
            .help("Input file path, or - for stdin")
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("mkout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markdown documents as markdown, YAML, JSON, text or man pages")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .arg(input())
                .arg(Arg::new("from").long("from"))
                .arg(Arg::new("to").long("to").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect").arg(input()).arg(
                Arg::new("view")
                    .index(2)
                    .value_parser(clap::builder::PossibleValuesParser::new(
                        AVAILABLE_VIEWS,
                    )),
            ),
        );

    generate_to(Bash, &mut cmd, "mkout", &outdir)?;
    generate_to(Zsh, &mut cmd, "mkout", &outdir)?;
    generate_to(Fish, &mut cmd, "mkout", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
