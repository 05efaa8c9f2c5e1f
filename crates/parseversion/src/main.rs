use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use versort::Version;

const AFTER_HELP: &str = "\
This command parses one or more versions and emits a JSON array containing \
one object per version. Each JSON object has two keys:

  * \"version\" - The original string.
  * \"sortable_version\" - An array of strings. Each element of the array \
is a stringified decimal number. Taken as a whole, this array can be sorted \
numerically against other versions of the same package.

The following version types are available:

  * generic - Anything not covered by another type, such as C libraries
  * semver  - A version following the semver specification (https://semver.org/)
  * perl    - A Perl module version
  * php     - A PHP version as used by composer
  * python  - A Python PEP440 or legacy version
  * ruby    - A Ruby version as used by rubygems";

/// A command line tool for parsing version strings.
#[derive(Parser)]
#[command(name = "parseversion", version, about, after_help = AFTER_HELP)]
struct Cli {
    /// One or more pairs of version types and versions to parse.
    #[arg(value_name = "TYPE VERSION", required = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("parseversion: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.args.len() % 2 == 1 {
        bail!(
            "you must pass one or more pairs of arguments, where each pair \
             consists of a type and version string"
        );
    }

    let mut output = Vec::with_capacity(cli.args.len() / 2);
    for pair in cli.args.chunks_exact(2) {
        let (kind, version) = (pair[0].as_str(), pair[1].as_str());
        debug!("parsing `{version}` as {kind}");
        output.push(
            parse(kind, version).with_context(|| format!("error parsing {version} as {kind}"))?,
        );
    }

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn parse(kind: &str, version: &str) -> Result<Version> {
    let parsed = match kind {
        "generic" => versort::parse_generic(version)?,
        "semver" => versort::parse_semver(version)?,
        "perl" => versort::parse_perl(version)?,
        "php" => versort::parse_php(version)?,
        "python" => versort::parse_python(version)?,
        "ruby" => versort::parse_ruby(version)?,
        _ => bail!("unknown version type requested: {kind}"),
    };
    Ok(parsed)
}
