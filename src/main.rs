//! `numfield`: replay keystroke scripts against a numeric field, or format
//! and parse single values with a field's conventions.
//!
//! ```bash
//! numfield replay crates/numeric_input/tests/scripts/separator_move.toml
//! numfield --locale de-CH --decimals 3 format 1234.5
//! RUST_LOG=numeric_input=trace numfield replay my_script.toml
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use numeric_input::{ConfigError, FieldConfig, Script, replay};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "numfield", version, about = "Locale-aware numeric field playground")]
struct Cli {
    /// Field configuration (TOML). Replaces a script's own `[field]` table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of decimals.
    #[arg(long, global = true)]
    decimals: Option<usize>,

    /// Override the locale.
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a keystroke script and print one line per step.
    Replay { script: PathBuf },
    /// Render a value the way the field shows it.
    Format {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Read display text back into a value.
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("numfield: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    match &cli.command {
        Command::Replay { script } => {
            let mut script = Script::from_toml_str(&read(script)?)?;
            script.field = field_config(cli, Some(script.field))?;
            debug!("replaying {} steps", script.steps.len());
            for frame in replay(&script)? {
                writeln!(out, "{frame}")?;
            }
        }
        Command::Format { value } => {
            let codec = field_config(cli, None)?.codec()?;
            match codec.format(Some(*value)) {
                Some(text) => writeln!(out, "{text}")?,
                None => writeln!(out, "(empty)")?,
            }
        }
        Command::Parse { text } => {
            let codec = field_config(cli, None)?.codec()?;
            match codec.parse(Some(text.as_str())) {
                Some(value) => writeln!(out, "{value}")?,
                None => writeln!(out, "(empty)")?,
            }
        }
    }
    Ok(())
}

/// `--config` wins over the script's table; flags win over both.
fn field_config(cli: &Cli, base: Option<FieldConfig>) -> Result<FieldConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => FieldConfig::from_toml_str(&read(path)?)?,
        None => base.unwrap_or_default(),
    };
    if let Some(decimals) = cli.decimals {
        config.decimals = decimals;
    }
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    config.validate()?;
    Ok(config)
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn run_args(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("numfield").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn script_path(name: &str) -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("crates/numeric_input/tests/scripts")
            .join(name)
            .display()
            .to_string()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_and_parse_use_default_field() {
        assert_eq!(run_args(&["format", "12345.678"]).unwrap(), "12.345,68\n");
        assert_eq!(run_args(&["format", "0"]).unwrap(), ",00\n");
        assert_eq!(run_args(&["parse", "-1.234,5"]).unwrap(), "-1234.5\n");
        assert_eq!(run_args(&["parse", "abc"]).unwrap(), "(empty)\n");
    }

    #[test]
    fn flags_override_locale_and_decimals() {
        assert_eq!(
            run_args(&["--locale", "en-US", "--decimals", "1", "format", "1234.56"]).unwrap(),
            "1,234.6\n"
        );
        assert!(matches!(
            run_args(&["--locale", "xx-XX", "format", "1"]),
            Err(CliError::Config(ConfigError::UnknownLocale { .. }))
        ));
    }

    #[test]
    fn replay_prints_one_line_per_frame() {
        let out = run_args(&["replay", &script_path("separator_move.toml")]).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("attach"));
        assert!(lines[2].contains("\"12,00\""));
    }

    #[test]
    fn missing_script_is_a_read_error() {
        assert!(matches!(
            run_args(&["replay", "/nonexistent/script.toml"]),
            Err(CliError::Read { .. })
        ));
    }
}
