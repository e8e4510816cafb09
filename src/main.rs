//! hexgrid - Entry Point

use clap::Parser;
use hexgrid::config::CliOverrides;
use hexgrid::model::{CodeCharactersCase, CodeType, RowWrapping, ViewMode};
use hexgrid::view::ColorConfig;
use hexgrid::view_state::structure::MAX_BYTES_PER_ROW;
use std::path::PathBuf;
use tracing::info;

/// hexgrid - terminal hex viewer
#[derive(Parser, Debug)]
#[command(name = "hexgrid")]
#[command(version)]
#[command(about = "Terminal hex viewer with a code matrix and text preview")]
pub struct Args {
    /// File to view (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Numeric base of the code matrix (binary, octal, decimal, hexadecimal)
    #[arg(short = 't', long)]
    pub code_type: Option<CodeType>,

    /// Sections to show (dual, code, text)
    #[arg(short = 'm', long)]
    pub view_mode: Option<ViewMode>,

    /// Bytes per row (1 to 4096)
    #[arg(short, long, value_parser = parse_bytes_per_row)]
    pub bytes_per_row: Option<usize>,

    /// Fit bytes per row to the terminal width
    #[arg(short, long)]
    pub wrap: bool,

    /// Uppercase digits above 9
    #[arg(long, conflicts_with = "lower")]
    pub upper: bool,

    /// Lowercase digits above 9
    #[arg(long)]
    pub lower: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_bytes_per_row(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("bytes per row must be at least 1".to_string()),
        Ok(n) if n > MAX_BYTES_PER_ROW => {
            Err(format!("bytes per row must be at most {MAX_BYTES_PER_ROW}"))
        }
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}

impl Args {
    /// Settings given on the command line; unset flags stay `None`.
    fn overrides(&self) -> CliOverrides {
        let code_case = if self.upper {
            Some(CodeCharactersCase::Upper)
        } else if self.lower {
            Some(CodeCharactersCase::Lower)
        } else {
            None
        };
        CliOverrides {
            code_type: self.code_type,
            view_mode: self.view_mode,
            bytes_per_row: self.bytes_per_row,
            row_wrapping: self.wrap.then_some(RowWrapping::Wrapping),
            code_case,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = hexgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = hexgrid::config::merge_config(config_file);
        let with_env = hexgrid::config::apply_env_overrides(merged);
        hexgrid::config::apply_cli_overrides(with_env, args.overrides())
    };

    hexgrid::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = hexgrid::source::detect_input_source(args.file.clone())?;

    hexgrid::view::run_with_source(
        input_source,
        config.engine_config(),
        ColorConfig::from_env_and_args(args.no_color),
    )?;

    Ok(())
}
