use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ir_core::YearKey;
use ir_core::calculations::IncomeTaxCalculator;
use ir_data::summary::{render_comparison, render_summary};
use ir_data::{ProfileLoader, ScaleLoader, SettingsLoader, logging};
use tracing::info;

/// Compute the French income tax of a household.
///
/// Settings are read from a TOML file. The progressive scales may be
/// overridden by a CSV file with the following columns:
/// - scale: ir_current, ir_previous, cehr_single or cehr_couple
/// - from: lower bound of the bracket
/// - to: upper bound (empty for unbounded)
/// - rate_percent: marginal rate in percent (e.g. 30)
#[derive(Parser, Debug)]
#[command(name = "ir-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML settings file
    #[arg(short, long)]
    settings: PathBuf,

    /// Path to the household profile (.toml or .json)
    #[arg(short, long)]
    profile: PathBuf,

    /// CSV file overriding the scales of the settings file
    #[arg(short, long)]
    brackets: Option<PathBuf>,

    /// Rule set to use, overriding the one named in the profile
    #[arg(short, long)]
    year: Option<Year>,

    /// Compute both years and print them side by side
    #[arg(long, default_value_t = false, conflicts_with = "year")]
    compare: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Year {
    Current,
    Previous,
}

impl From<Year> for YearKey {
    fn from(year: Year) -> Self {
        match year {
            Year::Current => YearKey::Current,
            Year::Previous => YearKey::Previous,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.verbose, args.log_file.as_deref())?;

    let mut settings = SettingsLoader::load(&args.settings)
        .with_context(|| format!("Failed to load settings: {}", args.settings.display()))?;

    if let Some(path) = &args.brackets {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = ScaleLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let replaced = ScaleLoader::apply(&mut settings, &records)
            .with_context(|| format!("Invalid scales in: {}", path.display()))?;
        info!(replaced, path = %path.display(), "scales overridden from CSV");
    }

    SettingsLoader::validate(&settings)
        .with_context(|| format!("Invalid settings: {}", args.settings.display()))?;

    let mut request = ProfileLoader::load(&args.profile)
        .with_context(|| format!("Failed to load profile: {}", args.profile.display()))?;
    if let Some(year) = args.year {
        request.year = year.into();
    }

    let calculator = IncomeTaxCalculator::new(&settings);

    if args.compare {
        let comparison = calculator.compare_years(&request);
        match args.format {
            OutputFormat::Text => print!("{}", render_comparison(&comparison)),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&comparison)
                    .context("Failed to serialize comparison")?
            ),
        }
        return Ok(());
    }

    let result = calculator.calculate(&request);
    info!(total_tax = %result.total_tax, "computation complete");

    match args.format {
        OutputFormat::Text => print!("{}", render_summary(&result)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        ),
    }

    Ok(())
}
