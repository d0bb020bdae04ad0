//! Fit a circle to a drawn stroke and print how round it is.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use circle_fit::{fit, parse_points, FitConfig, FitResult};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rate-circle")]
#[command(about = "Score how close a drawn stroke is to a perfect circle")]
#[command(version = "0.1.0")]
struct Cli {
    /// JSON file with `[[x, y], ...]` or a list of strokes; `-` reads stdin
    input: PathBuf,

    /// Seed for the restart random source
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding fit settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FitConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let raw = read_input(&cli.input)?;
    let points = parse_points(&raw)
        .with_context(|| format!("reading points from {}", cli.input.display()))?;
    debug!(n = points.len(), "points loaded");

    let result = fit(&points, &config).with_context(|| {
        format!("cannot fit {} points from {}", points.len(), cli.input.display())
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_report(&result));
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<FitConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn format_report(result: &FitResult) -> String {
    let status = if result.converged {
        "converged"
    } else {
        "did not converge"
    };
    format!(
        "score:   {:.1} / 100\n\
         circle:  r = {:.2}, center = ({:.2}, {:.2})\n\
         status:  {} ({:?}, {} restarts, {} iterations)\n\
         detail:  gap {:.3}, radial {:.3}, offset {:.3}\n",
        result.score,
        result.circle.radius,
        result.circle.center_x,
        result.circle.center_y,
        status,
        result.acceptance,
        result.restarts,
        result.iterations,
        result.breakdown.dgap,
        result.breakdown.dradius,
        result.breakdown.dmass,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["rate-circle", "-", "--seed", "9", "--json", "-vv"]);
        assert_eq!(cli.input, PathBuf::from("-"));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_report_mentions_score_and_circle() {
        let points = parse_points("[[0, 0], [10, 0], [10, 10], [0, 10]]").unwrap();
        let result = fit(&points, &FitConfig::seeded(0)).unwrap();
        let report = format_report(&result);
        assert!(report.starts_with("score:"));
        assert!(report.contains("center = (5.00, 5.00)"));
        assert!(report.contains("converged (InitialGuess, 0 restarts, 0 iterations)"));
    }
}
