//! Command-line interface for the harvester.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::HarvestConfig;
use crate::error::Result;
use crate::harvester::run_harvest;
use crate::types::{HarvestJob, HarvestSource, Package};

/// Catalog base URL used as the final explain-URL fallback.
const DEFAULT_SITE_URL: &str = "http://localhost:5000";

/// EDC Connector catalog harvester.
#[derive(Parser)]
#[command(name = "edc-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a connector catalog and convert every dataset to a package file.
    Harvest {
        /// Catalog request endpoint of the management API, or a local file path
        url: String,

        /// Path to the harvest source configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for package JSON files (default: packages/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Catalog base URL used as the final explain-URL fallback
        #[arg(long, default_value = DEFAULT_SITE_URL)]
        site_url: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            url,
            config,
            output,
            site_url,
        } => harvest_command(&url, &config, output.as_deref(), &site_url),
    }
}

/// Execute the harvest command.
fn harvest_command(
    url: &str,
    config_path: &Path,
    output: Option<&Path>,
    site_url: &str,
) -> Result<()> {
    let config_blob = fs::read_to_string(config_path)?;

    // Reject bad configuration before any network traffic
    HarvestConfig::from_json(&config_blob)?;

    println!(
        "{} catalog from {}",
        style("Harvesting").bold(),
        style(url).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Requesting catalog...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut job = HarvestJob::new(HarvestSource {
        url: url.to_string(),
        config: Some(config_blob),
    });

    let packages = match run_harvest(&mut job, &[], site_url) {
        Ok(packages) => packages,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    for error in job.gather_errors() {
        println!("  {} {}", style("Error:").red().bold(), error);
    }
    println!("  Datasets: {}", packages.len());

    let output_base = output.unwrap_or(Path::new("packages"));
    for package in &packages {
        let output_path = save_package(package, output_base)?;
        println!(
            "  {} {}",
            style("Saved:").green().bold(),
            output_path.display()
        );
    }

    Ok(())
}

/// Save a package as pretty-printed JSON.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
fn save_package(package: &Package, output_base: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_base)?;

    let output_file = output_base.join(format!("{}.json", package.name));
    let temp_file = output_base.join(format!(".{}.json.tmp", package.name));

    let content = serde_json::to_string_pretty(package)?;
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_harvest() {
        let cli = Cli::parse_from([
            "edc-harvester",
            "harvest",
            "https://connector.example/management/v2/catalog/request",
            "--config",
            "source.json",
        ]);

        let Commands::Harvest {
            url,
            config,
            output,
            site_url,
        } = cli.command;
        assert_eq!(url, "https://connector.example/management/v2/catalog/request");
        assert_eq!(config, PathBuf::from("source.json"));
        assert!(output.is_none());
        assert_eq!(site_url, DEFAULT_SITE_URL);
    }

    #[test]
    fn test_cli_parse_harvest_with_output_and_site_url() {
        let cli = Cli::parse_from([
            "edc-harvester",
            "harvest",
            "catalog.json",
            "--config",
            "source.json",
            "--output",
            "out",
            "--site-url",
            "https://catalog.example",
        ]);

        let Commands::Harvest {
            output, site_url, ..
        } = cli.command;
        assert_eq!(output, Some(PathBuf::from("out")));
        assert_eq!(site_url, "https://catalog.example");
    }

    #[test]
    fn test_save_package() {
        let package = Package {
            name: "asset-1".to_string(),
            title: "Traffic counts".to_string(),
            notes: "Hourly counts".to_string(),
            ..Package::default()
        };

        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = save_package(&package, temp_dir.path()).unwrap();

        assert!(output_path.exists());
        assert!(output_path.to_string_lossy().ends_with("asset-1.json"));

        let content = fs::read_to_string(output_path).unwrap();
        let parsed: Package = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, package);
    }
}
