//! EcoFoodSystems CLI
//!
//! Command-line tools for the dashboard's datasets:
//! - Check the load-time data invariants
//! - Print a year's rice flow graph
//! - Generate the default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use ecofood::callbacks::supply::format_thousands;
use ecofood::config::{generate_default_config, Config, LoggingConfig};
use ecofood::data::supply::{FIRST_YEAR, LAST_YEAR};
use ecofood::data::{Datasets, FlowGraph, IntegrityReport, SupplyFlows};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecofood-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dataset tools for the EcoFoodSystems dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: from config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every dataset and check the data invariants
    Check,

    /// Print the rice flow graph and KPIs for a year
    Sankey {
        /// Even year between 2010 and 2022
        #[arg(short, long, default_value_t = LAST_YEAR)]
        year: i32,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: "warn".to_string(),
        ..LoggingConfig::default()
    };
    ecofood::logging::init(&logging);

    match cli.command {
        Commands::Check => {
            let datasets = load(cli.data_dir)?;
            let report = datasets.integrity_report();
            print!("{}", render_report(&report, cli.format)?);

            if !report.is_ok() {
                std::process::exit(1);
            }
        }

        Commands::Sankey { year } => {
            check_year(year)?;
            let datasets = load(cli.data_dir)?;
            print!("{}", render_graph(&datasets.supply.graph(year), cli.format)?);
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn check_year(year: i32) -> anyhow::Result<()> {
    if !SupplyFlows::slider_years().contains(&year) {
        bail!("year must be an even year between {} and {}", FIRST_YEAR, LAST_YEAR);
    }
    Ok(())
}

fn render_report(report: &IntegrityReport, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(report)?)?,
        OutputFormat::Table => {
            for issue in &report.issues {
                let city = issue.city.map(|c| c.display_name()).unwrap_or("-");
                writeln!(out, "ISSUE  {:<12} {:<14} {}", city, issue.dataset, issue.message)?;
            }
            for warning in &report.warnings {
                writeln!(out, "WARN   {}", warning)?;
            }
            writeln!(
                out,
                "{} issues, {} warnings",
                report.issues.len(),
                report.warnings.len()
            )?;
        }
    }
    Ok(out)
}

fn render_graph(graph: &FlowGraph, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(graph)?)?,
        OutputFormat::Table => {
            writeln!(out, "Rice flows {}", graph.year)?;
            writeln!(out, "{:<28} {:<28} {:>12}", "Source", "Target", "Tons")?;
            writeln!(out, "{}", "-".repeat(70))?;
            for edge in &graph.edges {
                writeln!(
                    out,
                    "{:<28} {:<28} {:>12}",
                    edge.source,
                    edge.target,
                    format_thousands(edge.supply)
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Total flow:  {} tons", format_thousands(graph.total_flow()))?;
            match graph.urban_share() {
                Some(share) => writeln!(out, "Urban share: {:.1}%", share)?,
                None => writeln!(out, "Urban share: -")?,
            }
        }
    }
    Ok(out)
}

fn load(data_dir: Option<PathBuf>) -> anyhow::Result<Datasets> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => Config::load_default()?.data.data_dir,
    };
    Datasets::load(&data_dir).with_context(|| format!("loading datasets from {}", data_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecofood::data::{IntegrityIssue, Table};
    use ecofood::City;

    const SUPPLY: &str = "\
Year,province,Target,Supply to Hanoi,Target_1,Rice supply
2022,Thai Binh,Hanoi,1500,Hanoi urban,900
2022,Thai Binh,Hanoi,1500,Hanoi rural,600
";

    fn graph() -> FlowGraph {
        let table = Table::from_reader("supply.csv", SUPPLY.as_bytes()).unwrap();
        SupplyFlows::from_table(&table).unwrap().graph(2022)
    }

    #[test]
    fn test_report_lists_issues() {
        let report = IntegrityReport {
            issues: vec![IntegrityIssue {
                city: Some(City::Addis),
                dataset: "poverty".to_string(),
                message: "district Bole has no geometry".to_string(),
            }],
            warnings: vec!["no rice flows for 2010".to_string()],
        };
        let text = render_report(&report, OutputFormat::Table).unwrap();

        assert!(text.contains("ISSUE  Addis Ababa"));
        assert!(text.contains("district Bole has no geometry"));
        assert!(text.contains("WARN   no rice flows for 2010"));
        assert!(text.ends_with("1 issues, 1 warnings\n"));
        // A failing report makes `check` exit non-zero
        assert!(!report.is_ok());
    }

    #[test]
    fn test_clean_report_json() {
        let report = IntegrityReport::default();
        let text = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["issues"].as_array().unwrap().len(), 0);
        assert!(report.is_ok());
    }

    #[test]
    fn test_graph_table() {
        let text = render_graph(&graph(), OutputFormat::Table).unwrap();

        assert!(text.starts_with("Rice flows 2022\n"));
        assert!(text.contains("Hanoi urban"));
        assert!(text.contains("Total flow:  1,500 tons"));
        assert!(text.contains("Urban share: 60.0%"));
    }

    #[test]
    fn test_year_must_be_on_slider() {
        assert!(check_year(2022).is_ok());
        assert!(check_year(2011).is_err());
        assert!(check_year(2024).is_err());
    }
}
