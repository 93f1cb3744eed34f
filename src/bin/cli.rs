//! Menopulse CLI
//!
//! Command-line interface for Menopulse:
//! - Analyze a check-in CSV export locally
//! - Print correlations, insights, patterns or recommendations
//! - Send a history to a running API server
//! - Check server status and generate a config file

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use menopulse::analytics::{
    AnalyticsEngine, CorrelationResult, PatternInsight, PredictiveInsight, TimingMode,
};
use menopulse::api::dto::AnalyzeRequest;
use menopulse::checkin::{CheckIn, CheckInImporter};
use menopulse::config::{generate_default_config, Config};
use menopulse::logging::init_logging;
use menopulse::recommendations::{ContentItem, PersonalizedRecommendation, RecommendationEngine};
use menopulse::report::{build_report, AnalysisReport};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "menopulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wellness analytics for menopause symptom tracking")]
#[command(long_about = "Menopulse analyzes daily wellness check-ins.
Find correlations, spot patterns, and get personalized recommendations.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Symptom timing classifier (random, recorded); overrides config
    #[arg(long, global = true)]
    pub timing: Option<TimingMode>,

    /// Seed for the random timing classifier; overrides config
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show metric correlations
    Correlations {
        /// Check-in CSV file
        path: PathBuf,
    },

    /// Show predictive insights
    Insights {
        /// Check-in CSV file
        path: PathBuf,
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Show detected patterns
    Patterns {
        /// Check-in CSV file
        path: PathBuf,
    },

    /// Show ranked recommendations
    Recommend {
        /// Check-in CSV file
        path: PathBuf,
        /// Content catalog (JSON array)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Run the full pipeline
    Report {
        /// Check-in CSV file
        path: PathBuf,
        /// Content catalog (JSON array)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Send to the API server instead of computing locally
        #[arg(long)]
        remote: bool,
    },

    /// Show API server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(timing) = cli.timing {
        config.analysis.timing = timing;
    }
    if cli.seed.is_some() {
        config.analysis.timing_seed = cli.seed;
    }

    // Quiet by default, stdout carries results
    if std::env::var("MENOPULSE_LOG_LEVEL").is_err() {
        config.logging.level = "warn".to_string();
    }
    init_logging(&config.logging, "");

    let analytics = AnalyticsEngine::new(config.analysis.timing, config.analysis.timing_seed);
    let json = cli.format == "json";

    match cli.command {
        Commands::Correlations { path } => {
            let check_ins = load_check_ins(&path)?;
            let correlations = analytics.analyze_correlations(&check_ins)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&correlations)?);
            } else {
                print_correlations(&correlations);
            }
        }

        Commands::Insights { path, as_of } => {
            let check_ins = load_check_ins(&path)?;
            let as_of = as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let insights = analytics.generate_predictive_insights_as_of(&check_ins, None, as_of)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                print_insights(&insights);
            }
        }

        Commands::Patterns { path } => {
            let check_ins = load_check_ins(&path)?;
            let patterns = analytics.detect_patterns(&check_ins)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&patterns)?);
            } else {
                print_patterns(&patterns);
            }
        }

        Commands::Recommend { path, catalog, as_of } => {
            let check_ins = load_check_ins(&path)?;
            let catalog = load_catalog(catalog.as_deref())?;
            let report = build_report(
                &analytics,
                &RecommendationEngine::new(),
                &check_ins,
                None,
                &catalog,
                as_of,
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report.recommendations)?);
            } else {
                print_recommendations(&report.recommendations);
            }
        }

        Commands::Report {
            path,
            catalog,
            as_of,
            remote,
        } => {
            let check_ins = load_check_ins(&path)?;
            let catalog = load_catalog(catalog.as_deref())?;

            let report = if remote {
                fetch_remote_report(&cli.api_url, check_ins, catalog, as_of).await?
            } else {
                build_report(
                    &analytics,
                    &RecommendationEngine::new(),
                    &check_ins,
                    None,
                    &catalog,
                    as_of,
                )?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Status => {
            let client = reqwest::Client::new();
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Menopulse v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!(
                        "Timing classifier: {}",
                        health["timing_classifier"].as_str().unwrap_or("unknown")
                    );
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    bail!("API returned error: {}", resp.status());
                }
                Err(e) => {
                    eprintln!("Cannot connect to Menopulse API at {}", cli.api_url);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin menopulse-api");
                    return Err(e.into());
                }
            }
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

fn load_check_ins(path: &Path) -> anyhow::Result<Vec<CheckIn>> {
    if !path.exists() {
        bail!("File not found: {:?}", path);
    }

    let result = CheckInImporter::new()
        .import(path)
        .with_context(|| format!("Failed to import {:?}", path))?;

    if !result.errors.is_empty() {
        eprintln!("Skipped {} invalid rows (first 10):", result.rows_failed);
        for error in result.errors.iter().take(10) {
            eprintln!("  {}", error);
        }
        eprintln!();
    }

    Ok(result.check_ins)
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Vec<ContentItem>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid content catalog {:?}", path))
}

async fn fetch_remote_report(
    api_url: &str,
    check_ins: Vec<CheckIn>,
    content_library: Vec<ContentItem>,
    as_of: Option<NaiveDate>,
) -> anyhow::Result<AnalysisReport> {
    let body = AnalyzeRequest {
        check_ins,
        tracker_data: None,
        content_library,
        as_of,
    };

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/analyze", api_url))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Cannot connect to Menopulse API at {}", api_url))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("Analyze failed ({}): {}", status, text);
    }

    Ok(response.json().await?)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_correlations(correlations: &[CorrelationResult]) {
    if correlations.is_empty() {
        println!("Not enough check-ins for correlations (need at least 7)");
        return;
    }

    println!("{:<20} | {:>7} | {:<8}", "Pair", "r", "Band");
    println!("{}", "-".repeat(42));
    for c in correlations {
        println!(
            "{:<20} | {:>7.2} | {:<8}",
            format!("{} / {}", c.metric_a, c.metric_b),
            c.coefficient,
            c.significance
        );
        println!("  {}", c.description);
    }
}

fn print_insights(insights: &[PredictiveInsight]) {
    if insights.is_empty() {
        println!("No predictive insights");
        return;
    }

    for i in insights {
        println!(
            "{} on {} ({:.0}%, {} confidence)",
            i.kind,
            i.target_date,
            i.probability * 100.0,
            i.confidence
        );
        println!("  {}", i.reasoning);
        for rec in &i.recommendations {
            println!("  - {}", rec);
        }
    }
}

fn print_patterns(patterns: &[PatternInsight]) {
    if patterns.is_empty() {
        println!("No patterns detected");
        return;
    }

    for p in patterns {
        println!("{} [{}] strength {:.2}", p.name, p.frequency, p.strength);
        println!("  {}", p.description);
        for item in &p.action_items {
            println!("  - {}", item);
        }
    }
}

fn print_recommendations(recommendations: &[PersonalizedRecommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations");
        return;
    }

    for (n, r) in recommendations.iter().enumerate() {
        println!("{}. [{}] {} ({})", n + 1, r.priority, r.title, r.kind);
        println!("   {}", r.reasoning);
        for step in &r.action_steps {
            println!("   - {}", step);
        }
        println!("   Benefit: {} | Timeframe: {}", r.estimated_benefit, r.timeframe);
    }
}

fn print_report(report: &AnalysisReport) {
    println!("Menopulse report as of {} ({} check-ins)", report.as_of, report.check_in_count);
    println!();
    println!("== Correlations ==");
    print_correlations(&report.correlations);
    println!();
    println!("== Predictive insights ==");
    print_insights(&report.insights);
    println!();
    println!("== Patterns ==");
    print_patterns(&report.patterns);
    println!();
    println!("== Recommendations ==");
    print_recommendations(&report.recommendations);
}
