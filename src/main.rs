use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use compliance_roi::config::{
    DEFAULT_PROFILE_PATH, Profile, create_default_profile, load_profile, save_profile,
};
use compliance_roi::report::{BreakdownView, ExecutiveReport, MetricsView, ScenarioView, Summary};
use compliance_roi::{Framework, Industry, ScenarioAnalysis, log_info, log_warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "compliance-roi")]
#[command(about = "Estimate the financial return of a compliance program")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default company profile
    Init {
        /// Path to save the profile
        #[arg(short, long, default_value = DEFAULT_PROFILE_PATH)]
        config: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show ROI metrics and the cost-benefit breakdown
    Calculate {
        #[command(flatten)]
        inputs: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show ROI across breach-risk and investment scenarios
    Scenarios {
        #[command(flatten)]
        inputs: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write a Markdown executive report
    Report {
        #[command(flatten)]
        inputs: InputArgs,
        /// Company name for the report (overrides the profile)
        #[arg(long)]
        company: Option<String>,
        /// Report date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Directory to write the report into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// List compliance frameworks and their cost multipliers
    Frameworks,
    /// List industries and their benchmark breach risk
    Industries,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Profile file (defaults to ./compliance_profile.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Annual revenue (USD)
    #[arg(long)]
    revenue: Option<f64>,
    /// Annual audit/compliance costs (USD)
    #[arg(long)]
    audit_costs: Option<f64>,
    /// Industry, e.g. "Financial Services"
    #[arg(long)]
    industry: Option<Industry>,
    /// Primary compliance framework, e.g. "ISO 27001" or pci-dss
    #[arg(long)]
    framework: Option<Framework>,
    /// Perceived breach risk (%); defaults to the industry benchmark
    #[arg(long)]
    breach_risk: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Load the profile and apply command line overrides
fn resolve_profile(args: &InputArgs) -> Result<Profile> {
    let path = match &args.config {
        Some(path) => Some(path.as_path()),
        None => {
            let default = Path::new(DEFAULT_PROFILE_PATH);
            default.exists().then_some(default)
        }
    };

    let mut profile = load_profile(path).with_context(|| match path {
        Some(path) => format!("Failed to load profile: {}", path.display()),
        None => "Failed to load profile from environment".to_string(),
    })?;

    if let Some(revenue) = args.revenue {
        profile.annual_revenue = revenue;
    }
    if let Some(audit_costs) = args.audit_costs {
        profile.audit_costs = audit_costs;
    }
    if let Some(industry) = args.industry {
        profile.industry = industry;
    }
    if let Some(framework) = args.framework {
        profile.framework = framework;
    }
    if let Some(breach_risk) = args.breach_risk {
        profile.breach_risk = Some(breach_risk);
    }

    log_info!(
        "Using profile for {}: revenue={} audit_costs={} risk={} framework={}",
        profile.company_name,
        profile.annual_revenue,
        profile.audit_costs,
        profile.effective_breach_risk(),
        profile.framework
    );
    Ok(profile)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    compliance_roi::logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Init { config, force } => {
            if config.exists() && !force {
                return Err(anyhow::anyhow!(
                    "Profile already exists at {} (use --force to overwrite)",
                    config.display()
                ));
            }
            let profile = create_default_profile();
            save_profile(&profile, &config)
                .with_context(|| format!("Failed to write profile: {}", config.display()))?;
            println!("Profile created at: {}", config.display());
            println!("Edit the file with your company's figures.");
        }

        Commands::Calculate { inputs, format } => {
            let profile = resolve_profile(&inputs)?;
            let summary = Summary::build(&profile).context("ROI calculation failed")?;

            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Text => {
                    println!(
                        "{} | {} | {} | breach risk {:.1}%\n",
                        profile.company_name,
                        profile.industry,
                        profile.framework,
                        summary.input.breach_risk
                    );
                    println!("{}", MetricsView(&summary.result));
                    print!("{}", BreakdownView(&summary.breakdown));
                }
            }
        }

        Commands::Scenarios { inputs, format } => {
            let profile = resolve_profile(&inputs)?;
            let analysis = ScenarioAnalysis::run(&profile.to_input())
                .context("Scenario analysis failed")?;

            match format {
                OutputFormat::Json => print_json(&analysis)?,
                OutputFormat::Text => print!("{}", ScenarioView(&analysis)),
            }
        }

        Commands::Report {
            inputs,
            company,
            date,
            output_dir,
        } => {
            let mut profile = resolve_profile(&inputs)?;
            if let Some(company) = company {
                profile.company_name = company;
            }
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

            let report =
                ExecutiveReport::build(&profile, date).context("Report generation failed")?;
            if !output_dir.is_dir() {
                log_warn!("Creating output directory {}", output_dir.display());
                std::fs::create_dir_all(&output_dir).with_context(|| {
                    format!("Failed to create directory: {}", output_dir.display())
                })?;
            }
            let path = report
                .write_to(&output_dir)
                .with_context(|| format!("Failed to write report to {}", output_dir.display()))?;
            println!("Report generated: {}", path.display());
        }

        Commands::Frameworks => {
            for framework in Framework::ALL {
                println!("{:<10} x{:.1}", framework.label(), framework.multiplier());
            }
        }

        Commands::Industries => {
            for industry in Industry::ALL {
                println!(
                    "{:<20} {:.1}%",
                    industry.label(),
                    industry.default_breach_risk()
                );
            }
        }
    }

    Ok(())
}
