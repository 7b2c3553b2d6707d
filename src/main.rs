use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use hugo_synergy::{classify, composition, db, gaps, ranking, report};
use hugo_synergy::{ProjectType, Response, TypeCatalog};

#[derive(Parser)]
#[command(name = "hugo-synergy")]
#[command(about = "Hugo personality typing and team synergy toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a sample roster
    Seed,
    /// Import people and team memberships from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Classify a completed assessment from a JSON answer file
    Classify {
        #[arg(long)]
        answers: PathBuf,
        /// Store the result for the person with this email
        #[arg(long)]
        email: Option<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List dimension gaps for a team
    Gaps {
        #[arg(long)]
        team: String,
    },
    /// Rank candidates who would improve a team
    Recommend {
        #[arg(long)]
        team: String,
        #[arg(long, default_value = "balanced")]
        project_type: ProjectType,
        #[arg(long, default_value_t = 5)]
        top: i64,
    },
    /// Generate a markdown team report
    Report {
        #[arg(long)]
        team: String,
        #[arg(long, default_value = "balanced")]
        project_type: ProjectType,
        #[arg(long, default_value_t = 5)]
        top: i64,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            db::init_db(&connect().await?).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&connect().await?).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&connect().await?, &csv).await?;
            println!("Added {inserted} team memberships from {}.", csv.display());
        }
        Commands::Classify {
            answers,
            email,
            json,
        } => {
            let raw = std::fs::read_to_string(&answers)
                .with_context(|| format!("failed to read {}", answers.display()))?;
            let response: Response =
                serde_json::from_str(&raw).context("answers must be a JSON object of strings")?;
            let result = classify::classify_response(&response)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let catalog = TypeCatalog::new();
                let entry = catalog.get(result.hugo_type);
                println!(
                    "{} - {} ({}): {}",
                    entry.code, entry.display_name, entry.dimension, entry.tagline
                );
                if result.is_tie {
                    println!("Note: several types tied; the first in canonical order was chosen.");
                }
            }

            if let Some(email) = email {
                let pool = connect().await?;
                db::record_assessment(&pool, &email, &result, Utc::now().date_naive()).await?;
                println!("Assessment stored for {email}.");
            }
        }
        Commands::Gaps { team } => {
            let team = db::fetch_team(&connect().await?, &team).await?;
            let gaps = gaps::analyze(&team);

            if gaps.is_empty() {
                println!("No dimension gaps for {}.", team.name);
                return Ok(());
            }

            println!(
                "Gaps for {} (synergy {:.2}):",
                team.name,
                composition::synergy_score(&team)
            );
            for gap in gaps.iter() {
                println!(
                    "- [{}] {}. {}.",
                    gap.severity.as_str(),
                    gap.impact,
                    gap.recommendation
                );
            }
        }
        Commands::Recommend {
            team,
            project_type,
            top,
        } => {
            let pool = connect().await?;
            let team = db::fetch_team(&pool, &team).await?;
            let candidates = db::fetch_candidates(&pool, &team).await?;
            let recommendations = ranking::rank(&team, &candidates, project_type, top);

            if recommendations.is_empty() {
                println!("No eligible candidates for {}.", team.name);
                return Ok(());
            }

            println!("Top candidates for {} ({project_type}):", team.name);
            for recommendation in recommendations.iter() {
                println!(
                    "- {} ({}) synergy {:.2} ({:+.2}): {}",
                    recommendation.candidate.name,
                    recommendation.candidate.personality_type,
                    recommendation.synergy_score,
                    recommendation.impact_analysis.improvement,
                    recommendation.reasoning
                );
            }
        }
        Commands::Report {
            team,
            project_type,
            top,
            out,
        } => {
            let pool = connect().await?;
            let team = db::fetch_team(&pool, &team).await?;
            let candidates = db::fetch_candidates(&pool, &team).await?;
            let report = report::build_report(
                &team,
                &candidates,
                project_type,
                top,
                Utc::now().date_naive(),
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
