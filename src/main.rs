use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod account;
mod classify;
mod db;
mod error;
mod gateway;
mod history;
mod models;
mod normalize;
mod report;

const DEFAULT_SCORING_URL: &str = "http://127.0.0.1:5001/predict_stress_score";

#[derive(Parser)]
#[command(name = "stresssense")]
#[command(about = "Stress assessment scoring and history tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load demo user accounts
    Seed,
    /// Register a new user account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Verify credentials and show account status
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Update a user's display name and profile image
    #[command(group(
        ArgGroup::new("scope")
            .args(["user", "email"])
            .required(true)
            .multiple(false)
    ))]
    UpdateProfile {
        #[arg(long)]
        user: Option<Uuid>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        profile_image: Option<PathBuf>,
    },
    /// Submit an assessment: score it, classify it, persist it
    #[command(group(
        ArgGroup::new("scope")
            .args(["user", "email"])
            .required(true)
            .multiple(false)
    ))]
    Assess {
        #[arg(long)]
        user: Option<Uuid>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        sleep_hours: String,
        #[arg(long)]
        exercise_frequency: String,
        #[arg(long)]
        academic_pressure: String,
        #[arg(long)]
        financial_pressure: String,
        #[arg(long)]
        study_hours: String,
        #[arg(long)]
        screen_time: String,
        #[arg(long)]
        facial_image: Option<PathBuf>,
        #[arg(long)]
        voice_sample: Option<PathBuf>,
    },
    /// Print aggregate history statistics for a user
    #[command(group(
        ArgGroup::new("scope")
            .args(["user", "email"])
            .required(true)
            .multiple(false)
    ))]
    History {
        #[arg(long)]
        user: Option<Uuid>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Write a markdown wellness report for a user
    #[command(group(
        ArgGroup::new("scope")
            .args(["user", "email"])
            .required(true)
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        user: Option<Uuid>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed users inserted.");
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            account::validate_name(&name)?;
            account::validate_email(&email)?;
            account::validate_password(&password)?;
            let user = db::create_user(
                &pool,
                name.trim(),
                &email,
                &account::hash_credential(&password),
            )
            .await?;
            println!("Registered {} ({}) as {}.", user.name, user.email, user.id);
        }
        Commands::Login { email, password } => {
            let user = db::find_user_by_email(&pool, &email).await?;
            if !account::verify_credential(&user.credential_hash, &password) {
                anyhow::bail!("invalid credentials");
            }
            let taken = db::count_assessments(&pool, user.id).await?;
            println!(
                "Login successful for {} (member since {}).",
                user.name,
                user.created_at.format("%Y-%m-%d")
            );
            if taken > 0 {
                println!("{taken} assessments on record.");
            } else {
                println!("No assessments yet.");
            }
        }
        Commands::UpdateProfile {
            user,
            email,
            name,
            profile_image,
        } => {
            let target = resolve_user(&pool, user, email.as_deref()).await?;
            account::validate_name(&name)?;
            let image = read_optional(profile_image.as_deref())?;
            let updated =
                db::update_profile(&pool, target.id, name.trim(), image.as_deref()).await?;
            match &updated.profile_image {
                Some(image) => println!(
                    "Profile saved for {} ({} byte image on file).",
                    updated.email,
                    image.len()
                ),
                None => println!("Profile saved for {}.", updated.email),
            }
        }
        Commands::Assess {
            user,
            email,
            age,
            gender,
            sleep_hours,
            exercise_frequency,
            academic_pressure,
            financial_pressure,
            study_hours,
            screen_time,
            facial_image,
            voice_sample,
        } => {
            let target = resolve_user(&pool, user, email.as_deref()).await?;

            let raw = normalize::RawAssessment {
                age: age.into(),
                gender: gender.into(),
                sleep_hours: sleep_hours.into(),
                exercise_frequency: exercise_frequency.into(),
                academic_pressure: academic_pressure.into(),
                financial_pressure: financial_pressure.into(),
                study_hours: study_hours.into(),
                screen_time: screen_time.into(),
            };
            let features = normalize::normalize(&raw)?;

            let facial = read_optional(facial_image.as_deref())?;
            let voice = read_optional(voice_sample.as_deref())?;

            let scoring_url = std::env::var("SCORING_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SCORING_URL.to_string());
            let scorer = gateway::ScoringGateway::new(scoring_url)?;
            let stress_level = scorer.request_score(&features).await?;
            let result = classify::classify(stress_level);

            let assessment = db::insert_assessment(
                &pool,
                target.id,
                &features,
                facial.as_deref(),
                voice.as_deref(),
                stress_level,
            )
            .await?;

            println!(
                "Assessment {} saved for {} (facial image: {}, voice sample: {}).",
                assessment.id,
                target.email,
                if assessment.facial_image.is_some() { "yes" } else { "no" },
                if assessment.voice_sample.is_some() { "yes" } else { "no" },
            );
            println!("Stress level: {}% ({})", result.score, result.category);
            for recommendation in result.recommendations {
                println!("- {recommendation}");
            }
        }
        Commands::History { user, email } => {
            let target = resolve_user(&pool, user, email.as_deref()).await?;
            let assessments = db::fetch_history(&pool, target.id).await?;
            match history::summarize(&assessments) {
                None => println!("No assessments recorded for {} yet.", target.email),
                Some(summary) => {
                    println!("History for {}:", target.email);
                    println!(
                        "- Latest stress level: {}% ({})",
                        summary.latest,
                        classify::classify(summary.latest).category
                    );
                    println!("- Average stress: {}%", summary.average);
                    println!("- Highest stress: {}%", summary.maximum);
                    println!("- Lowest stress: {}%", summary.minimum);
                    println!("- Assessments taken: {}", summary.count);
                }
            }
        }
        Commands::Report { user, email, out } => {
            let target = resolve_user(&pool, user, email.as_deref()).await?;
            let assessments = db::fetch_history(&pool, target.id).await?;
            let summary = history::summarize(&assessments);
            let rendered = report::build_report(&target.name, summary.as_ref());
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

async fn resolve_user(
    pool: &PgPool,
    user: Option<Uuid>,
    email: Option<&str>,
) -> anyhow::Result<models::User> {
    let user = match (user, email) {
        (Some(id), _) => db::find_user_by_id(pool, id).await?,
        (None, Some(email)) => db::find_user_by_email(pool, email).await?,
        (None, None) => anyhow::bail!("either --user or --email is required"),
    };
    Ok(user)
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<Option<Vec<u8>>> {
    match path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Some(bytes))
        }
        None => Ok(None),
    }
}
