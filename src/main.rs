//! animerec - command-line front end for the recommendation core
//!
//! Looks up anime metadata on AniList and asks the recommendation proxy for
//! titles, printing results as plain text or JSON.

use animerec_lib::shared::utils::{init_logger, TimedOperation};
use animerec_lib::{
    AniListClient, AppConfig, MediaDetails, MediaSummary, QuizAnswers, RecommendationClient,
    RecommendationOutcome, RecommendationPipeline,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "animerec",
    version,
    about = "Anime lookups and recommendations from the terminal"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List currently trending anime
    Trending {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },

    /// Search anime by title
    Search {
        term: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },

    /// Show full details for an AniList id
    Details { id: u32 },

    /// Recommend from quiz answers; omitted answers use their defaults
    Quiz {
        #[arg(long)]
        vibe: Option<String>,

        #[arg(long)]
        pace: Option<String>,

        #[arg(long)]
        era: Option<String>,

        #[arg(long)]
        violence: Option<String>,

        #[arg(long)]
        focus: Option<String>,
    },

    /// Recommend titles similar to the given ones
    Seeds {
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    init_logger(level);

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let metadata = Arc::new(
        AniListClient::new(config.metadata_config()).context("Failed to create AniList client")?,
    );

    match args.command {
        Command::Trending { page, per_page } => {
            let results = metadata.fetch_trending(page, per_page).await?;
            print_summaries(&results, args.json)?;
        }
        Command::Search {
            term,
            page,
            per_page,
        } => {
            let results = metadata.search_by_text(&term, page, per_page).await?;
            print_summaries(&results, args.json)?;
        }
        Command::Details { id } => {
            let details = metadata.fetch_details(id).await?;
            if args.json {
                print_json(&details)?;
            } else {
                print_details(&details);
            }
        }
        Command::Quiz {
            vibe,
            pace,
            era,
            violence,
            focus,
        } => {
            let pipeline = pipeline(&config, metadata)?;
            let answers = QuizAnswers {
                vibe,
                pace,
                era,
                violence,
                focus,
            };

            let timer = TimedOperation::new("quiz recommendation");
            let outcome = pipeline.recommend_from_quiz(&answers).await;
            timer.finish();
            print_outcome(&outcome, args.json)?;
        }
        Command::Seeds { titles } => {
            let pipeline = pipeline(&config, metadata)?;

            let timer = TimedOperation::new("seed recommendation");
            let seeds = pipeline.seeds_from_titles(&titles).await;
            let outcome = pipeline.recommend_from_seeds(&seeds).await;
            timer.finish();
            print_outcome(&outcome, args.json)?;
        }
    }

    Ok(())
}

fn pipeline(config: &AppConfig, metadata: Arc<AniListClient>) -> Result<RecommendationPipeline> {
    let recommendations = RecommendationClient::new(config.recommendation_config())
        .context("Failed to create recommendation client")?;
    Ok(RecommendationPipeline::new(metadata, Arc::new(recommendations)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn summary_line(media: &MediaSummary) -> String {
    let mut line = format!("[{}] {}", media.id, media.display_title());
    if let Some(format) = &media.format {
        line.push_str(&format!(" ({})", format));
    }
    if let Some(year) = media.start_year {
        line.push_str(&format!(" {}", year));
    }
    if let Some(score) = media.mean_score {
        line.push_str(&format!(" - {}%", score));
    }
    line
}

fn print_summaries(results: &[MediaSummary], json: bool) -> Result<()> {
    if json {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("No results");
    }
    for media in results {
        println!("{}", summary_line(media));
    }
    Ok(())
}

fn print_details(details: &MediaDetails) {
    let summary = &details.summary;
    println!("{}", summary_line(summary));
    if let Some(native) = &summary.title.native {
        println!("  Native: {}", native);
    }
    if let Some(status) = &summary.status {
        println!("  Status: {}", status);
    }
    if let Some(episodes) = summary.episodes {
        match details.duration {
            Some(minutes) => println!("  Episodes: {} x {} min", episodes, minutes),
            None => println!("  Episodes: {}", episodes),
        }
    }
    if !summary.genres.is_empty() {
        println!("  Genres: {}", summary.genres.join(", "));
    }
    if !details.studios.is_empty() {
        println!("  Studios: {}", details.studios.join(", "));
    }
    if let Some(aired) = details.start_date.to_naive_date() {
        println!("  Aired: {}", aired);
    }
    if let Some(url) = details.trailer.as_ref().and_then(|t| t.url()) {
        println!("  Trailer: {}", url);
    }
    if let Some(description) = &summary.description {
        println!();
        println!("{}", description);
    }
}

fn print_outcome(outcome: &RecommendationOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }

    let recommendation = &outcome.recommendation;
    if recommendation.is_fallback() {
        println!("Showing fallback picks");
        if let Some(error) = &recommendation.error {
            println!("  ({})", error);
        }
    }
    if !recommendation.seed_titles.is_empty() {
        println!("Because you liked: {}", recommendation.seed_titles.join(", "));
    }

    for item in &outcome.resolved {
        if let Some(media) = &item.media {
            println!(
                "{}  <- \"{}\", {} confidence",
                summary_line(media),
                item.search_title,
                item.confidence.as_str()
            );
        }
    }
    for title in outcome.unresolved_titles() {
        println!("{} (no AniList match)", title);
    }
    Ok(())
}
