use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CsvDatasetStore, DataPaths, DatasetStore, UserId};
use server::{
    CourseRecommendation, PredictParams, PredictionTable, RecommendationDispatcher,
    RecommenderModel, TrainStatus,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Course Recs - Course Recommendation Engine
#[derive(Parser)]
#[command(name = "course-recs")]
#[command(about = "Course recommendations from content similarity", long_about = None)]
struct Cli {
    /// Directory holding ratings.csv, sim.csv, course_processed.csv and courses_bows.csv
    #[arg(short, long, global = true, default_value = "data", env = "COURSE_RECS_DATA_DIR")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the recommender models
    Models,

    /// List courses in the catalogue
    Courses {
        /// Case-insensitive substring to match against titles
        #[arg(long)]
        search: Option<String>,
    },

    /// Train a model
    Train {
        /// Model name, e.g. "Course Similarity"
        #[arg(long)]
        model: String,
    },

    /// Predict recommendations for existing users
    Predict {
        /// Model name, e.g. "Course Similarity"
        #[arg(long)]
        model: String,

        /// User IDs to predict for
        #[arg(long = "user-id", required = true, num_args = 1..)]
        user_ids: Vec<UserId>,

        /// Minimum similarity in percent (0 - 100)
        #[arg(long, value_parser = parse_percent)]
        sim_threshold: Option<f64>,

        /// Maximum recommendations per user
        #[arg(long)]
        top_courses: Option<usize>,

        /// Extra parameters as a JSON object; flags take precedence
        #[arg(long)]
        params: Option<String>,

        /// Print the result table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register completed courses as a new user and recommend new courses
    Recommend {
        /// Completed course IDs
        #[arg(long = "course", required = true, num_args = 1..)]
        courses: Vec<String>,

        /// Model name
        #[arg(long, default_value = "Course Similarity")]
        model: String,

        /// Minimum similarity in percent (0 - 100)
        #[arg(long, default_value = "60", value_parser = parse_percent)]
        sim_threshold: f64,

        /// Number of courses to show (1 - 100)
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u8).range(1..=100))]
        top_courses: u8,

        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = Arc::new(CsvDatasetStore::new(DataPaths::new(&cli.data_dir)));
    let dispatcher = RecommendationDispatcher::new(store);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Models => handle_models(),
        Commands::Courses { search } => handle_courses(&dispatcher, search.as_deref())?,
        Commands::Train { model } => handle_train(&dispatcher, &model),
        Commands::Predict {
            model,
            user_ids,
            sim_threshold,
            top_courses,
            params,
            json,
        } => {
            let mut predict_params = match params {
                Some(raw) => PredictParams::from_json(&raw)?,
                None => PredictParams::default(),
            };
            if let Some(percent) = sim_threshold {
                predict_params = predict_params.with_sim_threshold(percent);
            }
            if let Some(limit) = top_courses {
                predict_params = predict_params.with_top_courses(limit);
            }
            handle_predict(&dispatcher, &model, &user_ids, &predict_params, json)?
        }
        Commands::Recommend {
            courses,
            model,
            sim_threshold,
            top_courses,
            json,
        } => {
            let params = PredictParams::default()
                .with_sim_threshold(sim_threshold)
                .with_top_courses(top_courses as usize);
            handle_recommend(&dispatcher, &model, &courses, &params, json)?
        }
    }

    Ok(())
}

/// Handle the 'models' command
fn handle_models() {
    println!("{}", "Recommender models:".bold().blue());
    for model in RecommenderModel::ALL {
        if model.is_implemented() {
            println!("  {} {}", "•".green(), model);
        } else {
            println!("  {} {} {}", "•".dimmed(), model, "(not implemented)".dimmed());
        }
    }
}

/// Handle the 'courses' command
fn handle_courses(dispatcher: &RecommendationDispatcher, search: Option<&str>) -> Result<()> {
    let courses = dispatcher
        .store()
        .load_courses()
        .context("Failed to load course catalogue")?;

    let needle = search.map(str::to_lowercase);
    let matches: Vec<_> = courses
        .iter()
        .filter(|course| match &needle {
            Some(needle) => course.title.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    println!("{}", format!("{} courses:", matches.len()).bold().blue());
    for course in matches {
        println!("{}: {}", course.course_id.green(), course.title);
    }
    Ok(())
}

/// Handle the 'train' command
fn handle_train(dispatcher: &RecommendationDispatcher, model: &str) {
    match dispatcher.train(model) {
        TrainStatus::Trained => println!("{} {} is ready", "✓".green(), model),
        TrainStatus::NotImplemented => {
            println!("{} {} is not implemented yet", "!".yellow(), model)
        }
    }
}

/// Handle the 'predict' command
fn handle_predict(
    dispatcher: &RecommendationDispatcher,
    model: &str,
    user_ids: &[UserId],
    params: &PredictParams,
    json: bool,
) -> Result<()> {
    debug!(
        "Predicting with '{}' for {} users: {:?}",
        model,
        user_ids.len(),
        params
    );
    let start = Instant::now();
    let table = dispatcher.predict(model, user_ids, params)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_table(&table);
        println!("{} {} rows in {:?}", "✓".green(), table.len(), start.elapsed());
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    dispatcher: &RecommendationDispatcher,
    model: &str,
    courses: &[String],
    params: &PredictParams,
    json: bool,
) -> Result<()> {
    debug!("Recommending with '{}' for {:?}: {:?}", model, courses, params);
    let recommendations = dispatcher.recommend_for_selection(model, courses, params)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(&recommendations);
    }
    Ok(())
}

fn print_table(table: &PredictionTable) {
    println!("{:>8}  {:<16}  {}", "USER_ID".bold(), "COURSE_ID".bold(), "SCORE".bold());
    for row in table.rows() {
        println!("{:>8}  {:<16}  {:.3}", row.user_id, row.course_id, row.score);
    }
}

fn print_recommendations(recommendations: &[CourseRecommendation]) {
    if recommendations.is_empty() {
        println!("{}", "No recommendations found".yellow());
        return;
    }

    println!("{}", "Recommended Courses:".bold().blue());
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {:.2}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.course_id,
            rec.score
        );
    }
}

fn parse_percent(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0 - 100", value))
    }
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
    fn test_parse_percent() {
        assert_eq!(parse_percent("60"), Ok(60.0));
        assert_eq!(parse_percent("0"), Ok(0.0));
        assert!(parse_percent("100.5").is_err());
        assert!(parse_percent("high").is_err());
    }

    #[test]
    fn test_predict_with_unimplemented_model_needs_no_data() {
        let store = Arc::new(CsvDatasetStore::new(DataPaths::new("/nonexistent/course-recs")));
        let dispatcher = RecommendationDispatcher::new(store);
        let params = PredictParams::default().with_top_courses(5);

        assert!(handle_predict(&dispatcher, "KNN", &[1, 2], &params, true).is_ok());
    }

    #[test]
    fn test_recommend_defaults() {
        let cli = Cli::parse_from(["course-recs", "recommend", "--course", "PY101", "DS201"]);
        match cli.command {
            Commands::Recommend { courses, model, sim_threshold, top_courses, json } => {
                assert_eq!(courses, vec!["PY101", "DS201"]);
                assert_eq!(model, "Course Similarity");
                assert_eq!(sim_threshold, 60.0);
                assert_eq!(top_courses, 10);
                assert!(!json);
            }
            _ => panic!("expected recommend"),
        }
    }
}
