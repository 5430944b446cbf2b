//! Example: Score candidate courses for one user
//!
//! Run with: cargo run --package sources --example recommend_for_user -- [DATA_DIR] [USER_ID]
//!
//! This example shows how to:
//! 1. Open the CSV dataset store
//! 2. Load the document mapping and similarity matrix
//! 3. Build the user's enrolled-course context
//! 4. Score and display the top candidates

use data_loader::{CsvDatasetStore, DataPaths, DatasetStore};
use sources::{user_context::build_user_context, CourseSimilaritySource};
use std::collections::HashMap;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| "data".to_string());
    let user_id = match args.next() {
        Some(raw) => raw.parse()?,
        None => 2,
    };

    println!("=== Course Similarity Example ===\n");

    let store = CsvDatasetStore::new(DataPaths::new(&data_dir));

    println!("Loading similarity data from {}...", data_dir);
    let start = Instant::now();
    let source = CourseSimilaritySource::from_store(&store)?;
    println!(
        "Loaded {} courses and a {}x{} matrix in {:?}\n",
        source.doc_map().len(),
        source.sim_matrix().size(),
        source.sim_matrix().size(),
        start.elapsed()
    );

    let ratings = store.load_ratings()?;
    let context = build_user_context(&ratings, user_id);
    println!("User {} has taken {} courses", user_id, context.enrolled_courses.len());

    let titles: HashMap<String, String> = store
        .load_courses()?
        .into_iter()
        .map(|course| (course.course_id, course.title))
        .collect();

    let start = Instant::now();
    let candidates = source.get_candidates(&context);
    println!("Scored {} candidates in {:?}", candidates.len(), start.elapsed());

    println!("\nTop 10 candidates:");
    for (i, candidate) in candidates.iter().take(10).enumerate() {
        let title = titles
            .get(&candidate.course_id)
            .map(String::as_str)
            .unwrap_or("<unknown title>");
        println!(
            "  {}. {} [{}] (Score: {:.3})",
            i + 1,
            title,
            candidate.course_id,
            candidate.score
        );
    }

    Ok(())
}
