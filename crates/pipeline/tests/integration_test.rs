//! Integration tests for the pipeline.
//!
//! These tests verify that the similarity source and the filters work
//! together in a realistic scenario.

use data_loader::{BowRow, DocIndexMap, RatingRecord, SimilarityMatrix};
use pipeline::filters::*;
use pipeline::FilterPipeline;
use sources::{user_context::build_user_context, CourseSimilaritySource, ScoredCourse};
use std::sync::Arc;

fn create_test_setup() -> (CourseSimilaritySource, Vec<RatingRecord>) {
    // Five courses at doc_index 0..4, several token rows each
    let mut rows = Vec::new();
    for (idx, id) in ["PY101", "DS201", "ML301", "DB101", "WEB101"].iter().enumerate() {
        rows.push(BowRow::new(idx, *id, vec![2.0]));
        rows.push(BowRow::new(idx, *id, vec![1.0]));
    }
    let doc_map = DocIndexMap::from_bows(&rows).unwrap();

    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.00, 0.85, 0.65, 0.30, 0.55],
        vec![0.85, 1.00, 0.90, 0.45, 0.20],
        vec![0.65, 0.90, 1.00, 0.25, 0.10],
        vec![0.30, 0.45, 0.25, 1.00, 0.60],
        vec![0.55, 0.20, 0.10, 0.60, 1.00],
    ])
    .unwrap();

    let ratings = vec![
        // User 1 took the Python intro
        RatingRecord::new(1, "PY101", 5.0),
        // User 2 took databases and a retired course
        RatingRecord::new(2, "DB101", 4.0),
        RatingRecord::new(2, "OLD999", 3.0),
    ];

    (
        CourseSimilaritySource::new(Arc::new(doc_map), Arc::new(matrix)),
        ratings,
    )
}

#[test]
fn test_threshold_after_scoring() {
    let (source, ratings) = create_test_setup();
    let context = build_user_context(&ratings, 1);

    let pipeline = FilterPipeline::new().add_filter(SimilarityThresholdFilter::from_percent(60.0));

    let filtered = pipeline.apply(source.get_candidates(&context), &context).unwrap();

    assert_eq!(
        filtered,
        vec![ScoredCourse::new("DS201", 0.85), ScoredCourse::new("ML301", 0.65)]
    );
}

#[test]
fn test_top_courses_after_threshold() {
    let (source, ratings) = create_test_setup();
    let context = build_user_context(&ratings, 1);

    let pipeline = FilterPipeline::new()
        .add_filter(SimilarityThresholdFilter::from_percent(0.0))
        .add_filter(TopCoursesFilter::new(3));

    let filtered = pipeline.apply(source.get_candidates(&context), &context).unwrap();

    let ids: Vec<&str> = filtered.iter().map(|c| c.course_id.as_str()).collect();
    assert_eq!(ids, vec!["DS201", "ML301", "WEB101"]);
}

#[test]
fn test_unknown_history_does_not_break_pipeline() {
    let (source, ratings) = create_test_setup();
    let context = build_user_context(&ratings, 2);

    let pipeline = FilterPipeline::new().add_filter(SimilarityThresholdFilter::default());

    let filtered = pipeline.apply(source.get_candidates(&context), &context).unwrap();

    // Only DB101 contributes; OLD999 is not in the mapping
    assert_eq!(filtered, vec![ScoredCourse::new("WEB101", 0.60)]);
    for candidate in &filtered {
        assert!(!context.is_enrolled(&candidate.course_id));
    }
}

#[test]
fn test_user_without_history_gets_nothing() {
    let (source, ratings) = create_test_setup();
    let context = build_user_context(&ratings, 42);

    let filtered = FilterPipeline::new()
        .add_filter(SimilarityThresholdFilter::from_percent(0.0))
        .apply(source.get_candidates(&context), &context)
        .unwrap();

    assert!(filtered.is_empty());
}
