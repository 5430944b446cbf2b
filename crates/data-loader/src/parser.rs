//! Parser and writer for the course CSV files.
//!
//! All four files are comma-separated with a header row:
//! - ratings.csv: user,item,rating
//! - sim.csv: square numeric matrix (header row holds column labels)
//! - course_processed.csv: COURSE_ID,TITLE,DESCRIPTION,...feature columns
//! - courses_bows.csv: doc_index,doc_id,...weight columns
//!
//! Each format has a reader-based function (used by tests and in-memory
//! callers) and a path-based wrapper that maps a missing file to
//! [`DataLoadError::FileNotFound`].

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

const RATING_HEADERS: [&str; 3] = ["user", "item", "rating"];

/// Open a data file, distinguishing "not there" from other I/O failures
fn open_data_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn csv_error(file: &str, source: csv::Error) -> DataLoadError {
    DataLoadError::Csv {
        file: file.to_string(),
        source,
    }
}

// =============================================================================
// ratings.csv
// =============================================================================

/// Read rating records from any CSV source
pub fn read_ratings<R: Read>(reader: R, file: &str) -> Result<Vec<RatingRecord>> {
    let mut rdr = csv_reader(reader);
    let mut ratings = Vec::new();

    for (idx, row) in rdr.deserialize::<RatingRecord>().enumerate() {
        // Header occupies line 1
        let line_no = idx + 2;
        let rating = row.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;
        ratings.push(rating);
    }

    Ok(ratings)
}

/// Parse the ratings.csv file
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = open_data_file(path)?;
    read_ratings(file, &file_label(path))
}

/// Write the full rating table, header included even when empty
pub fn write_ratings<W: Write>(writer: W, file: &str, ratings: &[RatingRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(RATING_HEADERS)
        .map_err(|e| csv_error(file, e))?;
    for rating in ratings {
        wtr.serialize(rating).map_err(|e| csv_error(file, e))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Overwrite ratings.csv with `ratings`
pub fn save_ratings(path: &Path, ratings: &[RatingRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_ratings(file, &file_label(path), ratings)
}

// =============================================================================
// course_processed.csv
// =============================================================================

/// Read course metadata from any CSV source
pub fn read_courses<R: Read>(reader: R, file: &str) -> Result<Vec<Course>> {
    let mut rdr = csv_reader(reader);
    let mut courses = Vec::new();

    for (idx, row) in rdr.deserialize::<Course>().enumerate() {
        let line_no = idx + 2;
        let course = row.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;
        courses.push(course);
    }

    Ok(courses)
}

/// Parse the course_processed.csv file
pub fn parse_courses(path: &Path) -> Result<Vec<Course>> {
    let file = open_data_file(path)?;
    read_courses(file, &file_label(path))
}

// =============================================================================
// courses_bows.csv
// =============================================================================

/// Read bag-of-words rows from any CSV source.
///
/// `doc_index` and `doc_id` are required columns; every other cell that parses
/// as a number becomes a weight. Text columns such as `token` are skipped.
pub fn read_bows<R: Read>(reader: R, file: &str) -> Result<Vec<BowRow>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(file, e))?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataLoadError::MissingColumn {
                file: file.to_string(),
                column: name.to_string(),
            })
    };
    let index_col = column("doc_index")?;
    let id_col = column("doc_id")?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let line_no = idx + 2;
        let record = record.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;

        let doc_index = record
            .get(index_col)
            .ok_or_else(|| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing doc_index".to_string(),
            })?
            .parse::<DocIndex>()
            .map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid doc_index: {}", e),
            })?;

        let doc_id = record
            .get(id_col)
            .ok_or_else(|| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing doc_id".to_string(),
            })?;

        let weights = record
            .iter()
            .enumerate()
            .filter(|(col, _)| *col != index_col && *col != id_col)
            .filter_map(|(_, cell)| cell.parse::<f64>().ok())
            .filter(|weight| weight.is_finite())
            .collect();

        rows.push(BowRow::new(doc_index, doc_id, weights));
    }

    Ok(rows)
}

/// Parse the courses_bows.csv file
pub fn parse_bows(path: &Path) -> Result<Vec<BowRow>> {
    let file = open_data_file(path)?;
    read_bows(file, &file_label(path))
}

// =============================================================================
// sim.csv
// =============================================================================

/// Read the similarity matrix from any CSV source.
///
/// The header row only labels columns and is discarded.
pub fn read_similarity_matrix<R: Read>(reader: R, file: &str) -> Result<SimilarityMatrix> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let line_no = idx + 2;
        let record = record.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;

        let row = record
            .iter()
            .map(|cell| {
                cell.parse::<f64>().map_err(|e| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Invalid similarity '{}': {}", cell, e),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    SimilarityMatrix::from_rows(rows)
}

/// Parse the sim.csv file
pub fn parse_similarity_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let file = open_data_file(path)?;
    read_similarity_matrix(file, &file_label(path))
}
