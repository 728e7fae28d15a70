//! Benchmark dataset loading.
//!
//! Two JSONL inputs: the test cases (prompt plus its constraint ids and
//! per-constraint keyword arguments, positionally aligned) and the model
//! responses (prompt to response). Responses are joined to test cases by
//! prompt text.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Dataset or response file could not be loaded. Fatal to the run.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed JSON on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// One benchmark test case: a prompt and the constraints embedded in it.
///
/// `kwargs[i]` is the argument bundle for `instruction_id_list[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub key: Option<i64>,
    pub prompt: String,
    pub instruction_id_list: Vec<String>,
    pub kwargs: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ResponseRecord {
    prompt: String,
    response: String,
}

fn parse_lines<T, R>(reader: R) -> Result<Vec<T>, DatasetError>
where
    T: serde::de::DeserializeOwned,
    R: BufRead,
{
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DatasetError::Io {
            path: "<stream>".to_string(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| DatasetError::Parse {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path).map(BufReader::new).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load the test cases from a JSONL file.
pub fn read_test_cases(path: &Path) -> Result<Vec<TestCase>, DatasetError> {
    parse_lines(open(path)?)
}

/// Load model responses from a JSONL file, keyed by prompt.
pub fn read_responses(path: &Path) -> Result<HashMap<String, String>, DatasetError> {
    let records: Vec<ResponseRecord> = parse_lines(open(path)?)?;
    Ok(records
        .into_iter()
        .map(|r| (r.prompt, r.response))
        .collect())
}
