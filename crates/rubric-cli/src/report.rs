//! Verdict aggregation.
//!
//! Runs every constraint of every test case through the engine and folds
//! the boolean verdicts into benchmark metrics: prompt-level accuracy ("all
//! instructions followed"), instruction-level accuracy, and a per-category
//! breakdown. A misconfigured constraint aborts only its own test case;
//! everything else continues.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use rubric_core::{verify, CheckerArgs};

use crate::dataset::TestCase;

/// Per-constraint verdicts for one prompt/response pair.
#[derive(Debug, Serialize)]
pub struct CaseOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    pub prompt: String,
    pub response: String,
    pub instruction_id_list: Vec<String>,
    pub follow_instruction_list: Vec<bool>,
    pub follow_all_instructions: bool,
}

/// A test case that could not be evaluated, with the reason.
#[derive(Debug, Serialize)]
pub struct SkippedCase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    pub prompt: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub followed: usize,
}

impl CategoryStats {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.followed as f64 / self.total as f64
        }
    }
}

/// The full evaluation report.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    pub evaluated_at: DateTime<Utc>,
    pub prompt_accuracy: f64,
    pub instruction_accuracy: f64,
    pub prompts_evaluated: usize,
    pub instructions_evaluated: usize,
    pub category_stats: BTreeMap<String, CategoryStats>,
    pub skipped: Vec<SkippedCase>,
    pub outcomes: Vec<CaseOutcome>,
}

impl Report {
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("prompts evaluated:      {}", self.prompts_evaluated),
            format!("prompt accuracy:        {:.4}", self.prompt_accuracy),
            format!("instructions evaluated: {}", self.instructions_evaluated),
            format!("instruction accuracy:   {:.4}", self.instruction_accuracy),
        ];
        for (category, stats) in &self.category_stats {
            lines.push(format!(
                "  {:<24} {:.4} ({}/{})",
                category,
                stats.accuracy(),
                stats.followed,
                stats.total
            ));
        }
        if !self.skipped.is_empty() {
            lines.push(format!("skipped test cases:     {}", self.skipped.len()));
        }
        lines.join("\n")
    }
}

fn check_case(case: &TestCase, response: &str) -> Result<Vec<bool>, String> {
    if case.instruction_id_list.len() != case.kwargs.len() {
        return Err(format!(
            "kwargs misaligned: {} ids, {} argument bundles",
            case.instruction_id_list.len(),
            case.kwargs.len()
        ));
    }
    case.instruction_id_list
        .iter()
        .zip(&case.kwargs)
        .map(|(id, kwargs)| {
            let args = CheckerArgs::new(kwargs.clone());
            verify(id, &args, response).map_err(|e| format!("{id}: {e}"))
        })
        .collect()
}

/// Evaluate all test cases against their responses.
pub fn evaluate(
    cases: &[TestCase],
    responses: &HashMap<String, String>,
    model_name: Option<String>,
) -> Report {
    let mut outcomes = Vec::new();
    let mut skipped = Vec::new();
    let mut category_stats: BTreeMap<String, CategoryStats> = BTreeMap::new();

    for case in cases {
        let response = match responses.get(&case.prompt) {
            Some(response) => response,
            None => {
                tracing::warn!(key = ?case.key, "no response for prompt; skipping");
                skipped.push(SkippedCase {
                    key: case.key,
                    prompt: case.prompt.clone(),
                    reason: "no response for prompt".to_string(),
                });
                continue;
            }
        };

        let verdicts = match check_case(case, response) {
            Ok(verdicts) => verdicts,
            Err(reason) => {
                tracing::warn!(key = ?case.key, %reason, "test case misconfigured; skipping");
                skipped.push(SkippedCase {
                    key: case.key,
                    prompt: case.prompt.clone(),
                    reason,
                });
                continue;
            }
        };

        for (id, followed) in case.instruction_id_list.iter().zip(&verdicts) {
            let category = id.split(':').next().unwrap_or(id);
            let stats = category_stats.entry(category.to_string()).or_default();
            stats.total += 1;
            if *followed {
                stats.followed += 1;
            }
        }

        outcomes.push(CaseOutcome {
            key: case.key,
            prompt: case.prompt.clone(),
            response: response.clone(),
            instruction_id_list: case.instruction_id_list.clone(),
            follow_all_instructions: verdicts.iter().all(|v| *v),
            follow_instruction_list: verdicts,
        });
    }

    let prompts_evaluated = outcomes.len();
    let prompts_followed = outcomes.iter().filter(|o| o.follow_all_instructions).count();
    let instructions_evaluated: usize = outcomes
        .iter()
        .map(|o| o.follow_instruction_list.len())
        .sum();
    let instructions_followed: usize = outcomes
        .iter()
        .map(|o| o.follow_instruction_list.iter().filter(|v| **v).count())
        .sum();

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

    Report {
        model_name,
        evaluated_at: Utc::now(),
        prompt_accuracy: ratio(prompts_followed, prompts_evaluated),
        instruction_accuracy: ratio(instructions_followed, instructions_evaluated),
        prompts_evaluated,
        instructions_evaluated,
        category_stats,
        skipped,
        outcomes,
    }
}
