//! Batch processing
//!
//! Loads recipe records and runs each one through expansion and emission.
//! A failing recipe is logged and skipped; the rest of the batch continues.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::emit::Emit;
use crate::error::{LabelError, LabelResult};
use crate::models::Recipe;
use crate::variants::VariantExpander;

/// Parse input text holding one recipe object or a list of them
///
/// Records are kept as raw JSON so that a malformed recipe only fails when
/// it is processed.
pub fn parse_records(text: &str) -> LabelResult<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items),
        record @ Value::Object(_) => Ok(vec![record]),
        _ => Err(LabelError::InvalidInput),
    }
}

/// Read and parse the input file
pub fn load_records(path: &Path) -> LabelResult<Vec<Value>> {
    let text = std::fs::read_to_string(path).map_err(|source| LabelError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&text)
}

/// A recipe that could not be fully processed
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFailure {
    pub recipe: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub recipes: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<RecipeFailure>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.recipes - self.failures.len()
    }
}

/// Name used in progress and error lines for a raw record
fn display_name(record: &Value, index: usize) -> String {
    record
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("recipe #{}", index + 1))
}

fn process_recipe<E: Emit>(
    record: Value,
    expander: &VariantExpander,
    emitter: &E,
    written: &mut Vec<PathBuf>,
) -> LabelResult<usize> {
    let recipe: Recipe = serde_json::from_value(record)?;
    let views = expander.expand(&recipe);

    for view in &views {
        let path = emitter.emit(view)?;
        println!("  ✓ {}", path.display());
        written.push(path);
    }

    Ok(views.len())
}

/// Expand and emit every record
///
/// An error stops the remaining variants of that recipe only.
pub fn run_batch<E: Emit>(
    records: Vec<Value>,
    expander: &VariantExpander,
    emitter: &E,
) -> BatchSummary {
    let mut summary = BatchSummary {
        recipes: records.len(),
        ..Default::default()
    };

    for (index, record) in records.into_iter().enumerate() {
        let name = display_name(&record, index);
        println!("Generating labels for {}", name);

        match process_recipe(record, expander, emitter, &mut summary.written) {
            Ok(count) => info!(recipe = %name, labels = count, "Recipe complete"),
            Err(e) => {
                eprintln!("  ERROR: {}: {}", name, e);
                warn!(recipe = %name, error = %e, "Recipe failed");
                summary.failures.push(RecipeFailure {
                    recipe: name,
                    error: e.to_string(),
                });
            }
        }
    }

    summary
}
