use thiserror::Error;

use crate::columns::MappingReport;

#[derive(Error, Debug)]
pub enum ExoscoreError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("CSV file is empty")]
    EmptyCatalog,

    #[error("Missing required columns: {}", .0.missing_required.join(", "))]
    MissingRequiredColumns(Box<MappingReport>),

    #[error("Field `{field}` is not numeric: `{value}`")]
    NonNumericField { field: String, value: String },

    #[error("No valid targets could be processed. Errors: {0}")]
    NoValidTargets(String),

    #[error("Prediction model not available: {0}")]
    ModelUnavailable(String),

    #[error("Model prediction returned no value for target `{0}`")]
    EmptyPrediction(String),

    #[error("Feature matrix has {got} columns, scaler expects {expected}")]
    FeatureDimensionMismatch { expected: usize, got: usize },

    #[error("Job not found: {0}")]
    JobNotFound(u64),
}

impl PartialEq for ExoscoreError {
    fn eq(&self, other: &Self) -> bool {
        use ExoscoreError::*;
        match (self, other) {
            // Non-comparable payloads: equal if same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (MissingRequiredColumns(a), MissingRequiredColumns(b)) => {
                a.missing_required == b.missing_required
            }

            (EmptyCatalog, EmptyCatalog) => true,
            (
                NonNumericField { field: f1, value: v1 },
                NonNumericField { field: f2, value: v2 },
            ) => f1 == f2 && v1 == v2,
            (NoValidTargets(a), NoValidTargets(b)) => a == b,
            (ModelUnavailable(a), ModelUnavailable(b)) => a == b,
            (EmptyPrediction(a), EmptyPrediction(b)) => a == b,
            (
                FeatureDimensionMismatch { expected: e1, got: g1 },
                FeatureDimensionMismatch { expected: e2, got: g2 },
            ) => e1 == e2 && g1 == g2,
            (JobNotFound(a), JobNotFound(b)) => a == b,

            _ => false,
        }
    }
}
