//! Turning a fetched document into a dataset, or into the sample dataset
//! when anything goes wrong. The fetch itself belongs to each front end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DashboardDataset;
use crate::sample::sample_dataset;
use crate::validate::ShapeError;

/// Well-known name of the dashboard document.
pub const DEFAULT_RESOURCE: &str = "dashboard_data.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl LoadError {
    pub const fn reason(&self) -> FallbackReason {
        match self {
            Self::Status { .. } | Self::Transport(_) => FallbackReason::HttpError,
            Self::Parse(_) => FallbackReason::ParseError,
            Self::Shape(_) => FallbackReason::ShapeError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    HttpError,
    ParseError,
    ShapeError,
}

impl FallbackReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HttpError => "http-error",
            Self::ParseError => "parse-error",
            Self::ShapeError => "shape-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataOrigin {
    Remote,
    Fallback { reason: FallbackReason, detail: String },
}

/// What a load produced: always a renderable dataset, plus where it came
/// from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub dataset: DashboardDataset,
    pub origin: DataOrigin,
}

impl LoadOutcome {
    pub const fn remote(dataset: DashboardDataset) -> Self {
        Self {
            dataset,
            origin: DataOrigin::Remote,
        }
    }

    pub fn fallback(error: &LoadError) -> Self {
        Self {
            dataset: sample_dataset(),
            origin: DataOrigin::Fallback {
                reason: error.reason(),
                detail: error.to_string(),
            },
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, DataOrigin::Fallback { .. })
    }

    pub const fn fallback_reason(&self) -> Option<FallbackReason> {
        match &self.origin {
            DataOrigin::Remote => None,
            DataOrigin::Fallback { reason, .. } => Some(*reason),
        }
    }
}

/// Parses and validates a document body.
///
/// Syntax errors are `parse-error`; well-formed JSON of the wrong shape is
/// `shape-error`.
pub fn parse_dataset(body: &[u8]) -> Result<DashboardDataset, LoadError> {
    let document: serde_json::Value = serde_json::from_slice(body)?;
    let dataset: DashboardDataset = serde_json::from_value(document)
        .map_err(|error| ShapeError::Schema(error.to_string()))?;
    dataset.validate()?;
    Ok(dataset)
}

/// Resolves a fetch result into an outcome, substituting the sample
/// dataset on any failure.
pub fn resolve<B: AsRef<[u8]>>(fetched: Result<B, LoadError>) -> LoadOutcome {
    match fetched.and_then(|body| parse_dataset(body.as_ref())) {
        Ok(dataset) => LoadOutcome::remote(dataset),
        Err(error) => LoadOutcome::fallback(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&sample_dataset())
    }

    #[test]
    fn valid_document_is_adopted() -> Result<(), serde_json::Error> {
        let mut dataset = sample_dataset();
        dataset.last_updated = "October 2026".to_string();
        let body = serde_json::to_vec(&dataset)?;

        let outcome = resolve(Ok::<_, LoadError>(body));
        assert_eq!(outcome.origin, DataOrigin::Remote);
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.dataset.last_updated, "October 2026");
        Ok(())
    }

    #[test]
    fn server_error_falls_back_to_sample() {
        let outcome = resolve(Err::<Vec<u8>, _>(LoadError::Status { status: 500 }));
        assert!(outcome.is_fallback());
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::HttpError));
        assert_eq!(outcome.dataset, sample_dataset());
        assert_eq!(outcome.dataset.key_metrics.total_thefts, 4553);
    }

    #[test]
    fn fallback_is_deterministic() {
        let failures = || {
            vec![
                resolve(Err::<Vec<u8>, _>(LoadError::Status { status: 404 })),
                resolve(Err::<Vec<u8>, _>(LoadError::Transport("refused".into()))),
                resolve(Ok::<_, LoadError>(b"{not json".to_vec())),
                resolve(Ok::<_, LoadError>(b"{\"monthlyData\": []}".to_vec())),
            ]
        };

        for outcome in failures() {
            assert!(outcome.is_fallback());
            assert_eq!(outcome.dataset, sample_dataset());
        }
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let outcome = resolve(Ok::<_, LoadError>("<html>oops</html>"));
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::ParseError));
    }

    #[test]
    fn wrong_shape_is_shape_error() -> Result<(), serde_json::Error> {
        let outcome = resolve(Ok::<_, LoadError>(r#"{"monthlyData": "nope"}"#));
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::ShapeError));

        let mut dataset = sample_dataset();
        dataset.day_of_week_data.pop();
        let outcome = resolve(Ok::<_, LoadError>(serde_json::to_vec(&dataset)?));
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::ShapeError));
        Ok(())
    }

    #[test]
    fn fallback_detail_names_the_cause() {
        let outcome = resolve(Err::<Vec<u8>, _>(LoadError::Status { status: 503 }));
        match outcome.origin {
            DataOrigin::Fallback { detail, .. } => assert!(detail.contains("503")),
            DataOrigin::Remote => panic!("expected fallback"),
        }
    }

    #[test]
    fn reason_codes() -> Result<(), serde_json::Error> {
        assert_eq!(FallbackReason::HttpError.as_str(), "http-error");
        assert_eq!(
            serde_json::to_string(&FallbackReason::ParseError)?,
            "\"parse-error\""
        );
        assert!(sample_json()?.starts_with(b"{"));
        Ok(())
    }
}
