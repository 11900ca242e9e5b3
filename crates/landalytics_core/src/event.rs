use std::collections::BTreeMap;

use crate::Narrative;

/// Metric name mapped to its 0-100 score, exactly as the service sent it.
///
/// Names and ranges are not validated here; out-of-range or unknown metrics
/// are a presentation concern.
pub type ScoreMap = BTreeMap<String, i64>;

/// One classified NDJSON message from the analysis stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Scored metrics for the audited page.
    Metrics { scores: ScoreMap },
    /// AI-generated narrative: SWOT matrix, roadmap, final verdict.
    Narrative(Narrative),
    /// Explicit error reported by the analysis service.
    ServiceError { message: String },
}
