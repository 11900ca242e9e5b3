use serde::{Deserialize, Serialize};

/// AI narrative payload of an `ai_narrative` stream message.
///
/// The three sections are independent; a section missing on the wire stays
/// absent rather than being defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swot: Option<SwotMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<Vec<RoadmapStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_verdict: Option<FinalVerdict>,
}

/// The four SWOT quadrants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwotMatrix {
    #[serde(default)]
    pub strengths: Vec<SwotPoint>,
    #[serde(default)]
    pub weaknesses: Vec<SwotPoint>,
    #[serde(default)]
    pub opportunities: Vec<SwotPoint>,
    #[serde(default)]
    pub threats: Vec<SwotPoint>,
}

/// A single SWOT observation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwotPoint {
    #[serde(default)]
    pub point: String,
    /// Supporting detail; the wire name differs per quadrant.
    #[serde(
        default,
        alias = "evidence",
        alias = "fix_suggestion",
        alias = "potential_impact",
        alias = "mitigation_strategy",
        skip_serializing_if = "Option::is_none"
    )]
    pub detail: Option<String>,
}

/// One prioritized recommendation from the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoadmapStep {
    #[serde(default)]
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psych_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_metric: Option<String>,
}

/// Closing assessment of the audited page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalVerdict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_readiness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_most_impactful_change: Option<String>,
}
