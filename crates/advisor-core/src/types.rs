use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Advisor's verdict on whether the proposal should proceed.
///
/// The wire literals are fixed by the response schema; they are surfaced
/// verbatim in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "GO with major revisions")]
    GoWithMajorRevisions,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Go => "GO",
            ProposalStatus::GoWithMajorRevisions => "GO with major revisions",
            ProposalStatus::NoGo => "NO-GO",
        }
    }
}

/// The three-field executive synopsis aimed at the supervising advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorSummary {
    pub status: ProposalStatus,
    /// The single biggest risk that could sink the project.
    pub key_risk: String,
    /// What the advisor should raise with the student next.
    pub discussion_point: String,
}

/// Score and justification for one rubric criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionFeedback {
    /// 1..10, enforced by the model-side response schema.
    pub score: u8,
    pub reason: String,
}

/// Fixed mapping of the five rubric criteria to their feedback.
///
/// All five keys are required and no additional keys are permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoreSet {
    pub problem_clarity_in_context: CriterionFeedback,
    pub measurable_objectives: CriterionFeedback,
    pub scope_and_timeline_feasibility: CriterionFeedback,
    pub methodology_in_practice: CriterionFeedback,
    pub synergy_and_value_for_company: CriterionFeedback,
}

impl ScoreSet {
    /// The criteria in rubric order, paired with their wire keys.
    pub fn entries(&self) -> [(&'static str, &CriterionFeedback); 5] {
        [
            ("problemClarityInContext", &self.problem_clarity_in_context),
            ("measurableObjectives", &self.measurable_objectives),
            (
                "scopeAndTimelineFeasibility",
                &self.scope_and_timeline_feasibility,
            ),
            ("methodologyInPractice", &self.methodology_in_practice),
            ("synergyAndValueForCompany", &self.synergy_and_value_for_company),
        ]
    }
}

/// Text field tolerant of schema violations.
///
/// The response schema declares these as plain strings, but a model that
/// ignores it must not crash the renderers: an object carrying
/// `reason`/`score` degrades into a placeholder embedding those fields,
/// anything else serializes generically. Deserialization never fails on
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlexText(pub String);

impl FlexText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FlexText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FlexText {
    fn from(s: &str) -> Self {
        FlexText(s.to_string())
    }
}

impl<'de> Deserialize<'de> for FlexText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(FlexText(flatten_text(value)))
    }
}

fn flatten_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Object(map) => {
            tracing::warn!("object-shaped text field in model output, substituting placeholder");
            if let (Some(Value::String(reason)), Some(Value::Number(score))) =
                (map.get("reason"), map.get("score"))
            {
                return format!("(ข้อมูลผิดรูปแบบ: {reason} - {score} คะแนน)");
            }
            Value::Object(map).to_string()
        }
        other => other.to_string(),
    }
}

/// The structured critique returned by the model, immutable once received.
///
/// Held in memory for one review session only; never persisted. The total
/// score is deliberately not a field here — it is recomputed from `scores`
/// on every render (see [`crate::score`]) so it cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub advisor_summary: AdvisorSummary,
    pub strengths: Vec<FlexText>,
    pub areas_for_improvement: Vec<FlexText>,
    pub scores: ScoreSet,
    pub summary: FlexText,
    pub red_flags: Vec<FlexText>,
    pub actionable_next_steps: Vec<FlexText>,
    pub probing_questions: Vec<FlexText>,
}
