//! Structured results of the two analysis calls.
//!
//! Field names on the wire follow the JSON schema given to the model (`kriteria`,
//! `skor`, `catatan`, ...). Deserialization is lenient: the model may drop fields,
//! send numbers as strings or go out of range, and none of that is fatal.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Seniority the job is analysed for. Interpolated into every prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobLevel {
    #[default]
    Entry,
    Middle,
    Senior,
    Internship,
}

impl JobLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            JobLevel::Entry => "entry",
            JobLevel::Middle => "middle",
            JobLevel::Senior => "senior",
            JobLevel::Internship => "internship",
        }
    }
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CV analysis result
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCriterion {
    #[serde(rename = "kriteria", default, deserialize_with = "lenient_string")]
    pub label: String,
    /// Expected 1–10; not enforced.
    #[serde(rename = "skor", default, deserialize_with = "lenient_score")]
    pub score: i64,
    #[serde(rename = "catatan", default, deserialize_with = "lenient_string")]
    pub note: String,
}

/// Whether a required skill shows up in the resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoundInResume {
    Yes,
    No,
    Partial,
    /// Anything else the model wrote, kept verbatim.
    Other(String),
}

impl Default for FoundInResume {
    fn default() -> Self {
        FoundInResume::Other(String::new())
    }
}

impl FoundInResume {
    pub fn as_str(&self) -> &str {
        match self {
            FoundInResume::Yes => "yes",
            FoundInResume::No => "no",
            FoundInResume::Partial => "partial",
            FoundInResume::Other(raw) => raw,
        }
    }
}

impl From<String> for FoundInResume {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" => FoundInResume::Yes,
            "no" => FoundInResume::No,
            "partial" => FoundInResume::Partial,
            _ => FoundInResume::Other(raw),
        }
    }
}

impl Serialize for FoundInResume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FoundInResume {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_string(deserializer).map(FoundInResume::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGapEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub skill_area: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub required_skill: String,
    #[serde(rename = "found_in_resume", default)]
    pub found: FoundInResume,
    /// Expected 0–5, lower is better; not enforced.
    #[serde(rename = "skill_gap", default, deserialize_with = "lenient_score")]
    pub gap_score: i64,
    #[serde(rename = "catatan", default, deserialize_with = "lenient_string")]
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessAspect {
    #[serde(default, deserialize_with = "lenient_string")]
    pub aspect: String,
    /// Expected 1–10; not enforced.
    #[serde(rename = "skor", default, deserialize_with = "lenient_score")]
    pub score: i64,
    #[serde(rename = "catatan", default, deserialize_with = "lenient_string")]
    pub note: String,
}

/// CV-vs-job evaluation. A `None` section was absent from the model output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(
        rename = "resume_evaluation_matrix",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation_matrix: Option<Vec<EvaluationCriterion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_gap_analysis: Option<Vec<SkillGapEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_readiness_index: Option<Vec<ReadinessAspect>>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.evaluation_matrix.is_none()
            && self.skill_gap_analysis.is_none()
            && self.job_readiness_index.is_none()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub salary_range: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(rename = "skill_category", default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub skills: Vec<String>,
}

/// Structured reading of a job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    #[serde(rename = "job_analysis", default, skip_serializing_if = "Option::is_none")]
    pub info: Option<JobInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<SkillGroup>>,
    /// Requirement kind (education, experience, ...) to text, in model order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Map<String, Value>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_string_list"
    )]
    pub responsibilities: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_string_list"
    )]
    pub nice_to_have: Option<Vec<String>>,
}

impl JobAnalysis {
    pub fn is_empty(&self) -> bool {
        self.info.is_none()
            && self.required_skills.is_none()
            && self.requirements.is_none()
            && self.responsibilities.is_none()
            && self.nice_to_have.is_none()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoding
// ────────────────────────────────────────────────────────────────────────────

/// Renders any JSON value as display text: strings verbatim, null as empty,
/// arrays joined with ", ", everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Integer score from whatever the model sent. Non-numeric or missing → 0,
/// fractional → nearest integer, numeric strings are parsed.
pub fn score_from_value(value: &Value) -> i64 {
    let number = match value {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => n.round() as i64,
        _ => 0,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(display_value).unwrap_or_default())
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(score_from_value).unwrap_or(0))
}

fn lenient_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(optional_string_list(deserializer)?.unwrap_or_default())
}

fn optional_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(items.iter().map(display_value).collect()),
        Some(single) => Some(vec![display_value(&single)]),
    })
}
