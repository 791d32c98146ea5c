//! Report Builder: lays analysis results out as tabular sheets.
//!
//! Pure content: no styling, no I/O, never fails. A section missing from the
//! input simply produces no sheet.

use crate::analysis::models::{
    display_value, AnalysisResult, EvaluationCriterion, JobAnalysis, ReadinessAspect,
    SkillGapEntry,
};
use crate::report::aggregator::{
    aggregate, aggregate_gaps, BandTable, EVALUATION_MATRIX_MAX, READINESS_INDEX_MAX,
};

pub const EVALUATION_MATRIX_SHEET: &str = "Resume Evaluation Matrix";
pub const JOB_REQUIREMENTS_SHEET: &str = "Job Requirements";
pub const SKILL_GAP_SHEET: &str = "Skill Gap Analysis";
pub const READINESS_INDEX_SHEET: &str = "Job Readiness Index";

const TOTAL_SCORE_LABEL: &str = "TOTAL SCORE";
const TOTAL_ANALYSIS_LABEL: &str = "TOTAL ANALYSIS";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Blank,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// The cell as it reads in the spreadsheet.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(n) => n.to_string(),
            Cell::Blank => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// Everything needed to render one downloadable report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub candidate_name: String,
    /// In build order; the workbook keeps this order.
    pub sheets: Vec<Sheet>,
}

#[cfg(test)]
impl ReportArtifact {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

pub fn build(result: &AnalysisResult, job: &JobAnalysis, candidate_name: &str) -> ReportArtifact {
    let mut sheets = Vec::new();

    if let Some(items) = &result.evaluation_matrix {
        sheets.push(evaluation_matrix_sheet(items));
    }
    let job_rows = job_requirement_rows(job);
    if !job_rows.is_empty() {
        sheets.push(Sheet {
            name: JOB_REQUIREMENTS_SHEET.to_string(),
            columns: vec!["Section", "Details"],
            rows: job_rows,
        });
    }
    if let Some(entries) = &result.skill_gap_analysis {
        sheets.push(skill_gap_sheet(entries));
    }
    if let Some(aspects) = &result.job_readiness_index {
        sheets.push(readiness_index_sheet(aspects));
    }

    ReportArtifact {
        candidate_name: candidate_name.to_string(),
        sheets,
    }
}

fn evaluation_matrix_sheet(items: &[EvaluationCriterion]) -> Sheet {
    let mut rows: Vec<Vec<Cell>> = items
        .iter()
        .map(|item| {
            vec![
                Cell::text(&item.label),
                Cell::Int(item.score),
                Cell::text(&item.note),
            ]
        })
        .collect();

    if !items.is_empty() {
        let scores: Vec<i64> = items.iter().map(|i| i.score).collect();
        let summary = aggregate(&scores, EVALUATION_MATRIX_MAX, BandTable::EvaluationMatrix);
        rows.extend(score_summary_rows(
            summary.total,
            summary.percentage,
            summary.band_note,
        ));
    }

    Sheet {
        name: EVALUATION_MATRIX_SHEET.to_string(),
        columns: vec!["Kriteria", "Skor (1-10)", "Catatan"],
        rows,
    }
}

fn readiness_index_sheet(aspects: &[ReadinessAspect]) -> Sheet {
    let mut rows: Vec<Vec<Cell>> = aspects
        .iter()
        .map(|aspect| {
            vec![
                Cell::text(&aspect.aspect),
                Cell::Int(aspect.score),
                Cell::text(&aspect.note),
            ]
        })
        .collect();

    if !aspects.is_empty() {
        let scores: Vec<i64> = aspects.iter().map(|a| a.score).collect();
        let summary = aggregate(&scores, READINESS_INDEX_MAX, BandTable::ReadinessIndex);
        rows.extend(score_summary_rows(
            summary.total,
            summary.percentage,
            summary.band_note,
        ));
    }

    Sheet {
        name: READINESS_INDEX_SHEET.to_string(),
        columns: vec!["Aspect", "Score (1-10)", "Catatan"],
        rows,
    }
}

/// TOTAL SCORE row plus the blank-label separator repeating the percentage.
fn score_summary_rows(total: i64, percentage: f64, band_note: &str) -> [Vec<Cell>; 2] {
    [
        vec![
            Cell::text(TOTAL_SCORE_LABEL),
            Cell::Int(total),
            Cell::Text(pg_score_with_note(percentage, band_note)),
        ],
        vec![Cell::Blank, Cell::Blank, Cell::Text(pg_score(percentage))],
    ]
}

fn skill_gap_sheet(entries: &[SkillGapEntry]) -> Sheet {
    let mut rows: Vec<Vec<Cell>> = entries
        .iter()
        .map(|entry| {
            vec![
                Cell::text(&entry.skill_area),
                Cell::text(&entry.required_skill),
                Cell::text(entry.found.as_str()),
                Cell::Int(entry.gap_score),
                Cell::text(&entry.note),
            ]
        })
        .collect();

    let gaps: Vec<i64> = entries.iter().map(|e| e.gap_score).collect();
    if let Some(summary) = aggregate_gaps(&gaps) {
        rows.push(vec![
            Cell::text(TOTAL_ANALYSIS_LABEL),
            Cell::Blank,
            Cell::Blank,
            Cell::Text(format!("Avg: {:.1}", summary.average_gap)),
            Cell::Text(pg_score_with_note(summary.percentage, summary.band_note)),
        ]);
        rows.push(vec![
            Cell::Blank,
            Cell::Blank,
            Cell::Blank,
            Cell::Blank,
            Cell::Text(pg_score(summary.percentage)),
        ]);
    }

    Sheet {
        name: SKILL_GAP_SHEET.to_string(),
        columns: vec![
            "Skill Area",
            "Required Skill",
            "Found in Resume?",
            "Skill Gap (0-5)",
            "Catatan",
        ],
        rows,
    }
}

/// Basic info, then skills, then requirements, then numbered responsibilities.
/// `nice_to_have` is not part of this sheet.
fn job_requirement_rows(job: &JobAnalysis) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    let mut push = |section: String, details: String| {
        rows.push(vec![Cell::Text(section), Cell::Text(details)]);
    };

    if let Some(info) = &job.info {
        for (label, value) in [
            ("Title", &info.title),
            ("Company", &info.company),
            ("Level", &info.level),
            ("Location", &info.location),
            ("Type", &info.job_type),
            ("Salary", &info.salary_range),
        ] {
            push("Basic Info".to_string(), format!("{label}: {value}"));
        }
    }

    for group in job.required_skills.iter().flatten() {
        push(
            format!("Required Skills - {}", group.category),
            group.skills.join(", "),
        );
    }

    for (kind, value) in job.requirements.iter().flatten() {
        push(
            format!("Requirements - {}", title_case(kind)),
            display_value(value),
        );
    }

    for (i, responsibility) in job.responsibilities.iter().flatten().enumerate() {
        push(format!("Responsibility {}", i + 1), responsibility.clone());
    }

    rows
}

fn pg_score(percentage: f64) -> String {
    format!("PG Score: {percentage:.1}%")
}

fn pg_score_with_note(percentage: f64, band_note: &str) -> String {
    format!("PG Score: {percentage:.1}% - {band_note}")
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest,
/// so `work_experience` reads `Work_Experience`.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
