//! Score Aggregator: totals, PG Score percentages and qualitative bands.
//!
//! Evaluation matrix and readiness index score "higher is better" against a fixed
//! maximum. Skill gaps are inverted: the average gap (0–5) is turned into a
//! percentage where a smaller gap scores higher.

use std::num::NonZeroU32;

/// 8 criteria × 10 points.
pub const EVALUATION_MATRIX_MAX: NonZeroU32 = nonzero(80);
/// 5 aspects × 10 points.
pub const READINESS_INDEX_MAX: NonZeroU32 = nonzero(50);
/// Worst possible gap for a single skill.
const MAX_SKILL_GAP: f64 = 5.0;

const fn nonzero(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(n) => n,
        None => panic!("score maximum must be non-zero"),
    }
}

/// Which band table describes a percentage. Cut points are ascending, compared
/// with strict `<`; anything at or above the last cut point lands in the top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandTable {
    EvaluationMatrix,
    ReadinessIndex,
    SkillGap,
}

impl BandTable {
    fn table(self) -> (&'static [f64; 3], &'static [&'static str; 4]) {
        match self {
            BandTable::EvaluationMatrix => (
                &[50.0, 65.0, 80.0],
                &[
                    "Resume perlu revisi besar-besaran, perhatikan semua aspek",
                    "Sudah lumayan, namun perlu beberapa perbaikan",
                    "Resume berkualitas baik",
                    "Resume sangat profesional dan menarik",
                ],
            ),
            BandTable::ReadinessIndex => (
                &[40.0, 60.0, 80.0],
                &[
                    "Perlu persiapan signifikan di semua aspek",
                    "Perlu persiapan lebih di kesesuaian skill dan pengalaman",
                    "Cukup siap, perlu perbaikan minor",
                    "Sangat siap untuk posisi yang dilamar",
                ],
            ),
            BandTable::SkillGap => (
                &[40.0, 60.0, 80.0],
                &[
                    "Banyak skill yang belum dimiliki, perlu training signifikan",
                    "Beberapa skill perlu ditingkatkan",
                    "Skill sudah cukup baik, perlu sedikit improvement",
                    "Skill sangat sesuai dengan requirements",
                ],
            ),
        }
    }

    pub fn note_for(self, percentage: f64) -> &'static str {
        let (cuts, notes) = self.table();
        cuts.iter()
            .position(|cut| percentage < *cut)
            .map_or(notes[3], |band| notes[band])
    }
}

/// Aggregate of a "higher is better" section.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub total: i64,
    /// Unclamped: out-of-range scores can push it below 0 or above 100.
    pub percentage: f64,
    pub band_note: &'static str,
}

/// Aggregate of the skill-gap section.
#[derive(Debug, Clone, PartialEq)]
pub struct GapSummary {
    pub total_gap: i64,
    pub average_gap: f64,
    /// Clamped at 0, higher is better.
    pub percentage: f64,
    pub band_note: &'static str,
}

/// Sums scores and expresses the total as a percentage of `max_possible`.
pub fn aggregate(scores: &[i64], max_possible: NonZeroU32, bands: BandTable) -> ScoreSummary {
    let total = sum(scores);
    let percentage = (total as f64 / f64::from(max_possible.get())) * 100.0;
    ScoreSummary {
        total,
        percentage,
        band_note: bands.note_for(percentage),
    }
}

/// Inverted gap aggregation. `None` when there is nothing to average.
pub fn aggregate_gaps(gaps: &[i64]) -> Option<GapSummary> {
    if gaps.is_empty() {
        return None;
    }
    let total_gap = sum(gaps);
    let average_gap = total_gap as f64 / gaps.len() as f64;
    let percentage = (100.0 - (average_gap / MAX_SKILL_GAP) * 100.0).max(0.0);
    Some(GapSummary {
        total_gap,
        average_gap,
        percentage,
        band_note: BandTable::SkillGap.note_for(percentage),
    })
}

fn sum(scores: &[i64]) -> i64 {
    scores.iter().fold(0_i64, |acc, s| acc.saturating_add(*s))
}
