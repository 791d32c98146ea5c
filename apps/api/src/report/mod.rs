// Report pipeline: aggregate scores, lay out sheets, style and serialise to .xlsx.
// Pure and synchronous; a fresh workbook is produced on every request.

pub mod aggregator;
pub mod builder;
pub mod handlers;
pub mod styler;

use chrono::NaiveDate;

use crate::analysis::models::{AnalysisResult, JobAnalysis};
use crate::report::styler::StyleError;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Builds every sheet the inputs allow and returns the styled workbook bytes.
pub fn build_and_style_report(
    result: &AnalysisResult,
    job: &JobAnalysis,
    candidate_name: &str,
) -> Result<Vec<u8>, StyleError> {
    let artifact = builder::build(result, job, candidate_name);
    styler::style(&artifact)
}

/// `CV_Analysis_Report_<candidate>_<YYYYMMDD>.xlsx`. Letters and digits of
/// any script are kept along with `.`, `-` and `_`; everything else becomes `_`.
pub fn report_file_name(candidate_name: &str, date: NaiveDate) -> String {
    let candidate: String = candidate_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "CV_Analysis_Report_{candidate}_{}.xlsx",
        date.format("%Y%m%d")
    )
}

/// Attachment header value with an ASCII `filename` for old clients and an
/// RFC 5987 `filename*` carrying the exact UTF-8 name.
pub fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}
