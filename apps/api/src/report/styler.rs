//! Spreadsheet Styler: renders a `ReportArtifact` as a styled `.xlsx` workbook.
//!
//! Each worksheet gets a title row above the header, low scores in column B are
//! flagged, and every column is sized to its longest value. `plan_sheet` computes
//! those directives; `style` writes them.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use thiserror::Error;
use tracing::debug;

use crate::report::builder::{Cell, ReportArtifact, Sheet};

const TITLE_FILL: u32 = 0x366092;
const TITLE_FONT_SIZE: f64 = 16.0;
const LOW_SCORE_FILL: u32 = 0xFF6B6B;
/// Scores strictly below this are highlighted.
const LOW_SCORE_THRESHOLD: i64 = 5;
/// Zero-based column holding the numeric score on every sheet.
const SCORE_COLUMN: u16 = 1;
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;
const MAX_COLUMN_WIDTH: usize = 50;
/// Longest text a worksheet cell accepts.
const MAX_CELL_CHARS: usize = 32_767;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("spreadsheet writer failed: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("report has no sheets to write")]
    NoSheets,
}

/// `text` cut to the first `MAX_CELL_CHARS` characters.
fn cell_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// Styling directives for one worksheet. Coordinates are zero-based in the
/// final sheet (row 0 is the title, row 1 the header).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub title: String,
    /// Title is merged across `0..=last_column`.
    pub last_column: u16,
    pub highlighted: Vec<(u32, u16)>,
    /// Character-unit widths, one per column.
    pub column_widths: Vec<f64>,
}

pub fn plan_sheet(sheet: &Sheet) -> SheetLayout {
    let column_count = sheet.columns.len().max(1);

    let highlighted = sheet
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| match row.get(usize::from(SCORE_COLUMN)) {
            Some(Cell::Int(score)) if *score < LOW_SCORE_THRESHOLD => {
                Some((FIRST_DATA_ROW + i as u32, SCORE_COLUMN))
            }
            _ => None,
        })
        .collect();

    let column_widths = (0..column_count)
        .map(|col| {
            let title_len = if col == 0 {
                sheet.name.chars().count()
            } else {
                0
            };
            let header_len = sheet.columns.get(col).map_or(0, |h| h.chars().count());
            let cells_len = sheet
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| match cell {
                    Cell::Text(s) => cell_text(s).chars().count(),
                    other => other.render().chars().count(),
                })
                .max()
                .unwrap_or(0);
            let longest = title_len.max(header_len).max(cells_len);
            (longest + 2).min(MAX_COLUMN_WIDTH) as f64
        })
        .collect();

    SheetLayout {
        title: sheet.name.clone(),
        last_column: (column_count - 1) as u16,
        highlighted,
        column_widths,
    }
}

/// Writes every sheet, in build order, into one in-memory workbook.
/// Text longer than a cell can hold is truncated.
pub fn style(artifact: &ReportArtifact) -> Result<Vec<u8>, StyleError> {
    if artifact.sheets.is_empty() {
        return Err(StyleError::NoSheets);
    }
    let mut workbook = Workbook::new();

    let title_format = Format::new()
        .set_bold()
        .set_font_size(TITLE_FONT_SIZE)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(TITLE_FILL));
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let low_score_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(LOW_SCORE_FILL));

    for sheet in &artifact.sheets {
        let layout = plan_sheet(sheet);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        if layout.last_column > 0 {
            worksheet.merge_range(0, 0, 0, layout.last_column, &layout.title, &title_format)?;
        } else {
            worksheet.write_string_with_format(0, 0, &layout.title, &title_format)?;
        }

        for (col, header) in sheet.columns.iter().enumerate() {
            worksheet.write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let row_index = FIRST_DATA_ROW + i as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                let flagged = layout.highlighted.contains(&(row_index, col));
                match cell {
                    Cell::Int(n) if flagged => {
                        worksheet.write_number_with_format(
                            row_index,
                            col,
                            *n as f64,
                            &low_score_format,
                        )?;
                    }
                    Cell::Int(n) => {
                        worksheet.write_number(row_index, col, *n as f64)?;
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(row_index, col, cell_text(s))?;
                    }
                    Cell::Blank => {}
                }
            }
        }

        for (col, width) in layout.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
    }

    debug!(
        "Styled {} sheets for candidate '{}'",
        artifact.sheets.len(),
        artifact.candidate_name
    );
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    fn score_sheet(scores: &[i64]) -> Sheet {
        Sheet {
            name: "Resume Evaluation Matrix".to_string(),
            columns: vec!["Kriteria", "Skor (1-10)", "Catatan"],
            rows: scores
                .iter()
                .map(|s| vec![Cell::text("Clarity"), Cell::Int(*s), Cell::text("catatan")])
                .collect(),
        }
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    /// The opening `<c ...>` tag of a cell in sheet XML.
    fn cell_tag<'a>(sheet_xml: &'a str, reference: &str) -> &'a str {
        let start = sheet_xml.find(&format!("<c r=\"{reference}\"")).unwrap();
        let end = start + sheet_xml[start..].find('>').unwrap();
        &sheet_xml[start..=end]
    }

    /// The `s` (style index) attribute of a cell tag, if any.
    fn style_index(tag: &str) -> Option<&str> {
        let start = tag.find(" s=\"")? + 4;
        let len = tag[start..].find('"')?;
        Some(&tag[start..start + len])
    }

    #[test]
    fn test_score_four_is_highlighted_five_is_not() {
        let layout = plan_sheet(&score_sheet(&[4, 5, 9, 0]));
        assert_eq!(layout.highlighted, vec![(2, 1), (5, 1)]);
    }

    #[test]
    fn test_text_in_score_column_is_never_highlighted() {
        let sheet = Sheet {
            name: "Job Requirements".to_string(),
            columns: vec!["Section", "Details"],
            rows: vec![vec![Cell::text("Basic Info"), Cell::text("3")]],
        };
        assert!(plan_sheet(&sheet).highlighted.is_empty());
    }

    #[test]
    fn test_low_total_row_is_highlighted_too() {
        let mut sheet = score_sheet(&[1]);
        sheet
            .rows
            .push(vec![Cell::text("TOTAL SCORE"), Cell::Int(1), Cell::text("PG")]);
        sheet
            .rows
            .push(vec![Cell::Blank, Cell::Blank, Cell::text("PG")]);
        assert_eq!(plan_sheet(&sheet).highlighted, vec![(2, 1), (3, 1)]);
    }

    #[test]
    fn test_column_widths_count_title_header_and_cells() {
        let layout = plan_sheet(&score_sheet(&[7]));
        // "Resume Evaluation Matrix" is the longest value in column A.
        assert_eq!(layout.column_widths[0], 26.0);
        // "Skor (1-10)" header beats the single-digit score.
        assert_eq!(layout.column_widths[1], 13.0);
        assert_eq!(layout.column_widths[2], 9.0);
        assert_eq!(layout.last_column, 2);
    }

    #[test]
    fn test_column_width_is_capped() {
        let sheet = Sheet {
            name: "Job Requirements".to_string(),
            columns: vec!["Section", "Details"],
            rows: vec![vec![Cell::text("Responsibility 1"), Cell::text("x".repeat(120))]],
        };
        assert_eq!(plan_sheet(&sheet).column_widths[1], 50.0);
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let sheet = Sheet {
            name: "S".to_string(),
            columns: vec!["A"],
            rows: vec![vec![Cell::text("éééé")]],
        };
        let layout = plan_sheet(&sheet);
        assert_eq!(layout.column_widths, vec![6.0]);
        assert_eq!(layout.last_column, 0);
    }

    #[test]
    fn test_style_writes_sheets_in_order() {
        let artifact = ReportArtifact {
            candidate_name: "Budi".to_string(),
            sheets: vec![
                score_sheet(&[4, 8]),
                Sheet {
                    name: "Job Requirements".to_string(),
                    columns: vec!["Section", "Details"],
                    rows: vec![vec![Cell::text("Basic Info"), Cell::text("Title: QA")]],
                },
            ],
        };
        let bytes = style(&artifact).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let workbook = read_entry(&bytes, "xl/workbook.xml");
        let first = workbook.find("Resume Evaluation Matrix").unwrap();
        let second = workbook.find("Job Requirements").unwrap();
        assert!(first < second);

        let sheet1 = read_entry(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet1.contains("<mergeCell ref=\"A1:C1\""));
        assert!(sheet1.contains("<cols>"));
        assert!(sheet1.contains("customWidth=\"1\""));

        // Score 4 in B3 carries the highlight format; score 8 in B4 is plain.
        let title = style_index(cell_tag(&sheet1, "A1")).unwrap();
        let header = style_index(cell_tag(&sheet1, "B2")).unwrap();
        let low = style_index(cell_tag(&sheet1, "B3")).unwrap();
        assert_ne!(low, title);
        assert_ne!(low, header);
        assert_eq!(style_index(cell_tag(&sheet1, "B4")), None);

        let styles = read_entry(&bytes, "xl/styles.xml");
        assert!(styles.contains("FF366092"));
        assert!(styles.contains("FFFF6B6B"));
    }

    #[test]
    fn test_overlong_text_is_truncated_not_rejected() {
        let artifact = ReportArtifact {
            candidate_name: "Budi".to_string(),
            sheets: vec![Sheet {
                name: "Job Requirements".to_string(),
                columns: vec!["Section", "Details"],
                rows: vec![vec![Cell::text("Description"), Cell::text("x".repeat(40_000))]],
            }],
        };
        let bytes = style(&artifact).unwrap();

        let strings = read_entry(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains(&"x".repeat(MAX_CELL_CHARS)));
        assert!(!strings.contains(&"x".repeat(MAX_CELL_CHARS + 1)));
        assert_eq!(plan_sheet(&artifact.sheets[0]).column_widths[1], 50.0);
    }

    #[test]
    fn test_cell_text_cuts_on_char_boundary() {
        let long = "é".repeat(MAX_CELL_CHARS + 10);
        assert_eq!(cell_text(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(cell_text("pendek"), "pendek");
    }

    #[test]
    fn test_artifact_without_sheets_is_rejected() {
        let artifact = ReportArtifact {
            candidate_name: "Budi".to_string(),
            sheets: vec![],
        };
        assert!(matches!(style(&artifact), Err(StyleError::NoSheets)));
    }

    #[test]
    fn test_single_column_sheet_is_not_merged() {
        let artifact = ReportArtifact {
            candidate_name: String::new(),
            sheets: vec![Sheet {
                name: "Notes".to_string(),
                columns: vec!["Only"],
                rows: vec![],
            }],
        };
        let bytes = style(&artifact).unwrap();
        let sheet1 = read_entry(&bytes, "xl/worksheets/sheet1.xml");
        assert!(!sheet1.contains("mergeCell"));
    }
}
