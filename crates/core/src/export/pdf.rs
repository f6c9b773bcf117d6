//! A4 PDF with the listing laid out as one ruled table that flows across pages.

use super::table::{rows, Row, HEADERS};
use crate::assignments::GroupedFiles;
use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::mem;
use tracing::debug;

// Points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 72;
const COLUMN_WIDTHS: [i64; 2] = [250, 100];
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 12;
const PAD_X: i64 = 6;
const PAD_TOP: i64 = 3;
const PAD_BOTTOM: i64 = 3;
const HEADER_PAD_BOTTOM: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// A row after wrapping, ready to be placed on a page.
struct LaidRow {
    cells: [Vec<String>; 2],
    fonts: [Font; 2],
    pad_bottom: i64,
}

impl LaidRow {
    fn new(first: &str, second: &str, fonts: [Font; 2], pad_bottom: i64) -> Self {
        let cells = [
            wrap(first, (COLUMN_WIDTHS[0] - 2 * PAD_X) * 1000),
            wrap(second, (COLUMN_WIDTHS[1] - 2 * PAD_X) * 1000),
        ];
        Self {
            cells,
            fonts,
            pad_bottom,
        }
    }

    fn height(&self) -> i64 {
        let lines = self.cells.iter().map(Vec::len).max().unwrap_or(1) as i64;
        PAD_TOP + lines * LEADING + self.pad_bottom
    }
}

pub(crate) fn render(grouped: &GroupedFiles) -> Result<Vec<u8>> {
    let mut laid = vec![LaidRow::new(
        HEADERS[0],
        HEADERS[1],
        [Font::Bold, Font::Bold],
        HEADER_PAD_BOTTOM,
    )];
    for row in rows(grouped) {
        laid.push(match row {
            Row::Category(category) => {
                LaidRow::new(category.as_str(), "", [Font::Bold, Font::Regular], PAD_BOTTOM)
            }
            Row::File { name, modified } => {
                LaidRow::new(name, modified, [Font::Regular, Font::Regular], PAD_BOTTOM)
            }
        });
    }

    let pages = paginate(&laid);
    debug!(rows = laid.len(), pages = pages.len(), "laid out pdf table");
    build_document(pages)
}

fn paginate(rows: &[LaidRow]) -> Vec<Vec<Operation>> {
    let left = (PAGE_WIDTH - COLUMN_WIDTHS.iter().sum::<i64>()) / 2;
    let top = PAGE_HEIGHT - MARGIN;

    let mut pages = Vec::new();
    let mut ops = page_prelude();
    let mut y = top;
    for row in rows {
        let height = row.height();
        if y - height < MARGIN && y < top {
            pages.push(mem::replace(&mut ops, page_prelude()));
            y = top;
        }
        draw_row(&mut ops, row, left, y);
        y -= height;
    }
    pages.push(ops);
    pages
}

fn page_prelude() -> Vec<Operation> {
    vec![Operation::new("w", vec![Object::Real(0.5)])]
}

fn draw_row(ops: &mut Vec<Operation>, row: &LaidRow, left: i64, top: i64) {
    let height = row.height();
    let mut x = left;
    for (column, width) in COLUMN_WIDTHS.into_iter().enumerate() {
        ops.push(Operation::new(
            "re",
            vec![x.into(), (top - height).into(), width.into(), height.into()],
        ));
        ops.push(Operation::new("S", vec![]));

        let font = row.fonts[column];
        for (line_no, line) in row.cells[column].iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top - PAD_TOP - FONT_SIZE - line_no as i64 * LEADING;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![font.resource().into(), FONT_SIZE.into()],
            ));
            ops.push(Operation::new(
                "Td",
                vec![(x + PAD_X).into(), baseline.into()],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_text(line))],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
        x += width;
    }
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

/// WinAnsi is close enough to Latin-1 for file names; anything else becomes `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) if b >= 0x20 && !(0x7f..0xa0).contains(&b) => b,
            _ => b'?',
        })
        .collect()
}

/// Helvetica advance widths for printable ASCII, in thousandths of an em.
const HELVETICA_WIDTHS: [i64; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

fn char_width(c: char) -> i64 {
    match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 32],
        _ => 556,
    }
}

fn text_width(text: &str) -> i64 {
    text.chars().map(|c| char_width(c) * FONT_SIZE).sum()
}

/// Greedy wrap to `max_width` (thousandths of a point), preferring to break
/// after a space, dash, underscore or dot; falls back to breaking mid-word.
fn wrap(text: &str, max_width: i64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0;
    let mut last_break: Option<usize> = None;

    for c in text.chars() {
        let advance = char_width(c) * FONT_SIZE;
        if width + advance > max_width && !line.is_empty() {
            if let Some(at) = last_break.filter(|&at| at < line.len()) {
                let rest = line.split_off(at);
                lines.push(line.trim_end().to_string());
                line = rest;
                width = text_width(&line);
            }
            if width + advance > max_width && !line.is_empty() {
                lines.push(mem::take(&mut line).trim_end().to_string());
                width = 0;
            }
            last_break = None;
        }
        line.push(c);
        width += advance;
        if matches!(c, ' ' | '-' | '_' | '.') {
            last_break = Some(line.len());
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME_WIDTH: i64 = (COLUMN_WIDTHS[0] - 2 * PAD_X) * 1000;

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("a.txt", NAME_WIDTH), vec!["a.txt".to_string()]);
        assert_eq!(wrap("", NAME_WIDTH), vec![String::new()]);
    }

    #[test]
    fn long_names_wrap_within_column() {
        let name = "2024_site_survey_structural_assessment_north_wing_revision_C_final_signed.pdf";
        let lines = wrap(name, NAME_WIDTH);
        assert!(lines.len() > 1, "{lines:?}");
        for line in &lines {
            assert!(text_width(line) <= NAME_WIDTH, "{line} is too wide");
        }
        assert_eq!(lines.concat(), name);
    }

    #[test]
    fn unbroken_names_are_split_mid_word() {
        let name = "W".repeat(60);
        let lines = wrap(&name, NAME_WIDTH);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), name);
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(encode_text("café.txt"), b"caf\xe9.txt".to_vec());
        assert_eq!(encode_text("図面.pdf"), b"??.pdf".to_vec());
    }

    #[test]
    fn many_rows_span_several_pages() {
        let mut grouped = GroupedFiles::default();
        for i in 0..120 {
            grouped.push(crate::models::Category::Other, format!("file-{i}.txt"), "2024-01-01");
        }
        let laid: Vec<LaidRow> = rows(&grouped)
            .into_iter()
            .map(|row| match row {
                Row::Category(c) => LaidRow::new(c.as_str(), "", [Font::Bold, Font::Regular], PAD_BOTTOM),
                Row::File { name, modified } => {
                    LaidRow::new(name, modified, [Font::Regular, Font::Regular], PAD_BOTTOM)
                }
            })
            .collect();
        assert!(paginate(&laid).len() >= 2);
    }
}
