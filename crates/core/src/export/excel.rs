//! SpreadsheetML workbook with a single `Files` sheet.

use super::ooxml::{Package, Xml, XML_DECL};
use super::table::{rows, Row, HEADERS};
use crate::assignments::GroupedFiles;
use anyhow::Result;
use tracing::debug;

const SHEET_NAME: &str = "Files";
const NAME_COLUMN_WIDTH: &str = "50";
const DATE_COLUMN_WIDTH: &str = "20";

// Indices into cellXfs in styles.xml.
const STYLE_DEFAULT: &str = "0";
const STYLE_HEADER: &str = "1";
const STYLE_CATEGORY: &str = "2";
const STYLE_FILE_NAME: &str = "3";

pub(crate) fn render(grouped: &GroupedFiles) -> Result<Vec<u8>> {
    let sheet = sheet_xml(grouped)?;

    let mut pkg = Package::new();
    pkg.add("[Content_Types].xml", content_types().as_bytes())?;
    pkg.add("_rels/.rels", root_rels().as_bytes())?;
    pkg.add("xl/workbook.xml", workbook().as_bytes())?;
    pkg.add("xl/_rels/workbook.xml.rels", workbook_rels().as_bytes())?;
    pkg.add("xl/styles.xml", styles().as_bytes())?;
    pkg.add("xl/worksheets/sheet1.xml", &sheet)?;
    pkg.finish()
}

fn sheet_xml(grouped: &GroupedFiles) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open(
        "worksheet",
        &[
            ("xmlns", "http://schemas.openxmlformats.org/spreadsheetml/2006/main"),
            (
                "xmlns:r",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
            ),
        ],
    )?;

    xml.open("cols", &[])?;
    for (index, width) in [NAME_COLUMN_WIDTH, DATE_COLUMN_WIDTH].into_iter().enumerate() {
        let col = (index + 1).to_string();
        xml.empty(
            "col",
            &[
                ("min", col.as_str()),
                ("max", col.as_str()),
                ("width", width),
                ("customWidth", "1"),
            ],
        )?;
    }
    xml.close("cols")?;

    xml.open("sheetData", &[])?;
    let mut sheet = SheetWriter { xml: &mut xml, row: 0 };
    sheet.row(&[(HEADERS[0], STYLE_HEADER), (HEADERS[1], STYLE_HEADER)])?;
    let body = rows(grouped);
    for row in &body {
        match *row {
            Row::Category(category) => sheet.row(&[(category.as_str(), STYLE_CATEGORY)])?,
            Row::File { name, modified } => {
                sheet.row(&[(name, STYLE_FILE_NAME), (modified, STYLE_DEFAULT)])?
            }
        }
    }
    let written = sheet.row;
    xml.close("sheetData")?;
    xml.close("worksheet")?;

    debug!(rows = written, "wrote worksheet");
    Ok(xml.finish())
}

struct SheetWriter<'a> {
    xml: &'a mut Xml,
    row: usize,
}

impl SheetWriter<'_> {
    /// Writes cells left to right starting at column A, as inline strings.
    fn row(&mut self, cells: &[(&str, &str)]) -> Result<()> {
        self.row += 1;
        let number = self.row.to_string();
        self.xml.open("row", &[("r", number.as_str())])?;
        for (column, &(value, style)) in ["A", "B"].into_iter().zip(cells) {
            let reference = format!("{column}{number}");
            let mut attrs = vec![("r", reference.as_str()), ("t", "inlineStr")];
            if style != STYLE_DEFAULT {
                attrs.push(("s", style));
            }
            self.xml.open("c", &attrs)?;
            self.xml.open("is", &[])?;
            self.xml.text("t", &[("xml:space", "preserve")], value)?;
            self.xml.close("is")?;
            self.xml.close("c")?;
        }
        self.xml.close("row")
    }
}

fn content_types() -> String {
    format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#
    )
}

fn root_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
    )
}

fn workbook() -> String {
    format!(
        r#"{XML_DECL}<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{SHEET_NAME}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
    )
}

fn workbook_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#
    )
}

/// Fonts: 0 regular, 1 bold 12pt, 2 bold. Cell formats: 0 default,
/// 1 header, 2 category, 3 indented file name.
fn styles() -> String {
    format!(
        r#"{XML_DECL}<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="3"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="12"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1" applyAlignment="1"><alignment horizontal="left"/></xf><xf numFmtId="0" fontId="2" fillId="0" borderId="0" xfId="0" applyFont="1" applyAlignment="1"><alignment horizontal="left"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment horizontal="left" indent="1"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#
    )
}
