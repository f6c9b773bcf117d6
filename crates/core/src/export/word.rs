//! WordprocessingML document holding one bordered two-column table.

use super::ooxml::{Package, Xml, XML_DECL};
use super::table::{rows, Row, HEADERS};
use crate::assignments::GroupedFiles;
use anyhow::Result;
use tracing::debug;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

// Twentieths of a point: 3in and 2in.
const NAME_COLUMN_TWIPS: &str = "4320";
const DATE_COLUMN_TWIPS: &str = "2880";
const TABLE_TWIPS: &str = "7200";

// Half-points.
const HEADER_FONT_SIZE: &str = "24";

#[derive(Clone, Copy)]
enum Weight {
    Regular,
    Bold,
    Header,
}

pub(crate) fn render(grouped: &GroupedFiles) -> Result<Vec<u8>> {
    let document = document_xml(grouped)?;

    let mut pkg = Package::new();
    pkg.add("[Content_Types].xml", content_types().as_bytes())?;
    pkg.add("_rels/.rels", root_rels().as_bytes())?;
    pkg.add("word/document.xml", &document)?;
    pkg.finish()
}

fn document_xml(grouped: &GroupedFiles) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.open("w:document", &[("xmlns:w", W_NS)])?;
    xml.open("w:body", &[])?;

    xml.open("w:tbl", &[])?;
    table_properties(&mut xml)?;
    xml.open("w:tblGrid", &[])?;
    xml.empty("w:gridCol", &[("w:w", NAME_COLUMN_TWIPS)])?;
    xml.empty("w:gridCol", &[("w:w", DATE_COLUMN_TWIPS)])?;
    xml.close("w:tblGrid")?;

    table_row(&mut xml, HEADERS[0], HEADERS[1], Weight::Header)?;
    let body = rows(grouped);
    for row in &body {
        match *row {
            Row::Category(category) => table_row(&mut xml, category.as_str(), "", Weight::Bold)?,
            Row::File { name, modified } => table_row(&mut xml, name, modified, Weight::Regular)?,
        }
    }
    xml.close("w:tbl")?;

    // Word expects the body to end in a paragraph, not a table.
    xml.empty("w:p", &[])?;
    xml.open("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", "11906"), ("w:h", "16838")])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.close("w:sectPr")?;

    xml.close("w:body")?;
    xml.close("w:document")?;

    debug!(rows = body.len() + 1, "wrote document table");
    Ok(xml.finish())
}

fn table_properties(xml: &mut Xml) -> Result<()> {
    xml.open("w:tblPr", &[])?;
    xml.empty("w:tblW", &[("w:w", TABLE_TWIPS), ("w:type", "dxa")])?;
    xml.open("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "000000"),
            ],
        )?;
    }
    xml.close("w:tblBorders")?;
    xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
    xml.close("w:tblPr")
}

fn table_row(xml: &mut Xml, first: &str, second: &str, weight: Weight) -> Result<()> {
    xml.open("w:tr", &[])?;
    cell(xml, first, NAME_COLUMN_TWIPS, weight)?;
    // The date column is never emphasised except in the header.
    let second_weight = match weight {
        Weight::Header => Weight::Header,
        _ => Weight::Regular,
    };
    cell(xml, second, DATE_COLUMN_TWIPS, second_weight)?;
    xml.close("w:tr")
}

fn cell(xml: &mut Xml, text: &str, width: &str, weight: Weight) -> Result<()> {
    xml.open("w:tc", &[])?;
    xml.open("w:tcPr", &[])?;
    xml.empty("w:tcW", &[("w:w", width), ("w:type", "dxa")])?;
    xml.empty("w:vAlign", &[("w:val", "top")])?;
    xml.close("w:tcPr")?;

    xml.open("w:p", &[])?;
    if !text.is_empty() {
        xml.open("w:r", &[])?;
        match weight {
            Weight::Regular => {}
            Weight::Bold => {
                xml.open("w:rPr", &[])?;
                xml.empty("w:b", &[])?;
                xml.close("w:rPr")?;
            }
            Weight::Header => {
                xml.open("w:rPr", &[])?;
                xml.empty("w:b", &[])?;
                xml.empty("w:sz", &[("w:val", HEADER_FONT_SIZE)])?;
                xml.close("w:rPr")?;
            }
        }
        xml.text("w:t", &[("xml:space", "preserve")], text)?;
        xml.close("w:r")?;
    }
    xml.close("w:p")?;
    xml.close("w:tc")
}

fn content_types() -> String {
    format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#
    )
}

fn root_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#
    )
}
