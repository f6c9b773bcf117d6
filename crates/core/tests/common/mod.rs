#![allow(dead_code)]

use chrono::{Local, TimeZone};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::time::SystemTime;

/// Writes `path` and stamps it with noon local time on the given day.
pub fn write_file(path: &Path, year: i32, month: u32, day: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"contents").unwrap();
    let when = Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::from(when)).unwrap();
}

/// Text content of a zip part.
pub fn zip_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut out = String::new();
    part.read_to_string(&mut out).unwrap();
    out
}

/// Every text node of an XML document, in document order.
pub fn xml_texts(xml: &str) -> Vec<String> {
    use quick_xml::events::Event;
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut texts = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Text(t) => texts.push(t.unescape().unwrap().into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }
    texts
}
