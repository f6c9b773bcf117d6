use chrono::{Local, TimeZone};
use filecat_cli::commands::{self, ExportRequest};
use filecat_core::config::AppConfig;
use filecat_core::{Category, ExportKind};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

fn write_file(path: &Path, day: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"contents").unwrap();
    let when = Local.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::from(when)).unwrap();
}

fn project_dir() -> tempfile::TempDir {
    let temp = tempfile::tempdir().unwrap();
    write_file(&temp.path().join("contract.pdf"), 1);
    write_file(&temp.path().join("drawings/elevation.dwg"), 2);
    write_file(&temp.path().join("drawings/plan.dwg"), 3);
    temp
}

#[tokio::test]
async fn list_reports_every_file_with_client_paths() {
    let temp = project_dir();
    let base = temp.path().to_string_lossy().to_string();
    let listing = commands::list(&AppConfig::default(), &base).await.unwrap();

    let names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["contract.pdf", "elevation.dwg", "plan.dwg"]);
    assert_eq!(listing.files[1].modified, "2024-03-02");
    assert!(listing.files.iter().all(|f| f.relative_path.starts_with(&base)));
}

#[tokio::test]
async fn list_of_missing_directory_fails() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("gone").to_string_lossy().to_string();
    let err = commands::list(&AppConfig::default(), &missing).await.unwrap_err();
    assert!(
        err.to_string().starts_with("Invalid or inaccessible local path"),
        "{err}"
    );
}

#[tokio::test]
async fn export_writes_selected_documents() {
    let temp = project_dir();
    let out = tempfile::tempdir().unwrap();
    let request = ExportRequest {
        path: temp.path().to_string_lossy().to_string(),
        assignments: vec![
            ("plan.dwg".to_string(), Category::Architectural),
            ("elevation.dwg".to_string(), Category::Architectural),
        ],
        formats: vec![ExportKind::Excel, ExportKind::Word],
        out_dir: out.path().to_path_buf(),
    };

    let summary = commands::export(&AppConfig::default(), request).await.unwrap();
    assert_eq!(summary.files, 3);
    assert!(summary.failures.is_empty());
    let written: Vec<_> = summary.written.iter().map(|w| w.kind).collect();
    assert_eq!(written, vec![ExportKind::Excel, ExportKind::Word]);
    assert!(!out.path().join("output.pdf").exists());

    let bytes = fs::read(out.path().join("output.xlsx")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut sheet = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut sheet)
        .unwrap();
    let contractual = sheet.find(">CONTRACTUAL<").unwrap();
    let architectural = sheet.find(">ARCHITECTURAL<").unwrap();
    assert!(contractual < architectural);
    assert!(sheet.find(">contract.pdf<").unwrap() < architectural);
    assert!(sheet.find(">elevation.dwg<").unwrap() > architectural);
    assert!(!sheet.contains(">OTHER<"));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["written"][0]["mime"], "application/vnd.ms-excel");
}

#[tokio::test]
async fn export_uses_configured_formats_and_default_category() {
    let temp = project_dir();
    let out = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.export.formats = vec![ExportKind::Pdf];
    config.export.default_category = Category::Other;

    let request = ExportRequest {
        path: temp.path().to_string_lossy().to_string(),
        assignments: Vec::new(),
        formats: Vec::new(),
        out_dir: out.path().to_path_buf(),
    };
    let summary = commands::export(&config, request).await.unwrap();
    assert_eq!(summary.written.len(), 1);
    let pdf = fs::read(out.path().join("output.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn export_rejects_unknown_names_and_missing_formats() {
    let temp = project_dir();
    let out = tempfile::tempdir().unwrap();
    let base = temp.path().to_string_lossy().to_string();

    let unknown = ExportRequest {
        path: base.clone(),
        assignments: vec![("nope.txt".to_string(), Category::Safety)],
        formats: vec![ExportKind::Excel],
        out_dir: out.path().to_path_buf(),
    };
    let err = commands::export(&AppConfig::default(), unknown).await.unwrap_err();
    assert!(format!("{err:#}").contains("nope.txt"), "{err:#}");

    let no_formats = ExportRequest {
        path: base,
        assignments: Vec::new(),
        formats: Vec::new(),
        out_dir: out.path().to_path_buf(),
    };
    let err = commands::export(&AppConfig::default(), no_formats).await.unwrap_err();
    assert!(err.to_string().contains("no export format selected"), "{err}");
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
