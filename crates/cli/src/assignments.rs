//! Category assignments supplied on the command line or in a file.

use anyhow::{Context, Result};
use filecat_core::Category;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct AssignmentFile {
    #[serde(default)]
    files: BTreeMap<String, Category>,
}

/// Parses `NAME=CATEGORY`. The name may itself contain `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, Category), String> {
    let (name, category) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=CATEGORY, got `{arg}`"))?;
    if name.is_empty() {
        return Err(format!("missing file name in `{arg}`"));
    }
    let category = category.trim().parse::<Category>().map_err(|e| e.to_string())?;
    Ok((name.to_string(), category))
}

/// Reads a name -> category map: a JSON object for `.json` files, otherwise a
/// TOML document with a `[files]` table.
pub fn load(path: &Path) -> Result<Vec<(String, Category)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading assignments from {}", path.display()))?;
    let files: BTreeMap<String, Category> =
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {} as JSON", path.display()))?
        } else {
            let parsed: AssignmentFile = toml::from_str(&content)
                .with_context(|| format!("parsing {} as TOML", path.display()))?;
            parsed.files
        };
    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_category() {
        assert_eq!(
            parse_assignment("site plan.pdf=architectural").unwrap(),
            ("site plan.pdf".to_string(), Category::Architectural)
        );
        assert_eq!(
            parse_assignment("a=b.txt=SAFETY").unwrap(),
            ("a=b.txt".to_string(), Category::Safety)
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_assignment("no-separator").is_err());
        assert!(parse_assignment("=OTHER").is_err());
        assert!(parse_assignment("a.txt=PLUMBING").is_err());
    }

    #[test]
    fn loads_toml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("assign.toml");
        std::fs::write(&toml_path, "[files]\n\"a.txt\" = \"safety\"\n\"b.txt\" = \"OTHER\"\n").unwrap();
        assert_eq!(
            load(&toml_path).unwrap(),
            vec![
                ("a.txt".to_string(), Category::Safety),
                ("b.txt".to_string(), Category::Other),
            ]
        );

        let json_path = dir.path().join("assign.json");
        std::fs::write(&json_path, r#"{"pump.pdf": "Services"}"#).unwrap();
        assert_eq!(
            load(&json_path).unwrap(),
            vec![("pump.pdf".to_string(), Category::Services)]
        );
    }

    #[test]
    fn unknown_category_in_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assign.toml");
        std::fs::write(&path, "[files]\n\"a.txt\" = \"misc\"\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("misc"), "{err:#}");
    }
}
