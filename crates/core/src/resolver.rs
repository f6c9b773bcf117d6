//! Turns a user-typed directory into an existing path, translating mapped
//! drive letters into the network share behind them.

use crate::error::InvalidPathError;
use std::collections::BTreeMap;
use std::path::{Path, MAIN_SEPARATOR};
use tracing::debug;

/// Drive letter -> share root. Letters are stored upper-case.
#[derive(Debug, Clone, Default)]
pub struct DriveMappings {
    map: BTreeMap<char, String>,
}

impl DriveMappings {
    /// Accepts keys like `z`, `Z` or `Z:`; other keys and empty targets are ignored.
    pub fn from_config(drives: &BTreeMap<String, String>) -> Self {
        let mut map = BTreeMap::new();
        for (key, target) in drives {
            let key = key.trim().trim_end_matches(':');
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) if letter.is_ascii_alphabetic() && !target.is_empty() => {
                    map.insert(letter.to_ascii_uppercase(), target.clone());
                }
                _ => debug!(key, "ignoring drive mapping"),
            }
        }
        Self { map }
    }

    pub fn with(mut self, letter: char, target: impl Into<String>) -> Self {
        self.map.insert(letter.to_ascii_uppercase(), target.into());
        self
    }

    pub fn target(&self, letter: char) -> Option<&str> {
        self.map.get(&letter.to_ascii_uppercase()).map(String::as_str)
    }
}

pub fn resolve(path: &str, drives: &DriveMappings) -> Result<String, InvalidPathError> {
    let path = normalize(path);

    if let Some((letter, rest)) = split_drive(&path) {
        if let Some(target) = drives.target(letter) {
            let unc = normalize(&format!("{target}{rest}"));
            if !Path::new(&unc).exists() {
                return Err(InvalidPathError::MappedDrive(unc));
            }
            debug!(%path, %unc, "resolved mapped drive");
            return Ok(unc);
        }
    }

    if path.starts_with(r"\\") {
        if !Path::new(&path).exists() {
            return Err(InvalidPathError::Unc(path));
        }
        return Ok(path);
    }

    if !Path::new(&path).exists() {
        return Err(InvalidPathError::Local(path));
    }
    Ok(path)
}

fn split_drive(path: &str) -> Option<(char, &str)> {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some((letter, &path[2..])),
        _ => None,
    }
}

/// Lexical normalization using the platform's separator rules.
pub fn normalize(path: &str) -> String {
    normalize_with(path, MAIN_SEPARATOR == '\\')
}

/// Collapses repeated separators and `.` components, folds `..` where a parent
/// is known and drops trailing separators. Drive and UNC prefixes are kept on
/// Windows; POSIX keeps a leading `//` as-is.
pub(crate) fn normalize_with(path: &str, windows: bool) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let sep = if windows { '\\' } else { '/' };
    let unified = if windows {
        path.replace('/', "\\")
    } else {
        path.to_string()
    };

    let (prefix, rest) = split_prefix(&unified, windows);
    let rooted = rest.starts_with(sep) || prefix.starts_with(r"\\");
    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split(sep) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let mut out = prefix.to_string();
    if rooted && !(prefix.starts_with(r"\\") && parts.is_empty()) {
        out.push(sep);
    }
    out.push_str(&parts.join(&sep.to_string()));
    if out.is_empty() {
        ".".to_string()
    } else {
        out
    }
}

fn split_prefix(path: &str, windows: bool) -> (&str, &str) {
    if windows {
        if let Some(unc) = path.strip_prefix(r"\\") {
            // \\server\share is one indivisible prefix.
            let mut end = 2;
            let mut segments = 0;
            for segment in unc.split('\\') {
                end += segment.len();
                segments += 1;
                if segments == 2 {
                    break;
                }
                end += 1;
            }
            let end = end.min(path.len());
            return (&path[..end], &path[end..]);
        }
        if split_drive(path).is_some() {
            return (&path[..2], &path[2..]);
        }
        return ("", path);
    }
    if path.starts_with("//") && !path.starts_with("///") {
        return ("/", &path[1..]);
    }
    ("", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_posix_paths() {
        assert_eq!(normalize_with("/srv//x/./docs/", false), "/srv/x/docs");
        assert_eq!(normalize_with("/srv/x/../y", false), "/srv/y");
        assert_eq!(normalize_with("a/../../b", false), "../b");
        assert_eq!(normalize_with("/..", false), "/");
        assert_eq!(normalize_with("", false), ".");
        assert_eq!(normalize_with("//host/share", false), "//host/share");
    }

    #[test]
    fn normalizes_windows_paths() {
        assert_eq!(normalize_with("C:/Projects//A/", true), r"C:\Projects\A");
        assert_eq!(normalize_with(r"C:\Projects\.\A\..\B", true), r"C:\Projects\B");
        assert_eq!(
            normalize_with(r"\\Server\Share\dir\\file.txt", true),
            r"\\Server\Share\dir\file.txt"
        );
        assert_eq!(normalize_with(r"\\Server\Share", true), r"\\Server\Share");
        assert_eq!(normalize_with(r"\\Server\Share\..", true), r"\\Server\Share");
    }

    #[test]
    fn drive_mappings_accept_loose_keys() {
        let mut drives = BTreeMap::new();
        drives.insert("z".to_string(), r"\\fs01\projects".to_string());
        drives.insert("Y:".to_string(), r"\\Server\SharedDrive".to_string());
        drives.insert("bad".to_string(), "x".to_string());
        drives.insert("w".to_string(), String::new());
        let mappings = DriveMappings::from_config(&drives);
        assert_eq!(mappings.target('Z'), Some(r"\\fs01\projects"));
        assert_eq!(mappings.target('y'), Some(r"\\Server\SharedDrive"));
        assert_eq!(mappings.target('w'), None);
    }

    #[test]
    fn split_drive_requires_letter_and_colon() {
        assert_eq!(split_drive("Z:/docs"), Some(('Z', "/docs")));
        assert_eq!(split_drive("/srv/x"), None);
        assert_eq!(split_drive("1:/x"), None);
    }
}
