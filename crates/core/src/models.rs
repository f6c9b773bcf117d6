use crate::error::UnknownCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker recorded when a file's modification time cannot be read.
pub const UNAVAILABLE: &str = "Unavailable";

/// One enumerated file. `modified` is a local `YYYY-MM-DD` date or [`UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub modified: String,
    pub absolute_path: String,
    pub relative_path: String,
}

/// The closed set of categories a file can be filed under.
///
/// Declaration order is the order categories appear in every export.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Category {
    #[default]
    Contractual,
    Architectural,
    Structural,
    Services,
    Safety,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Contractual,
        Category::Architectural,
        Category::Structural,
        Category::Services,
        Category::Safety,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Contractual => "CONTRACTUAL",
            Category::Architectural => "ARCHITECTURAL",
            Category::Structural => "STRUCTURAL",
            Category::Services => "SERVICES",
            Category::Safety => "SAFETY",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("safety".parse::<Category>().unwrap(), Category::Safety);
        assert_eq!(" Other ".parse::<Category>().unwrap(), Category::Other);
        assert!("misc".parse::<Category>().is_err());
    }

    #[test]
    fn order_follows_declaration() {
        let mut shuffled = vec![Category::Other, Category::Safety, Category::Contractual];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Category::Contractual, Category::Safety, Category::Other]
        );
    }

    #[test]
    fn serializes_upper_case() {
        let json = serde_json::to_string(&Category::Services).unwrap();
        assert_eq!(json, "\"SERVICES\"");
        let back: Category = serde_json::from_str("\"services\"").unwrap();
        assert_eq!(back, Category::Services);
    }
}
