use crate::assignments::GroupedFiles;
use crate::models::Category;

pub(crate) const HEADERS: [&str; 2] = ["Category / File Name", "Last Modified"];

/// Body rows shared by every renderer (the header row is drawn separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Row<'a> {
    Category(Category),
    File { name: &'a str, modified: &'a str },
}

/// Empty categories produce no row at all.
pub(crate) fn rows(grouped: &GroupedFiles) -> Vec<Row<'_>> {
    let mut rows = Vec::with_capacity(grouped.file_count() + Category::ALL.len());
    for (category, entries) in grouped.non_empty() {
        rows.push(Row::Category(category));
        rows.extend(entries.iter().map(|e| Row::File {
            name: &e.name,
            modified: &e.modified,
        }));
    }
    rows
}
