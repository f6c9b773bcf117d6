use crate::models::Category;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// What the store keeps per file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub modified: String,
    pub category: Category,
}

/// File name -> assignment, in first-seen order.
pub type AssignmentMap = IndexMap<String, Assignment>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedEntry {
    pub name: String,
    pub modified: String,
}

/// Category -> files, always holding every category in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupedFiles(BTreeMap<Category, Vec<GroupedEntry>>);

impl Default for GroupedFiles {
    fn default() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, Vec::new())).collect())
    }
}

impl GroupedFiles {
    pub fn push(&mut self, category: Category, name: impl Into<String>, modified: impl Into<String>) {
        self.0.entry(category).or_default().push(GroupedEntry {
            name: name.into(),
            modified: modified.into(),
        });
    }

    pub fn get(&self, category: Category) -> &[GroupedEntry] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[GroupedEntry])> {
        self.0.iter().map(|(c, entries)| (*c, entries.as_slice()))
    }

    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[GroupedEntry])> {
        self.iter().filter(|(_, entries)| !entries.is_empty())
    }

    pub fn file_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Per-session mapping of file name to category. Always replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    assignments: AssignmentMap,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every assignment. Returns true when the contents (including
    /// order) differ from what was stored before.
    pub fn set_all(&mut self, assignments: AssignmentMap) -> bool {
        let changed = !self.assignments.iter().eq(assignments.iter());
        self.assignments = assignments;
        changed
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn grouped(&self) -> GroupedFiles {
        let mut grouped = GroupedFiles::default();
        for (name, assignment) in &self.assignments {
            grouped.push(assignment.category, name.clone(), assignment.modified.clone());
        }
        grouped
    }
}
