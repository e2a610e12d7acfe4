//! Marking the default command in help listings

use crate::core::group::DEFAULT_MARK;

/// One row of a command listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub summary: String,
}

impl HelpEntry {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }
}

/// Moves the default command to the top of a listing and marks it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpAnnotator {
    mark: String,
}

impl Default for HelpAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_MARK)
    }
}

impl HelpAnnotator {
    pub fn new(mark: impl Into<String>) -> Self {
        Self { mark: mark.into() }
    }

    pub fn mark(&self) -> &str {
        &self.mark
    }

    /// Put the default entry first with the mark appended
    ///
    /// Never fails: with no default, or a default that matches no entry,
    /// the listing comes back unchanged. An entry that already carries the
    /// mark is recognized, so annotating twice is the same as once.
    pub fn annotate(&self, mut entries: Vec<HelpEntry>, default: Option<&str>) -> Vec<HelpEntry> {
        let Some(default) = default else {
            return entries;
        };

        let marked = format!("{default}{}", self.mark);
        let Some(pos) = entries
            .iter()
            .position(|e| e.name == default || e.name == marked)
        else {
            return entries;
        };

        let mut entry = entries.remove(pos);
        entry.name = marked;
        entries.insert(0, entry);
        entries
    }
}

/// Render a listing as two aligned columns
pub fn render_commands(entries: &[HelpEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let summary = first_line(&entry.summary);
        if summary.is_empty() {
            out.push_str(&format!("  {}\n", entry.name));
        } else {
            out.push_str(&format!("  {:<width$}  {}\n", entry.name, summary));
        }
    }
    out
}

/// First non-empty line of a summary, trimmed
pub fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}
