use serde::{Deserialize, Serialize};

use super::{ContentStatus, QueueEntry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Timestamp,
    Title,
    Size,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Client-side filter and sort over a queue snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueQuery {
    /// Case-insensitive match against title and content.
    pub text: Option<String>,
    pub status: Option<ContentStatus>,
    pub tag: Option<String>,
    /// Case-insensitive category match.
    pub category: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl QueueQuery {
    pub fn matches(&self, entry: &QueueEntry) -> bool {
        let item = entry.item();

        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let in_title = item.title.to_lowercase().contains(&needle);
            let in_content = item
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle));
            if !in_title && !in_content {
                return false;
            }
        }

        if self.status.is_some_and(|status| item.status != status) {
            return false;
        }

        if let Some(tag) = &self.tag {
            if !item.metadata.tags.contains(tag) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            let matches = item
                .metadata
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category));
            if !matches {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, entries: &'a [QueueEntry]) -> Vec<&'a QueueEntry> {
        let mut selected: Vec<&QueueEntry> = entries.iter().filter(|e| self.matches(e)).collect();

        selected.sort_by(|a, b| {
            let (a, b) = (a.item(), b.item());
            let ordering = match self.sort {
                SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
                SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                SortKey::Size => a.metadata.size_bytes.cmp(&b.metadata.size_bytes),
            };
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        selected
    }
}
