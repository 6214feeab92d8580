use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{word_count, ContentItem, ContentStatus, Tags};

/// Partial update of a content item. `None` leaves a field untouched.
///
/// An empty `category` or `url` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<ContentStatus>,
    pub tags: Option<Tags>,
    pub category: Option<String>,
    pub url: Option<String>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.category.is_none()
            && self.url.is_none()
    }

    pub fn apply(&self, item: &mut ContentItem, at: DateTime<Utc>) {
        if let Some(title) = &self.title {
            item.title = title.clone();
            item.metadata.title = Some(title.clone());
        }
        if let Some(content) = &self.content {
            item.metadata.word_count = Some(word_count(content));
            item.metadata.size_bytes = content.len() as u64;
            item.content = Some(content.clone());
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(tags) = &self.tags {
            item.metadata.tags = tags.clone();
        }
        if let Some(category) = &self.category {
            item.metadata.category = non_blank(category);
        }
        if let Some(url) = &self.url {
            item.metadata.url = non_blank(url);
        }
        item.metadata.updated_at = at;
    }

    /// Applies the update and records what it overwrote.
    pub fn apply_with_undo(&self, item: &mut ContentItem, at: DateTime<Utc>) -> ItemUndo {
        let before = item.clone();
        self.apply(item, at);

        let (meta_before, meta) = (&before.metadata, &item.metadata);
        let retitled = self.title.is_some();
        let rewritten = self.content.is_some();

        ItemUndo {
            title: retitled.then(|| Change::new(before.title.clone(), item.title.clone())),
            metadata_title: retitled.then(|| Change::new(meta_before.title.clone(), meta.title.clone())),
            content: rewritten.then(|| Change::new(before.content.clone(), item.content.clone())),
            word_count: rewritten.then(|| Change::new(meta_before.word_count, meta.word_count)),
            size_bytes: rewritten.then(|| Change::new(meta_before.size_bytes, meta.size_bytes)),
            status: self.status.map(|_| Change::new(before.status, item.status)),
            tags: self
                .tags
                .as_ref()
                .map(|_| Change::new(meta_before.tags.clone(), meta.tags.clone())),
            category: self
                .category
                .as_ref()
                .map(|_| Change::new(meta_before.category.clone(), meta.category.clone())),
            url: self
                .url
                .as_ref()
                .map(|_| Change::new(meta_before.url.clone(), meta.url.clone())),
            updated_at: Change::new(meta_before.updated_at, meta.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Change<T> {
    before: T,
    after: T,
}

impl<T: Clone + PartialEq> Change<T> {
    fn new(before: T, after: T) -> Self {
        Self { before, after }
    }

    /// Puts `before` back unless something else has written the slot since.
    fn revert(&self, slot: &mut T) {
        if *slot == self.after {
            *slot = self.before.clone();
        }
    }
}

/// Field-level undo for one applied [`ItemUpdate`].
///
/// Reverting only touches fields that still hold the value this update wrote,
/// so later edits to the same item survive.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUndo {
    title: Option<Change<String>>,
    metadata_title: Option<Change<Option<String>>>,
    content: Option<Change<Option<String>>>,
    word_count: Option<Change<Option<usize>>>,
    size_bytes: Option<Change<u64>>,
    status: Option<Change<ContentStatus>>,
    tags: Option<Change<Tags>>,
    category: Option<Change<Option<String>>>,
    url: Option<Change<Option<String>>>,
    updated_at: Change<DateTime<Utc>>,
}

impl ItemUndo {
    pub fn revert(&self, item: &mut ContentItem) {
        let meta = &mut item.metadata;
        if let Some(c) = &self.title {
            c.revert(&mut item.title);
        }
        if let Some(c) = &self.metadata_title {
            c.revert(&mut meta.title);
        }
        if let Some(c) = &self.content {
            c.revert(&mut item.content);
        }
        if let Some(c) = &self.word_count {
            c.revert(&mut meta.word_count);
        }
        if let Some(c) = &self.size_bytes {
            c.revert(&mut meta.size_bytes);
        }
        if let Some(c) = &self.status {
            c.revert(&mut item.status);
        }
        if let Some(c) = &self.tags {
            c.revert(&mut meta.tags);
        }
        if let Some(c) = &self.category {
            c.revert(&mut meta.category);
        }
        if let Some(c) = &self.url {
            c.revert(&mut meta.url);
        }
        self.updated_at.revert(&mut meta.updated_at);
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
