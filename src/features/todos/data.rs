use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Individual todo item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// Create a pending item. `text` is expected to be trimmed already.
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// Ordered todo list, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

/// Completion statistics for a list
#[derive(Debug, Clone, PartialEq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub completion_percentage: f64,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Calculate completion statistics
    pub fn stats(&self) -> TodoStats {
        let total = self.items.len();
        let completed = self.items.iter().filter(|item| item.completed).count();

        let completion_percentage = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        TodoStats {
            total,
            completed,
            completion_percentage,
        }
    }
}

/// Derive a fresh id from the creation time.
///
/// Ids are milliseconds since the Unix epoch. When two items are created within
/// the same millisecond the candidate is bumped until it no longer collides.
pub fn next_id(list: &TodoList, now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    while list.contains_id(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Prepend a new item built from `raw_text`.
///
/// Returns `None` when the trimmed text is empty; the prior list is then the
/// current one.
pub fn add(list: &TodoList, raw_text: &str, now: DateTime<Utc>) -> Option<TodoList> {
    let text = raw_text.trim();
    if text.is_empty() {
        return None;
    }

    let item = TodoItem::new(next_id(list, now), text.to_string());

    let mut items = Vec::with_capacity(list.len() + 1);
    items.push(item);
    items.extend(list.items.iter().cloned());

    Some(TodoList { items })
}

/// Flip `completed` on the item with `id`, leaving everything else untouched.
///
/// Returns `None` when no item matches.
pub fn toggle(list: &TodoList, id: &str) -> Option<TodoList> {
    let index = list.items.iter().position(|item| item.id == id)?;

    let mut items = list.items.clone();
    items[index].completed = !items[index].completed;

    Some(TodoList { items })
}
