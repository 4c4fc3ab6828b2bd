//! Task store — owns every task record and the next-id counter.
//!
//! Lookup is a linear scan over an insertion-ordered `Vec`; at the intended
//! scale a secondary index buys nothing. Every operation takes the store
//! lock for its full duration, so a create/update/list is never observed
//! half-applied.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Task priority — the wire shape accepts a string or a number and the store
/// keeps whichever it was given. Absent priorities are stored as the empty
/// string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Priority {
    Number(serde_json::Number),
    Text(String),
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Text(String::new())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Stored as given; parsed only when sorting by due date.
    pub due_date: String,
    pub category: String,
    pub priority: Priority,
    pub completed: bool,
}

// ─── Sort selector ───────────────────────────────────────────────────────────

/// Recognised `sortBy` selectors. Anything else means insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Category,
    Completed,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dueDate" => Some(SortKey::DueDate),
            "category" => Some(SortKey::Category),
            "completed" => Some(SortKey::Completed),
            _ => None,
        }
    }
}

/// Parse a stored due-date string. Accepts RFC 3339 (with offset) or a bare
/// `YYYY-MM-DD` date; anything else is unparseable and sorts last.
fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Errors returned by the task store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(u64),
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Tasks plus the id counter, guarded together: an id is assigned and its
/// task appended under one write lock, so ids stay gap-free.
struct TaskState {
    tasks: Vec<Task>,
    next_id: u64,
}

pub struct TaskStore {
    state: RwLock<TaskState>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TaskState {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a task with the next sequential id and `completed = false`.
    /// Field contents are stored as-is — no validation.
    pub async fn create(
        &self,
        title: String,
        description: String,
        due_date: String,
        category: String,
        priority: Priority,
    ) -> Task {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let task = Task {
            id,
            title,
            description,
            due_date,
            category,
            priority,
            completed: false,
        };
        state.tasks.push(task.clone());
        task
    }

    /// Overwrite a task's category.
    pub async fn set_category(&self, id: u64, category: String) -> Result<Task, TaskError> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.category = category;
        Ok(task.clone())
    }

    /// Overwrite a task's priority.
    pub async fn set_priority(&self, id: u64, priority: Priority) -> Result<Task, TaskError> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.priority = priority;
        Ok(task.clone())
    }

    /// Mark a task completed. Idempotent — completing a completed task is
    /// not an error, and there is no way back to pending.
    pub async fn complete(&self, id: u64) -> Result<Task, TaskError> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.completed = true;
        Ok(task.clone())
    }

    /// Return a snapshot of all tasks, optionally sorted.
    ///
    /// Sorts are stable, so ties keep insertion order — in particular the
    /// `completed` sort keeps creation order within each group, and
    /// unparseable due dates stay in creation order at the tail.
    pub async fn list(&self, sort_by: Option<SortKey>) -> Vec<Task> {
        let state = self.state.read().await;
        let mut tasks = state.tasks.clone();
        match sort_by {
            Some(SortKey::DueDate) => {
                tasks.sort_by_key(|t| {
                    let parsed = parse_due_date(&t.due_date);
                    (parsed.is_none(), parsed)
                });
            }
            Some(SortKey::Category) => {
                tasks.sort_by(|a, b| a.category.cmp(&b.category));
            }
            Some(SortKey::Completed) => {
                tasks.sort_by_key(|t| t.completed);
            }
            None => {}
        }
        tasks
    }

    pub async fn task_count(&self) -> usize {
        self.state.read().await.tasks.len()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(store: &TaskStore, title: &str, due: &str, category: &str) -> Task {
        store
            .create(
                title.to_string(),
                "d".to_string(),
                due.to_string(),
                category.to_string(),
                Priority::default(),
            )
            .await
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = TaskStore::new();
        let a = seed(&store, "A", "", "").await;
        let b = seed(&store, "B", "", "").await;
        let c = seed(&store, "C", "", "").await;
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
        assert!(!a.completed);
    }

    #[tokio::test]
    async fn list_without_selector_keeps_insertion_order() {
        let store = TaskStore::new();
        seed(&store, "A", "2024-01-01", "work").await;
        seed(&store, "B", "2023-01-01", "home").await;
        let titles: Vec<_> = store
            .list(None)
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[tokio::test]
    async fn sort_by_due_date_ascending() {
        let store = TaskStore::new();
        seed(&store, "A", "2024-01-01", "work").await;
        seed(&store, "B", "2023-01-01", "home").await;
        let titles: Vec<_> = store
            .list(Some(SortKey::DueDate))
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[tokio::test]
    async fn unparseable_due_dates_sort_last_in_insertion_order() {
        let store = TaskStore::new();
        seed(&store, "garbage1", "next tuesday", "").await;
        seed(&store, "dated", "2024-06-01", "").await;
        seed(&store, "garbage2", "", "").await;
        let titles: Vec<_> = store
            .list(Some(SortKey::DueDate))
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["dated", "garbage1", "garbage2"]);
    }

    #[tokio::test]
    async fn rfc3339_and_bare_dates_compare_on_one_timeline() {
        let store = TaskStore::new();
        seed(&store, "late", "2024-06-01T18:30:00Z", "").await;
        seed(&store, "early", "2024-06-01", "").await;
        let titles: Vec<_> = store
            .list(Some(SortKey::DueDate))
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["early", "late"]);
    }

    #[tokio::test]
    async fn sort_by_category_is_lexicographic() {
        let store = TaskStore::new();
        seed(&store, "A", "", "work").await;
        seed(&store, "B", "", "home").await;
        let cats: Vec<_> = store
            .list(Some(SortKey::Category))
            .await
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(cats, ["home", "work"]);
    }

    #[tokio::test]
    async fn sort_by_completed_is_false_first_and_stable() {
        let store = TaskStore::new();
        let a = seed(&store, "A", "", "").await;
        seed(&store, "B", "", "").await;
        let c = seed(&store, "C", "", "").await;
        seed(&store, "D", "", "").await;
        store.complete(a.id).await.unwrap();
        store.complete(c.id).await.unwrap();
        let titles: Vec<_> = store
            .list(Some(SortKey::Completed))
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["B", "D", "A", "C"]);
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let store = TaskStore::new();
        let t = seed(&store, "A", "", "").await;
        assert!(store.complete(t.id).await.unwrap().completed);
        assert!(store.complete(t.id).await.unwrap().completed);
    }

    #[tokio::test]
    async fn mutations_on_unknown_id_fail_and_change_nothing() {
        let store = TaskStore::new();
        seed(&store, "A", "", "work").await;
        assert_eq!(
            store.set_category(99, "x".into()).await.unwrap_err(),
            TaskError::NotFound(99)
        );
        assert_eq!(store.complete(99).await.unwrap_err(), TaskError::NotFound(99));
        assert_eq!(
            store
                .set_priority(99, Priority::Text("high".into()))
                .await
                .unwrap_err(),
            TaskError::NotFound(99)
        );
        let tasks = store.list(None).await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].category, "work");
        assert!(!tasks[0].completed);
    }

    #[tokio::test]
    async fn list_returns_a_snapshot() {
        let store = TaskStore::new();
        let t = seed(&store, "A", "", "old").await;
        let snapshot = store.list(None).await;
        store.set_category(t.id, "new".into()).await.unwrap();
        assert_eq!(snapshot[0].category, "old");
        assert_eq!(store.list(None).await[0].category, "new");
    }

    #[tokio::test]
    async fn sorting_does_not_reorder_the_store() {
        let store = TaskStore::new();
        seed(&store, "A", "2024-01-01", "work").await;
        seed(&store, "B", "2023-01-01", "home").await;
        let _ = store.list(Some(SortKey::DueDate)).await;
        let titles: Vec<_> = store
            .list(None)
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn sort_key_parses_exact_selectors_only() {
        assert_eq!(SortKey::parse("dueDate"), Some(SortKey::DueDate));
        assert_eq!(SortKey::parse("category"), Some(SortKey::Category));
        assert_eq!(SortKey::parse("completed"), Some(SortKey::Completed));
        assert_eq!(SortKey::parse("duedate"), None);
        assert_eq!(SortKey::parse("priority"), None);
    }

    #[test]
    fn priority_accepts_string_or_number() {
        let p: Priority = serde_json::from_str("3").unwrap();
        assert_eq!(p, Priority::Number(3.into()));
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::Text("high".into()));
        // Floats survive the round trip too.
        let p: Priority = serde_json::from_str("1.5").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "1.5");
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: 1,
            title: "A".into(),
            description: "d".into(),
            due_date: "2024-01-01".into(),
            category: "work".into(),
            priority: Priority::Number(2.into()),
            completed: false,
        };
        let v = serde_json::to_value(&task).unwrap();
        assert_eq!(v["dueDate"], "2024-01-01");
        assert_eq!(v["priority"], 2);
        assert_eq!(v["completed"], false);
    }
}
