// Task entity and its enumerations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: u64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    /// Build a fresh task. Only the store hands out ids.
    pub(crate) fn new(id: u64, title: String, description: String, due_date: NaiveDate, priority: Priority) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            priority,
            status: Status::Todo,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Apply every field set in `patch`, leaving the rest untouched.
    pub(crate) fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ID: {} | {} | Date: {} | Priority: {} | Status: {}",
            self.id,
            self.title,
            self.due_date.format("%d.%m.%Y"),
            self.priority,
            self.status
        )?;
        write!(f, "Description: {}", self.description)
    }
}

/// Sparse update for [`TaskStore::edit`](crate::TaskStore::edit).
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort rank: LOW < MEDIUM < HIGH, independent of declaration order.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }

    /// Wire name as stored in the task file
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                kind: "priority",
                value: s.to_string(),
                expected: "LOW, MEDIUM, HIGH",
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Status::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
                expected: "TODO, IN_PROGRESS, DONE",
            })
    }
}

/// A priority or status name that matches no variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{value}', expected one of {expected}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::new(
            1,
            "Pay bills".to_string(),
            "electricity".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Priority::High,
        )
    }

    #[test]
    fn test_new_task_starts_todo() {
        let task = sample();
        assert_eq!(task.id(), 1);
        assert_eq!(task.status, Status::Todo);
    }

    #[test]
    fn test_task_serialization() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"title":"Pay bills","description":"electricity","dueDate":"2024-01-10","priority":"HIGH","status":"TODO"}"#
        );

        let mut task = sample();
        task.status = Status::InProgress;
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"status\":\"IN_PROGRESS\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "ID: 1 | Pay bills | Date: 10.01.2024 | Priority: HIGH | Status: TODO\nDescription: electricity"
        );
    }

    #[test]
    fn test_apply_patch_is_sparse() {
        let mut task = sample();
        task.apply(TaskPatch {
            status: Some(Status::Done),
            ..Default::default()
        });

        assert_eq!(task.status, Status::Done);
        assert_eq!(task.title, "Pay bills");
        assert_eq!(task.description, "electricity");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" Medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("DONE".parse::<Status>().unwrap(), Status::Done);

        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid priority 'urgent', expected one of LOW, MEDIUM, HIGH");
        assert!("in progress".parse::<Status>().is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
        let patch = TaskPatch {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
