// Read-only query predicates over tasks

use crate::task::{Status, Task};
use chrono::NaiveDate;

/// Filter for selecting tasks from a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Due strictly before the given day and not done
    Overdue { today: NaiveDate },
    /// Status is DONE
    Done,
    /// Keyword search, see [`Filter::keyword`]
    Keyword(Keyword),
}

/// A lowercased, non-blank search keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Returns `None` for a blank keyword.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Filter {
    /// Keyword search: substring of title or description, or the exact
    /// priority or status name. All comparisons ignore case.
    pub fn keyword(raw: &str) -> Option<Self> {
        Keyword::new(raw).map(Filter::Keyword)
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::Overdue { today } => task.due_date < *today && task.status != Status::Done,
            Filter::Done => task.status == Status::Done,
            Filter::Keyword(Keyword(kw)) => {
                task.title.to_lowercase().contains(kw.as_str())
                    || task.description.to_lowercase().contains(kw.as_str())
                    || task.priority.as_str().eq_ignore_ascii_case(kw)
                    || task.status.as_str().eq_ignore_ascii_case(kw)
            }
        }
    }

    /// Clone every matching task, keeping input order.
    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Task> {
        tasks.into_iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u64, title: &str, due: NaiveDate, status: Status) -> Task {
        let mut t = Task::new(id, title.to_string(), String::new(), due, Priority::Medium);
        t.status = status;
        t
    }

    #[test]
    fn test_overdue() {
        let today = day(2024, 3, 15);
        let filter = Filter::Overdue { today };

        assert!(filter.matches(&task(1, "late", day(2024, 3, 14), Status::Todo)));
        assert!(filter.matches(&task(2, "late", day(2024, 3, 14), Status::InProgress)));
        assert!(!filter.matches(&task(3, "late but done", day(2024, 3, 14), Status::Done)));
        assert!(!filter.matches(&task(4, "due today", today, Status::Todo)));
        assert!(!filter.matches(&task(5, "future", day(2024, 4, 1), Status::Todo)));
    }

    #[test]
    fn test_done() {
        let due = day(2024, 1, 1);
        assert!(Filter::Done.matches(&task(1, "a", due, Status::Done)));
        assert!(!Filter::Done.matches(&task(2, "b", due, Status::InProgress)));
    }

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(Filter::keyword("").is_none());
        assert!(Filter::keyword("   ").is_none());
        assert_eq!(Keyword::new("MiLk").unwrap().as_str(), "milk");
    }

    #[test]
    fn test_keyword_matches_title_and_description() {
        let mut t = task(1, "Buy Milk", day(2024, 1, 1), Status::Todo);
        t.description = "From the Corner Shop".to_string();

        for kw in ["milk", "MILK", "buy m", "corner", "SHOP"] {
            assert!(Filter::keyword(kw).unwrap().matches(&t), "keyword {kw}");
        }
        assert!(!Filter::keyword("bread").unwrap().matches(&t));
    }

    #[test]
    fn test_keyword_matches_enum_names_exactly() {
        let mut t = task(1, "Report", day(2024, 1, 1), Status::InProgress);
        t.priority = Priority::High;

        assert!(Filter::keyword("high").unwrap().matches(&t));
        assert!(Filter::keyword("In_Progress").unwrap().matches(&t));
        // Partial enum names only match through title/description
        assert!(!Filter::keyword("progress").unwrap().matches(&t));
        assert!(!Filter::keyword("todo").unwrap().matches(&t));
    }

    #[test]
    fn test_apply_keeps_order() {
        let due = day(2024, 1, 1);
        let tasks = vec![
            task(3, "c", due, Status::Done),
            task(1, "a", due, Status::Todo),
            task(2, "b", due, Status::Done),
        ];

        let ids: Vec<u64> = Filter::Done.apply(&tasks).iter().map(Task::id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
