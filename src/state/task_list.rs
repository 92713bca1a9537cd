//! Task list with categories, priorities and filtering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
    Health,
    Other,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Completion filter for listing tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Category filter for listing tasks; `All` is also accepted when adding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Work,
    Personal,
    Health,
    Other,
}

impl CategoryFilter {
    fn matches(&self, category: TaskCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Work => category == TaskCategory::Work,
            CategoryFilter::Personal => category == TaskCategory::Personal,
            CategoryFilter::Health => category == TaskCategory::Health,
            CategoryFilter::Other => category == TaskCategory::Other,
        }
    }

    /// Category assigned to a new task; `All` files it under `Other`
    pub fn category(&self) -> TaskCategory {
        match self {
            CategoryFilter::All | CategoryFilter::Other => TaskCategory::Other,
            CategoryFilter::Work => TaskCategory::Work,
            CategoryFilter::Personal => TaskCategory::Personal,
            CategoryFilter::Health => TaskCategory::Health,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a task created at the current time
    pub fn add(
        &mut self,
        text: &str,
        category: CategoryFilter,
        priority: TaskPriority,
    ) -> DashboardResult<Task> {
        self.add_at(text, category, priority, Utc::now())
    }

    /// Append a task; its id is the creation time in milliseconds, bumped
    /// past any existing id so ids stay unique.
    pub fn add_at(
        &mut self,
        text: &str,
        category: CategoryFilter,
        priority: TaskPriority,
        now: DateTime<Utc>,
    ) -> DashboardResult<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DashboardError::InvalidInput("task text must not be empty".to_string()));
        }

        let mut id = now.timestamp_millis();
        while self.tasks.iter().any(|task| task.id == id.to_string()) {
            id += 1;
        }

        let task = Task {
            id: id.to_string(),
            text: text.to_string(),
            completed: false,
            category: category.category(),
            priority,
            created_at: now,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip the completion flag of task `id`
    pub fn toggle(&mut self, id: &str) -> DashboardResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("task {}", id)))?;
        task.completed = !task.completed;
        Ok(task.clone())
    }

    pub fn delete(&mut self, id: &str) -> DashboardResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("task {}", id)))?;
        Ok(self.tasks.remove(index))
    }

    pub fn filter(&self, status: StatusFilter, category: CategoryFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| match status {
                StatusFilter::All => true,
                StatusFilter::Active => !task.completed,
                StatusFilter::Completed => task.completed,
            })
            .filter(|task| category.matches(task.category))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskStats {
            active: self.tasks.len() - completed,
            completed,
            total: self.tasks.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> TaskList {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut list = TaskList::new();
        list.add_at("Write report", CategoryFilter::Work, TaskPriority::High, now).unwrap();
        list.add_at("Go running", CategoryFilter::Health, TaskPriority::Low, now).unwrap();
        list.add_at("Call mom", CategoryFilter::All, TaskPriority::Medium, now).unwrap();
        list
    }

    #[test]
    fn add_trims_and_rejects_blank_text() {
        let mut list = TaskList::new();
        let task = list.add("  Read a book  ", CategoryFilter::Personal, TaskPriority::default()).unwrap();
        assert_eq!(task.text, "Read a book");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.completed);

        let err = list.add("   ", CategoryFilter::Work, TaskPriority::Low).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let list = sample();
        let ids: Vec<&str> = list.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
    }

    #[test]
    fn all_category_files_task_under_other() {
        let list = sample();
        assert_eq!(list.tasks()[2].category, TaskCategory::Other);
    }

    #[test]
    fn toggle_and_delete_update_stats() {
        let mut list = sample();
        let id = list.tasks()[0].id.clone();

        assert!(list.toggle(&id).unwrap().completed);
        assert_eq!(list.stats(), TaskStats { active: 2, completed: 1, total: 3 });

        list.delete(&id).unwrap();
        assert_eq!(list.stats(), TaskStats { active: 2, completed: 0, total: 2 });
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut list = sample();
        assert!(matches!(list.toggle("nope"), Err(DashboardError::NotFound(_))));
        assert!(matches!(list.delete("nope"), Err(DashboardError::NotFound(_))));
    }

    #[test]
    fn filters_combine_status_and_category() {
        let mut list = sample();
        let running = list.tasks()[1].id.clone();
        list.toggle(&running).unwrap();

        assert_eq!(list.filter(StatusFilter::All, CategoryFilter::All).len(), 3);
        assert_eq!(list.filter(StatusFilter::Active, CategoryFilter::All).len(), 2);
        let done = list.filter(StatusFilter::Completed, CategoryFilter::Health);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].text, "Go running");
        assert!(list.filter(StatusFilter::Completed, CategoryFilter::Work).is_empty());
    }
}
