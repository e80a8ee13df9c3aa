//! Task manager records
//!
//! Persisted as a JSON array in LocalStorage; array order is display order.
//! Decoding is lenient: labels this version doesn't know are kept as
//! `Other`, and absent ones stay absent on the next save.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::persistence::codec::{lenient_bool, lenient_string};

/// Task priority
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    /// Stored label this version doesn't recognise (empty when absent)
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(raw) => raw,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" | "med" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Known priority, or `Other` carrying the label as written
    pub fn from_label(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Priority::Other(s.to_string()))
    }

    fn unset() -> Self {
        Priority::Other(String::new())
    }

    fn is_unset(&self) -> bool {
        matches!(self, Priority::Other(raw) if raw.is_empty())
    }

    /// Sort rank, highest priority first
    fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Other(_) => 3,
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::from_label(&s),
            Value::Null => Self::unset(),
            other => Priority::Other(other.to_string()),
        })
    }
}

/// Day of the week a task is planned for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Weekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    /// Stored label this version doesn't recognise (empty when absent)
    Other(String),
}

impl Weekday {
    /// Display order, the week starts on Saturday
    pub const ALL: [Weekday; 7] = [
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Other(raw) => raw,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    /// Known day, or `Other` carrying the label as written
    pub fn from_label(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Weekday::Other(s.to_string()))
    }

    fn unset() -> Self {
        Weekday::Other(String::new())
    }

    fn is_unset(&self) -> bool {
        matches!(self, Weekday::Other(raw) if raw.is_empty())
    }

    /// Translation key for the day label (`day.monday`, ...)
    pub fn label_key(&self) -> String {
        format!("day.{}", self.as_str())
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::from_label(&s),
            Value::Null => Self::unset(),
            other => Weekday::Other(other.to_string()),
        })
    }
}

/// A single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default = "Priority::unset", skip_serializing_if = "Priority::is_unset")]
    pub priority: Priority,
    #[serde(default = "Weekday::unset", skip_serializing_if = "Weekday::is_unset")]
    pub day: Weekday,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub completed: bool,
    /// Manual ordering slot, any JSON value the UI chose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    /// Fields this version doesn't know about, kept so a save doesn't drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Create an uncompleted task with a fresh id
    pub fn new(title: impl Into<String>, priority: Priority, day: Weekday) -> Self {
        Self {
            id: new_task_id(),
            title: title.into(),
            description: String::new(),
            priority,
            day,
            completed: false,
            position: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Generate a task id: creation time in ms plus a random suffix
pub fn new_task_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{:x}-{:08x}", millis, rand::random::<u32>())
}

/// Share of completed tasks as a rounded percentage (0 for an empty list)
pub fn completion_percent(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    ((done * 100 + tasks.len() / 2) / tasks.len()) as u8
}

/// Mark every task as not completed
pub fn uncheck_all(tasks: &mut [Task]) {
    for task in tasks.iter_mut() {
        task.completed = false;
    }
}

/// Sort high → low priority, keeping insertion order within a priority
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.priority.rank());
}

/// Tasks planned for `day`, in list order
pub fn tasks_for_day(tasks: &[Task], day: Weekday) -> Vec<&Task> {
    tasks.iter().filter(|t| t.day == day).collect()
}

/// Drop the task with `id`; returns whether one was removed
pub fn remove_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

/// Flip completion of the task with `id`; returns the new state
pub fn toggle_task(tasks: &mut [Task], id: &str) -> Option<bool> {
    let task = tasks.iter_mut().find(|t| t.id == id)?;
    task.completed = !task.completed;
    Some(task.completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, priority: Priority, completed: bool) -> Task {
        let mut t = Task::new(id, priority, Weekday::Monday);
        t.id = id.to_string();
        t.completed = completed;
        t
    }

    #[test]
    fn test_task_json_shape() {
        let t = task("1", Priority::High, false);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["priority"], "high");
        assert_eq!(json["day"], "monday");
        assert_eq!(json["completed"], false);
        assert!(json.get("position").is_none());
    }

    #[test]
    fn test_task_without_description() {
        let json = r#"{"id":"1","title":"Fajr","priority":"high","day":"monday","completed":false}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.description, "");
        assert_eq!(t.priority, Priority::High);
        assert!(t.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive() {
        let json = r#"{"id":"1","title":"x","priority":"low","day":"friday","completed":true,"color":"green"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.extra["color"], "green");
        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["color"], "green");
    }

    #[test]
    fn test_unrecognised_labels_kept() {
        let json = r#"{"id":"2","title":"x","priority":"urgent","day":"Someday","completed":false}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::Other("urgent".to_string()));
        assert_eq!(t.day, Weekday::Other("Someday".to_string()));
        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["priority"], "urgent");
        assert_eq!(back["day"], "Someday");
    }

    #[test]
    fn test_label_case_and_absence() {
        let json = r#"{"id":7,"title":"x","day":"MONDAY","position":1.5}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, "7");
        assert_eq!(t.day, Weekday::Monday);
        assert_eq!(t.position, Some(serde_json::json!(1.5)));
        assert!(!t.completed);
        let back = serde_json::to_value(&t).unwrap();
        assert!(back.get("priority").is_none());
        assert_eq!(back["day"], "monday");
    }

    #[test]
    fn test_other_priority_sorts_last() {
        let mut tasks = vec![
            task("a", Priority::Other("urgent".to_string()), false),
            task("b", Priority::Low, false),
        ];
        sort_by_priority(&mut tasks);
        assert_eq!(tasks[0].id, "b");
    }

    #[test]
    fn test_weekday_from_str() {
        assert_eq!(Weekday::from_str("Friday"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_str("funday"), None);
        assert_eq!(Weekday::ALL[0], Weekday::Saturday);
        assert_eq!(Weekday::Monday.label_key(), "day.monday");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_str("med"), Some(Priority::Medium));
        assert_eq!(Priority::from_str("urgent"), None);
    }

    #[test]
    fn test_new_task_ids_differ() {
        assert_ne!(new_task_id(), new_task_id());
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(&[]), 0);
        let tasks = vec![
            task("1", Priority::Low, true),
            task("2", Priority::Low, false),
            task("3", Priority::Low, false),
        ];
        assert_eq!(completion_percent(&tasks), 33);
        let tasks = vec![task("1", Priority::Low, true), task("2", Priority::Low, true)];
        assert_eq!(completion_percent(&tasks), 100);
    }

    #[test]
    fn test_uncheck_all() {
        let mut tasks = vec![task("1", Priority::Low, true), task("2", Priority::High, true)];
        uncheck_all(&mut tasks);
        assert!(tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut tasks = vec![
            task("a", Priority::Low, false),
            task("b", Priority::High, false),
            task("c", Priority::Medium, false),
            task("d", Priority::High, false),
        ];
        sort_by_priority(&mut tasks);
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "c", "a"]);
    }

    #[test]
    fn test_remove_and_toggle() {
        let mut tasks = vec![task("1", Priority::Low, false), task("2", Priority::Low, false)];
        assert_eq!(toggle_task(&mut tasks, "2"), Some(true));
        assert_eq!(toggle_task(&mut tasks, "9"), None);
        assert!(remove_task(&mut tasks, "1"));
        assert!(!remove_task(&mut tasks, "1"));
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
    }

    #[test]
    fn test_tasks_for_day() {
        let mut tasks = vec![task("1", Priority::Low, false), task("2", Priority::Low, false)];
        tasks[1].day = Weekday::Friday;
        let friday = tasks_for_day(&tasks, Weekday::Friday);
        assert_eq!(friday.len(), 1);
        assert_eq!(friday[0].id, "2");
    }
}
