//! Task entity as read from the task list document

use serde::{Deserialize, Serialize};

use super::timer_state::NO_TASK_SELECTED;

/// Labels offered when there are no open tasks to choose from
pub const PLACEHOLDER_TASKS: [&str; 4] = [
    "Focus on coding",
    "Read documentation",
    "Review code",
    "Plan next sprint",
];

/// A to-do item owned by the task list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Labels for the task selector: the sentinel, then every open task title
pub fn task_choices(tasks: &[Task]) -> Vec<String> {
    let mut choices = vec![NO_TASK_SELECTED.to_string()];
    let open = tasks.iter().filter(|t| !t.is_done);
    choices.extend(open.map(|t| t.title.clone()));

    if choices.len() == 1 {
        choices.extend(PLACEHOLDER_TASKS.iter().map(|s| s.to_string()));
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, is_done: bool) -> Task {
        Task {
            id: title.to_lowercase(),
            title: title.to_string(),
            description: String::new(),
            is_done,
            created_at: 0,
        }
    }

    #[test]
    fn open_tasks_follow_the_sentinel() {
        let tasks = vec![
            task("Write report", false),
            task("Ship it", true),
            task("Email Bob", false),
        ];
        assert_eq!(
            task_choices(&tasks),
            vec![NO_TASK_SELECTED, "Write report", "Email Bob"]
        );
    }

    #[test]
    fn placeholders_when_everything_is_done() {
        let choices = task_choices(&[task("Ship it", true)]);
        assert_eq!(choices.len(), 5);
        assert_eq!(choices[0], NO_TASK_SELECTED);
        assert_eq!(choices[1], "Focus on coding");
    }

    #[test]
    fn placeholders_when_empty() {
        assert_eq!(task_choices(&[]).len(), 1 + PLACEHOLDER_TASKS.len());
    }

    #[test]
    fn minimal_task_json_uses_defaults() {
        let task: Task = serde_json::from_str(r#"{"title":"Plan"}"#).unwrap();
        assert_eq!(task.title, "Plan");
        assert!(!task.is_done);
        assert!(task.id.is_empty());
    }

    #[test]
    fn reads_camel_case_done_flag() {
        let json = r#"{"id":"1","title":"Plan","description":"","isDone":true,"createdAt":9}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_done);
        assert_eq!(task.created_at, 9);
    }
}
