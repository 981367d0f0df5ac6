use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

fn default_completed() -> bool {
    false
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Whether the task starts out completed. Defaults to false.
    #[serde(default = "default_completed")]
    pub completed: bool,
}

/// Partial update payload for a task. Only supplied fields change; omitted
/// fields retain their prior values. There is deliberately no owner field:
/// ownership is fixed at creation and never reassignable.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub completed: Option<bool>,
}

/// A task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Identifier of the owning user. Set from the resolved caller at
    /// creation, immutable afterwards.
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    /// Bumped on every mutation.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
            completed: false,
        };
        assert!(valid_input.validate().is_ok());

        let invalid_input = TaskInput {
            title: "".to_string(), // Empty title
            description: None,
            completed: false,
        };
        assert!(invalid_input.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: None,
            completed: false,
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "ok".to_string(),
            description: Some("b".repeat(1001)),
            completed: false,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_task_input_completed_defaults_to_false() {
        let input: TaskInput = serde_json::from_str(r#"{ "title": "t1" }"#).unwrap();
        assert!(!input.completed);
        assert!(input.description.is_none());
    }

    #[test]
    fn test_task_update_validation() {
        let valid_partial: TaskUpdate =
            serde_json::from_str(r#"{ "completed": true }"#).unwrap();
        assert!(valid_partial.validate().is_ok());
        assert!(valid_partial.title.is_none());

        let empty_title = TaskUpdate {
            title: Some("".to_string()),
            description: None,
            completed: None,
        };
        assert!(empty_title.validate().is_err());
    }
}
