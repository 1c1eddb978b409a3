//! Task model, assignments, and comment thread.

use serde::{Deserialize, Serialize};

/// Status label of a task. Both transitions are legal; this is a toggled
/// label, not a workflow with a terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Updated,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Updated => "updated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "updated" => Some(TaskStatus::Updated),
            _ => None,
        }
    }
}

/// A task with its assignment set and comment thread.
///
/// Comments are ordered newest-first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub created_by: i64,
    pub creator_name: String,
    pub created_at: String,
    pub assigned_zones: Vec<String>,
    pub comments: Vec<TaskComment>,
}

/// A single comment in a task's thread.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    pub id: i64,
    pub task_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub comment: String,
    pub created_at: String,
}

/// Request body for creating a new task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub assigned_zones: Vec<String>,
}

/// Request body for PUT /api/tasks/{id}/status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Request body for POST /api/tasks/{id}/comments.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub comment: String,
}
