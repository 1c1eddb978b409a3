//! Task endpoints: creation, listing, status transitions, comments, deletion.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::{policy, AuthUser};
use crate::errors::AppError;
use crate::models::{
    AddCommentRequest, CreateTaskRequest, Task, TaskComment, UpdateTaskStatusRequest,
};
use crate::AppState;

/// GET /api/tasks - Tasks visible to the actor.
///
/// Admins see every task; a zone-scoped user sees only tasks whose
/// assignment set includes their zone reference.
pub async fn list_tasks(State(state): State<AppState>, actor: AuthUser) -> ApiResult<Vec<Task>> {
    let scope = if actor.role.is_admin() {
        None
    } else {
        Some(actor.zone_ref.as_str())
    };

    let tasks = state.repo.list_tasks(scope).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks - Create a task with its zone assignments.
///
/// The task row and all assignment rows commit in one transaction.
pub async fn create_task(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<Task> {
    if !policy::can(&actor, &policy::Action::CreateTask) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let task_id = state.repo.create_task(&request, actor.user_id).await?;
    let task = state
        .repo
        .get_task(task_id)
        .await?
        .ok_or_else(|| AppError::Internal("Created task not found".to_string()))?;

    tracing::info!(task_id, zones = task.assigned_zones.len(), "task created");
    Ok(Json(task))
}

/// PUT /api/tasks/{id}/status - Toggle a task's status label.
pub async fn update_task_status(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskStatusRequest>,
) -> ApiResult<Task> {
    let task = state
        .repo
        .get_task(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

    if !policy::can(
        &actor,
        &policy::Action::ActOnTask {
            assigned_zones: &task.assigned_zones,
        },
    ) {
        return Err(AppError::Forbidden(
            "You do not have permission to update this task".to_string(),
        ));
    }

    state.repo.update_task_status(id, request.status).await?;

    let task = state
        .repo
        .get_task(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;
    Ok(Json(task))
}

/// POST /api/tasks/{id}/comments - Append a comment to a task's thread.
pub async fn add_task_comment(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<AddCommentRequest>,
) -> ApiResult<TaskComment> {
    if request.comment.trim().is_empty() {
        return Err(AppError::Validation("Comment is required".to_string()));
    }

    let task = state
        .repo
        .get_task(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

    if !policy::can(
        &actor,
        &policy::Action::ActOnTask {
            assigned_zones: &task.assigned_zones,
        },
    ) {
        return Err(AppError::Forbidden(
            "You do not have permission to comment on this task".to_string(),
        ));
    }

    let comment = state
        .repo
        .add_task_comment(id, actor.user_id, request.comment.trim())
        .await?;
    Ok(Json(comment))
}

/// DELETE /api/tasks/{id} - Delete a task with its assignments and comments.
///
/// Superadmins may delete any task; admins only tasks they created.
pub async fn delete_task(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    let task = state
        .repo
        .get_task(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

    if !policy::can(
        &actor,
        &policy::Action::DeleteTask {
            created_by: task.created_by,
        },
    ) {
        return Err(AppError::Forbidden(
            "You do not have permission to delete this task".to_string(),
        ));
    }

    state.repo.delete_task(id).await?;
    Ok(Json(()))
}
