//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity. The two
//! multi-statement writes (status update + history insert, task creation +
//! assignment rows) are atomic: either every row commits or none do.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    allocate_zone_ref, zone_ref_prefix, CreateTaskRequest, CreateUserRequest, Role, StatusHistoryEntry,
    StatusUpdate, Task, TaskComment, TaskStatus, TaskStatusReportRow, UpdateUserRequest, User, Zone,
    ZonePerformanceRow, ZoneStatus, ZoneWithStatus,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Verify a database round-trip for health checks.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ==================== USER OPERATIONS ====================

    /// Get a user by username, credential included.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, password, password_is_hashed, role, zone_ref, email, last_login
             FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, password, password_is_hashed, role, zone_ref, email, last_login
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// List all users, ordered by username.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query(
            "SELECT id, username, password, password_is_hashed, role, zone_ref, email, last_login
             FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Create a new user. `stored_password` must already be hashed.
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
        stored_password: &str,
    ) -> Result<User, AppError> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, password_is_hashed, role, zone_ref, email)
             VALUES (?, ?, 1, ?, ?, ?)",
        )
        .bind(&request.username)
        .bind(stored_password)
        .bind(request.role.as_str())
        .bind(&request.zone_ref)
        .bind(&request.email)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: request.username.clone(),
            password: stored_password.to_string(),
            password_is_hashed: true,
            role: request.role,
            zone_ref: request.zone_ref.clone(),
            email: request.email.clone(),
            last_login: None,
        })
    }

    /// Update a user's account fields (not the credential).
    pub async fn update_user(
        &self,
        id: i64,
        request: &UpdateUserRequest,
    ) -> Result<User, AppError> {
        let existing = self
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let username = request.username.as_ref().unwrap_or(&existing.username);
        let role = request.role.unwrap_or(existing.role);
        let zone_ref = request.zone_ref.as_ref().unwrap_or(&existing.zone_ref);
        let email = request.email.clone().or(existing.email.clone());

        sqlx::query("UPDATE users SET username = ?, role = ?, zone_ref = ?, email = ? WHERE id = ?")
            .bind(username)
            .bind(role.as_str())
            .bind(zone_ref)
            .bind(&email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id,
            username: username.clone(),
            password: existing.password,
            password_is_hashed: existing.password_is_hashed,
            role,
            zone_ref: zone_ref.clone(),
            email,
            last_login: existing.last_login,
        })
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }

    /// Stamp a user's last login time.
    pub async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Replace a user's credential with a hashed one.
    pub async fn set_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE users SET password = ?, password_is_hashed = 1 WHERE id = ?")
                .bind(password_hash)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }

    // ==================== ZONE OPERATIONS ====================

    /// Get a zone by ID.
    pub async fn get_zone(&self, id: i64) -> Result<Option<Zone>, AppError> {
        let row = sqlx::query("SELECT id, name, zone_ref FROM cities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(zone_from_row))
    }

    /// Whether a zone with this reference exists.
    pub async fn zone_ref_exists(&self, zone_ref: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 AS present FROM cities WHERE zone_ref = ?")
            .bind(zone_ref)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Create a zone, allocating the next reference for its name prefix.
    ///
    /// Allocation and insert run in one transaction so two concurrent
    /// creations cannot hand out the same reference.
    pub async fn create_zone(&self, name: &str) -> Result<Zone, AppError> {
        let mut tx = self.pool.begin().await?;

        let prefix = zone_ref_prefix(name);
        let rows = sqlx::query("SELECT zone_ref FROM cities WHERE zone_ref LIKE ?")
            .bind(format!("{}%", prefix))
            .fetch_all(&mut *tx)
            .await?;

        let existing: Vec<String> = rows.iter().map(|row| row.get("zone_ref")).collect();
        let zone_ref = allocate_zone_ref(name, &existing);

        let result = sqlx::query("INSERT INTO cities (name, zone_ref) VALUES (?, ?)")
            .bind(name)
            .bind(&zone_ref)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Zone {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            zone_ref,
        })
    }

    /// List all zones with their current status and last updater, ordered by
    /// name. The current status is derived from the ledger on every call:
    /// latest `updated_at` wins, ties broken by highest id.
    pub async fn list_zones(&self) -> Result<Vec<ZoneWithStatus>, AppError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.name, c.zone_ref,
                      s.status, s.comment, s.updated_at,
                      u.username AS updated_by
               FROM cities c
               LEFT JOIN status_updates s ON s.id = (
                   SELECT id FROM status_updates
                   WHERE city_id = c.id
                   ORDER BY updated_at DESC, id DESC
                   LIMIT 1
               )
               LEFT JOIN users u ON u.id = s.updated_by
               ORDER BY c.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let status_str: Option<String> = row.get("status");
                ZoneWithStatus {
                    id: row.get("id"),
                    name: row.get("name"),
                    zone_ref: row.get("zone_ref"),
                    status: status_str.as_deref().and_then(ZoneStatus::from_str),
                    comment: row.get("comment"),
                    updated_at: row.get("updated_at"),
                    updated_by: row.get("updated_by"),
                }
            })
            .collect())
    }

    // ==================== STATUS LEDGER OPERATIONS ====================

    /// Record a status update: one row in the live table and one in the
    /// append-only history table, committed together or not at all.
    pub async fn record_status(
        &self,
        city_id: i64,
        status: ZoneStatus,
        comment: &str,
        updated_by: i64,
    ) -> Result<StatusUpdate, AppError> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO status_updates (city_id, status, comment, updated_by, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(city_id)
        .bind(status.as_str())
        .bind(comment)
        .bind(updated_by)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO status_history (city_id, status, comment, updated_by, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(city_id)
        .bind(status.as_str())
        .bind(comment)
        .bind(updated_by)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StatusUpdate {
            id: result.last_insert_rowid(),
            city_id,
            status,
            comment: comment.to_string(),
            updated_by,
            updated_at: now,
        })
    }

    /// Status history for a zone, newest first.
    pub async fn get_status_history(
        &self,
        city_id: i64,
    ) -> Result<Vec<StatusHistoryEntry>, AppError> {
        let rows = sqlx::query(
            r#"SELECT h.id, h.status, h.comment, h.updated_at, u.username AS updated_by
               FROM status_history h
               JOIN users u ON u.id = h.updated_by
               WHERE h.city_id = ?
               ORDER BY h.updated_at DESC, h.id DESC"#,
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let status_str: String = row.get("status");
                StatusHistoryEntry {
                    id: row.get("id"),
                    status: ZoneStatus::from_str(&status_str).unwrap_or(ZoneStatus::Pending),
                    comment: row.get("comment"),
                    updated_at: row.get("updated_at"),
                    updated_by: row.get("updated_by"),
                }
            })
            .collect())
    }

    // ==================== TASK OPERATIONS ====================

    /// Create a task and its assignment rows in a single transaction.
    ///
    /// Every assigned zone reference is checked against the registry inside
    /// the transaction; an unknown reference aborts the whole creation.
    pub async fn create_task(
        &self,
        request: &CreateTaskRequest,
        created_by: i64,
    ) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO tasks (title, description, due_date, status, created_by, created_at)
             VALUES (?, ?, ?, 'pending', ?, ?)",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.due_date)
        .bind(created_by)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let task_id = result.last_insert_rowid();

        for zone_ref in &request.assigned_zones {
            let known = sqlx::query("SELECT 1 AS present FROM cities WHERE zone_ref = ?")
                .bind(zone_ref)
                .fetch_optional(&mut *tx)
                .await?;
            if known.is_none() {
                return Err(AppError::Validation(format!(
                    "Unknown zone reference: {}",
                    zone_ref
                )));
            }

            sqlx::query("INSERT INTO task_assignments (task_id, zone_ref) VALUES (?, ?)")
                .bind(task_id)
                .bind(zone_ref)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(task_id)
    }

    /// Get a task with its assignments and comment thread.
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, AppError> {
        let row = sqlx::query(
            r#"SELECT t.id, t.title, t.description, t.due_date, t.status,
                      t.created_by, t.created_at, u.username AS creator_name
               FROM tasks t
               JOIN users u ON u.id = t.created_by
               WHERE t.id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut task = task_from_row(&row);
        task.assigned_zones = self.get_task_assignments(id).await?;
        task.comments = self.get_task_comments(id).await?;
        Ok(Some(task))
    }

    /// List tasks newest first: all of them, or only those assigned to
    /// `zone_ref` when a scope is given.
    pub async fn list_tasks(&self, zone_ref: Option<&str>) -> Result<Vec<Task>, AppError> {
        let rows = match zone_ref {
            Some(zone_ref) => {
                sqlx::query(
                    r#"SELECT t.id, t.title, t.description, t.due_date, t.status,
                              t.created_by, t.created_at, u.username AS creator_name
                       FROM tasks t
                       JOIN users u ON u.id = t.created_by
                       JOIN task_assignments ta ON ta.task_id = t.id
                       WHERE ta.zone_ref = ?
                       ORDER BY t.created_at DESC, t.id DESC"#,
                )
                .bind(zone_ref)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT t.id, t.title, t.description, t.due_date, t.status,
                              t.created_by, t.created_at, u.username AS creator_name
                       FROM tasks t
                       JOIN users u ON u.id = t.created_by
                       ORDER BY t.created_at DESC, t.id DESC"#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut tasks = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut task = task_from_row(row);
            task.assigned_zones = self.get_task_assignments(task.id).await?;
            task.comments = self.get_task_comments(task.id).await?;
            tasks.push(task);
        }

        Ok(tasks)
    }

    /// Zone references a task is assigned to.
    pub async fn get_task_assignments(&self, task_id: i64) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT zone_ref FROM task_assignments WHERE task_id = ?")
            .bind(task_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("zone_ref")).collect())
    }

    /// Comment thread for a task, newest first.
    pub async fn get_task_comments(&self, task_id: i64) -> Result<Vec<TaskComment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.task_id, c.user_id, u.username AS user_name, c.comment, c.created_at
               FROM task_comments c
               JOIN users u ON u.id = c.user_id
               WHERE c.task_id = ?
               ORDER BY c.created_at DESC, c.id DESC"#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| TaskComment {
                id: row.get("id"),
                task_id: row.get("task_id"),
                user_id: row.get("user_id"),
                user_name: row.get("user_name"),
                comment: row.get("comment"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Set a task's status label.
    pub async fn update_task_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {} not found", task_id)));
        }

        Ok(())
    }

    /// Append a comment to a task's thread.
    pub async fn add_task_comment(
        &self,
        task_id: i64,
        user_id: i64,
        comment: &str,
    ) -> Result<TaskComment, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO task_comments (task_id, user_id, comment, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(task_id)
        .bind(user_id)
        .bind(comment)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        Ok(TaskComment {
            id: result.last_insert_rowid(),
            task_id,
            user_id,
            user_name: user.username,
            comment: comment.to_string(),
            created_at: now,
        })
    }

    /// Delete a task together with its assignments and comments.
    pub async fn delete_task(&self, task_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM task_comments WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM task_assignments WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {} not found", task_id)));
        }

        tx.commit().await?;
        Ok(())
    }

    // ==================== REPORTING OPERATIONS ====================

    /// Per-day task counts by status for tasks created on or after `since`
    /// (an ISO `YYYY-MM-DD` date), oldest day first.
    pub async fn task_status_report(
        &self,
        since: &str,
    ) -> Result<Vec<TaskStatusReportRow>, AppError> {
        let rows = sqlx::query(
            r#"SELECT date(created_at) AS day,
                      SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END) AS pending_count,
                      SUM(CASE WHEN status = 'updated' THEN 1 ELSE 0 END) AS updated_count
               FROM tasks
               WHERE date(created_at) >= ?
               GROUP BY day
               ORDER BY day ASC"#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| TaskStatusReportRow {
                date: row.get("day"),
                pending_count: row.get("pending_count"),
                updated_count: row.get("updated_count"),
            })
            .collect())
    }

    /// Per-zone assigned/completed task counts, most completed first.
    pub async fn zone_performance_report(&self) -> Result<Vec<ZonePerformanceRow>, AppError> {
        let rows = sqlx::query(
            r#"SELECT c.name AS zone_name, c.zone_ref,
                      COUNT(t.id) AS total_tasks,
                      COALESCE(SUM(CASE WHEN t.status = 'updated' THEN 1 ELSE 0 END), 0) AS completed_tasks
               FROM cities c
               LEFT JOIN task_assignments ta ON ta.zone_ref = c.zone_ref
               LEFT JOIN tasks t ON t.id = ta.task_id
               GROUP BY c.id
               ORDER BY completed_tasks DESC, c.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ZonePerformanceRow {
                zone_name: row.get("zone_name"),
                zone_ref: row.get("zone_ref"),
                total_tasks: row.get("total_tasks"),
                completed_tasks: row.get("completed_tasks"),
            })
            .collect())
    }
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    let password_is_hashed: i32 = row.get("password_is_hashed");
    let role_str: String = row.get("role");
    User {
        id: row.get("id"),
        username: row.get("username"),
        password: row.get("password"),
        password_is_hashed: password_is_hashed != 0,
        role: Role::from_str(&role_str).unwrap_or(Role::User),
        zone_ref: row.get("zone_ref"),
        email: row.get("email"),
        last_login: row.get("last_login"),
    }
}

fn zone_from_row(row: &sqlx::sqlite::SqliteRow) -> Zone {
    Zone {
        id: row.get("id"),
        name: row.get("name"),
        zone_ref: row.get("zone_ref"),
    }
}

fn task_from_row(row: &sqlx::sqlite::SqliteRow) -> Task {
    let status_str: String = row.get("status");
    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        due_date: row.get("due_date"),
        status: TaskStatus::from_str(&status_str).unwrap_or(TaskStatus::Pending),
        created_by: row.get("created_by"),
        creator_name: row.get("creator_name"),
        created_at: row.get("created_at"),
        assigned_zones: Vec::new(),
        comments: Vec::new(),
    }
}
