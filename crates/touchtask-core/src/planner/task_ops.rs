//! Task ledger operations for the Planner.

use log::info;

use super::{non_empty, Planner};
use crate::{
    display::{TaskBoard, UpdateResult},
    error::{PlannerError, Result},
    ids::generate_id,
    models::{Column, LedgerTask},
    params::{CreateTask, Id, MoveTask, UpdateTask},
};

fn task_not_found(id: &str) -> PlannerError {
    PlannerError::TaskNotFound { id: id.to_string() }
}

impl Planner {
    /// Adds a task to the ledger. Tasks created straight into the done
    /// column are stamped as completed now.
    pub async fn create_task(&self, params: &CreateTask) -> Result<LedgerTask> {
        let now = self.now().timestamp();
        let task = LedgerTask {
            id: generate_id(),
            title: non_empty("title", &params.title)?,
            category: params.category.clone().unwrap_or_default(),
            priority: params.priority,
            column: params.column,
            time_logged_minutes: params.time_logged_minutes,
            created_at: now,
            completed_at: (params.column == Column::Done).then_some(now),
        };

        self.with_database(move |db, _| {
            db.create_task(&task)?;
            info!("Created task {} ({})", task.title, task.id);
            Ok(task)
        })
        .await
    }

    pub async fn get_task(&self, params: &Id) -> Result<Option<LedgerTask>> {
        let id = params.id.clone();
        self.with_database(move |db, _| db.get_task(&id)).await
    }

    /// Every task, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<LedgerTask>> {
        self.with_database(|db, _| db.list_tasks()).await
    }

    /// Every task grouped by column in board order.
    pub async fn task_board(&self) -> Result<TaskBoard> {
        Ok(TaskBoard::new(self.list_tasks().await?))
    }

    /// Edits a task's details. Logged time set here may be lower than
    /// before; the timer only ever adds to it.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<UpdateResult<LedgerTask>> {
        let title = params
            .title
            .as_deref()
            .map(|title| non_empty("title", title))
            .transpose()?;
        let params = params.clone();

        self.with_database(move |db, _| {
            let mut changes = Vec::new();
            let task = db.modify_task(&params.id, |mut task| {
                if let Some(title) = title {
                    task.title = title;
                    changes.push("Updated title".to_string());
                }
                if let Some(category) = params.category {
                    task.category = category;
                    changes.push("Updated category".to_string());
                }
                if let Some(priority) = params.priority {
                    task.priority = priority;
                    changes.push(format!("Priority set to {priority}"));
                }
                if let Some(minutes) = params.time_logged_minutes {
                    task.time_logged_minutes = minutes;
                    changes.push(format!("Logged time set to {minutes} min"));
                }
                task
            })?;
            Ok(UpdateResult::with_changes(task, changes))
        })
        .await
    }

    /// Moves a task to another column, stamping `completed_at` when it
    /// enters the done column and clearing it when it leaves.
    pub async fn move_task(&self, params: &MoveTask) -> Result<LedgerTask> {
        let id = params.id.clone();
        let column = params.column;

        self.with_database(move |db, now| {
            let stamp = now.timestamp();
            db.modify_task(&id, |task| task.moved_to(column, stamp))
        })
        .await
    }

    pub async fn delete_task(&self, params: &Id) -> Result<LedgerTask> {
        let id = params.id.clone();

        self.with_database(move |db, _| {
            let task = db.get_task(&id)?.ok_or_else(|| task_not_found(&id))?;
            db.delete_task(&id)?;
            info!("Deleted task {} ({})", task.title, task.id);
            Ok(task)
        })
        .await
    }

    /// Deletes every task in the done column and returns how many went.
    pub async fn clear_done_tasks(&self) -> Result<usize> {
        self.with_database(|db, _| {
            let removed = db.delete_done_tasks()?;
            info!("Cleared {removed} done tasks");
            Ok(removed)
        })
        .await
    }
}
