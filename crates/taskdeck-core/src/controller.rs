use tracing::{debug, error, info, instrument, warn};

use crate::api::TaskApi;
use crate::filter::TaskFilters;
use crate::lookup::{DESCRIPTION_MAX, PRIORITY_MAX, PRIORITY_MIN, TITLE_MAX};
use crate::prompt::UserPrompt;
use crate::task::{Status, Task, TaskDraft};

pub const LOAD_FAILED: &str = "Failed to load tasks. Please try again.";
pub const CREATE_FAILED: &str = "Failed to create the task. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update the task. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete the task. Please try again.";

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const TITLE_TOO_LONG: &str = "Title must be 200 characters or fewer.";
pub const DESCRIPTION_REQUIRED: &str = "Description is required.";
pub const DESCRIPTION_TOO_LONG: &str = "Description must be 1000 characters or fewer.";
pub const STATUS_REQUIRED: &str = "Status is required.";
pub const PRIORITY_OUT_OF_RANGE: &str = "Priority must be between 1 and 5.";

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this task?";

/// Owns the task collection, filter state and modal/draft state, and
/// orchestrates the load/create/update/delete flows against the
/// injected API client. Nothing else mutates this state.
#[derive(Debug)]
pub struct TaskListController<A, P> {
    api: A,
    prompt: P,
    pub tasks: Vec<Task>,
    pub filters: TaskFilters,
    pub draft: TaskDraft,
    pub edit_mode: bool,
    editing_id: Option<u64>,
    pub show_modal: bool,
    pub details: Option<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<A: TaskApi, P: UserPrompt> TaskListController<A, P> {
    pub fn new(api: A, prompt: P) -> Self {
        Self {
            api,
            prompt,
            tasks: Vec::new(),
            filters: TaskFilters::default(),
            draft: TaskDraft::default(),
            edit_mode: false,
            editing_id: None,
            show_modal: false,
            details: None,
            loading: false,
            error: None,
        }
    }

    /// Reloads the list from the current filter state. Whichever
    /// response resolves last replaces the collection; in-flight loads
    /// are not sequenced.
    #[instrument(skip(self))]
    pub async fn load_tasks(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_tasks(&self.filters).await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list replaced");
                self.tasks = tasks;
            }
            Err(err) => {
                error!(error = %err, "loading tasks failed");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }

        self.loading = false;
    }

    /// Filters are read from controller state, not passed in.
    pub async fn apply_filters(&mut self) {
        self.load_tasks().await;
    }

    #[instrument(skip(self))]
    pub async fn clear_filters(&mut self) {
        self.filters = TaskFilters::default();
        self.load_tasks().await;
    }

    /// Validates the draft and dispatches create or update according
    /// to the edit-mode flag. Invalid drafts never reach the network.
    #[instrument(skip(self), fields(edit_mode = self.edit_mode))]
    pub async fn save_task(&mut self) {
        if !self.validate_task() {
            return;
        }

        if self.edit_mode {
            let Some(id) = self.editing_id else {
                warn!("edit mode active without a task id; save ignored");
                return;
            };
            let task = self.draft.to_task(Some(id));
            match self.api.update_task(id, &task).await {
                Ok(updated) => {
                    info!(id = ?updated.id, "task updated");
                    self.close_modal();
                    self.load_tasks().await;
                }
                Err(err) => {
                    error!(error = %err, id, "updating task failed");
                    self.error = Some(UPDATE_FAILED.to_string());
                }
            }
        } else {
            let task = self.draft.to_task(None);
            match self.api.create_task(&task).await {
                Ok(created) => {
                    info!(id = ?created.id, "task created");
                    self.close_modal();
                    self.load_tasks().await;
                }
                Err(err) => {
                    error!(error = %err, "creating task failed");
                    self.error = Some(CREATE_FAILED.to_string());
                }
            }
        }
    }

    /// No-op without an id or when the user declines the confirmation.
    /// Returns whether the task was actually deleted.
    #[instrument(skip(self))]
    pub async fn delete_task(&mut self, id: Option<u64>) -> bool {
        let Some(id) = id else {
            debug!("delete requested without an id; ignored");
            return false;
        };

        if !self.prompt.confirm(DELETE_CONFIRM) {
            info!(id, "delete declined by user");
            return false;
        }

        match self.api.delete_task(id).await {
            Ok(()) => {
                info!(id, "task deleted");
                self.load_tasks().await;
                true
            }
            Err(err) => {
                error!(error = %err, id, "deleting task failed");
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }

    pub fn open_create_modal(&mut self) {
        self.draft = TaskDraft::default();
        self.edit_mode = false;
        self.editing_id = None;
        self.show_modal = true;
    }

    /// Copies the task into the draft so in-modal edits do not touch
    /// the list until saved.
    pub fn open_edit_modal(&mut self, task: &Task) {
        self.draft = TaskDraft::from_task(task);
        self.edit_mode = true;
        self.editing_id = task.id;
        self.show_modal = true;
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
        self.draft = TaskDraft::default();
        self.edit_mode = false;
        self.editing_id = None;
        self.error = None;
    }

    pub fn view_task_details(&mut self, task: &Task) {
        self.details = Some(task.clone());
    }

    pub fn close_details_modal(&mut self) {
        self.details = None;
    }

    /// Checks the draft field by field, stopping at the first failure
    /// and reporting it through the prompt. Never mutates the draft.
    pub fn validate_task(&self) -> bool {
        let message = self.first_validation_failure();
        if let Some(message) = message {
            warn!(message, "draft failed validation");
            self.prompt.alert(message);
            return false;
        }
        true
    }

    fn first_validation_failure(&self) -> Option<&'static str> {
        if self.draft.title.trim().is_empty() {
            return Some(TITLE_REQUIRED);
        }
        if self.draft.title.chars().count() > TITLE_MAX {
            return Some(TITLE_TOO_LONG);
        }
        if self.draft.description.trim().is_empty() {
            return Some(DESCRIPTION_REQUIRED);
        }
        if self.draft.description.chars().count() > DESCRIPTION_MAX {
            return Some(DESCRIPTION_TOO_LONG);
        }
        if self.draft.status.is_none() {
            return Some(STATUS_REQUIRED);
        }
        match self.draft.priority {
            Some(p) if (PRIORITY_MIN..=PRIORITY_MAX).contains(&p) => None,
            _ => Some(PRIORITY_OUT_OF_RANGE),
        }
    }

    pub fn task_count_by_status(&self, status: Status) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status == status)
            .count()
    }
}
