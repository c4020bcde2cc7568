//! Task endpoints under `/api/tasks`.

use serde::Serialize;

use super::{ApiClient, read_json};
use crate::error::Result;
use crate::tasks::model::{ReminderSetting, Task};

/// Path of a single task.
pub fn task_route(task_id: i64) -> String {
    format!("/api/tasks/{task_id}")
}

/// Body of `PATCH /api/tasks/{id}`.
///
/// Due date, due time and recurrence rule are always sent, as `null` when
/// unset, so the server drops whichever of them the edit no longer uses.
/// The remaining fields are omitted when unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTaskParams {
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_setting: Option<ReminderSetting>,
    pub recurrence_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<i64>>,
}

#[derive(Debug, Clone)]
pub struct TasksApi {
    client: ApiClient,
}

impl TasksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Apply `params` to task `task_id` and return the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn patch_task(&self, task_id: i64, params: &PatchTaskParams) -> Result<Task> {
        tracing::debug!(task_id, "patching task");
        let response = self.client.do_patch(&task_route(task_id), params).await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::model::ReminderBeforeTask;

    #[test]
    fn route_embeds_id() {
        assert_eq!(task_route(17), "/api/tasks/17");
    }

    #[test]
    fn body_sends_nulls_for_due_fields() {
        let params = PatchTaskParams {
            timezone: "UTC".into(),
            recurrence_rule: Some("RRULE:FREQ=DAILY".into()),
            reminder_setting: Some(ReminderSetting {
                before: Some(ReminderBeforeTask::ZeroMinutes),
                ..Default::default()
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "timezone": "UTC",
                "dueDate": null,
                "dueTime": null,
                "reminderSetting": {"before": 0},
                "recurrenceRule": "RRULE:FREQ=DAILY"
            })
        );
    }
}
