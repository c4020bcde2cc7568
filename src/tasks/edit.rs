//! Edit-task form state and the derivation of a task patch from it.
//!
//! The form holds two radio choices: how the task is due (a date and
//! optional time, or a recurrence rule) and how its reminder is set (a lead
//! time, or an absolute date and time). Only the fields belonging to the
//! selected choice survive into the patch.

use chrono::{NaiveDate, NaiveTime};

use super::model::{Group, ReminderBeforeTask, ReminderSetting, Task};
use crate::api::tasks::PatchTaskParams;
use crate::error::{BujoError, Result};

/// Wire format of dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format of times.
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueType {
    /// Due at a date, optionally with a time.
    DateTime,
    /// Due according to a recurrence rule.
    Recurrence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderType {
    /// Remind a fixed lead time before the due time.
    RemindBefore,
    /// Remind at an absolute date and time.
    ReminderDate,
}

/// A picker's reported value: never touched, explicitly cleared, or set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue<T> {
    #[default]
    Untouched,
    Cleared,
    Set(T),
}

/// Values collected from the form controls on submit.
///
/// `None` means the control was left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditValues {
    pub task_name: Option<String>,
    pub assignees: Option<Vec<String>>,
    pub due_date: FieldValue<String>,
    pub due_time: FieldValue<String>,
    pub timezone: Option<String>,
    /// Raw text of the duration input, in minutes.
    pub duration: Option<String>,
    pub reminder_date: Option<String>,
    pub reminder_time: Option<String>,
    pub remind_before: Option<ReminderBeforeTask>,
    pub labels: Option<Vec<i64>>,
}

/// State of an open edit-task form.
#[derive(Debug, Clone)]
pub struct EditTaskForm {
    task: Task,
    due_type: DueType,
    reminder_type: ReminderType,
    generated_rule: Option<String>,
}

impl EditTaskForm {
    /// Open the form for `task`, deriving the initial radio choices from it.
    pub fn open(task: Task) -> Self {
        let due_type = if task.recurrence_rule.is_some() {
            DueType::Recurrence
        } else {
            DueType::DateTime
        };
        let reminder_type = if task.reminder_setting.date.is_some() {
            ReminderType::ReminderDate
        } else {
            ReminderType::RemindBefore
        };
        Self {
            task,
            due_type,
            reminder_type,
            generated_rule: None,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn due_type(&self) -> DueType {
        self.due_type
    }

    pub fn reminder_type(&self) -> ReminderType {
        self.reminder_type
    }

    /// Choose how the task is due. Recurring tasks can only be reminded a
    /// lead time before each occurrence.
    pub fn select_due_type(&mut self, due_type: DueType) {
        self.due_type = due_type;
        if due_type == DueType::Recurrence {
            self.reminder_type = ReminderType::RemindBefore;
        }
    }

    /// Choose how the reminder is set. Ignored while the task recurs.
    pub fn select_reminder_type(&mut self, reminder_type: ReminderType) {
        if self.due_type == DueType::Recurrence && reminder_type == ReminderType::ReminderDate {
            tracing::debug!("absolute reminders are unavailable for recurring tasks");
            return;
        }
        self.reminder_type = reminder_type;
    }

    /// Replace the task's recurrence rule with one built in the rule editor.
    pub fn edit_recurrence(&mut self, rule: impl Into<String>) {
        self.generated_rule = Some(rule.into());
    }

    /// The rule that would be submitted for a recurring task.
    pub fn recurrence_rule(&self) -> Option<&str> {
        self.generated_rule
            .as_deref()
            .or(self.task.recurrence_rule.as_deref())
    }

    /// Assignee list for "select all": every accepted member of the group.
    pub fn select_all_assignees(group: Option<&Group>) -> Vec<String> {
        group.map(Group::accepted_user_names).unwrap_or_default()
    }

    /// Assignee list for "clear all".
    pub fn clear_all_assignees() -> Vec<String> {
        Vec::new()
    }

    /// Validate `values` and derive the patch to send for this task.
    ///
    /// # Errors
    ///
    /// Returns [`BujoError::Validation`] for a non-numeric duration or a
    /// malformed date or time.
    pub fn submit(&self, values: TaskEditValues) -> Result<PatchTaskParams> {
        let task = &self.task;

        let mut due_date = match values.due_date {
            FieldValue::Set(date) => Some(check_date("due date", date)?),
            FieldValue::Untouched | FieldValue::Cleared => task.due_date.clone(),
        };
        let mut due_time = match values.due_time {
            FieldValue::Set(time) => Some(check_time("due time", time)?),
            FieldValue::Untouched => task.due_time.clone(),
            FieldValue::Cleared => None,
        };
        let mut recurrence_rule = self.recurrence_rule().map(str::to_owned);
        match self.due_type {
            DueType::Recurrence => {
                due_date = None;
                due_time = None;
            }
            DueType::DateTime => recurrence_rule = None,
        }

        let duration = values.duration.as_deref().map(parse_duration).transpose()?.flatten();

        let mut reminder_setting = ReminderSetting {
            date: values
                .reminder_date
                .map(|d| check_date("reminder date", d))
                .transpose()?,
            time: values
                .reminder_time
                .map(|t| check_time("reminder time", t))
                .transpose()?,
            before: values.remind_before.or(task.reminder_setting.before),
        };
        match self.reminder_type {
            ReminderType::RemindBefore => {
                reminder_setting.date = None;
                reminder_setting.time = None;
            }
            ReminderType::ReminderDate => reminder_setting.before = None,
        }

        Ok(PatchTaskParams {
            timezone: values.timezone.unwrap_or_else(|| task.timezone.clone()),
            name: values.task_name,
            assignees: values.assignees,
            due_date,
            due_time,
            duration,
            reminder_setting: Some(reminder_setting),
            recurrence_rule,
            labels: values.labels,
        })
    }
}

/// Parse the duration input: digits only, empty means unset.
fn parse_duration(raw: &str) -> Result<Option<u32>> {
    if raw.is_empty() {
        return Ok(None);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BujoError::Validation("Invalid Duration".into()));
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| BujoError::Validation("Invalid Duration".into()))
}

fn check_date(field: &str, value: String) -> Result<String> {
    match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
        Ok(_) => Ok(value),
        Err(e) => Err(BujoError::Validation(format!("invalid {field} {value:?}: {e}"))),
    }
}

fn check_time(field: &str, value: String) -> Result<String> {
    match NaiveTime::parse_from_str(&value, TIME_FORMAT) {
        Ok(_) => Ok(value),
        Err(e) => Err(BujoError::Validation(format!("invalid {field} {value:?}: {e}"))),
    }
}
