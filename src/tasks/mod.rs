//! Tasks: wire model and the edit-form derivation that produces task patches.

pub mod edit;
pub mod model;

pub use edit::{DueType, EditTaskForm, FieldValue, ReminderType, TaskEditValues};
pub use model::{Group, GroupUser, Label, ReminderBeforeTask, ReminderSetting, Task, User};
