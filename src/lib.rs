//! BuJo: client core for a Bullet Journal task manager.
//!
//! This crate holds the non-visual half of the BuJo front end:
//! - **API**: typed calls for the current user, projects and tasks
//! - **Store**: single-writer search state observed through a `watch` channel
//! - **Search saga**: validates terms, fetches pages via `bujo-search` and
//!   keeps only the latest search alive
//! - **Task editing**: derives the task patch request from form input
//! - **Hierarchy**: project relation tree utilities
//!
//! # Architecture
//!
//! The UI dispatches [`SearchAction`]s to a [`SearchSaga`], which writes
//! [`store::StoreMessage`]s to the store actor. Errors meant for the user
//! are routed through a [`notify::Notifier`] and then dropped.

pub mod api;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod notify;
pub mod search_saga;
pub mod store;
pub mod tasks;

pub use api::ApiClient;
pub use api::myself::{Myself, MyselfApi, PatchMyselfParams};
pub use api::projects::{Projects, ProjectsApi, ProjectsFetch};
pub use api::tasks::{PatchTaskParams, TasksApi};
pub use config::BujoConfig;
pub use error::{BujoError, Result};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use search_saga::{SearchAction, SearchOutcome, SearchSaga};
pub use store::{SearchState, Store, StoreHandle, StoreMessage};
pub use tasks::{EditTaskForm, ReminderBeforeTask, Task};
