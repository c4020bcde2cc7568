//! Account/profile endpoints under `/api/myself`.

use serde::{Deserialize, Serialize};

use super::{ApiClient, read_json};
use crate::error::Result;
use crate::tasks::model::ReminderBeforeTask;

/// Path of the profile resource.
pub const MYSELF_ROUTE: &str = "/api/myself";
/// Path of the logout action.
pub const LOGOUT_ROUTE: &str = "/api/myself/logout";
/// Path of the clear action.
pub const CLEAR_ROUTE: &str = "/api/myself/clear";

/// The signed-in user's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Myself {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_before_task: Option<ReminderBeforeTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Only present on expanded profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_time: Option<bool>,
    /// Only present on expanded profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

/// Settable profile fields. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchMyselfParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_before_task: Option<ReminderBeforeTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl PatchMyselfParams {
    /// Returns `true` when no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.timezone.is_none()
            && self.reminder_before_task.is_none()
            && self.currency.is_none()
            && self.theme.is_none()
    }
}

/// Profile operations.
#[derive(Debug, Clone)]
pub struct MyselfApi {
    client: ApiClient,
}

impl MyselfApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the current profile, optionally the expanded form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn fetch_myself(&self, expand: bool) -> Result<Myself> {
        let path = if expand {
            format!("{MYSELF_ROUTE}?expand=true")
        } else {
            MYSELF_ROUTE.to_owned()
        };
        let response = self.client.do_fetch(&path).await?;
        read_json(response).await
    }

    /// End the server session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn logout_user(&self) -> Result<()> {
        self.client
            .do_post(LOGOUT_ROUTE, Some(&serde_json::json!({})))
            .await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Update settable profile fields and return the updated profile.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn patch_myself(&self, params: &PatchMyselfParams) -> Result<Myself> {
        tracing::debug!(?params, "patching profile");
        let response = self.client.do_patch(MYSELF_ROUTE, params).await?;
        read_json(response).await
    }

    /// Reset server-side profile state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BujoError::Api`] with the upstream message on failure.
    pub async fn clear_myself(&self) -> Result<()> {
        self.client
            .do_post::<serde_json::Value>(CLEAR_ROUTE, None)
            .await?;
        Ok(())
    }
}
