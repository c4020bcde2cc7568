//! Task wire types as exchanged with `/api/tasks`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How long before a task's due time its reminder fires.
///
/// Sent over the wire as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReminderBeforeTask {
    /// Code 0.
    ZeroMinutes,
    /// Code 1.
    FiveMinutes,
    /// Code 2.
    TenMinutes,
    /// Code 3.
    ThirtyMinutes,
    /// Code 4.
    OneHour,
    /// Code 5.
    TwoHours,
    /// Code 6: no reminder.
    NoReminder,
}

impl ReminderBeforeTask {
    pub const ALL: [Self; 7] = [
        Self::ZeroMinutes,
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::NoReminder,
    ];

    pub fn code(self) -> u8 {
        match self {
            Self::ZeroMinutes => 0,
            Self::FiveMinutes => 1,
            Self::TenMinutes => 2,
            Self::ThirtyMinutes => 3,
            Self::OneHour => 4,
            Self::TwoHours => 5,
            Self::NoReminder => 6,
        }
    }

    /// Lead time in minutes, `None` when no reminder fires.
    pub fn minutes(self) -> Option<u32> {
        match self {
            Self::ZeroMinutes => Some(0),
            Self::FiveMinutes => Some(5),
            Self::TenMinutes => Some(10),
            Self::ThirtyMinutes => Some(30),
            Self::OneHour => Some(60),
            Self::TwoHours => Some(120),
            Self::NoReminder => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::ZeroMinutes => "0 min before",
            Self::FiveMinutes => "5 min before",
            Self::TenMinutes => "10 min before",
            Self::ThirtyMinutes => "30 min before",
            Self::OneHour => "1 hr before",
            Self::TwoHours => "2 hrs before",
            Self::NoReminder => "None",
        }
    }
}

impl TryFrom<u8> for ReminderBeforeTask {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| format!("unknown reminderBeforeTask code {code}"))
    }
}

impl From<ReminderBeforeTask> for u8 {
    fn from(value: ReminderBeforeTask) -> Self {
        value.code()
    }
}

impl fmt::Display for ReminderBeforeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// When a task's reminder fires: at an absolute date/time, or a lead time
/// before the due time. The form keeps only one of the two populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<ReminderBeforeTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUser {
    pub name: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A user group; only accepted members can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub users: Vec<GroupUser>,
}

impl Group {
    /// Names of members who accepted the invitation, in group order.
    pub fn accepted_user_names(&self) -> Vec<String> {
        self.users
            .iter()
            .filter(|u| u.accepted)
            .map(|u| u.name.clone())
            .collect()
    }
}

/// A task in a TODO project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub assignees: Vec<User>,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// `HH:mm`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    pub timezone: String,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub reminder_setting: ReminderSetting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_codes_round_trip_through_u8() {
        for reminder in ReminderBeforeTask::ALL {
            assert_eq!(ReminderBeforeTask::try_from(reminder.code()), Ok(reminder));
        }
        assert!(ReminderBeforeTask::try_from(7).is_err());
    }

    #[test]
    fn reminder_serializes_as_number() {
        let json = serde_json::to_string(&ReminderBeforeTask::OneHour).expect("serialize");
        assert_eq!(json, "4");
        let err = serde_json::from_str::<ReminderBeforeTask>("9").unwrap_err();
        assert!(err.to_string().contains("unknown reminderBeforeTask code 9"));
    }

    #[test]
    fn reminder_minutes() {
        assert_eq!(ReminderBeforeTask::TwoHours.minutes(), Some(120));
        assert_eq!(ReminderBeforeTask::NoReminder.minutes(), None);
        assert_eq!(ReminderBeforeTask::FiveMinutes.to_string(), "5 min before");
    }

    #[test]
    fn accepted_user_names_skip_pending_invites() {
        let group = Group {
            id: 1,
            name: "family".into(),
            owner: "alice".into(),
            users: vec![
                GroupUser { name: "alice".into(), accepted: true, alias: None, avatar: None },
                GroupUser { name: "bob".into(), accepted: false, alias: None, avatar: None },
                GroupUser { name: "carol".into(), accepted: true, alias: None, avatar: None },
            ],
        };
        assert_eq!(group.accepted_user_names(), vec!["alice", "carol"]);
    }

    #[test]
    fn decodes_task_with_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id":5,"name":"water plants","owner":"alice","timezone":"UTC",
                "dueDate":"2026-10-20","reminderSetting":{"before":1}}"#,
        )
        .expect("deserialize");
        assert_eq!(task.due_date.as_deref(), Some("2026-10-20"));
        assert!(task.due_time.is_none());
        assert_eq!(task.reminder_setting.before, Some(ReminderBeforeTask::FiveMinutes));
        assert!(task.assignees.is_empty());
        assert!(task.labels.is_empty());
    }
}
