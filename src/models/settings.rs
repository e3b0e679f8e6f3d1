// src/models/settings.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// Preferências por sessão; somem no logout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub profile: Profile,
    pub notifications: NotificationPreferences,
    pub appearance: Appearance,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotifications {
    pub case_updates: bool,
    pub document_uploads: bool,
    pub billing_alerts: bool,
    pub task_reminders: bool,
    pub marketing_emails: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotifications {
    pub case_updates: bool,
    pub document_uploads: bool,
    pub billing_alerts: bool,
    pub task_reminders: bool,
    pub mentions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email: EmailNotifications,
    pub app: AppNotifications,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: EmailNotifications {
                case_updates: true,
                document_uploads: true,
                billing_alerts: true,
                task_reminders: false,
                marketing_emails: false,
            },
            app: AppNotifications {
                case_updates: true,
                document_uploads: true,
                billing_alerts: true,
                task_reminders: true,
                mentions: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub theme: Theme,
    pub font_size: FontSize,
}

impl UserSettings {
    pub fn for_user(name: &str, email: &str) -> Self {
        Self {
            profile: Profile {
                name: name.to_string(),
                email: email.to_string(),
                position: "Attorney".to_string(),
                bio: String::new(),
            },
            notifications: NotificationPreferences::default(),
            appearance: Appearance::default(),
        }
    }

    pub fn apply(&mut self, req: UpdateSettingsRequest) {
        if let Some(profile) = req.profile {
            self.profile = profile;
        }
        if let Some(notifications) = req.notifications {
            self.notifications = notifications;
        }
        if let Some(appearance) = req.appearance {
            self.appearance = appearance;
        }
    }
}

// Cada seção é trocada inteira
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(nested)]
    pub profile: Option<Profile>,
    pub notifications: Option<NotificationPreferences>,
    pub appearance: Option<Appearance>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
    pub confirm_password: String,
}
