use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Member account. State changes return an updated copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub phone: String,
    pub last_login_date: Option<NaiveDateTime>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
}

impl Member {
    pub fn login(&self, refresh_token: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            last_login_date: Some(now),
            refresh_token: Some(refresh_token.into()),
            ..self.clone()
        }
    }

    pub fn logout(&self, now: NaiveDateTime) -> Self {
        Self {
            last_login_date: Some(now),
            refresh_token: None,
            ..self.clone()
        }
    }

    /// A missing or blank `password` keeps the current one.
    pub fn update(&self, password: Option<&str>, name: &str, phone: &str) -> Self {
        let password = match password {
            Some(p) if !p.trim().is_empty() => p.to_string(),
            _ => self.password.clone(),
        };

        Self {
            password,
            name: name.to_string(),
            phone: phone.to_string(),
            ..self.clone()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.refresh_token.is_some()
    }
}
