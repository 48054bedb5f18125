use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{deserialize_opt_timestamp, deserialize_timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub is_active: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub conversation_count: u32,
    #[serde(default)]
    pub total_messages: u32,
}

impl User {
    /// Last activity, or the creation time for users that never interacted.
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_activity.unwrap_or(self.created_at)
    }

    pub fn status(&self) -> &'static str {
        if self.is_active { "active" } else { "inactive" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub phone: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: String,
    #[serde(default)]
    pub last_message: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_activity: DateTime<Utc>,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A conversation as `/conversations` returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub user_name: String,
    pub user_phone: String,
    pub status: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub unread_count: u32,
}

impl From<ConversationResponse> for Conversation {
    fn from(r: ConversationResponse) -> Self {
        Self {
            id: r.id,
            phone: r.user_phone,
            name: r.user_name,
            email: None,
            status: r.status,
            last_message: String::new(),
            last_activity: r.last_message_at.unwrap_or(r.updated_at),
            message_count: r.message_count,
            unread_count: r.unread_count,
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub from_customer: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// A display-only figure such as "Resolução Automática: 78".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetric {
    pub name: String,
    pub value: f64,
    pub color: String,
}

impl AggregatedMetric {
    pub fn new(name: &str, value: f64, color: &str) -> Self {
        Self { name: name.to_string(), value, color: color.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Flag(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

pub type SettingsGroup = BTreeMap<String, SettingValue>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub general: SettingsGroup,
    #[serde(default)]
    pub whatsapp: SettingsGroup,
    #[serde(default)]
    pub ai: SettingsGroup,
    #[serde(default)]
    pub notifications: SettingsGroup,
}

impl Settings {
    pub fn group(&self, name: &str) -> Option<&SettingsGroup> {
        match name {
            "general" => Some(&self.general),
            "whatsapp" => Some(&self.whatsapp),
            "ai" => Some(&self.ai),
            "notifications" => Some(&self.notifications),
            _ => None,
        }
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut SettingsGroup> {
        match name {
            "general" => Some(&mut self.general),
            "whatsapp" => Some(&mut self.whatsapp),
            "ai" => Some(&mut self.ai),
            "notifications" => Some(&mut self.notifications),
            _ => None,
        }
    }
}

// Auth

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user: serde_json::Value,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenCheck {
    pub valid: bool,
    #[serde(default)]
    pub user: serde_json::Value,
}

// Users

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_conversations: u64,
    pub total_messages: u64,
}

// Analytics

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsOverview {
    pub total_users: u64,
    pub active_users: u64,
    pub total_conversations: u64,
    pub active_conversations: u64,
    pub total_messages: u64,
    pub messages_today: u64,
    pub response_time_avg: f64,
    pub satisfaction_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageTrend {
    pub date: String,
    pub inbound_messages: u64,
    pub outbound_messages: u64,
    pub total_messages: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserActivity {
    pub date: String,
    pub new_users: u64,
    pub active_users: u64,
    pub returning_users: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationMetrics {
    pub total_conversations: u64,
    pub active_conversations: u64,
    pub closed_conversations: u64,
    pub pending_conversations: u64,
    pub avg_conversation_duration: f64,
    pub avg_messages_per_conversation: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseTimes {
    pub avg_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    #[serde(default)]
    pub response_time_percentiles: BTreeMap<String, f64>,
}

/// One point of a weekday series on the dashboard and analytics charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub messages: u64,
    pub conversations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: String,
    pub messages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimePoint {
    pub name: String,
    pub avg_time: f64,
}

// Settings diagnostics

#[derive(Debug, Clone, Serialize)]
pub struct AiTestRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiTestResponse {
    pub input_message: String,
    pub ai_response: String,
    pub processing_time: f64,
    pub model_used: String,
    pub tokens_used: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhatsAppTestRequest {
    pub phone_number: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppTestResponse {
    pub success: bool,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn user_from_backend_json() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "name": "João Silva",
            "phone": "+5585999999999",
            "email": null,
            "is_active": true,
            "created_at": "2024-01-12T14:20:00",
            "updated_at": "2024-01-12T14:20:00",
            "conversation_count": 3
        }))
        .unwrap();
        assert_eq!(user.email, None);
        assert_eq!(user.last_activity, None);
        assert_eq!(user.last_seen(), user.created_at);
        assert_eq!(user.total_messages, 0);
        assert_eq!(user.status(), "active");
    }

    #[test]
    fn conversation_from_backend_json() {
        let raw = json!({
            "id": "c1",
            "user_id": "u1",
            "user_name": "Ana",
            "user_phone": "+5585",
            "status": "active",
            "created_at": "2024-01-14T08:00:00.123456",
            "updated_at": "2024-01-15T09:30:00",
            "last_message_at": null,
            "message_count": 2
        });
        let conv: Conversation = serde_json::from_value::<ConversationResponse>(raw).unwrap().into();
        assert_eq!(conv.name, "Ana");
        assert_eq!(conv.phone, "+5585");
        assert_eq!(conv.last_message, "");
        assert_eq!(conv.last_activity, Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());
        assert_eq!(conv.unread_count, 0);
        assert!(conv.tags.is_empty());

        let raw = json!({
            "id": "c2",
            "user_id": "u2",
            "user_name": "Bruno",
            "user_phone": "+5511",
            "status": "pending",
            "created_at": "2024-01-14T08:00:00",
            "updated_at": "2024-01-15T09:30:00",
            "last_message_at": "2024-01-15T09:10:00"
        });
        let conv: Conversation = serde_json::from_value::<ConversationResponse>(raw).unwrap().into();
        assert_eq!(conv.last_activity, Utc.with_ymd_and_hms(2024, 1, 15, 9, 10, 0).unwrap());
    }

    #[test]
    fn settings_values_keep_their_kind() {
        let settings: Settings = serde_json::from_value(json!({
            "general": {"platformName": "WhatsApp Platform", "autoResponse": true},
            "ai": {"maxTokens": 150, "temperature": 0.7}
        }))
        .unwrap();
        assert_eq!(settings.general["autoResponse"], SettingValue::Flag(true));
        assert_eq!(settings.ai["maxTokens"], SettingValue::Integer(150));
        assert_eq!(settings.ai["temperature"], SettingValue::Number(0.7));
        assert!(settings.notifications.is_empty());
        assert!(settings.group("security").is_none());
    }

    #[test]
    fn user_update_skips_unset_fields() {
        let update = UserUpdate { is_active: Some(false), ..Default::default() };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"is_active": false}));
    }
}
