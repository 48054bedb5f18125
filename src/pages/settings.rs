use std::fmt;
use std::str::FromStr;

use log::info;
use serde_json::Value;
use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::api::models::{SettingValue, Settings};
use crate::pages::Loadable;
use crate::sample;

pub const SAVE_FAILED: &str = "Erro ao salvar configurações";
const MASK: &str = "••••••••";

#[derive(Debug, Error, PartialEq)]
pub enum SettingsEditError {
    #[error("unknown settings group: {0}")]
    UnknownGroup(String),
    #[error("{field} expects a {expected} value")]
    TypeMismatch { field: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsTab {
    #[default]
    General,
    WhatsApp,
    Ai,
    Notifications,
    Security,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::General,
        SettingsTab::WhatsApp,
        SettingsTab::Ai,
        SettingsTab::Notifications,
        SettingsTab::Security,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SettingsTab::General => "general",
            SettingsTab::WhatsApp => "whatsapp",
            SettingsTab::Ai => "ai",
            SettingsTab::Notifications => "notifications",
            SettingsTab::Security => "security",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SettingsTab::General => "Geral",
            SettingsTab::WhatsApp => "WhatsApp",
            SettingsTab::Ai => "IA",
            SettingsTab::Notifications => "Notificações",
            SettingsTab::Security => "Segurança",
        }
    }
}

impl fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingsTab {
    type Err = SettingsEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsTab::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| SettingsEditError::UnknownGroup(s.to_string()))
    }
}

fn kind_of(value: &SettingValue) -> &'static str {
    match value {
        SettingValue::Flag(_) => "boolean",
        SettingValue::Integer(_) => "integer",
        SettingValue::Number(_) => "number",
        SettingValue::Text(_) => "text",
    }
}

fn is_secret(field: &str) -> bool {
    let lower = field.to_ascii_lowercase();
    lower.ends_with("token") || lower.ends_with("key")
}

/// Converts raw input into a value of the same kind as `current`.
fn coerce(field: &str, current: Option<&SettingValue>, raw: &str) -> Result<SettingValue, SettingsEditError> {
    let mismatch = |expected| SettingsEditError::TypeMismatch { field: field.to_string(), expected };
    match current {
        Some(SettingValue::Flag(_)) => raw.parse().map(SettingValue::Flag).map_err(|_| mismatch("boolean")),
        Some(SettingValue::Integer(_)) => raw.parse().map(SettingValue::Integer).map_err(|_| mismatch("integer")),
        Some(SettingValue::Number(_)) => raw.parse().map(SettingValue::Number).map_err(|_| mismatch("number")),
        Some(SettingValue::Text(_)) | None => Ok(SettingValue::Text(raw.to_string())),
    }
}

pub struct SettingsPage {
    settings: Settings,
    pub tab: SettingsTab,
    save: Loadable<bool>,
    edited_while_saving: bool,
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPage {
    pub fn new() -> Self {
        Self::with_settings(sample::settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            tab: SettingsTab::default(),
            save: Loadable::new(false),
            edited_while_saving: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Edits one field. A field that already exists keeps its kind.
    pub fn set(&mut self, group: &str, field: &str, value: SettingValue) -> Result<(), SettingsEditError> {
        let entries = self
            .settings
            .group_mut(group)
            .ok_or_else(|| SettingsEditError::UnknownGroup(group.to_string()))?;
        if let Some(current) = entries.get(field) {
            let expected = kind_of(current);
            if expected != kind_of(&value) {
                return Err(SettingsEditError::TypeMismatch { field: field.to_string(), expected });
            }
        }
        entries.insert(field.to_string(), value);
        self.edited_while_saving = self.save.is_loading();
        self.save.replace(false);
        Ok(())
    }

    pub fn set_from_str(&mut self, group: &str, field: &str, raw: &str) -> Result<(), SettingsEditError> {
        let current = self
            .settings
            .group(group)
            .ok_or_else(|| SettingsEditError::UnknownGroup(group.to_string()))?
            .get(field);
        let value = coerce(field, current, raw)?;
        self.set(group, field, value)
    }

    /// Sends the whole settings object in one update call.
    pub async fn save(&mut self, client: &ApiClient) -> bool {
        let snapshot = self.begin_save();
        let result = Self::send(client, &snapshot).await;
        self.finish_save(result)
    }

    /// Enters the saving state and returns the settings to send.
    pub fn begin_save(&mut self) -> Settings {
        self.save.begin_load();
        self.edited_while_saving = false;
        self.settings.clone()
    }

    pub async fn send(client: &ApiClient, settings: &Settings) -> Result<(), ApiError> {
        client.update_settings::<Settings, Value>(settings).await.map(|_| ())
    }

    pub fn finish_save(&mut self, result: Result<(), ApiError>) -> bool {
        // An edit made mid-flight is not part of what the server stored.
        let saved = !self.edited_while_saving;
        let ok = self.save.finish_load(result.map(|()| saved), SAVE_FAILED);
        if ok {
            info!("settings saved");
        }
        ok
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_loading()
    }

    pub fn is_saved(&self) -> bool {
        *self.save.get()
    }

    pub fn error(&self) -> Option<&str> {
        self.save.error()
    }

    /// Field/value pairs of the active tab, secrets masked.
    ///
    /// The security tab has no settings group; it shows the session token
    /// (masked) when one is given.
    pub fn fields(&self, session_token: Option<&str>) -> Vec<(String, String)> {
        if self.tab == SettingsTab::Security {
            let token = session_token.map(|_| MASK).unwrap_or("-");
            return vec![("authToken".to_string(), token.to_string())];
        }
        self.settings
            .group(self.tab.id())
            .map(|entries| {
                entries
                    .iter()
                    .map(|(k, v)| {
                        let shown = if is_secret(k) { MASK.to_string() } else { v.to_string() };
                        (k.clone(), shown)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_keep_value_kinds() {
        let mut page = SettingsPage::new();
        page.set_from_str("ai", "maxTokens", "200").unwrap();
        assert_eq!(page.settings().ai["maxTokens"], SettingValue::Integer(200));

        let err = page.set_from_str("ai", "temperature", "warm").unwrap_err();
        assert!(matches!(err, SettingsEditError::TypeMismatch { .. }));

        let err = page.set("general", "autoResponse", SettingValue::Text("yes".into())).unwrap_err();
        assert_eq!(err.to_string(), "autoResponse expects a boolean value");

        assert_eq!(
            page.set_from_str("billing", "plan", "pro"),
            Err(SettingsEditError::UnknownGroup("billing".into()))
        );
    }

    #[test]
    fn new_fields_are_text() {
        let mut page = SettingsPage::new();
        page.set_from_str("general", "footer", "Obrigado!").unwrap();
        assert_eq!(page.settings().general["footer"], SettingValue::Text("Obrigado!".into()));
    }

    #[test]
    fn secrets_are_masked() {
        let mut page = SettingsPage::new();
        page.tab = SettingsTab::WhatsApp;
        let fields = page.fields(None);
        assert!(fields.iter().all(|(_, v)| v == MASK || !v.starts_with("seu_token")));
        let token = fields.iter().find(|(k, _)| k == "token").unwrap();
        assert_eq!(token.1, MASK);
        let phone = fields.iter().find(|(k, _)| k == "phoneNumberId").unwrap();
        assert_eq!(phone.1, "seu_phone_id_aqui");

        page.tab = SettingsTab::Security;
        assert_eq!(page.fields(Some("abc"))[0].1, MASK);
        assert_eq!(page.fields(None)[0].1, "-");
    }

    #[test]
    fn edit_during_save_is_not_marked_saved() {
        let mut page = SettingsPage::new();
        let snapshot = page.begin_save();
        page.set_from_str("ai", "maxTokens", "300").unwrap();
        assert!(page.is_saving());
        assert_eq!(snapshot.ai["maxTokens"], SettingValue::Integer(150));

        assert!(page.finish_save(Ok(())));
        assert!(!page.is_saved());
        assert_eq!(page.error(), None);

        page.begin_save();
        assert!(page.finish_save(Ok(())));
        assert!(page.is_saved());
    }

    #[test]
    fn tabs_parse_by_id() {
        assert_eq!("ai".parse::<SettingsTab>().unwrap(), SettingsTab::Ai);
        assert!("billing".parse::<SettingsTab>().is_err());
        assert_eq!(SettingsTab::ALL.len(), 5);
    }
}
