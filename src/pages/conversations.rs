use chrono::{DateTime, Utc};

use crate::api::models::{Conversation, ConversationResponse, Message};
use crate::api::{ApiClient, ApiError, QueryParams};
use crate::pages::Loadable;
use crate::sample;
use crate::view::format::relative_time;
use crate::view::status::{StatusBadge, conversation_badge};
use crate::view::{CONVERSATIONS, StatusFilter};

pub const LOAD_FAILED: &str = "Erro ao carregar conversas";

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub badge: StatusBadge,
    pub last_message: String,
    pub time: String,
    pub messages: String,
    pub unread: u32,
    pub tags: Vec<String>,
    pub selected: bool,
}

impl ConversationRow {
    pub fn new(c: &Conversation, now: DateTime<Utc>, selected: bool) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            phone: c.phone.clone(),
            badge: conversation_badge(&c.status),
            last_message: c.last_message.clone(),
            time: relative_time(c.last_activity, now),
            messages: format!("{} mensagens", c.message_count),
            unread: c.unread_count,
            tags: c.tags.clone(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub content: String,
    pub from_customer: bool,
    pub time: String,
}

pub struct ConversationsPage {
    conversations: Loadable<Vec<Conversation>>,
    pub search: String,
    pub status: StatusFilter,
    selected: Option<String>,
    thread: Vec<Message>,
}

impl Default for ConversationsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationsPage {
    pub fn new() -> Self {
        Self::with_conversations(sample::conversations())
    }

    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations: Loadable::new(conversations),
            search: String::new(),
            status: StatusFilter::All,
            selected: None,
            thread: Vec::new(),
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.conversations.get()
    }

    pub fn is_loading(&self) -> bool {
        self.conversations.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.conversations.error()
    }

    pub async fn load(&mut self, client: &ApiClient) -> bool {
        self.begin_load();
        let result = Self::fetch(client).await;
        self.apply(result)
    }

    pub fn begin_load(&mut self) {
        self.conversations.begin_load();
    }

    /// Lists the first hundred conversations, mapped from the backend's shape.
    pub async fn fetch(client: &ApiClient) -> Result<Vec<Conversation>, ApiError> {
        let params = QueryParams::new().with("skip", 0).with("limit", 100);
        let rows = client.get_conversations::<Vec<ConversationResponse>>(&params).await?;
        Ok(rows.into_iter().map(Conversation::from).collect())
    }

    pub fn apply(&mut self, result: Result<Vec<Conversation>, ApiError>) -> bool {
        let ok = self.conversations.finish_load(result, LOAD_FAILED);
        if ok {
            self.drop_stale_selection();
        }
        ok
    }

    /// Clears the selection when its conversation is gone after a reload.
    fn drop_stale_selection(&mut self) {
        let id = self.selected.as_deref();
        let still_listed = id.is_some_and(|id| self.conversations.get().iter().any(|c| c.id == id));
        if !still_listed {
            self.selected = None;
            self.thread.clear();
        }
    }

    pub fn visible(&self) -> Vec<&Conversation> {
        CONVERSATIONS.filter(self.conversations.get(), &self.search, &self.status)
    }

    /// Opens a conversation. Unknown ids leave the current selection alone.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.conversations.get().iter().any(|c| c.id == id) {
            return false;
        }
        let mut thread = sample::messages(id);
        thread.sort_by_key(|m| m.timestamp);
        self.selected = Some(id.to_string());
        self.thread = thread;
        true
    }

    pub fn selected(&self) -> Option<&Conversation> {
        let id = self.selected.as_deref()?;
        self.conversations.get().iter().find(|c| c.id == id)
    }

    pub fn thread(&self) -> &[Message] {
        &self.thread
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<ConversationRow> {
        let selected = self.selected.as_deref();
        self.visible()
            .into_iter()
            .map(|c| ConversationRow::new(c, now, selected == Some(c.id.as_str())))
            .collect()
    }

    pub fn thread_rows(&self, now: DateTime<Utc>) -> Vec<MessageRow> {
        self.thread
            .iter()
            .map(|m| MessageRow {
                content: m.content.clone(),
                from_customer: m.from_customer,
                time: relative_time(m.timestamp, now),
            })
            .collect()
    }

    pub fn unread_total(&self) -> u32 {
        self.conversations.get().iter().map(|c| c.unread_count).sum()
    }
}
