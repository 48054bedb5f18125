use chrono::{DateTime, Utc};

use crate::api::models::User;
use crate::api::{ApiClient, ApiError, QueryParams};
use crate::pages::{Loadable, StatCard};
use crate::sample;
use crate::view::aggregate::{count_where, sum_by};
use crate::view::format::{format_count, format_date, relative_time};
use crate::view::status::{StatusBadge, user_badge};
use crate::view::{StatusFilter, USERS};

pub const LOAD_FAILED: &str = "Erro ao carregar usuários";

/// One rendered user card.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub badge: StatusBadge,
    pub joined: String,
    pub last_seen: String,
    pub conversations: u32,
    pub messages: u32,
}

pub struct UsersPage {
    users: Loadable<Vec<User>>,
    pub search: String,
    pub status: StatusFilter,
}

impl Default for UsersPage {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersPage {
    pub fn new() -> Self {
        Self::with_users(sample::users())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self { users: Loadable::new(users), search: String::new(), status: StatusFilter::All }
    }

    pub fn users(&self) -> &[User] {
        self.users.get()
    }

    pub fn is_loading(&self) -> bool {
        self.users.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.users.error()
    }

    /// Fetches the first hundred users; keeps the current list on failure.
    pub async fn load(&mut self, client: &ApiClient) -> bool {
        self.begin_load();
        let result = Self::fetch(client).await;
        self.apply(result)
    }

    pub fn begin_load(&mut self) {
        self.users.begin_load();
    }

    /// The request behind [`UsersPage::load`]. It borrows only the client, so
    /// the page can be read and its search/status edited while it runs.
    pub async fn fetch(client: &ApiClient) -> Result<Vec<User>, ApiError> {
        let params = QueryParams::new().with("skip", 0).with("limit", 100);
        client.get_users(&params).await
    }

    pub fn apply(&mut self, result: Result<Vec<User>, ApiError>) -> bool {
        self.users.finish_load(result, LOAD_FAILED)
    }

    pub fn visible(&self) -> Vec<&User> {
        USERS.filter(self.users.get(), &self.search, &self.status)
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<UserRow> {
        self.visible()
            .into_iter()
            .map(|u| UserRow {
                id: u.id.clone(),
                name: u.name.clone(),
                phone: u.phone.clone(),
                email: u.email.clone().unwrap_or_default(),
                badge: user_badge(u.status()),
                joined: format_date(u.created_at),
                last_seen: relative_time(u.last_seen(), now),
                conversations: u.conversation_count,
                messages: u.total_messages,
            })
            .collect()
    }

    /// Header cards. Always computed over the full list, not the filtered one.
    pub fn cards(&self) -> Vec<StatCard> {
        let users = self.users.get();
        let active = count_where(users, |u| u.is_active) as u64;
        let conversations = sum_by(users, |u| u64::from(u.conversation_count));
        vec![
            StatCard::new("Total de Usuários", format_count(users.len() as u64)),
            StatCard::new("Usuários Ativos", format_count(active)),
            StatCard::new("Total de Conversas", format_count(conversations)),
        ]
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.get().iter().find(|u| u.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cards_ignore_filter() {
        let mut page = UsersPage::new();
        page.status = StatusFilter::parse("inactive");
        page.search = "maria".into();
        assert_eq!(page.visible().len(), 1);
        let cards = page.cards();
        assert_eq!(cards[0].value, "5");
        assert_eq!(cards[1].value, "3");
        assert_eq!(cards[2].value, "19");
    }

    #[test]
    fn rows_carry_display_strings() {
        let page = UsersPage::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 45, 0).unwrap();
        let rows = page.rows(now);
        assert_eq!(rows[0].joined, "10/01/2024");
        assert_eq!(rows[0].last_seen, "2h atrás");
        assert_eq!(rows[0].badge.label, "Ativo");
        assert_eq!(rows[2].badge.label, "Inativo");
        assert_eq!(rows[4].last_seen, "30 min atrás");
    }
}
