//! One state object per console page.
//!
//! Pages start from sample data. A load replaces the held data wholesale when
//! it succeeds and leaves it alone when it fails, recording an error message
//! for the page to show instead.

use std::fmt::Display;

use log::error;

pub mod analytics;
pub mod conversations;
pub mod dashboard;
pub mod settings;
pub mod users;

pub use analytics::{AnalyticsPage, TimeRange};
pub use conversations::ConversationsPage;
pub use dashboard::DashboardPage;
pub use settings::{SettingsPage, SettingsTab};
pub use users::UsersPage;

/// Data held by a page together with its load state.
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    data: T,
    loading: bool,
    error: Option<String>,
}

impl<T> Loadable<T> {
    pub fn new(initial: T) -> Self {
        Self { data: initial, loading: false, error: None }
    }

    pub fn get(&self) -> &T {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Applies a finished load. On failure the previous data stays and
    /// `failure` becomes the visible error; returns whether it succeeded.
    pub fn finish_load<E: Display>(&mut self, result: Result<T, E>, failure: &str) -> bool {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
                true
            }
            Err(e) => {
                error!("{}: {}", failure, e);
                self.error = Some(failure.to_string());
                false
            }
        }
    }

    pub fn replace(&mut self, data: T) {
        self.data = data;
    }
}

/// A headline figure on the dashboard or analytics page.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub trend: Option<&'static str>,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl Into<String>) -> Self {
        Self { title, value: value.into(), trend: None }
    }

    pub fn with_trend(mut self, trend: &'static str) -> Self {
        self.trend = Some(trend);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_load_keeps_previous_data() {
        let mut slot = Loadable::new(vec![1, 2, 3]);
        slot.begin_load();
        assert!(slot.is_loading());
        let ok = slot.finish_load(Err::<Vec<i32>, _>("boom"), "Erro ao carregar");
        assert!(!ok);
        assert!(!slot.is_loading());
        assert_eq!(slot.get(), &vec![1, 2, 3]);
        assert_eq!(slot.error(), Some("Erro ao carregar"));
    }

    #[test]
    fn successful_load_replaces_and_clears_error() {
        let mut slot = Loadable::new(vec![1]);
        slot.finish_load(Err::<Vec<i32>, _>("boom"), "Erro");
        slot.begin_load();
        assert_eq!(slot.error(), None);
        assert!(slot.finish_load(Ok::<_, String>(vec![9]), "Erro"));
        assert_eq!(slot.get(), &vec![9]);
        assert_eq!(slot.error(), None);
    }
}
