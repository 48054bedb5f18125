use std::convert::Infallible;
use std::str::FromStr;

use crate::api::models::{Conversation, User};

/// Reads one text field out of a record.
pub type FieldFn<R> = fn(&R) -> &str;

/// Status selector of a list page: everything, or one exact status value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        if value == "all" { StatusFilter::All } else { StatusFilter::Only(value.to_string()) }
    }

    pub fn accepts(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(s) => s,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StatusFilter::parse(s))
    }
}

/// Which fields of `R` are searched and which one carries the status.
pub struct ListConfig<R: 'static> {
    pub searchable: &'static [FieldFn<R>],
    pub status: FieldFn<R>,
}

impl<R> ListConfig<R> {
    pub fn matches(&self, record: &R, search: &str, filter: &StatusFilter) -> bool {
        self.matches_lowered(record, &search.to_lowercase(), filter)
    }

    fn matches_lowered(&self, record: &R, needle: &str, filter: &StatusFilter) -> bool {
        if !filter.accepts((self.status)(record)) {
            return false;
        }
        needle.is_empty()
            || self
                .searchable
                .iter()
                .any(|field| field(record).to_lowercase().contains(needle))
    }

    /// Records that pass both the search term and the status filter, in
    /// source order. The source slice is never touched.
    pub fn filter<'a>(&self, records: &'a [R], search: &str, filter: &StatusFilter) -> Vec<&'a R> {
        let needle = search.to_lowercase();
        records
            .iter()
            .filter(|r| self.matches_lowered(r, &needle, filter))
            .collect()
    }
}

fn user_name(u: &User) -> &str {
    &u.name
}

fn user_phone(u: &User) -> &str {
    &u.phone
}

fn user_email(u: &User) -> &str {
    u.email.as_deref().unwrap_or("")
}

fn user_status(u: &User) -> &str {
    u.status()
}

fn conversation_name(c: &Conversation) -> &str {
    &c.name
}

fn conversation_phone(c: &Conversation) -> &str {
    &c.phone
}

fn conversation_last_message(c: &Conversation) -> &str {
    &c.last_message
}

fn conversation_status(c: &Conversation) -> &str {
    &c.status
}

/// Users are searched by name, phone and email; status is derived from `is_active`.
pub const USERS: ListConfig<User> = ListConfig {
    searchable: &[user_name, user_phone, user_email],
    status: user_status,
};

pub const CONVERSATIONS: ListConfig<Conversation> = ListConfig {
    searchable: &[conversation_name, conversation_phone, conversation_last_message],
    status: conversation_status,
};
