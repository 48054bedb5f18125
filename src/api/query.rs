use std::fmt::Display;

use url::form_urlencoded;

/// Ordered query string parameters for list endpoints.
///
/// Pairs are serialized in insertion order; values are stringified with
/// `Display` when added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &str, value: impl Display) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            ser.append_pair(k, v);
        }
        ser.finish()
    }

    /// Appends the query string to `path`, leaving it unchanged when empty.
    pub fn apply(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

impl<K: AsRef<str>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k.as_ref(), v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let q = QueryParams::new().with("skip", 0).with("limit", 100);
        assert_eq!(q.apply("/users"), "/users?skip=0&limit=100");

        let q = QueryParams::new().with("limit", 100).with("skip", 0);
        assert_eq!(q.to_query_string(), "limit=100&skip=0");
    }

    #[test]
    fn empty_params_leave_path_alone() {
        assert_eq!(QueryParams::new().apply("/conversations"), "/conversations");
    }

    #[test]
    fn values_are_form_encoded() {
        let q = QueryParams::new().with("search", "João Silva").with("is_active", true);
        assert_eq!(q.to_query_string(), "search=Jo%C3%A3o+Silva&is_active=true");
    }

    #[test]
    fn collects_from_pairs() {
        let q: QueryParams = [("days", 30)].into_iter().collect();
        assert_eq!(q.apply("/analytics/message-trends"), "/analytics/message-trends?days=30");
    }
}
