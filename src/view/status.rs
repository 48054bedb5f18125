/// Label and color class shown for a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color: &'static str,
}

pub const UNKNOWN: StatusBadge = StatusBadge {
    label: "Desconhecido",
    color: "bg-gray-100 text-gray-800",
};

const CONVERSATION_STATUSES: &[(&str, StatusBadge)] = &[
    ("active", StatusBadge { label: "Ativa", color: "bg-green-100 text-green-800" }),
    ("pending", StatusBadge { label: "Pendente", color: "bg-yellow-100 text-yellow-800" }),
    ("resolved", StatusBadge { label: "Resolvida", color: "bg-blue-100 text-blue-800" }),
];

const USER_STATUSES: &[(&str, StatusBadge)] = &[
    ("active", StatusBadge { label: "Ativo", color: "bg-green-100 text-green-800" }),
    ("inactive", StatusBadge { label: "Inativo", color: "bg-gray-100 text-gray-800" }),
];

fn lookup(table: &[(&str, StatusBadge)], status: &str) -> StatusBadge {
    table
        .iter()
        .find(|(key, _)| *key == status)
        .map(|(_, badge)| *badge)
        .unwrap_or(UNKNOWN)
}

pub fn conversation_badge(status: &str) -> StatusBadge {
    lookup(CONVERSATION_STATUSES, status)
}

pub fn user_badge(status: &str) -> StatusBadge {
    lookup(USER_STATUSES, status)
}

/// Status values offered by the conversation filter, `"all"` first.
pub fn conversation_filter_options() -> impl Iterator<Item = &'static str> {
    std::iter::once("all").chain(CONVERSATION_STATUSES.iter().map(|(k, _)| *k))
}

pub fn user_filter_options() -> impl Iterator<Item = &'static str> {
    std::iter::once("all").chain(USER_STATUSES.iter().map(|(k, _)| *k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses() {
        assert_eq!(conversation_badge("pending").label, "Pendente");
        assert_eq!(conversation_badge("resolved").color, "bg-blue-100 text-blue-800");
        assert_eq!(user_badge("inactive").label, "Inativo");
    }

    #[test]
    fn unknown_status_falls_back() {
        assert_eq!(conversation_badge("archived"), UNKNOWN);
        assert_eq!(conversation_badge(""), UNKNOWN);
        assert_eq!(user_badge("banned").label, "Desconhecido");
    }

    #[test]
    fn filter_options_start_with_all() {
        let opts: Vec<_> = conversation_filter_options().collect();
        assert_eq!(opts, ["all", "active", "pending", "resolved"]);
        assert_eq!(user_filter_options().count(), 3);
    }
}
