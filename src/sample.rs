//! Seed data the pages show before (or instead of) a backend load.

use chrono::{DateTime, Utc};

use crate::api::models::{
    AggregatedMetric, ChartPoint, Conversation, HourlyPoint, Message, ResponseTimePoint,
    SettingValue, Settings, SettingsGroup, User,
};
use crate::utils::parse_timestamp;

fn ts(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    phone: &str,
    email: &str,
    is_active: bool,
    created_at: &str,
    last_activity: &str,
    conversation_count: u32,
    total_messages: u32,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some(email.to_string()),
        is_active,
        created_at: ts(created_at),
        last_activity: Some(ts(last_activity)),
        conversation_count,
        total_messages,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(
            "user-001",
            "Cliente Teste",
            "+5585987049663",
            "cliente@teste.com",
            true,
            "2024-01-10T10:30:00Z",
            "2024-01-15T10:30:00Z",
            5,
            25,
        ),
        user(
            "user-002",
            "João Silva",
            "+5585999999999",
            "joao@email.com",
            true,
            "2024-01-12T14:20:00Z",
            "2024-01-15T09:15:00Z",
            3,
            12,
        ),
        user(
            "user-003",
            "Maria Santos",
            "+5585888888888",
            "maria@email.com",
            false,
            "2024-01-08T16:45:00Z",
            "2024-01-14T08:45:00Z",
            8,
            35,
        ),
        user(
            "user-004",
            "Pedro Costa",
            "+5585777777777",
            "pedro@email.com",
            false,
            "2024-01-13T11:20:00Z",
            "2024-01-15T11:20:00Z",
            2,
            8,
        ),
        user(
            "user-005",
            "Ana Oliveira",
            "+5585666666666",
            "ana@email.com",
            true,
            "2024-01-14T09:30:00Z",
            "2024-01-15T12:15:00Z",
            1,
            4,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn conversation(
    id: &str,
    phone: &str,
    name: &str,
    email: &str,
    status: &str,
    last_message: &str,
    last_activity: &str,
    counts: (u32, u32),
    tags: &[&str],
) -> Conversation {
    Conversation {
        id: id.to_string(),
        phone: phone.to_string(),
        name: name.to_string(),
        email: Some(email.to_string()),
        status: status.to_string(),
        last_message: last_message.to_string(),
        last_activity: ts(last_activity),
        message_count: counts.0,
        unread_count: counts.1,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn conversations() -> Vec<Conversation> {
    vec![
        conversation(
            "conv-001",
            "+5585987049663",
            "Cliente Teste",
            "cliente@teste.com",
            "active",
            "Olá, preciso de ajuda com meu pedido",
            "2024-01-15T10:30:00Z",
            (5, 2),
            &["suporte", "pedido"],
        ),
        conversation(
            "conv-002",
            "+5585999999999",
            "João Silva",
            "joao@email.com",
            "pending",
            "Qual o horário de funcionamento da loja?",
            "2024-01-15T09:15:00Z",
            (3, 1),
            &["informação"],
        ),
        conversation(
            "conv-003",
            "+5585888888888",
            "Maria Santos",
            "maria@email.com",
            "resolved",
            "Obrigado pela ajuda! Problema resolvido.",
            "2024-01-15T08:45:00Z",
            (8, 0),
            &["resolvido"],
        ),
        conversation(
            "conv-004",
            "+5585777777777",
            "Pedro Costa",
            "pedro@email.com",
            "active",
            "Preciso falar com o suporte técnico",
            "2024-01-15T11:20:00Z",
            (2, 1),
            &["suporte", "técnico"],
        ),
    ]
}

/// Thread shown when a conversation is opened. Only `conv-001` has one.
pub fn messages(conversation_id: &str) -> Vec<Message> {
    if conversation_id != "conv-001" {
        return Vec::new();
    }
    let msg = |content: &str, from_customer: bool, at: &str| Message {
        content: content.to_string(),
        from_customer,
        timestamp: ts(at),
    };
    vec![
        msg("Olá, preciso de ajuda com meu pedido", true, "2024-01-15T10:30:00Z"),
        msg(
            "Olá! 👋 Bem-vindo ao nosso atendimento automático!\n\nComo posso ajudá-lo hoje?",
            false,
            "2024-01-15T10:30:15Z",
        ),
        msg("Meu pedido não chegou ainda, pode verificar?", true, "2024-01-15T10:32:00Z"),
        msg(
            "Claro! Vou verificar o status do seu pedido. Pode me informar o número do pedido?",
            false,
            "2024-01-15T10:32:30Z",
        ),
    ]
}

pub fn weekly_series() -> Vec<ChartPoint> {
    [
        ("Seg", 45, 12),
        ("Ter", 52, 15),
        ("Qua", 38, 10),
        ("Qui", 61, 18),
        ("Sex", 48, 14),
        ("Sáb", 25, 8),
        ("Dom", 15, 5),
    ]
    .into_iter()
    .map(|(name, messages, conversations)| ChartPoint {
        name: name.to_string(),
        messages,
        conversations,
    })
    .collect()
}

pub fn hourly_series() -> Vec<HourlyPoint> {
    const PER_HOUR: [u64; 24] = [
        2, 1, 0, 0, 1, 2, 5, 8, 15, 22, 28, 25, 20, 18, 24, 30, 28, 22, 15, 12, 8, 5, 3, 2,
    ];
    PER_HOUR
        .iter()
        .enumerate()
        .map(|(h, &messages)| HourlyPoint { hour: format!("{:02}:00", h), messages })
        .collect()
}

pub fn response_time_series() -> Vec<ResponseTimePoint> {
    [
        ("Seg", 2.1),
        ("Ter", 2.3),
        ("Qua", 1.9),
        ("Qui", 2.5),
        ("Sex", 2.2),
        ("Sáb", 2.8),
        ("Dom", 3.2),
    ]
    .into_iter()
    .map(|(name, avg_time)| ResponseTimePoint { name: name.to_string(), avg_time })
    .collect()
}

pub fn ai_metrics() -> Vec<AggregatedMetric> {
    vec![
        AggregatedMetric::new("Resolução Automática", 78.0, "#22c55e"),
        AggregatedMetric::new("Transferência Humana", 22.0, "#3b82f6"),
    ]
}

pub fn conversation_types() -> Vec<AggregatedMetric> {
    vec![
        AggregatedMetric::new("Suporte", 45.0, "#ef4444"),
        AggregatedMetric::new("Informações", 30.0, "#f59e0b"),
        AggregatedMetric::new("Vendas", 15.0, "#10b981"),
        AggregatedMetric::new("Outros", 10.0, "#6b7280"),
    ]
}

fn group(entries: &[(&str, SettingValue)]) -> SettingsGroup {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

pub fn settings() -> Settings {
    use SettingValue::{Flag, Integer, Number, Text};
    Settings {
        general: group(&[
            ("platformName", Text("WhatsApp Platform".into())),
            ("timezone", Text("America/Sao_Paulo".into())),
            ("language", Text("pt-BR".into())),
            ("autoResponse", Flag(true)),
        ]),
        whatsapp: group(&[
            ("token", Text("seu_token_aqui".into())),
            ("phoneNumberId", Text("seu_phone_id_aqui".into())),
            ("webhookVerifyToken", Text("seu_verify_token_aqui".into())),
            ("businessAccountId", Text("seu_business_id_aqui".into())),
        ]),
        ai: group(&[
            ("openaiKey", Text("sua_chave_openai_aqui".into())),
            ("model", Text("gpt-3.5-turbo".into())),
            ("maxTokens", Integer(150)),
            ("temperature", Number(0.7)),
        ]),
        notifications: group(&[
            ("emailNotifications", Flag(true)),
            ("webhookNotifications", Flag(false)),
            ("slackNotifications", Flag(false)),
        ]),
    }
}
