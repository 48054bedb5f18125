use chrono::{DateTime, Utc};

use crate::api::{ApiClient, ApiError};
use crate::api::models::{AggregatedMetric, AnalyticsOverview, ChartPoint, Conversation};
use crate::pages::conversations::ConversationRow;
use crate::pages::{Loadable, StatCard};
use crate::sample;
use crate::view::format::{format_count, format_percent, format_seconds};

pub const LOAD_FAILED: &str = "Erro ao carregar estatísticas";
const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_conversations: u64,
    pub active_conversations: u64,
    pub messages_today: u64,
    pub response_time: f64,
    pub satisfaction: f64,
    pub ai_resolution_rate: f64,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_conversations: 150,
            active_conversations: 12,
            messages_today: 45,
            response_time: 2.3,
            satisfaction: 4.8,
            ai_resolution_rate: 78.0,
        }
    }
}

impl DashboardStats {
    /// Takes the backend overview; the AI rate is not part of it and is kept.
    fn merged(&self, overview: AnalyticsOverview) -> Self {
        Self {
            total_conversations: overview.total_conversations,
            active_conversations: overview.active_conversations,
            messages_today: overview.messages_today,
            response_time: overview.response_time_avg,
            satisfaction: overview.satisfaction_score,
            ai_resolution_rate: self.ai_resolution_rate,
        }
    }
}

pub struct DashboardPage {
    stats: Loadable<DashboardStats>,
    conversations: Vec<Conversation>,
    series: Vec<ChartPoint>,
    ai_metrics: Vec<AggregatedMetric>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            stats: Loadable::new(DashboardStats::default()),
            conversations: sample::conversations(),
            series: sample::weekly_series(),
            ai_metrics: sample::ai_metrics(),
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        self.stats.get()
    }

    pub fn error(&self) -> Option<&str> {
        self.stats.error()
    }

    pub fn is_loading(&self) -> bool {
        self.stats.is_loading()
    }

    pub async fn refresh(&mut self, client: &ApiClient) -> bool {
        self.begin_load();
        let result = client.get_analytics_overview().await;
        self.apply(result)
    }

    pub fn begin_load(&mut self) {
        self.stats.begin_load();
    }

    /// Merges a fetched overview into the figures held when it lands.
    pub fn apply(&mut self, result: Result<AnalyticsOverview, ApiError>) -> bool {
        let merged = result.map(|overview| self.stats.get().merged(overview));
        self.stats.finish_load(merged, LOAD_FAILED)
    }

    pub fn cards(&self) -> Vec<StatCard> {
        let s = self.stats.get();
        vec![
            StatCard::new("Total de Conversas", format_count(s.total_conversations))
                .with_trend("+12% esta semana"),
            StatCard::new("Conversas Ativas", format_count(s.active_conversations)),
            StatCard::new("Mensagens Hoje", format_count(s.messages_today)).with_trend("+8% vs ontem"),
            StatCard::new("Tempo de Resposta", format_seconds(s.response_time)),
            StatCard::new("Satisfação", format!("{:.1}/5", s.satisfaction)),
            StatCard::new("Resolução IA", format_percent(s.ai_resolution_rate)),
        ]
    }

    /// Most recently active conversations first.
    pub fn recent(&self, now: DateTime<Utc>) -> Vec<ConversationRow> {
        let mut recent: Vec<&Conversation> = self.conversations.iter().collect();
        recent.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        recent
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|c| ConversationRow::new(c, now, false))
            .collect()
    }

    pub fn series(&self) -> &[ChartPoint] {
        &self.series
    }

    pub fn ai_metrics(&self) -> &[AggregatedMetric] {
        &self.ai_metrics
    }

    pub fn weekly_messages(&self) -> u64 {
        self.series.iter().map(|p| p.messages).sum()
    }
}
