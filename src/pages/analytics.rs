use std::fmt;
use std::str::FromStr;

use crate::api::{ApiClient, ApiError};
use crate::api::models::{
    AggregatedMetric, AnalyticsOverview, ChartPoint, HourlyPoint, MessageTrend, ResponseTimePoint,
};
use crate::pages::{Loadable, StatCard};
use crate::sample;
use crate::view::aggregate::{average, shares};
use crate::view::format::{format_count, format_percent, format_seconds};

pub const LOAD_FAILED: &str = "Erro ao carregar métricas";
pub const TRENDS_FAILED: &str = "Erro ao carregar tendências";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Quarter,
}

impl TimeRange {
    pub fn days(self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Week => "Últimos 7 dias",
            TimeRange::Month => "Últimos 30 dias",
            TimeRange::Quarter => "Últimos 90 dias",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            other => Err(format!("unknown time range: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsMetrics {
    pub total_messages: u64,
    pub total_conversations: u64,
    pub avg_response_time: f64,
    pub satisfaction: f64,
    pub ai_resolution_rate: f64,
    pub active_users: u64,
}

impl Default for AnalyticsMetrics {
    fn default() -> Self {
        Self {
            total_messages: 1250,
            total_conversations: 150,
            avg_response_time: 2.3,
            satisfaction: 4.8,
            ai_resolution_rate: 78.0,
            active_users: 45,
        }
    }
}

impl AnalyticsMetrics {
    fn merged(&self, overview: AnalyticsOverview) -> Self {
        Self {
            total_messages: overview.total_messages,
            total_conversations: overview.total_conversations,
            avg_response_time: overview.response_time_avg,
            satisfaction: overview.satisfaction_score,
            ai_resolution_rate: self.ai_resolution_rate,
            active_users: overview.active_users,
        }
    }
}

/// Results of the two analytics calls, applied together.
pub struct AnalyticsFetch {
    pub overview: Result<AnalyticsOverview, ApiError>,
    pub trends: Result<Vec<MessageTrend>, ApiError>,
}

pub struct AnalyticsPage {
    pub range: TimeRange,
    metrics: Loadable<AnalyticsMetrics>,
    trends: Loadable<Vec<MessageTrend>>,
    weekly: Vec<ChartPoint>,
    hourly: Vec<HourlyPoint>,
    response_times: Vec<ResponseTimePoint>,
    ai_performance: Vec<AggregatedMetric>,
    conversation_types: Vec<AggregatedMetric>,
}

impl Default for AnalyticsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsPage {
    pub fn new() -> Self {
        Self {
            range: TimeRange::default(),
            metrics: Loadable::new(AnalyticsMetrics::default()),
            trends: Loadable::new(Vec::new()),
            weekly: sample::weekly_series(),
            hourly: sample::hourly_series(),
            response_times: sample::response_time_series(),
            ai_performance: sample::ai_metrics(),
            conversation_types: sample::conversation_types(),
        }
    }

    pub fn metrics(&self) -> &AnalyticsMetrics {
        self.metrics.get()
    }

    /// First error among the page's loads, if any.
    pub fn error(&self) -> Option<&str> {
        self.metrics.error().or_else(|| self.trends.error())
    }

    pub fn is_loading(&self) -> bool {
        self.metrics.is_loading() || self.trends.is_loading()
    }

    /// Loads the overview and the message trends for the selected range.
    /// Each part keeps its previous data if its own call fails.
    pub async fn refresh(&mut self, client: &ApiClient) -> bool {
        self.begin_load();
        let fetched = Self::fetch(client, self.range).await;
        self.apply(fetched)
    }

    pub fn begin_load(&mut self) {
        self.metrics.begin_load();
        self.trends.begin_load();
    }

    /// The trends call is capped at 30 days, so the 90-day range charts the latest 30.
    pub async fn fetch(client: &ApiClient, range: TimeRange) -> AnalyticsFetch {
        let overview = client.get_analytics_overview().await;
        let trends = client.get_message_trends(range.days()).await;
        AnalyticsFetch { overview, trends }
    }

    pub fn apply(&mut self, fetched: AnalyticsFetch) -> bool {
        let overview = fetched.overview.map(|o| self.metrics.get().merged(o));
        let metrics_ok = self.metrics.finish_load(overview, LOAD_FAILED);
        let trends_ok = self.trends.finish_load(fetched.trends, TRENDS_FAILED);
        metrics_ok && trends_ok
    }

    /// Daily message volume: backend trends when loaded, otherwise the sample week.
    pub fn daily_series(&self) -> Vec<ChartPoint> {
        let trends = self.trends.get();
        if trends.is_empty() {
            return self.weekly.clone();
        }
        trends
            .iter()
            .map(|t| ChartPoint {
                name: t.date.clone(),
                messages: t.total_messages,
                conversations: 0,
            })
            .collect()
    }

    pub fn hourly(&self) -> &[HourlyPoint] {
        &self.hourly
    }

    pub fn peak_hour(&self) -> Option<&HourlyPoint> {
        self.hourly.iter().max_by_key(|p| p.messages)
    }

    pub fn response_times(&self) -> &[ResponseTimePoint] {
        &self.response_times
    }

    pub fn mean_response_time(&self) -> Option<f64> {
        let values: Vec<f64> = self.response_times.iter().map(|p| p.avg_time).collect();
        average(&values)
    }

    pub fn ai_performance(&self) -> &[AggregatedMetric] {
        &self.ai_performance
    }

    pub fn conversation_types(&self) -> &[AggregatedMetric] {
        &self.conversation_types
    }

    pub fn conversation_type_shares(&self) -> Vec<(String, f64)> {
        shares(&self.conversation_types)
    }

    pub fn cards(&self) -> Vec<StatCard> {
        let m = self.metrics.get();
        vec![
            StatCard::new("Total de Mensagens", format_count(m.total_messages)).with_trend("+12%"),
            StatCard::new("Total de Conversas", format_count(m.total_conversations)).with_trend("+8%"),
            StatCard::new("Tempo Médio de Resposta", format_seconds(m.avg_response_time)).with_trend("-5%"),
            StatCard::new("Satisfação", format!("{:.1}/5", m.satisfaction)).with_trend("+2%"),
            StatCard::new("Resolução IA", format_percent(m.ai_resolution_rate)).with_trend("+3%"),
            StatCard::new("Usuários Ativos", format_count(m.active_users)).with_trend("+15%"),
        ]
    }
}
