use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use wpp_console::api::{ApiClient, ApiError, HttpRequest, HttpResponse, Transport};
use wpp_console::pages::{AnalyticsPage, ConversationsPage, DashboardPage, SettingsPage, TimeRange, UsersPage};
use wpp_console::session::Session;
use wpp_console::storage::Cache;
use wpp_console::view::StatusFilter;

#[derive(Default)]
struct Backend {
    replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Backend {
    fn json(self, status: u16, body: Value) -> Self {
        let body = body.to_string().into_bytes();
        self.replies.lock().unwrap().push_back(Ok(HttpResponse { status, body }));
        self
    }

    fn down(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport("connection refused".into())));
        self
    }

    fn urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|r| r.url.clone()).collect()
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Backend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no reply scripted".into())))
    }
}

fn client(backend: &Arc<Backend>) -> ApiClient {
    ApiClient::with_transport("http://localhost:8000", Session::new(), backend.clone())
}

fn user(id: &str, name: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "phone": "+55 11 90000-0000",
        "is_active": active,
        "created_at": "2024-01-10T10:00:00",
        "conversation_count": 2,
        "total_messages": 10
    })
}

#[test]
fn users_page_filters_sample_data() {
    let mut page = UsersPage::new();
    assert_eq!(page.users().len(), 5);

    page.status = StatusFilter::parse("active");
    assert_eq!(page.visible().len(), 3);
    assert_eq!(page.cards()[0].value, "5");

    page.status = StatusFilter::All;
    page.search = String::new();
    assert_eq!(page.visible().len(), 5);
}

#[tokio::test]
async fn failed_load_keeps_previous_users() {
    let backend = Arc::new(Backend::default().down());
    let api = client(&backend);
    let mut page = UsersPage::new();
    let before = page.users().to_vec();

    assert!(!page.load(&api).await);
    assert_eq!(page.users(), before.as_slice());
    assert_eq!(page.error(), Some("Erro ao carregar usuários"));
    assert!(!page.is_loading());
    assert!(backend.urls()[0].ends_with("/users?skip=0&limit=100"));
}

#[tokio::test]
async fn http_error_also_keeps_previous_users() {
    let backend = Arc::new(Backend::default().json(500, json!({"detail": "db offline"})));
    let api = client(&backend);
    let mut page = UsersPage::new();
    assert!(!page.load(&api).await);
    assert_eq!(page.users().len(), 5);
    assert!(page.error().is_some());
}

#[tokio::test]
async fn successful_load_replaces_users() {
    let backend = Arc::new(
        Backend::default().json(200, json!([user("u-1", "Ana Lima", true), user("u-2", "Bruno Dias", false)])),
    );
    let api = client(&backend);
    let mut page = UsersPage::new();

    assert!(page.load(&api).await);
    assert_eq!(page.users().len(), 2);
    assert_eq!(page.error(), None);
    assert_eq!(page.cards()[1].value, "1");
    assert_eq!(page.cards()[2].value, "4");

    page.search = "bruno".into();
    let visible = page.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "u-2");
}

#[tokio::test]
async fn login_token_is_sent_on_later_requests() {
    let backend = Arc::new(
        Backend::default()
            .json(200, json!({"token": "abc123", "token_type": "bearer", "user": {"name": "Admin"}}))
            .json(200, json!({"id": "1", "email": "admin@example.com", "name": "Admin", "is_admin": true})),
    );
    let api = client(&backend);
    assert!(!api.session().is_authenticated());

    let resp = api.login("admin@example.com", "secret").await.unwrap();
    assert_eq!(resp.token, "abc123");
    assert_eq!(api.session().token().as_deref(), Some("abc123"));

    let me = api.current_user().await.unwrap();
    assert!(me.is_admin);

    let sent = backend.requests();
    assert_eq!(sent[0].header("Authorization"), None);
    let body: Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"email": "admin@example.com", "password": "secret"}));
    assert_eq!(sent[1].header("Authorization"), Some("Bearer abc123"));
}

#[tokio::test]
async fn rejected_login_leaves_session_empty() {
    let backend = Arc::new(Backend::default().json(401, json!({"detail": "Credenciais inválidas"})));
    let api = client(&backend);
    let err = api.login("admin@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Credenciais inválidas");
    assert_eq!(err.status(), Some(401));
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn logout_clears_token_even_when_backend_is_down() {
    let backend = Arc::new(Backend::default().down());
    let api = ApiClient::with_transport(
        "http://localhost:8000",
        Session::with_token(Some("abc123".into())),
        backend.clone(),
    );
    assert!(api.logout().await.is_err());
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn conversations_refresh_reads_backend_rows() {
    let backend = Arc::new(Backend::default().json(
        200,
        json!([{
            "id": "c-9",
            "user_id": "u-9",
            "user_name": "Loja Centro",
            "user_phone": "+55 21 98888-7777",
            "status": "pending",
            "created_at": "2024-01-14T08:00:00.512000",
            "updated_at": "2024-01-15T09:00:00.000000",
            "last_message_at": null,
            "message_count": 3,
            "unread_count": 1
        }]),
    ));
    let api = client(&backend);
    let mut page = ConversationsPage::new();
    assert!(page.select("conv-001"));

    assert!(page.load(&api).await);
    assert_eq!(page.error(), None);
    assert_eq!(page.conversations().len(), 1);
    assert!(page.selected().is_none());
    assert!(page.thread().is_empty());
    assert!(backend.urls()[0].ends_with("/conversations?skip=0&limit=100"));

    let now = Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap();
    let rows = page.rows(now);
    assert_eq!(rows[0].name, "Loja Centro");
    assert_eq!(rows[0].phone, "+55 21 98888-7777");
    assert_eq!(rows[0].last_message, "");
    assert_eq!(rows[0].time, "2h atrás");
    assert_eq!(rows[0].badge.label, "Pendente");

    page.status = StatusFilter::parse("active");
    assert!(page.visible().is_empty());
    page.status = StatusFilter::parse("pending");
    assert_eq!(page.visible().len(), 1);
}

#[tokio::test]
async fn dashboard_keeps_defaults_when_overview_fails() {
    let backend = Arc::new(Backend::default().json(503, json!("unavailable")));
    let api = client(&backend);
    let mut page = DashboardPage::new();
    let before = page.stats().clone();

    assert!(!page.refresh(&api).await);
    assert_eq!(page.stats(), &before);
    assert!(page.error().is_some());
    assert_eq!(page.cards(), DashboardPage::new().cards());
}

fn overview() -> Value {
    json!({
        "total_users": 10,
        "active_users": 7,
        "total_conversations": 20,
        "active_conversations": 4,
        "total_messages": 3000,
        "messages_today": 120,
        "response_time_avg": 1.5,
        "satisfaction_score": 4.2
    })
}

fn trends() -> Value {
    json!([{
        "date": "2024-01-01",
        "inbound_messages": 25,
        "outbound_messages": 15,
        "total_messages": 40
    }])
}

#[tokio::test]
async fn analytics_requests_selected_range() {
    let backend = Arc::new(Backend::default().json(200, overview()).json(200, trends()));
    let api = client(&backend);
    let mut page = AnalyticsPage::new();
    page.range = TimeRange::Month;

    assert!(page.refresh(&api).await);
    assert_eq!(page.metrics().total_messages, 3000);
    assert_eq!(page.cards()[0].value, "3.000");
    assert_eq!(page.daily_series().len(), 1);

    let urls = backend.urls();
    assert!(urls[0].ends_with("/analytics/overview"));
    assert!(urls[1].ends_with("days=30"));
}

#[tokio::test]
async fn quarter_range_stays_within_trend_window() {
    let backend = Arc::new(Backend::default().json(200, overview()).json(200, trends()));
    let api = client(&backend);
    let mut page = AnalyticsPage::new();
    page.range = TimeRange::Quarter;

    assert!(page.refresh(&api).await);
    assert_eq!(page.error(), None);
    assert_eq!(page.range.days(), 90);
    assert!(backend.urls()[1].ends_with("/analytics/message-trends?days=30"));
}

#[tokio::test]
async fn users_page_is_usable_while_loading() {
    let backend = Arc::new(
        Backend::default().json(200, json!([user("u-1", "Ana Lima", true), user("u-2", "Bruno Dias", false)])),
    );
    let api = client(&backend);
    let mut page = UsersPage::new();

    page.begin_load();
    let pending = UsersPage::fetch(&api);
    assert!(page.is_loading());
    page.status = StatusFilter::parse("active");
    assert_eq!(page.visible().len(), 3);

    let result = pending.await;
    assert!(page.is_loading());
    assert!(page.apply(result));
    assert!(!page.is_loading());
    assert_eq!(page.status, StatusFilter::parse("active"));
    let visible = page.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "u-1");
}

#[tokio::test]
async fn saving_state_holds_until_reply_is_applied() {
    let backend = Arc::new(Backend::default().json(200, json!({"message": "ok"})));
    let api = client(&backend);
    let mut page = SettingsPage::new();

    let snapshot = page.begin_save();
    let pending = SettingsPage::send(&api, &snapshot);
    assert!(page.is_saving());
    assert!(!page.is_saved());

    let result = pending.await;
    assert!(page.finish_save(result));
    assert!(!page.is_saving());
    assert!(page.is_saved());
}

#[tokio::test]
async fn settings_save_failure_is_reported() {
    let backend = Arc::new(Backend::default().down());
    let api = client(&backend);
    let mut page = SettingsPage::new();
    page.set_from_str("ai", "maxTokens", "256").unwrap();

    assert!(!page.save(&api).await);
    assert!(!page.is_saved());
    assert_eq!(page.error(), Some("Erro ao salvar configurações"));

    let sent = backend.requests();
    assert_eq!(sent[0].method, reqwest::Method::PUT);
    let body: Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["ai"]["maxTokens"], json!(256));
}

#[test]
fn cache_feeds_users_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = Cache::open(&dir.path().join("cache.db")).unwrap();
    let seed = UsersPage::new();
    cache.store(seed.users()).unwrap();

    let page = UsersPage::with_users(cache.load(None).unwrap());
    assert_eq!(page.users().len(), 5);
    assert_eq!(page.cards(), seed.cards());
}
