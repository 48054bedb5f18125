//! Thin per-resource wrappers over [`ApiClient::request`].
//!
//! Each call fixes the path, the verb and the body shape; nothing else
//! happens here. Resources whose payload shape is owned by the backend
//! (conversations, messages, settings) are generic over the response type.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::client::{ApiClient, RequestOptions};
use crate::api::error::ApiError;
use crate::api::models::{
    AiTestRequest, AiTestResponse, AnalyticsOverview, AuthUser, ConversationMetrics,
    LoginRequest, LoginResponse, MessageTrend, NewUser, ResponseTimes, TokenCheck, User,
    UserActivity, UserStats, UserUpdate, WhatsAppTestRequest, WhatsAppTestResponse,
};
use crate::api::query::QueryParams;

pub const DEFAULT_DAYS: u32 = 7;
/// Longest window the trend endpoints accept.
pub const MAX_TREND_DAYS: u32 = 30;

impl ApiClient {
    // Auth

    /// Exchanges credentials for a token and stores it in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let opts = RequestOptions::post().json(&LoginRequest { email, password })?;
        let resp: LoginResponse = self.request("/auth/login", opts).await?;
        self.session().set_token(resp.token.clone());
        Ok(resp)
    }

    /// Invalidates the session server-side. The local token is dropped even
    /// when the call fails.
    pub async fn logout(&self) -> Result<Value, ApiError> {
        let result = self.request("/auth/logout", RequestOptions::post()).await;
        self.session().clear();
        result
    }

    pub async fn current_user(&self) -> Result<AuthUser, ApiError> {
        self.request("/auth/me", RequestOptions::get()).await
    }

    pub async fn verify_token(&self) -> Result<TokenCheck, ApiError> {
        self.request("/auth/verify-token", RequestOptions::get()).await
    }

    // Users

    pub async fn get_users(&self, params: &QueryParams) -> Result<Vec<User>, ApiError> {
        self.request(&params.apply("/users"), RequestOptions::get()).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        self.request(&format!("/users/{}", user_id), RequestOptions::get()).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.request("/users", RequestOptions::post().json(user)?).await
    }

    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, ApiError> {
        self.request(&format!("/users/{}", user_id), RequestOptions::put().json(update)?).await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("/users/{}", user_id), RequestOptions::delete()).await
    }

    pub async fn get_user_stats(&self) -> Result<UserStats, ApiError> {
        self.request("/users/stats", RequestOptions::get()).await
    }

    // Conversations

    pub async fn get_conversations<T: DeserializeOwned>(&self, params: &QueryParams) -> Result<T, ApiError> {
        self.request(&params.apply("/conversations"), RequestOptions::get()).await
    }

    pub async fn get_conversation<T: DeserializeOwned>(&self, conversation_id: &str) -> Result<T, ApiError> {
        self.request(&format!("/conversations/{}", conversation_id), RequestOptions::get()).await
    }

    pub async fn create_conversation<B, T>(&self, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request("/conversations", RequestOptions::post().json(body)?).await
    }

    pub async fn update_conversation<B, T>(&self, conversation_id: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = format!("/conversations/{}", conversation_id);
        self.request(&path, RequestOptions::put().json(body)?).await
    }

    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("/conversations/{}", conversation_id), RequestOptions::delete()).await
    }

    pub async fn get_conversation_stats(&self) -> Result<Value, ApiError> {
        self.request("/conversations/stats", RequestOptions::get()).await
    }

    // Messages

    pub async fn get_messages<T: DeserializeOwned>(&self, params: &QueryParams) -> Result<T, ApiError> {
        self.request(&params.apply("/messages"), RequestOptions::get()).await
    }

    pub async fn get_message<T: DeserializeOwned>(&self, message_id: &str) -> Result<T, ApiError> {
        self.request(&format!("/messages/{}", message_id), RequestOptions::get()).await
    }

    pub async fn create_message<B, T>(&self, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request("/messages", RequestOptions::post().json(body)?).await
    }

    pub async fn update_message<B, T>(&self, message_id: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = format!("/messages/{}", message_id);
        self.request(&path, RequestOptions::put().json(body)?).await
    }

    pub async fn delete_message(&self, message_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("/messages/{}", message_id), RequestOptions::delete()).await
    }

    pub async fn get_message_stats(&self) -> Result<Value, ApiError> {
        self.request("/messages/stats", RequestOptions::get()).await
    }

    // Analytics

    pub async fn get_analytics_overview(&self) -> Result<AnalyticsOverview, ApiError> {
        self.request("/analytics/overview", RequestOptions::get()).await
    }

    /// `days` is clamped to `1..=MAX_TREND_DAYS`.
    pub async fn get_message_trends(&self, days: u32) -> Result<Vec<MessageTrend>, ApiError> {
        let days = days.clamp(1, MAX_TREND_DAYS);
        let path = QueryParams::new().with("days", days).apply("/analytics/message-trends");
        self.request(&path, RequestOptions::get()).await
    }

    pub async fn get_user_activity(&self, days: u32) -> Result<Vec<UserActivity>, ApiError> {
        let days = days.clamp(1, MAX_TREND_DAYS);
        let path = QueryParams::new().with("days", days).apply("/analytics/user-activity");
        self.request(&path, RequestOptions::get()).await
    }

    pub async fn get_conversation_metrics(&self) -> Result<ConversationMetrics, ApiError> {
        self.request("/analytics/conversation-metrics", RequestOptions::get()).await
    }

    pub async fn get_response_times(&self) -> Result<ResponseTimes, ApiError> {
        self.request("/analytics/response-times", RequestOptions::get()).await
    }

    // Settings

    pub async fn get_settings<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        self.request("/settings", RequestOptions::get()).await
    }

    pub async fn update_settings<B, T>(&self, settings: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request("/settings", RequestOptions::put().json(settings)?).await
    }

    pub async fn test_ai(&self, req: &AiTestRequest) -> Result<AiTestResponse, ApiError> {
        self.request("/settings/test-ai", RequestOptions::post().json(req)?).await
    }

    pub async fn test_whatsapp(&self, req: &WhatsAppTestRequest) -> Result<WhatsAppTestResponse, ApiError> {
        self.request("/settings/test-whatsapp", RequestOptions::post().json(req)?).await
    }

    pub async fn get_health_check(&self) -> Result<Value, ApiError> {
        self.request("/settings/health", RequestOptions::get()).await
    }

    pub async fn reset_database(&self) -> Result<Value, ApiError> {
        self.request("/settings/reset-database", RequestOptions::post()).await
    }
}
