//! Portal API client with per-attempt timeouts and bounded retries

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use edu_portal_api::{
    Answer, AnswerRequest, Assignment, Comment, CommentRequest, GradeRequest, LoginForm,
    MessageResponse, Notification, RegisterRequest, Task, TokenResponse, User, endpoints,
};
use futures::future::{Either, select};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Join a base URL and an endpoint path with exactly one slash between them
fn join_url_segments(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Run `future` to completion unless `duration` elapses first
async fn with_timeout<F: Future>(duration: Duration, future: F) -> Option<F::Output> {
    let future = pin!(future);
    let delay = pin!(crate::sleep(duration));

    match select(future, delay).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}

/// HTTP client for the portal API
///
/// Only GET requests are retried; everything else is sent exactly once.
#[derive(Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PortalClient {
    /// Create a client after validating `config`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint_url(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&join_url_segments(&self.config.base_url, path))?)
    }

    async fn send_once(&self, request: RequestBuilder) -> ClientResult<Response> {
        let timeout = self.config.request_timeout;
        let response = with_timeout(timeout, request.send())
            .await
            .ok_or_else(|| ClientError::timeout(timeout))??;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_status(status.as_u16(), body))
    }

    async fn execute<F>(&self, method: Method, path: &str, build: F) -> ClientResult<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint_url(path)?;
        let retryable = method == Method::GET;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(%method, %url, attempt, "Sending request");

            let request = build(self.http.request(method.clone(), url.clone()));
            match self.send_once(request).await {
                Ok(response) => return Ok(response),
                Err(err)
                    if retryable && err.is_transient() && self.config.retry.should_retry(attempt) =>
                {
                    let delay = self.config.retry.calculate_delay(attempt);
                    warn!(%method, %url, attempt, ?delay, error = %err, "Request failed, retrying");
                    crate::sleep(delay).await;
                }
                Err(err) => {
                    if err.is_transient() {
                        error!(%method, %url, attempt, error = %err, "Request failed");
                    } else {
                        debug!(%method, %url, attempt, error = %err, "Request rejected");
                    }
                    return Err(err);
                }
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_authorized<T: DeserializeOwned>(&self, path: &str, token: &str) -> ClientResult<T> {
        let response = self
            .execute(Method::GET, path, |request| request.bearer_auth(token))
            .await?;
        Self::decode(response).await
    }

    /// Exchange credentials for an access token (`POST /token`)
    pub async fn login(&self, form: &LoginForm) -> ClientResult<TokenResponse> {
        let response = self
            .execute(Method::POST, endpoints::TOKEN, |request| request.form(form))
            .await?;
        Self::decode(response).await
    }

    /// Create an account (`POST /register`); the response body is not used
    pub async fn register(&self, body: &RegisterRequest) -> ClientResult<()> {
        self.execute(Method::POST, endpoints::REGISTER, |request| request.json(body))
            .await?;
        Ok(())
    }

    /// Fetch the user owning `token` (`GET /users/me`)
    pub async fn current_user(&self, token: &str) -> ClientResult<User> {
        self.get_authorized(endpoints::CURRENT_USER, token).await
    }

    /// Assignments authored by the current teacher (`GET /assignments`)
    pub async fn assignments(&self, token: &str) -> ClientResult<Vec<Assignment>> {
        self.get_authorized(endpoints::ASSIGNMENTS, token).await
    }

    /// Assignments given to the current student (`GET /my-assignments`)
    pub async fn my_assignments(&self, token: &str) -> ClientResult<Vec<Task>> {
        self.get_authorized(endpoints::MY_ASSIGNMENTS, token).await
    }

    /// Submit an answer to an assignment (`POST /answers`)
    pub async fn submit_answer(&self, token: &str, body: &AnswerRequest) -> ClientResult<Answer> {
        let response = self
            .execute(Method::POST, endpoints::ANSWERS, |request| {
                request.bearer_auth(token).json(body)
            })
            .await?;
        Self::decode(response).await
    }

    /// Grade a student's answer (`PUT /answers/{id}/grade`)
    pub async fn grade_answer(
        &self,
        token: &str,
        answer_id: i64,
        grade: i32,
    ) -> ClientResult<MessageResponse> {
        let body = GradeRequest { grade };
        let response = self
            .execute(Method::PUT, &endpoints::answer_grade(answer_id), |request| {
                request.bearer_auth(token).json(&body)
            })
            .await?;
        Self::decode(response).await
    }

    /// Comments attached to an answer (`GET /answers/{id}/comments`)
    pub async fn comments(&self, token: &str, answer_id: i64) -> ClientResult<Vec<Comment>> {
        self.get_authorized(&endpoints::answer_comments(answer_id), token)
            .await
    }

    /// Comment on an answer (`POST /comments`)
    pub async fn create_comment(&self, token: &str, body: &CommentRequest) -> ClientResult<Comment> {
        let response = self
            .execute(Method::POST, endpoints::COMMENTS, |request| {
                request.bearer_auth(token).json(body)
            })
            .await?;
        Self::decode(response).await
    }

    /// Notifications of the current user, newest first (`GET /notifications`)
    pub async fn notifications(&self, token: &str) -> ClientResult<Vec<Notification>> {
        self.get_authorized(endpoints::NOTIFICATIONS, token).await
    }

    /// Mark a notification as read (`PUT /notifications/{id}/read`)
    pub async fn mark_notification_read(
        &self,
        token: &str,
        notification_id: i64,
    ) -> ClientResult<MessageResponse> {
        let response = self
            .execute(
                Method::PUT,
                &endpoints::notification_read(notification_id),
                |request| request.bearer_auth(token),
            )
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_segments() {
        assert_eq!(
            join_url_segments("http://api.local/", "/token"),
            "http://api.local/token"
        );
        assert_eq!(
            join_url_segments("http://api.local/v1", "users/me"),
            "http://api.local/v1/users/me"
        );
        assert_eq!(join_url_segments("http://api.local", ""), "http://api.local");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = PortalClient::new(ClientConfig::new("relative/path"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_with_timeout() {
        let fast = with_timeout(Duration::from_secs(1), async { 7 }).await;
        assert_eq!(fast, Some(7));

        let slow = with_timeout(
            Duration::from_millis(10),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;
        assert!(slow.is_none());
    }
}
