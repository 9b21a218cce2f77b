#[cfg(test)]
#[path = "vault_api_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header;
use reqwest::redirect;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendFailure;
use crate::domain::models::DocumentFile;
use crate::domain::models::HistoryEntry;
use crate::domain::models::QuizBatchRequest;
use crate::domain::models::QuizQuestion;
use crate::domain::models::Reply;
use crate::domain::models::UploadPayload;
use crate::domain::models::Video;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    quiz: Vec<QuizQuestion>,
    #[serde(default)]
    videos: Option<Vec<Video>>,
    #[serde(default)]
    raw_text: String,
    #[serde(default)]
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct QuizResponse {
    quiz: Vec<QuizQuestion>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    question: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    answer: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DocumentListResponse {
    documents: Vec<HistoryEntry>,
}

fn is_sign_in_redirect(status: StatusCode) -> bool {
    return matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    );
}

/// JSON over HTTP client for the document analysis service.
pub struct VaultApi {
    url: String,
    timeout: Duration,
    session_cookie: String,
}

/// Parses a `request-timeout` value in milliseconds.
pub fn parse_timeout(millis: &str) -> Result<Duration> {
    let millis = match millis.trim().parse::<u64>() {
        Ok(millis) => millis,
        Err(_) => {
            bail!(format!(
                "Invalid request-timeout '{millis}', expected a number of milliseconds"
            ));
        }
    };
    if millis == 0 {
        bail!("Invalid request-timeout '0', it must be at least 1 millisecond");
    }

    return Ok(Duration::from_millis(millis));
}

impl VaultApi {
    pub fn from_config() -> Result<VaultApi> {
        return Ok(VaultApi {
            url: Config::get(ConfigKey::ApiURL),
            timeout: parse_timeout(&Config::get(ConfigKey::RequestTimeout))?,
            session_cookie: Config::get(ConfigKey::SessionCookie),
        });
    }

    /// Redirects are never followed, they point at the sign in page.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, BackendFailure> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|err| return BackendFailure::Network(err.to_string()))?;

        let mut req = client
            .request(method, format!("{url}{path}", url = self.url))
            .timeout(self.timeout);
        if !self.session_cookie.is_empty() {
            req = req.header(header::COOKIE, &self.session_cookie);
        }

        return Ok(req);
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: Result<RequestBuilder, BackendFailure>,
    ) -> Reply<T> {
        let req = match req {
            Ok(req) => req,
            Err(failure) => return Reply::Failed(failure),
        };

        let res = match req.send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Request to document service failed");
                return Reply::Failed(BackendFailure::Network(err.to_string()));
            }
        };

        let status = res.status();
        let url = res.url().clone();
        if is_sign_in_redirect(status) {
            let location = res
                .headers()
                .get(header::LOCATION)
                .and_then(|e| return e.to_str().ok())
                .and_then(|e| return url.join(e).ok())
                .unwrap_or(url);
            tracing::info!(
                status = status.as_u16(),
                location = %location,
                "Redirected to sign in"
            );
            return Reply::AuthRequired {
                location: location.to_string(),
            };
        }

        if status == StatusCode::UNAUTHORIZED {
            return Reply::AuthRequired {
                location: url.to_string(),
            };
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => return Reply::Failed(BackendFailure::Network(err.to_string())),
        };

        if let Ok(payload) = serde_json::from_str::<ErrorResponse>(&body) {
            tracing::error!(
                status = status.as_u16(),
                error = %payload.error,
                "Document service returned an error"
            );
            return Reply::Failed(BackendFailure::Backend(payload.error));
        }

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Document service request failed"
            );
            return Reply::Failed(BackendFailure::Backend(format!(
                "Request failed with status {}",
                status.as_u16()
            )));
        }

        match serde_json::from_str::<T>(&body) {
            Ok(data) => return Reply::Data(data),
            Err(err) => {
                return Reply::Failed(BackendFailure::Backend(format!(
                    "Unexpected response from document service: {err}"
                )));
            }
        }
    }
}

#[async_trait]
impl Backend for VaultApi {
    #[allow(clippy::implicit_return)]
    async fn upload(&self, file: DocumentFile) -> Reply<UploadPayload> {
        let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename);
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self
            .request(Method::POST, "/upload")
            .map(|e| return e.multipart(form));

        let res = self.send::<UploadResponse>(req).await;
        return res.map(|res| {
            return UploadPayload {
                summary: res.summary,
                quiz: res.quiz,
                videos: res.videos.unwrap_or_default(),
                raw_text: res.raw_text,
                index_status: res.message,
            };
        });
    }

    #[allow(clippy::implicit_return)]
    async fn generate_quiz(&self, request: &QuizBatchRequest) -> Reply<Vec<QuizQuestion>> {
        let req = self
            .request(Method::POST, "/quiz-more")
            .map(|e| return e.json(request));

        let res = self.send::<QuizResponse>(req).await;
        return res.map(|res| return res.quiz);
    }

    #[allow(clippy::implicit_return)]
    async fn chat(&self, question: &str) -> Reply<String> {
        let body = ChatRequest {
            question: question.to_string(),
        };
        let req = self
            .request(Method::POST, "/chat")
            .map(|e| return e.json(&body));

        let res = self.send::<ChatResponse>(req).await;
        return res.map(|res| return res.answer);
    }

    #[allow(clippy::implicit_return)]
    async fn list_documents(&self) -> Reply<Vec<HistoryEntry>> {
        let req = self.request(Method::GET, "/documents");

        let res = self.send::<DocumentListResponse>(req).await;
        return res.map(|res| return res.documents);
    }
}
