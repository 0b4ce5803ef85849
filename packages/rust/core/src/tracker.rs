//! Ticket-write HTTP client.
//!
//! Sends converted documents to the issue tracker's REST API, either as a new
//! comment or as the replacement issue description. The document travels as
//! a single request-body field in the tracker's wire format.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use url::Url;

use ticketdoc_markdown::Document;
use ticketdoc_shared::{Result, TicketDocError, TrackerConfig, TrackerCredentials};

use crate::adf::to_adf;

/// User-Agent string for tracker requests.
const USER_AGENT: &str = concat!("ticketdoc/", env!("CARGO_PKG_VERSION"));

/// Reference to a comment created on the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentRef {
    /// Tracker-assigned comment id.
    pub id: String,
    /// API URL of the comment, when the tracker returns one.
    #[serde(rename = "self", default)]
    pub url: Option<String>,
}

/// Client for the tracker's issue API.
pub struct TrackerClient {
    client: Client,
    base_url: Url,
    credentials: TrackerCredentials,
}

impl TrackerClient {
    /// Create a client for the site named in `config`.
    pub fn new(config: &TrackerConfig, credentials: TrackerCredentials) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            TicketDocError::config(format!("invalid tracker base_url '{}': {e}", config.base_url))
        })?;
        // Url::join replaces the last path segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TicketDocError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Add `doc` as a new comment on `issue_key`.
    #[instrument(skip(self, doc), fields(blocks = doc.len()))]
    pub async fn add_comment(&self, issue_key: &str, doc: &Document) -> Result<CommentRef> {
        let url = self.issue_url(issue_key, Some("comment"))?;
        let body = json!({ "body": to_adf(doc) });

        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| TicketDocError::Network(format!("comment request failed: {e}")))?;

        let response = check_status(response).await?;
        let comment: CommentRef = response.json().await.map_err(|e| {
            TicketDocError::Serialization(format!("invalid comment response: {e}"))
        })?;

        info!(comment_id = %comment.id, "comment created");
        Ok(comment)
    }

    /// Replace the description of `issue_key` with `doc`.
    #[instrument(skip(self, doc), fields(blocks = doc.len()))]
    pub async fn update_description(&self, issue_key: &str, doc: &Document) -> Result<()> {
        let url = self.issue_url(issue_key, None)?;
        let body = json!({ "fields": { "description": to_adf(doc) } });

        let response = self
            .client
            .put(url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| TicketDocError::Network(format!("description update failed: {e}")))?;

        check_status(response).await?;
        info!("description updated");
        Ok(())
    }

    fn issue_url(&self, issue_key: &str, suffix: Option<&str>) -> Result<Url> {
        validate_issue_key(issue_key)?;

        let mut path = format!("rest/api/3/issue/{issue_key}");
        if let Some(suffix) = suffix {
            path.push('/');
            path.push_str(suffix);
        }

        self.base_url
            .join(&path)
            .map_err(|e| TicketDocError::config(format!("cannot build issue URL: {e}")))
    }
}

/// Turn non-success responses into [`TicketDocError::Tracker`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "tracker rejected request");
    Err(TicketDocError::tracker(status.as_u16(), body))
}

/// Check that `key` looks like `PROJ-123`.
pub fn validate_issue_key(key: &str) -> Result<()> {
    static ISSUE_KEY_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*-[0-9]+$").expect("valid regex"));

    if ISSUE_KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(TicketDocError::validation(format!(
            "issue key '{key}' is not of the form PROJ-123"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketdoc_markdown::parse;
    use wiremock::matchers::{basic_auth, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> TrackerCredentials {
        TrackerCredentials {
            email: "bot@example.com".into(),
            token: "tok".into(),
        }
    }

    fn client_for(server: &MockServer) -> TrackerClient {
        let config = TrackerConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        TrackerClient::new(&config, credentials()).unwrap()
    }

    #[test]
    fn issue_key_validation() {
        assert!(validate_issue_key("OPS-42").is_ok());
        assert!(validate_issue_key("A1_B-7").is_ok());
        assert!(validate_issue_key("ops-42").is_err());
        assert!(validate_issue_key("OPS42").is_err());
        assert!(validate_issue_key("OPS-42/../x").is_err());
        assert!(validate_issue_key("").is_err());
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = TrackerConfig {
            base_url: "https://tracker.example.com/jira".into(),
            ..Default::default()
        };
        let client = TrackerClient::new(&config, credentials()).unwrap();
        assert_eq!(client.base_url.as_str(), "https://tracker.example.com/jira/");
        assert_eq!(
            client.issue_url("OPS-1", Some("comment")).unwrap().as_str(),
            "https://tracker.example.com/jira/rest/api/3/issue/OPS-1/comment"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = TrackerConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = TrackerClient::new(&config, credentials()).err().unwrap();
        assert!(matches!(err, TicketDocError::Config { .. }));
    }

    #[tokio::test]
    async fn add_comment_posts_adf_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/OPS-7/comment"))
            .and(basic_auth("bot@example.com", "tok"))
            .and(body_partial_json(serde_json::json!({
                "body": {
                    "type": "doc",
                    "version": 1,
                    "content": [{
                        "type": "heading",
                        "attrs": { "level": 2 },
                        "content": [{ "type": "text", "text": "Summary" }]
                    }]
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "10042",
                "self": "https://tracker.example.com/rest/api/3/issue/OPS-7/comment/10042"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let comment = client
            .add_comment("OPS-7", &parse("## Summary"))
            .await
            .unwrap();

        assert_eq!(comment.id, "10042");
        assert!(comment.url.unwrap().ends_with("/comment/10042"));
    }

    #[tokio::test]
    async fn update_description_puts_fields() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/rest/api/3/issue/OPS-8"))
            .and(body_partial_json(serde_json::json!({
                "fields": { "description": { "type": "doc" } }
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .update_description("OPS-8", &parse("plain text"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn error_status_becomes_tracker_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/OPS-9/comment"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("Issue does not exist"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .add_comment("OPS-9", &parse("hello"))
            .await
            .unwrap_err();

        match err {
            TicketDocError::Tracker { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Issue does not exist");
            }
            other => panic!("expected Tracker error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_key_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .add_comment("not-a-key", &parse("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, TicketDocError::Validation { .. }));
    }
}
