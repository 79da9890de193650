//! Command router: the single owner of the store and the API clients.
//!
//! Every user-facing operation is a [`Request`] variant dispatched by one
//! exhaustive match. The store is passed in at construction - there is no
//! ambient global handle - and the router holds no cache: every read
//! re-queries SQLite.
//!
//! Failures never cross this boundary as panics; they come back as typed
//! [`Error`](crate::error::Error) values that the CLI edge renders as
//! structured output.

use crate::error::{Error, Result};
use crate::llm::{self, ChatClient};
use crate::model::{SavedLink, API_KEY_SETTING};
use crate::storage::SqliteStorage;

/// Prefix every accepted credential must carry. A format sanity check
/// only, not validation against the endpoint.
pub const API_KEY_PREFIX: &str = "sk-";

/// The closed set of requests a UI surface can issue.
#[derive(Debug, Clone)]
pub enum Request {
    SaveLink {
        url: String,
        title: String,
        content: String,
    },
    ListLinks,
    DeleteLink {
        id: i64,
    },
    Search {
        question: String,
    },
    GetApiKey,
    SetApiKey {
        value: String,
    },
}

/// One response variant per request variant.
#[derive(Debug, Clone)]
pub enum Response {
    Saved { id: i64, summary: String },
    Links(Vec<SavedLink>),
    Deleted,
    Answer(String),
    ApiKey(Option<String>),
    ApiKeySaved,
}

/// Router owning the storage and completion-endpoint client.
pub struct Router {
    storage: SqliteStorage,
    client: ChatClient,
}

impl Router {
    /// Build a router around an opened store, using the configured
    /// completion endpoint.
    #[must_use]
    pub fn new(storage: SqliteStorage) -> Self {
        Self::with_client(storage, ChatClient::new())
    }

    /// Build a router with an explicit client (tests, custom endpoints).
    #[must_use]
    pub fn with_client(storage: SqliteStorage, client: ChatClient) -> Self {
        Self { storage, client }
    }

    /// Dispatch one request.
    ///
    /// Requests are independent; there is no cross-request state beyond
    /// the store itself, and no retries anywhere.
    ///
    /// # Errors
    ///
    /// Returns the typed error for the failing operation; see each
    /// handler below.
    pub async fn handle(&mut self, request: Request) -> Result<Response> {
        match request {
            Request::SaveLink {
                url,
                title,
                content,
            } => self.save_link(url, title, &content).await,
            Request::ListLinks => {
                let links = self.storage.list_links()?;
                Ok(Response::Links(links))
            }
            Request::DeleteLink { id } => {
                self.storage.delete_link(id)?;
                tracing::info!(id, "link deleted");
                Ok(Response::Deleted)
            }
            Request::Search { question } => self.search(&question).await,
            Request::GetApiKey => {
                let value = self.storage.get_setting(API_KEY_SETTING)?;
                Ok(Response::ApiKey(value))
            }
            Request::SetApiKey { value } => {
                if !value.starts_with(API_KEY_PREFIX) {
                    return Err(Error::InvalidApiKey);
                }
                self.storage.put_setting(API_KEY_SETTING, &value)?;
                tracing::info!("API key saved");
                Ok(Response::ApiKeySaved)
            }
        }
    }

    /// Save a page: duplicate check, summary, insert.
    ///
    /// The cheap exact-URL lookup runs first so a duplicate fails before
    /// the summary call. The insert itself is the atomic
    /// insert-if-absent, which also catches a save racing in between.
    async fn save_link(&mut self, url: String, title: String, content: &str) -> Result<Response> {
        if self.storage.find_by_url(&url)?.is_some() {
            tracing::info!(%url, "URL already saved");
            return Err(Error::DuplicateUrl { url });
        }

        // Credential is re-read from the store on every request
        let api_key = self.storage.get_setting(API_KEY_SETTING)?;
        let summary =
            llm::generate_summary(&self.client, api_key.as_deref(), &url, &title, content).await;

        let id = self
            .storage
            .insert_link_if_absent(&url, &title, &summary, &[])?
            .ok_or(Error::DuplicateUrl { url: url.clone() })?;

        tracing::info!(id, %url, "link saved");
        Ok(Response::Saved { id, summary })
    }

    async fn search(&mut self, question: &str) -> Result<Response> {
        let api_key = self
            .storage
            .get_setting(API_KEY_SETTING)?
            .ok_or(Error::ApiKeyMissing)?;

        // No filtering, no cap: the whole collection goes into the prompt
        let links = self.storage.list_links()?;
        let answer = llm::answer_question(&self.client, &api_key, &links, question).await?;

        Ok(Response::Answer(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::NO_KEY_PLACEHOLDER;

    fn router() -> Router {
        // Unroutable endpoint: any HTTP call would fail loudly, which is
        // exactly what the no-credential paths must never do.
        Router::with_client(
            SqliteStorage::open_memory().unwrap(),
            ChatClient::with_base_url("http://127.0.0.1:1"),
        )
    }

    fn save_request(url: &str) -> Request {
        Request::SaveLink {
            url: url.to_string(),
            title: "A".to_string(),
            content: "hello world".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_without_key_uses_placeholder() {
        let mut r = router();
        let response = r
            .handle(Request::SaveLink {
                url: "https://a.example".into(),
                title: "A".into(),
                content: "hello world".into(),
            })
            .await
            .unwrap();

        match response {
            Response::Saved { id, summary } => {
                assert_eq!(id, 1);
                assert_eq!(summary, NO_KEY_PLACEHOLDER);
            }
            other => panic!("expected Saved, got {other:?}"),
        }

        let Response::Links(links) = r.handle(Request::ListLinks).await.unwrap() else {
            panic!("expected Links");
        };
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, 1);
        assert_eq!(links[0].url, "https://a.example");
        assert!(links[0].tags.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_save_fails_without_second_record() {
        let mut r = router();
        r.handle(save_request("https://a.example")).await.unwrap();

        let err = r
            .handle(save_request("https://a.example"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateUrl { .. }));
        assert_eq!(err.to_string(), "URL already saved");

        let Response::Links(links) = r.handle(Request::ListLinks).await.unwrap() else {
            panic!("expected Links");
        };
        assert_eq!(links.len(), 1);
    }

    #[tokio::test]
    async fn test_trailing_slash_is_a_distinct_url() {
        let mut r = router();
        r.handle(save_request("http://x")).await.unwrap();
        r.handle(save_request("http://x/")).await.unwrap();

        let Response::Links(links) = r.handle(Request::ListLinks).await.unwrap() else {
            panic!("expected Links");
        };
        assert_eq!(links.len(), 2);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let mut r = router();
        for url in ["https://1.example", "https://2.example", "https://3.example"] {
            r.handle(save_request(url)).await.unwrap();
        }

        let Response::Links(links) = r.handle(Request::ListLinks).await.unwrap() else {
            panic!("expected Links");
        };
        let ids: Vec<i64> = links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_delete_then_list_empty_and_idempotent() {
        let mut r = router();
        r.handle(save_request("https://a.example")).await.unwrap();

        assert!(matches!(
            r.handle(Request::DeleteLink { id: 1 }).await.unwrap(),
            Response::Deleted
        ));
        // Deleting the same id again still succeeds
        assert!(matches!(
            r.handle(Request::DeleteLink { id: 1 }).await.unwrap(),
            Response::Deleted
        ));

        let Response::Links(links) = r.handle(Request::ListLinks).await.unwrap() else {
            panic!("expected Links");
        };
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_key_is_credential_failure() {
        let mut r = router();
        let err = r
            .handle(Request::Search {
                question: "anything?".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiKeyMissing));
        assert_eq!(err.to_string(), "API key not configured");
    }

    #[tokio::test]
    async fn test_api_key_roundtrip_and_format_check() {
        let mut r = router();

        let Response::ApiKey(none) = r.handle(Request::GetApiKey).await.unwrap() else {
            panic!("expected ApiKey");
        };
        assert!(none.is_none());

        let err = r
            .handle(Request::SetApiKey {
                value: "not-a-key".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey));

        r.handle(Request::SetApiKey {
            value: "sk-abc123".into(),
        })
        .await
        .unwrap();

        let Response::ApiKey(stored) = r.handle(Request::GetApiKey).await.unwrap() else {
            panic!("expected ApiKey");
        };
        assert_eq!(stored.as_deref(), Some("sk-abc123"));
    }

    #[tokio::test]
    async fn test_search_sends_whole_collection() {
        use wiremock::matchers::{body_string_contains, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("https://a.example"))
            .and(body_string_contains("https://b.example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Both look relevant."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut r = Router::with_client(
            SqliteStorage::open_memory().unwrap(),
            ChatClient::with_base_url(server.uri()),
        );
        r.handle(Request::SetApiKey {
            value: "sk-abc".into(),
        })
        .await
        .unwrap();
        r.handle(save_request("https://a.example")).await.unwrap();
        r.handle(save_request("https://b.example")).await.unwrap();

        let Response::Answer(answer) = r
            .handle(Request::Search {
                question: "which?".into(),
            })
            .await
            .unwrap()
        else {
            panic!("expected Answer");
        };
        assert_eq!(answer, "Both look relevant.");
    }
}
