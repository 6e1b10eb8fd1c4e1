//! GitHub listing client and pagination loop.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::http::{HttpHeaders, HttpResponse, HttpTransport, ReqwestTransport};
use crate::progress::{BackupProgress, ProgressCallback, emit};

use super::error::GitHubError;
use super::pagination::parse_next_link;
use super::types::{Gist, Repo};

/// Root of the public GitHub REST API.
pub const API_ROOT: &str = "https://api.github.com";

/// Client for the GitHub listing endpoints.
///
/// Holds the optional credential for the lifetime of the process; the
/// token is sent as an `Authorization` header on every request and never
/// written to any diagnostic output. Deliberately not `Debug`.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_root: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client backed by reqwest against the public API.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::default()), API_ROOT, token)
    }

    /// Create a client over an explicit transport and API root.
    ///
    /// Tests use this with an in-memory transport; the API root override
    /// also covers GitHub Enterprise style hosts.
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        api_root: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            transport,
            api_root: api_root.into(),
            token,
        }
    }

    fn request_headers(&self) -> HttpHeaders {
        let mut headers: HttpHeaders = vec![
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), "ghbak".to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("token {}", token)));
        }
        headers
    }

    /// One GET against the API. Fails on any non-2xx status.
    async fn get(
        &self,
        url: &str,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<HttpResponse, GitHubError> {
        emit(
            on_progress,
            BackupProgress::Request {
                url: url.to_string(),
            },
        );

        let response = self.transport.get(url, self.request_headers()).await?;
        if !(200..300).contains(&response.status) {
            return Err(GitHubError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// Fetch every page of a listing endpoint.
    ///
    /// Follows the `Link` header's `rel="next"` URL until the server
    /// stops advertising one, concatenating the JSON array bodies. The
    /// whole listing is materialized before the caller sees any of it.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        url: String,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<Vec<T>, GitHubError> {
        let mut items: Vec<T> = Vec::new();
        let mut next = Some(url);

        while let Some(url) = next {
            let response = self.get(&url, on_progress).await?;
            next = response.header("link").and_then(parse_next_link);

            let page: Vec<T> = serde_json::from_slice(&response.body)
                .map_err(|source| GitHubError::Decode { url, source })?;

            tracing::debug!(count = page.len(), has_next = next.is_some(), "fetched page");
            items.extend(page);
        }

        Ok(items)
    }

    /// List every repository of `user`, in API order.
    pub async fn list_repos(
        &self,
        user: &str,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<Vec<Repo>, GitHubError> {
        self.get_paginated(format!("{}/users/{}/repos", self.api_root, user), on_progress)
            .await
    }

    /// List every gist of `user`, in API order.
    pub async fn list_gists(
        &self,
        user: &str,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<Vec<Gist>, GitHubError> {
        self.get_paginated(format!("{}/users/{}/gists", self.api_root, user), on_progress)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;

    const API: &str = "https://api.test";

    fn json_page(body: &str, next: Option<&str>) -> HttpResponse {
        let mut headers: HttpHeaders = Vec::new();
        if let Some(next) = next {
            headers.push(("link".to_string(), format!("<{}>; rel=\"next\"", next)));
        }
        HttpResponse {
            status: 200,
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    fn client(transport: &MockTransport, token: Option<&str>) -> GitHubClient {
        GitHubClient::with_transport(
            Arc::new(transport.clone()),
            API,
            token.map(String::from),
        )
    }

    #[tokio::test]
    async fn test_list_repos_follows_next_links() {
        let transport = MockTransport::new();
        let first = format!("{API}/users/alice/repos");
        let second = format!("{API}/users/alice/repos?page=2");

        transport.push_response(
            &first,
            json_page(r#"[{"name": "one", "description": null}]"#, Some(&second)),
        );
        transport.push_response(&second, json_page(r#"[{"name": "two"}]"#, None));

        let repos = client(&transport, None)
            .list_repos("alice", None)
            .await
            .expect("listing should succeed");

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two"]);
        assert_eq!(
            transport
                .requests()
                .iter()
                .map(|(url, _)| url.as_str())
                .collect::<Vec<_>>(),
            vec![first.as_str(), second.as_str()]
        );
    }

    #[tokio::test]
    async fn test_token_sent_as_authorization_header() {
        let transport = MockTransport::new();
        let url = format!("{API}/users/alice/gists");
        transport.push_response(&url, json_page("[]", None));

        client(&transport, Some("sekrit"))
            .list_gists("alice", None)
            .await
            .expect("listing should succeed");

        let requests = transport.requests();
        let headers = &requests[0].1;
        assert!(
            headers
                .iter()
                .any(|(k, v)| k == "Authorization" && v == "token sekrit")
        );
        assert!(headers.iter().any(|(k, _)| k == "User-Agent"));
    }

    #[tokio::test]
    async fn test_anonymous_requests_carry_no_authorization_header() {
        let transport = MockTransport::new();
        let url = format!("{API}/users/alice/repos");
        transport.push_response(&url, json_page("[]", None));

        client(&transport, None)
            .list_repos("alice", None)
            .await
            .expect("listing should succeed");

        let requests = transport.requests();
        assert!(!requests[0].1.iter().any(|(k, _)| k == "Authorization"));
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_an_error() {
        let transport = MockTransport::new();
        let url = format!("{API}/users/alice/repos");
        transport.push_response(
            &url,
            HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: b"{}".to_vec(),
            },
        );

        let err = client(&transport, None)
            .list_repos("alice", None)
            .await
            .expect_err("404 should fail");

        match err {
            GitHubError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/users/alice/repos"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_a_decode_error() {
        let transport = MockTransport::new();
        let url = format!("{API}/users/alice/repos");
        transport.push_response(&url, json_page(r#"{"not": "an array"}"#, None));

        let err = client(&transport, None)
            .list_repos("alice", None)
            .await
            .expect_err("non-array body should fail");
        assert!(matches!(err, GitHubError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_request_events_emitted_per_page() {
        use std::sync::{Arc as StdArc, Mutex};

        let transport = MockTransport::new();
        let first = format!("{API}/users/alice/repos");
        let second = format!("{API}/users/alice/repos?page=2");
        transport.push_response(&first, json_page("[]", Some(&second)));
        transport.push_response(&second, json_page("[]", None));

        let urls = StdArc::new(Mutex::new(Vec::new()));
        let urls_clone = StdArc::clone(&urls);
        let callback: ProgressCallback = Box::new(move |event| {
            if let BackupProgress::Request { url } = event {
                urls_clone.lock().unwrap().push(url);
            }
        });

        client(&transport, None)
            .list_repos("alice", Some(&callback))
            .await
            .expect("listing should succeed");

        assert_eq!(*urls.lock().unwrap(), vec![first, second]);
    }
}
