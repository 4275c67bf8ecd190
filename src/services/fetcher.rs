// src/services/fetcher.rs

//! Artifact fetchers.
//!
//! Resolves a record to its published artifact and retrieves the raw text.
//! Every failure is reported as `AppError::Fetch` carrying the record id.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ArtifactNaming, FetcherConfig, Record};
use crate::utils::http::create_async_client;
use crate::utils::url::{artifact_url, is_plain_key, parse_base};

/// Retrieves the raw content of a record's artifact.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Fetch the buggy-version artifact of `record` in a single attempt.
    async fn fetch(&self, record: &Record) -> Result<String>;
}

/// Fetches artifacts over HTTP from `{base_url}{retrieval key}`.
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    naming: ArtifactNaming,
}

impl HttpFetcher {
    /// Create a fetcher with a client configured from `config`.
    pub fn new(config: &FetcherConfig, naming: ArtifactNaming) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            base_url: parse_base(&config.base_url)?,
            naming,
        })
    }

    /// Location of the artifact for `record`.
    pub fn artifact_url(&self, record: &Record) -> Result<Url> {
        artifact_url(&self.base_url, &record.retrieval_key(&self.naming))
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, record: &Record) -> Result<String> {
        let url = self
            .artifact_url(record)
            .map_err(|e| AppError::fetch(record.id, e))?;
        log::debug!("Fetching artifact for record {} from {}", record.id, url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::fetch(record.id, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(
                record.id,
                format!("HTTP status {status} for {url}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::fetch(record.id, e))
    }
}

/// Reads artifacts from a local checkout of the corpus.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
    naming: ArtifactNaming,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>, naming: ArtifactNaming) -> Self {
        Self {
            root: root.into(),
            naming,
        }
    }
}

#[async_trait]
impl ArtifactFetcher for DirectoryFetcher {
    async fn fetch(&self, record: &Record) -> Result<String> {
        let key = record.retrieval_key(&self.naming);
        if !is_plain_key(&key) {
            return Err(AppError::fetch(
                record.id,
                format!("retrieval key '{key}' is not a plain file name"),
            ));
        }

        let path = self.root.join(&key);
        log::debug!(
            "Reading artifact for record {} from {}",
            record.id,
            path.display()
        );
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AppError::fetch(record.id, format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn record(id: u64, hash: &str) -> Record {
        Record {
            id,
            project_name: "demo".to_string(),
            start_line: 1,
            end_line: 2,
            defect_file_hash: hash.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Serve exactly one canned HTTP response and report the request line.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (format!("http://{addr}/all_bug_files/"), handle)
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let (base, server) = serve_once("200 OK", "class Leak {}\n").await;
        let config = FetcherConfig {
            base_url: base,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&config, ArtifactNaming::default()).unwrap();

        let body = fetcher.fetch(&record(42, "abc123")).await.unwrap();
        assert_eq!(body, "class Leak {}\n");

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /all_bug_files/bug-42-abc123.java HTTP/1.1");
    }

    #[tokio::test]
    async fn test_http_fetch_status_failure() {
        let (base, server) = serve_once("404 Not Found", "missing").await;
        let config = FetcherConfig {
            base_url: base,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&config, ArtifactNaming::default()).unwrap();

        let err = fetcher.fetch(&record(7, "dead")).await.unwrap_err();
        match err {
            AppError::Fetch { id, cause } => {
                assert_eq!(id, 7);
                assert!(cause.contains("404"), "unexpected cause: {cause}");
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_fetch_transport_failure() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(
            &FetcherConfig {
                base_url: format!("http://{addr}/"),
                timeout_secs: 2,
                ..Default::default()
            },
            ArtifactNaming::default(),
        )
        .unwrap();

        let err = fetcher.fetch(&record(9, "beef")).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { id: 9, .. }));
    }

    #[test]
    fn test_artifact_url() {
        let fetcher = HttpFetcher::new(
            &FetcherConfig {
                base_url: "https://corpus.example.org/all_bug_files".to_string(),
                ..Default::default()
            },
            ArtifactNaming::default(),
        )
        .unwrap();
        let url = fetcher.artifact_url(&record(1, "4c12")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://corpus.example.org/all_bug_files/bug-1-4c12.java"
        );
    }

    #[tokio::test]
    async fn test_http_fetch_rejects_scheme_like_key() {
        let fetcher =
            HttpFetcher::new(&FetcherConfig::default(), ArtifactNaming::default()).unwrap();
        let err = fetcher.fetch(&record(1, "ab:cd")).await.unwrap_err();
        match err {
            AppError::Fetch { id, cause } => {
                assert_eq!(id, 1);
                assert!(cause.contains("not a plain file name"), "unexpected cause: {cause}");
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_fetch() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bug-5-cafe.java"), "line 1\nline 2\n").unwrap();
        let fetcher = DirectoryFetcher::new(tmp.path(), ArtifactNaming::default());

        let body = fetcher.fetch(&record(5, "cafe")).await.unwrap();
        assert_eq!(body.lines().count(), 2);

        let err = fetcher.fetch(&record(6, "cafe")).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { id: 6, .. }));
    }

    #[tokio::test]
    async fn test_directory_fetch_rejects_traversal() {
        let tmp = TempDir::new().unwrap();
        let fetcher = DirectoryFetcher::new(tmp.path(), ArtifactNaming::default());

        let err = fetcher.fetch(&record(5, "x/../../etc/passwd")).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { id: 5, .. }));
    }
}
