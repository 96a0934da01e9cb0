use crate::models::{RawYearlyData, ReferrerCounts};
use std::{env, fmt, path::PathBuf};
use tokio::fs;
use tracing::debug;

/// Where raw traffic documents come from. A remote base URL serving
/// static JSON, or a local directory with the same layout (what the
/// integration tests and offline runs use). Documents live at
/// `{owner}/{repo}/traffic.json` with `referrers.json` as a sibling.
#[derive(Clone)]
pub enum DataSource {
    Remote {
        base_url: String,
        client: reqwest::Client,
    },
    Local {
        dir: PathBuf,
    },
}

/// Outcome of the primary fetch. `Missing` (no document for this
/// repository) is an expected state, not an error; both it and `Err`
/// send the caller down the synthetic-fallback branch.
#[derive(Debug)]
pub enum Fetched {
    Live(RawYearlyData),
    Missing,
}

#[derive(Debug)]
pub enum SourceError {
    Http(reqwest::Error),
    Status(reqwest::StatusCode),
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status(status) => write!(f, "unexpected status {status}"),
            Self::Io(err) => write!(f, "read failed: {err}"),
            Self::Parse(err) => write!(f, "malformed document: {err}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// `TRAFFIC_DATA_URL` selects the remote source; otherwise a local
/// directory from `TRAFFIC_DATA_DIR`, defaulting to `data/`.
pub fn resolve_data_source() -> DataSource {
    if let Ok(base_url) = env::var("TRAFFIC_DATA_URL") {
        return DataSource::Remote {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }

    let dir = env::var("TRAFFIC_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    DataSource::Local { dir: PathBuf::from(dir) }
}

impl DataSource {
    pub async fn fetch_traffic(&self, owner: &str, repo: &str) -> Result<Fetched, SourceError> {
        let raw = match self.fetch_document(owner, repo, "traffic.json").await? {
            Some(bytes) => serde_json::from_slice::<RawYearlyData>(&bytes)?,
            None => return Ok(Fetched::Missing),
        };

        if raw.values().all(|days| days.is_empty()) {
            return Ok(Fetched::Missing);
        }
        Ok(Fetched::Live(raw))
    }

    /// The referrers document is optional; a missing document is just an
    /// empty mapping. Transport and parse errors still surface so the
    /// caller can log them before continuing without referrer data.
    pub async fn fetch_referrers(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<ReferrerCounts, SourceError> {
        match self.fetch_document(owner, repo, "referrers.json").await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(ReferrerCounts::new()),
        }
    }

    async fn fetch_document(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<Option<Vec<u8>>, SourceError> {
        match self {
            Self::Remote { base_url, client } => {
                let url = format!("{base_url}/{owner}/{repo}/{name}");
                debug!("fetching {url}");
                let response = client.get(&url).send().await?;
                if response.status() == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if !response.status().is_success() {
                    return Err(SourceError::Status(response.status()));
                }
                Ok(Some(response.bytes().await?.to_vec()))
            }
            Self::Local { dir } => {
                let path = dir.join(owner).join(repo).join(name);
                debug!("reading {}", path.display());
                match fs::read(&path).await {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(err) => Err(SourceError::Io(err)),
                }
            }
        }
    }
}

/// Split and validate an `owner/name` repository identifier.
pub fn parse_repository(repository: &str) -> Option<(&str, &str)> {
    let (owner, name) = repository.split_once('/')?;
    let valid = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && part != "."
            && part != ".."
    };
    (valid(owner) && valid(name)).then_some((owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};

    async fn spawn_fixture(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn remote(base_url: String) -> DataSource {
        DataSource::Remote {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    #[tokio::test]
    async fn remote_source_reads_traffic_document() {
        let router = Router::new().route(
            "/octo/demo/traffic.json",
            get(|| async { r#"{"2024": {"2024-01-01": {"views": 5}}}"# }),
        );
        let source = remote(spawn_fixture(router).await);

        match source.fetch_traffic("octo", "demo").await.unwrap() {
            Fetched::Live(raw) => assert_eq!(raw["2024"]["2024-01-01"].views, 5),
            Fetched::Missing => panic!("expected live data"),
        }
        // No referrers document served: sibling fetch is an empty mapping.
        assert!(source.fetch_referrers("octo", "demo").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remote_source_404_is_missing_not_error() {
        let source = remote(spawn_fixture(Router::new()).await);

        assert!(matches!(
            source.fetch_traffic("octo", "ghost").await.unwrap(),
            Fetched::Missing
        ));
    }

    #[tokio::test]
    async fn remote_source_server_error_surfaces_as_status() {
        let router = Router::new().route(
            "/octo/err/traffic.json",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let source = remote(spawn_fixture(router).await);

        match source.fetch_traffic("octo", "err").await {
            Err(SourceError::Status(status)) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn parse_repository_accepts_owner_name() {
        assert_eq!(parse_repository("octo/traffic-dash"), Some(("octo", "traffic-dash")));
        assert_eq!(parse_repository("a.b/c_d"), Some(("a.b", "c_d")));
    }

    #[test]
    fn parse_repository_rejects_malformed_input() {
        assert!(parse_repository("no-slash").is_none());
        assert!(parse_repository("/name").is_none());
        assert!(parse_repository("owner/").is_none());
        assert!(parse_repository("owner/na/me").is_none());
        assert!(parse_repository("../etc/passwd").is_none());
        assert!(parse_repository("owner/..").is_none());
    }

    #[tokio::test]
    async fn local_source_missing_file_is_missing_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::Local { dir: dir.path().to_path_buf() };

        match source.fetch_traffic("octo", "nope").await.unwrap() {
            Fetched::Missing => {}
            other => panic!("expected Missing, got {other:?}"),
        }
        assert!(source.fetch_referrers("octo", "nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_source_reads_traffic_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join("octo").join("demo");
        std::fs::create_dir_all(&repo_dir).unwrap();
        std::fs::write(
            repo_dir.join("traffic.json"),
            r#"{"2024": {"2024-01-01": {"views": 5}}}"#,
        )
        .unwrap();

        let source = DataSource::Local { dir: dir.path().to_path_buf() };
        match source.fetch_traffic("octo", "demo").await.unwrap() {
            Fetched::Live(raw) => assert_eq!(raw["2024"]["2024-01-01"].views, 5),
            Fetched::Missing => panic!("expected live data"),
        }
    }

    #[tokio::test]
    async fn local_source_malformed_document_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join("octo").join("bad");
        std::fs::create_dir_all(&repo_dir).unwrap();
        std::fs::write(repo_dir.join("traffic.json"), r#"{"2024": "oops"}"#).unwrap();

        let source = DataSource::Local { dir: dir.path().to_path_buf() };
        assert!(matches!(
            source.fetch_traffic("octo", "bad").await,
            Err(SourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn empty_document_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo_dir = dir.path().join("octo").join("empty");
        std::fs::create_dir_all(&repo_dir).unwrap();
        std::fs::write(repo_dir.join("traffic.json"), r#"{"2024": {}}"#).unwrap();

        let source = DataSource::Local { dir: dir.path().to_path_buf() };
        assert!(matches!(
            source.fetch_traffic("octo", "empty").await.unwrap(),
            Fetched::Missing
        ));
    }
}
