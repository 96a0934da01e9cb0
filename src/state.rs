use crate::models::Dashboard;
use crate::source::DataSource;
use std::{env, sync::Arc};
use tokio::sync::Mutex;

pub const DEFAULT_REPOSITORY: &str = "octocat/Hello-World";

/// Shared application state: the data source plus the current dashboard
/// snapshot. Loads replace the snapshot wholesale; concurrent loads are
/// not sequenced, so the last writer wins.
#[derive(Clone)]
pub struct AppState {
    pub source: DataSource,
    pub default_repository: String,
    pub dashboard: Arc<Mutex<Option<Dashboard>>>,
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        let default_repository =
            env::var("TRAFFIC_DEFAULT_REPO").unwrap_or_else(|_| DEFAULT_REPOSITORY.to_string());
        Self {
            source,
            default_repository,
            dashboard: Arc::new(Mutex::new(None)),
        }
    }
}
