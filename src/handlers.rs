use crate::errors::AppError;
use crate::export::series_to_csv;
use crate::load::load_dashboard;
use crate::metrics::filter_series;
use crate::models::{Dashboard, ExportQuery, SelectRepositoryRequest};
use crate::source::parse_repository;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.default_repository))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    Ok(Json(current_dashboard(&state).await?))
}

pub async fn select_repository(
    State(state): State<AppState>,
    Json(payload): Json<SelectRepositoryRequest>,
) -> Result<Json<Dashboard>, AppError> {
    let repository = payload.repository.trim();
    let Some((owner, name)) = parse_repository(repository) else {
        return Err(AppError::bad_request("repository must look like 'owner/name'"));
    };

    let dashboard = load_dashboard(&state.source, owner, name).await;
    *state.dashboard.lock().await = Some(dashboard.clone());
    Ok(Json(dashboard))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    for bound in [query.from.as_deref(), query.to.as_deref()].into_iter().flatten() {
        if !looks_like_date(bound) {
            return Err(AppError::bad_request("from/to must be YYYY-MM-DD dates"));
        }
    }

    let dashboard = current_dashboard(&state).await?;
    let filtered = filter_series(&dashboard.series, query.from.as_deref(), query.to.as_deref());
    let filename = format!("{}-traffic.csv", dashboard.repository.replace('/', "-"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        series_to_csv(&filtered),
    )
        .into_response())
}

/// Current snapshot, loading the default repository on first access so
/// the dashboard endpoints never 404.
async fn current_dashboard(state: &AppState) -> Result<Dashboard, AppError> {
    let mut guard = state.dashboard.lock().await;
    if let Some(dashboard) = guard.as_ref() {
        return Ok(dashboard.clone());
    }

    let (owner, name) = parse_repository(&state.default_repository).ok_or_else(|| {
        AppError::bad_request("TRAFFIC_DEFAULT_REPO must look like 'owner/name'")
    })?;
    let dashboard = load_dashboard(&state.source, owner, name).await;
    *guard = Some(dashboard.clone());
    Ok(dashboard)
}

fn looks_like_date(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
