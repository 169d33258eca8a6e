//! HTTP handlers for RepairDesk pages and htmx fragments

pub mod dashboard;
pub mod health;
pub mod stats;
pub mod technician;
pub mod tickets;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Html,
};
use serde::Serialize;

use crate::{error::AppResult, AppState};

/// Display name of the user behind the request.
///
/// Read from the header configured as `session.user_header` (set by the
/// fronting proxy), falling back to `session.default_user`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = &state.config.session;

        let name = parts
            .headers
            .get(session.user_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(session.default_user.as_str());

        Ok(CurrentUser(name.to_string()))
    }
}

/// Render a full page through its rendering unit
fn render_page<S: Serialize>(state: &AppState, page: &str, ctx: S) -> AppResult<Html<String>> {
    Ok(Html(state.templates.render_page(page, ctx)?))
}

/// Render a standalone fragment for an htmx swap
fn render_fragment<S: Serialize>(state: &AppState, fragment: &str, ctx: S) -> AppResult<Html<String>> {
    Ok(Html(state.templates.render_fragment(fragment, ctx)?))
}
