// ============================
// crates/backend-lib/src/handlers/links.rs
// ============================
//! Link resource handlers.
//!
//! Every handler checks the [`AuthContext`] first and answers 400 with the
//! gate's message when no identity was resolved.
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Form,
};
use linkkeeper_common::{Identity, Link, LinkId, NewLink};
use metrics::counter;
use serde::Deserialize;
use tracing::{info, warn};

use super::send;
use crate::auth::AuthContext;
use crate::error::AppError;
use crate::storage::LinkStore;
use crate::utils::all_integers;
use crate::AppState;

pub type LinkAuth = AuthContext<Identity>;

/// Form body of `POST /links`
#[derive(Debug, Deserialize)]
pub struct CreateLinkForm {
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Query of `DELETE /links?ids=1,2,3`
#[derive(Debug, Deserialize)]
pub struct DeleteLinksParams {
    pub ids: Option<String>,
}

fn parse_id(raw: &str) -> Result<LinkId, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid link id: {raw}")))
}

/// Parse a comma separated id list
pub fn parse_id_list(raw: &str) -> Result<Vec<LinkId>, AppError> {
    let parts: Vec<&str> = raw.split(',').filter(|p| !p.trim().is_empty()).collect();
    if parts.is_empty() || !all_integers(&parts) {
        return Err(AppError::InvalidInput(format!("ids must be integers: {raw}")));
    }
    parts.into_iter().map(parse_id).collect()
}

/// The link if it exists and belongs to `user`
async fn owned_link<S: LinkStore>(
    store: &S,
    user: &Identity,
    id: LinkId,
) -> Result<Option<Link>, AppError> {
    Ok(store
        .get_link(id)
        .await?
        .filter(|link| link.user_id == user.uid))
}

/// `GET /links` - the caller's links
pub async fn list_links<S: LinkStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    auth: LinkAuth,
) -> Result<Response, AppError> {
    let user = auth.require()?;
    let links = state.store.get_links(&user.uid).await?;
    Ok(send(StatusCode::OK, Some(links)))
}

/// `POST /links` - create a link from form fields
pub async fn create_link<S: LinkStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    auth: LinkAuth,
    form: Result<Form<CreateLinkForm>, FormRejection>,
) -> Result<Response, AppError> {
    let user = auth.require()?;
    let Form(form) = form.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    if form.url.trim().is_empty() || form.description.trim().is_empty() {
        return Err(AppError::InvalidInput("url and description are required".to_string()));
    }

    let new_link = NewLink {
        url: form.url,
        description: form.description,
        image_url: form.image_url.filter(|u| !u.trim().is_empty()),
    };

    match state.store.insert_link(&user.uid, new_link).await {
        Ok(link) => {
            counter!(crate::metrics::LINK_CREATED).increment(1);
            info!(uid = %user.uid, link_id = link.id, "link created");
            Ok(send(StatusCode::CREATED, Some(link)))
        },
        Err(e) => {
            warn!(uid = %user.uid, error = %e, "failed to store link");
            Ok(send::<Link>(StatusCode::BAD_REQUEST, None))
        },
    }
}

/// `DELETE /links?ids=...` - delete several of the caller's links
pub async fn delete_links<S: LinkStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    auth: LinkAuth,
    params: Result<Query<DeleteLinksParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let user = auth.require()?;
    let Query(params) = params.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let raw = params
        .ids
        .ok_or_else(|| AppError::InvalidInput("ids is required".to_string()))?;
    let ids = parse_id_list(&raw)?;

    let deleted = state.store.delete_links_for(&user.uid, &ids).await?;
    counter!(crate::metrics::LINK_DELETED).increment(deleted as u64);
    info!(uid = %user.uid, deleted, "links deleted");
    Ok(send::<Link>(StatusCode::OK, None))
}

/// `GET /links/{id}`
pub async fn get_link<S: LinkStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    auth: LinkAuth,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user = auth.require()?;
    let id = parse_id(&id)?;
    match owned_link(&state.store, user, id).await? {
        Some(link) => Ok(send(StatusCode::OK, Some(link))),
        None => Err(AppError::NotFound(format!("link {id}"))),
    }
}

/// `DELETE /links/{id}`
pub async fn delete_link<S: LinkStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    auth: LinkAuth,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user = auth.require()?;
    let id = parse_id(&id)?;
    let deleted = state.store.delete_links_for(&user.uid, &[id]).await?;
    if deleted > 0 {
        counter!(crate::metrics::LINK_DELETED).increment(deleted as u64);
        info!(uid = %user.uid, link_id = id, "link deleted");
    }
    Ok(send::<Link>(StatusCode::OK, None))
}
