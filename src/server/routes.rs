//! Request handlers - one handler per endpoint, one store session per
//! request. Every failure leaves through the same envelope:
//! `{"error": {"kind": ..., "message": ...}}` with a mapped status code.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::Error;
use crate::node::NodeKind;
use crate::relation::{RelationKind, SynonymClass, TermRelation};
use crate::server::AppState;
use crate::storage::{NewNode, NewSynonym};

/// Uniform failure envelope: kind discriminant plus human-readable message
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": { "kind": self.kind, "message": self.message }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, kind) = match &err {
            Error::InvalidNodeKind(_) => (StatusCode::BAD_REQUEST, "invalid_node_kind"),
            Error::InvalidRelation(_) => (StatusCode::BAD_REQUEST, "invalid_relation"),
            Error::InvalidSynonymClass(_) => {
                (StatusCode::BAD_REQUEST, "invalid_synonym_class")
            }
            Error::MissingField(_) => (StatusCode::BAD_REQUEST, "missing_field"),
            Error::NodeNotFound(_) => (StatusCode::NOT_FOUND, "node_not_found"),
            Error::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

type ApiResult = Result<Json<serde_json::Value>, ApiError>;

/// Body of `/add_node/`. `type` is a Russian node label; empty translation
/// and parent strings are treated as absent, as the original clients send.
#[derive(Deserialize)]
pub struct NodeData {
    #[serde(rename = "type")]
    pub kind: String,
    pub ru: String,
    pub kz: Option<String>,
    pub en: Option<String>,
    pub parent: Option<String>,
}

#[derive(Deserialize)]
pub struct RelationData {
    pub term1: String,
    pub term2: String,
    #[serde(alias = "relationType")]
    pub relation_type: String,
}

#[derive(Deserialize)]
pub struct DeleteNodeData {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct SynonymData {
    pub term: String,
    pub synonym: String,
    pub kz: Option<String>,
    pub en: Option<String>,
    pub synonym_class: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub async fn handle_root(State(_state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "API work!"}))
}

pub async fn handle_graph_data(State(state): State<Arc<AppState>>) -> ApiResult {
    let store = state.store()?;
    let dump = store.graph_data()?;
    Ok(Json(serde_json::to_value(&dump).map_err(|e| ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        kind: "serialization",
        message: e.to_string(),
    })?))
}

pub async fn handle_add_node(
    State(state): State<Arc<AppState>>,
    Json(data): Json<NodeData>,
) -> ApiResult {
    let kind: NodeKind = data.kind.parse()?;
    if data.ru.trim().is_empty() {
        return Err(Error::MissingField("ru").into());
    }

    let mut store = state.store()?;
    store.create_node(&NewNode {
        kind,
        ru: data.ru,
        kz: non_empty(data.kz),
        en: non_empty(data.en),
        parent: non_empty(data.parent),
    })?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Узел успешно добавлен"
    })))
}

pub async fn handle_classes(State(state): State<Arc<AppState>>) -> ApiResult {
    let store = state.store()?;
    let classes = store.list_names(NodeKind::Class)?;
    Ok(Json(serde_json::json!({ "classes": classes })))
}

pub async fn handle_all_subclasses(State(state): State<Arc<AppState>>) -> ApiResult {
    let store = state.store()?;
    let subclasses = store.list_names(NodeKind::Subclass)?;
    Ok(Json(serde_json::json!({ "subclasses": subclasses })))
}

pub async fn handle_subclasses(
    State(state): State<Arc<AppState>>,
    Path(class_name): Path<String>,
) -> ApiResult {
    let store = state.store()?;
    let subclasses = store.children(
        NodeKind::Class,
        &class_name,
        RelationKind::Mt,
        NodeKind::Subclass,
    )?;
    Ok(Json(serde_json::json!({ "subclasses": subclasses })))
}

pub async fn handle_terms(
    State(state): State<Arc<AppState>>,
    Path(subclass_name): Path<String>,
) -> ApiResult {
    let store = state.store()?;
    let terms = store.children(
        NodeKind::Subclass,
        &subclass_name,
        RelationKind::HasTermin,
        NodeKind::Term,
    )?;
    Ok(Json(serde_json::json!({ "terms": terms })))
}

pub async fn handle_create_relation(
    State(state): State<Arc<AppState>>,
    Json(data): Json<RelationData>,
) -> ApiResult {
    // allow-list check happens before any write
    let relation: TermRelation = data.relation_type.parse()?;

    let mut store = state.store()?;
    store.create_term_relation(&data.term1, &data.term2, relation)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Связь успешно создана"
    })))
}

pub async fn handle_delete_all(State(state): State<Arc<AppState>>) -> ApiResult {
    let store = state.store()?;
    store.wipe()?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Все данные удалены"
    })))
}

pub async fn handle_delete_node(
    State(state): State<Arc<AppState>>,
    Json(data): Json<DeleteNodeData>,
) -> ApiResult {
    let kind: NodeKind = data.kind.parse()?;

    let mut store = state.store()?;
    let removed = store.delete_cascade(kind, &data.name)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "deleted": removed
    })))
}

pub async fn handle_add_synonym(
    State(state): State<Arc<AppState>>,
    Json(data): Json<SynonymData>,
) -> ApiResult {
    let class: SynonymClass = data.synonym_class.parse()?;
    if data.synonym.trim().is_empty() {
        return Err(Error::MissingField("synonym").into());
    }

    let mut store = state.store()?;
    store.add_synonym(&NewSynonym {
        term: data.term,
        synonym: data.synonym,
        kz: non_empty(data.kz),
        en: non_empty(data.en),
        class,
    })?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Синоним успешно добавлен"
    })))
}
