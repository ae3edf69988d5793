//! # 著者ハンドラ
//!
//! 著者リソースの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /authors` - 著者一覧
//! - `POST /authors` - 著者作成
//! - `PUT /authors/{id}` - 著者更新（部分更新）
//! - `DELETE /authors/{id}` - 著者削除（所有する記事も削除）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tsuzuri_domain::author::AuthorId;
use uuid::Uuid;

use crate::{
    error::ApiError,
    handler::{parse_body, require_fields},
    usecase::author::{AuthorUseCaseImpl, CreateAuthorInput, UpdateAuthorInput},
};

/// 著者 API の共有状態
pub struct AuthorState {
    pub usecase: AuthorUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 著者作成の必須フィールド
const CREATE_AUTHOR_REQUIRED_FIELDS: &[&str] = &["firstName", "lastName", "userName"];

/// 著者作成リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: String,
    pub last_name:  String,
    pub user_name:  String,
}

/// 著者更新リクエスト
///
/// ボディの `id` はパス ID との一致検証に使うため、型にはせず生の JSON から読む。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    pub user_name:  Option<String>,
}

/// 著者 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id:        Uuid,
    pub name:      String,
    pub user_name: String,
}

/// 著者一覧レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthorListResponse {
    pub author: Vec<AuthorDto>,
}

// --- ハンドラ ---

/// GET /authors
///
/// 著者一覧を取得する。
#[tracing::instrument(skip_all)]
pub async fn list_authors(
    State(state): State<Arc<AuthorState>>,
) -> Result<impl IntoResponse, ApiError> {
    let authors = state.usecase.list_authors().await?;

    let items: Vec<AuthorDto> = authors
        .iter()
        .map(|a| AuthorDto {
            id:        *a.id().as_uuid(),
            name:      a.display_name(),
            user_name: a.user_name().to_string(),
        })
        .collect();

    Ok((StatusCode::OK, Json(AuthorListResponse { author: items })))
}

/// POST /authors
///
/// 著者を作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成された著者
/// - `400 Bad Request`: 必須フィールド欠落、ユーザー名重複
#[tracing::instrument(skip_all)]
pub async fn create_author(
    State(state): State<Arc<AuthorState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    require_fields(&body, CREATE_AUTHOR_REQUIRED_FIELDS)?;
    let req: CreateAuthorRequest = parse_body(body)?;

    let input = CreateAuthorInput {
        first_name: req.first_name,
        last_name:  req.last_name,
        user_name:  req.user_name,
    };

    let author = state.usecase.create_author(input).await?;

    let dto = AuthorDto {
        id:        *author.id().as_uuid(),
        name:      author.display_name(),
        user_name: author.user_name().to_string(),
    };

    Ok((StatusCode::CREATED, Json(dto)))
}

/// PUT /authors/{id}
///
/// 著者を部分更新する。ボディに含まれるフィールドだけを反映する。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の著者
/// - `400 Bad Request`: パス ID とボディ ID の不一致、ユーザー名重複
/// - `404 Not Found`: 著者が見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_author(
    State(state): State<Arc<AuthorState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body_id = body.get("id").and_then(|v| v.as_str()).unwrap_or_default();
    if body_id != id.to_string() {
        return Err(ApiError::Validation(format!(
            "Request path id {id} and request body id {body_id} values must match"
        )));
    }
    let req: UpdateAuthorRequest = parse_body(body)?;

    let input = UpdateAuthorInput {
        author_id:  AuthorId::from_uuid(id),
        first_name: req.first_name,
        last_name:  req.last_name,
        user_name:  req.user_name,
    };

    let author = state.usecase.update_author(input).await?;

    let dto = AuthorDto {
        id:        *author.id().as_uuid(),
        name:      author.display_name(),
        user_name: author.user_name().to_string(),
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// DELETE /authors/{id}
///
/// 著者を削除する。所有する記事もあわせて削除する。
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功（存在しない ID でも成功扱い）
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_author(
    State(state): State<Arc<AuthorState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let author_id = AuthorId::from_uuid(id);

    state.usecase.delete_author(&author_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
