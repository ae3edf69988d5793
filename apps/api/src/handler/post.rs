//! # 記事ハンドラ
//!
//! 記事リソースの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /posts` - 記事一覧（サマリ）
//! - `GET /posts/{id}` - 記事詳細（コメント込み）
//! - `POST /posts` - 記事作成
//! - `PUT /posts/{id}` - 記事更新（タイトル・本文のみ）
//! - `DELETE /posts/{id}` - 記事削除
//!
//! ## 著者の表示名
//!
//! 記事のレスポンスは著者を ID ではなく表示名で返す。読み取り系ハンドラは
//! ユースケースのローダーで著者 ID を表示名に解決してからレスポンスを組み立てる。

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tsuzuri_domain::{
    author::AuthorId,
    post::{BlogPost, PostId},
};
use uuid::Uuid;

use crate::{
    error::ApiError,
    handler::{parse_body, require_fields},
    usecase::post::{CreatePostInput, PostUseCaseImpl, UpdatePostInput},
};

/// 記事 API の共有状態
pub struct PostState {
    pub usecase: PostUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 記事作成の必須フィールド
const CREATE_POST_REQUIRED_FIELDS: &[&str] = &["title", "content", "author_id"];

/// 記事作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title:     String,
    pub content:   String,
    pub author_id: Uuid,
    pub created:   Option<DateTime<Utc>>,
}

/// 記事更新リクエスト
///
/// ボディの `id` はパス ID との一致検証に使うため、型にはせず生の JSON から読む。
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title:   Option<String>,
    pub content: Option<String>,
}

/// 記事サマリ DTO（一覧・更新レスポンス）
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostSummaryDto {
    pub id:      Uuid,
    pub title:   String,
    pub content: String,
    pub author:  String,
    pub created: String,
}

/// 記事詳細 DTO（単体取得レスポンス）
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostDetailDto {
    pub id:       Uuid,
    pub title:    String,
    pub content:  String,
    pub author:   String,
    pub created:  String,
    pub comments: Vec<String>,
}

/// 記事作成レスポンス DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedPostDto {
    pub id:       Uuid,
    pub author:   String,
    pub content:  String,
    pub title:    String,
    pub comments: Vec<String>,
}

/// 記事一覧レスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PostListResponse {
    pub blog: Vec<PostSummaryDto>,
}

/// 記事の著者表示名を解決済みマップから引く
///
/// 参照先の著者が存在しない記事（ストレージ層を直接操作した場合に起こり得る）は
/// 読み取りを失敗させず、警告ログと空文字列に落とす。
fn author_display_name(post: &BlogPost, author_names: &HashMap<AuthorId, String>) -> String {
    match author_names.get(post.author_id()) {
        Some(name) => name.clone(),
        None => {
            tracing::warn!(
                post_id = %post.id(),
                author_id = %post.author_id(),
                "記事が参照する著者が見つかりません"
            );
            String::new()
        }
    }
}

// --- ハンドラ ---

/// GET /posts
///
/// 記事一覧をサマリ形式で取得する。
#[tracing::instrument(skip_all)]
pub async fn list_posts(State(state): State<Arc<PostState>>) -> Result<impl IntoResponse, ApiError> {
    use itertools::Itertools as _;

    let posts = state.usecase.list_posts().await?;

    let author_ids: Vec<AuthorId> = posts
        .iter()
        .map(|p| p.author_id().clone())
        .unique()
        .collect();
    let author_names = state.usecase.resolve_author_names(&author_ids).await?;

    let items: Vec<PostSummaryDto> = posts
        .iter()
        .map(|p| PostSummaryDto {
            id:      *p.id().as_uuid(),
            title:   p.title().to_string(),
            content: p.content().to_string(),
            author:  author_display_name(p, &author_names),
            created: p.created().to_rfc3339(),
        })
        .collect();

    Ok((StatusCode::OK, Json(PostListResponse { blog: items })))
}

/// GET /posts/{id}
///
/// 記事詳細をコメント込みで取得する。
///
/// ## レスポンス
///
/// - `200 OK`: 記事詳細
/// - `404 Not Found`: 記事が見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_post(
    State(state): State<Arc<PostState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.usecase.get_post(&PostId::from_uuid(id)).await?;

    let author_ids = [post.author_id().clone()];
    let author_names = state.usecase.resolve_author_names(&author_ids).await?;

    let dto = PostDetailDto {
        id:       *post.id().as_uuid(),
        title:    post.title().to_string(),
        content:  post.content().to_string(),
        author:   author_display_name(&post, &author_names),
        created:  post.created().to_rfc3339(),
        comments: post
            .comments()
            .iter()
            .map(|c| c.content().to_string())
            .collect(),
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /posts
///
/// 記事を作成する。`created` が未指定の場合は現在日時になる。
///
/// ## レスポンス
///
/// - `201 Created`: 作成された記事
/// - `400 Bad Request`: 必須フィールド欠落、存在しない著者 ID
#[tracing::instrument(skip_all)]
pub async fn create_post(
    State(state): State<Arc<PostState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    require_fields(&body, CREATE_POST_REQUIRED_FIELDS)?;
    let req: CreatePostRequest = parse_body(body)?;

    let input = CreatePostInput {
        title:     req.title,
        content:   req.content,
        author_id: AuthorId::from_uuid(req.author_id),
        created:   req.created,
    };

    let (post, author_name) = state.usecase.create_post(input).await?;

    let dto = CreatedPostDto {
        id:       *post.id().as_uuid(),
        author:   author_name,
        content:  post.content().to_string(),
        title:    post.title().to_string(),
        comments: post
            .comments()
            .iter()
            .map(|c| c.content().to_string())
            .collect(),
    };

    Ok((StatusCode::CREATED, Json(dto)))
}

/// PUT /posts/{id}
///
/// 記事のタイトル・本文を部分更新する。ボディに含まれるフィールドだけを反映する。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の記事サマリ
/// - `400 Bad Request`: パス ID とボディ ID の不一致
/// - `404 Not Found`: 記事が見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_post(
    State(state): State<Arc<PostState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let body_id = body.get("id").and_then(|v| v.as_str()).unwrap_or_default();
    if body_id != id.to_string() {
        return Err(ApiError::Validation(format!(
            "Request path id ({id}) and request body id ({body_id}) must match"
        )));
    }
    let req: UpdatePostRequest = parse_body(body)?;

    let input = UpdatePostInput {
        post_id: PostId::from_uuid(id),
        title:   req.title,
        content: req.content,
    };

    let post = state.usecase.update_post(input).await?;

    let author_ids = [post.author_id().clone()];
    let author_names = state.usecase.resolve_author_names(&author_ids).await?;

    let dto = PostSummaryDto {
        id:      *post.id().as_uuid(),
        title:   post.title().to_string(),
        content: post.content().to_string(),
        author:  author_display_name(&post, &author_names),
        created: post.created().to_rfc3339(),
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// DELETE /posts/{id}
///
/// 記事を削除する。コメントもあわせて削除される。
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功（存在しない ID でも成功扱い）
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_post(
    State(state): State<Arc<PostState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = PostId::from_uuid(id);

    state.usecase.delete_post(&post_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
