//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲
//! - リクエストボディは一度 `serde_json::Value` で受け、必須フィールドを
//!   検証してから型付きリクエストにデシリアライズする

pub mod author;
pub mod health;
pub mod post;

pub use author::{AuthorState, create_author, delete_author, list_authors, update_author};
pub use health::health_check;
pub use post::{PostState, create_post, delete_post, get_post, list_posts, update_post};

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::de::DeserializeOwned;
use tsuzuri_shared::ErrorBody;

use crate::error::ApiError;

/// 未定義ルートのフォールバックハンドラ
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}

/// リクエストボディの必須フィールドを検証する
///
/// 欠けているフィールドが見つかった時点でエラーを返す。キーの存在だけを
/// 確認するため `null` 値は通過する（型の検証はデシリアライズに任せる）。
pub(crate) fn require_fields(body: &serde_json::Value, required: &[&str]) -> Result<(), ApiError> {
    for field in required {
        if body.get(field).is_none() {
            return Err(ApiError::Validation(format!(
                "Missing `{field}` in request body"
            )));
        }
    }
    Ok(())
}

/// JSON ボディを型付きリクエストにデシリアライズする
pub(crate) fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {e}")))
}
