//! # API エラー定義
//!
//! API で発生するエラーと HTTP レスポンスへの変換を定義する。
//!
//! クライアントに返すボディはすべて `{ "message": "..." }` 形状（[`ErrorBody`]）。
//! ストレージ起因のエラーは詳細をログに残し、クライアントには固定メッセージのみ返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tsuzuri_infra::InfraError;
use tsuzuri_shared::ErrorBody;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト（必須フィールド欠落、ID 不一致、ユーザー名重複など）
    #[error("不正なリクエスト: {0}")]
    Validation(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// ストレージエラー
    #[error("ストレージエラー: {0}")]
    Storage(#[from] InfraError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Storage(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "ストレージエラーが発生しました"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}
