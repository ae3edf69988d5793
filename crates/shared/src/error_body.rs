//! # エラーレスポンスボディ
//!
//! API が返すエラーの統一ボディを提供する。
//!
//! ## 設計
//!
//! - `ErrorBody` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - クライアントに見せるのは `message` の一フィールドのみ。
//!   内部エラーの詳細はログに出し、ボディには含めない

use serde::{Deserialize, Serialize};

/// エラーレスポンスの統一ボディ
///
/// すべてのエラーは `{ "message": "..." }` の形で返る。
///
/// ## 使用例
///
/// ```
/// use tsuzuri_shared::ErrorBody;
///
/// let body = ErrorBody::new("Not Found");
/// assert_eq!(body.message, "Not Found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
