//! # ユースケース層
//!
//! ブログ API のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - ハンドラから呼び出され、リポジトリとドメインモデルを組み合わせて処理を実行する
//! - 外部依存（リポジトリ、クロック、トランザクション管理）は `Arc<dyn Trait>` で注入する
//! - エラーは [`ApiError`](crate::error::ApiError) に変換して返す
//! - 記事の読み取りで必要になる著者の表示名解決は、暗黙のフックではなく
//!   明示的なローダー関数として切り出す

pub mod author;
pub mod post;

pub use author::AuthorUseCaseImpl;
pub use post::PostUseCaseImpl;

use std::collections::HashMap;

use tsuzuri_domain::author::AuthorId;
use tsuzuri_infra::repository::AuthorRepository;

use crate::error::ApiError;

/// 著者 ID の集合を表示名のマップに解決する
///
/// 見つからなかった ID はマップに含まれない。欠落をどう扱うか
/// （空文字へのフォールバックなど）は呼び出し側が決める。
pub(crate) async fn resolve_author_names(
    author_repository: &dyn AuthorRepository,
    author_ids: &[AuthorId],
) -> Result<HashMap<AuthorId, String>, ApiError> {
    if author_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let authors = author_repository.find_by_ids(author_ids).await?;

    Ok(authors
        .into_iter()
        .map(|author| (author.id().clone(), author.display_name()))
        .collect())
}
