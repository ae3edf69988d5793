//! # AuthorRepository
//!
//! 著者の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意性は DB が正**: `user_name` の重複はアプリ側の事前チェックではなく、
//!   一意制約 [`USER_NAME_UNIQUE_CONSTRAINT`] の違反として検出する
//! - **書き込みは TxContext 必須**: トランザクション外の書き込みを型で防ぐ

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tsuzuri_domain::author::{Author, AuthorId};
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// `authors.user_name` に張られた一意制約の名前
///
/// INSERT / UPDATE がこの制約に弾かれると
/// [`InfraErrorKind::UniqueViolation`](crate::InfraErrorKind::UniqueViolation)
/// として返り、ユースケース層がユーザー名の重複エラーに変換する。
pub const USER_NAME_UNIQUE_CONSTRAINT: &str = "authors_user_name_key";

/// 著者リポジトリトレイト
///
/// 著者の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// 著者を挿入する
    ///
    /// # 引数
    ///
    /// - `tx`: トランザクションコンテキスト
    /// - `author`: 保存する著者
    ///
    /// # 戻り値
    ///
    /// - `Ok(())`: 挿入に成功した場合
    /// - `Err(_)`: `user_name` 重複時は `UniqueViolation`、それ以外はデータベースエラー
    async fn insert(&self, tx: &mut TxContext, author: &Author) -> Result<(), InfraError>;

    /// 著者を更新する
    ///
    /// `user_name` の変更が他の著者と重複した場合は `UniqueViolation` を返す。
    async fn update(&self, tx: &mut TxContext, author: &Author) -> Result<(), InfraError>;

    /// 著者を削除する
    ///
    /// 存在しない ID を渡してもエラーにはならない（冪等）。
    async fn delete(&self, tx: &mut TxContext, id: &AuthorId) -> Result<(), InfraError>;

    /// ID で著者を検索する
    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, InfraError>;

    /// 複数の ID で著者を一括検索する
    ///
    /// 存在しない ID は無視し、見つかった著者のみ返す。
    /// 空の配列を渡した場合は空の Vec を返す。
    async fn find_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, InfraError>;

    /// 全著者を作成順に取得する
    async fn find_all(&self) -> Result<Vec<Author>, InfraError>;
}

/// `authors` テーブルの行
#[derive(sqlx::FromRow)]
struct AuthorRow {
    id:         Uuid,
    first_name: String,
    last_name:  String,
    user_name:  String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author::from_db(
            AuthorId::from_uuid(row.id),
            row.first_name,
            row.last_name,
            row.user_name,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL 実装の AuthorRepository
#[derive(Debug, Clone)]
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn insert(&self, tx: &mut TxContext, author: &Author) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, first_name, last_name, user_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(author.id().as_uuid())
        .bind(author.first_name())
        .bind(author.last_name())
        .bind(author.user_name())
        .bind(author.created_at())
        .bind(author.updated_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    async fn update(&self, tx: &mut TxContext, author: &Author) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE authors
            SET first_name = $2,
                last_name  = $3,
                user_name  = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(author.id().as_uuid())
        .bind(author.first_name())
        .bind(author.last_name())
        .bind(author.user_name())
        .bind(author.updated_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    async fn delete(&self, tx: &mut TxContext, id: &AuthorId) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            DELETE FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, InfraError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, user_name, created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Author::from))
    }

    async fn find_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, InfraError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuid_ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, user_name, created_at, updated_at
            FROM authors
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuid_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_all(&self) -> Result<Vec<Author>, InfraError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name, user_name, created_at, updated_at
            FROM authors
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Author::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresAuthorRepository>();
        assert_send_sync::<Box<dyn AuthorRepository>>();
    }
}
