//! # PostRepository
//!
//! ブログ記事とコメントの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **コメントは記事に従属**: 記事の取得時に一緒に読み込み、
//!   一覧では `ANY($1)` の一括クエリで N+1 を避ける
//! - **著者への外部キーなし**: `author_id` の整合性はユースケース層で担保する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itertools::Itertools as _;
use sqlx::PgPool;
use tsuzuri_domain::{
    author::AuthorId,
    post::{BlogPost, Comment, CommentId, PostId},
};
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// ブログ記事リポジトリトレイト
///
/// 記事とそれに従属するコメントの永続化操作を定義する。
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 記事を挿入する
    ///
    /// エンティティがコメントを持つ場合はコメント行も同じトランザクションで
    /// 挿入する（新規作成された記事にコメントはない）。
    ///
    /// # 戻り値
    ///
    /// - `Ok(())`: 挿入に成功した場合
    /// - `Err(_)`: データベースエラー
    async fn insert(&self, tx: &mut TxContext, post: &BlogPost) -> Result<(), InfraError>;

    /// 記事のタイトルと本文を更新する
    ///
    /// `author_id`、`created`、コメントは変更しない。
    async fn update(&self, tx: &mut TxContext, post: &BlogPost) -> Result<(), InfraError>;

    /// 記事を削除する
    ///
    /// コメントは `ON DELETE CASCADE` で一緒に消える。
    /// 存在しない ID を渡してもエラーにはならない（冪等）。
    async fn delete(&self, tx: &mut TxContext, id: &PostId) -> Result<(), InfraError>;

    /// 指定した著者の記事をすべて削除する
    ///
    /// 著者削除時のカスケード処理で使用する。削除した記事数を返す。
    async fn delete_by_author(
        &self,
        tx: &mut TxContext,
        author_id: &AuthorId,
    ) -> Result<u64, InfraError>;

    /// ID で記事をコメント付きで検索する
    ///
    /// コメントは作成日時の昇順で並ぶ。
    async fn find_by_id(&self, id: &PostId) -> Result<Option<BlogPost>, InfraError>;

    /// 全記事をコメント付きで投稿日時順に取得する
    async fn find_all(&self) -> Result<Vec<BlogPost>, InfraError>;
}

/// `blog_posts` テーブルの行
#[derive(sqlx::FromRow)]
struct BlogPostRow {
    id:         Uuid,
    title:      String,
    content:    String,
    author_id:  Uuid,
    created:    DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BlogPostRow {
    fn into_post(self, comments: Vec<Comment>) -> BlogPost {
        BlogPost::from_db(
            PostId::from_uuid(self.id),
            self.title,
            self.content,
            AuthorId::from_uuid(self.author_id),
            self.created,
            self.updated_at,
            comments,
        )
    }
}

/// `comments` テーブルの行
#[derive(sqlx::FromRow)]
struct CommentRow {
    id:         Uuid,
    post_id:    Uuid,
    content:    String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment::from_db(CommentId::from_uuid(row.id), row.content, row.created_at)
    }
}

/// PostgreSQL 実装の PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, tx: &mut TxContext, post: &BlogPost) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, title, content, author_id, created, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id().as_uuid())
        .bind(post.title())
        .bind(post.content())
        .bind(post.author_id().as_uuid())
        .bind(post.created())
        .bind(post.updated_at())
        .execute(tx.conn())
        .await?;

        for comment in post.comments() {
            sqlx::query(
                r#"
                INSERT INTO comments (id, post_id, content, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(comment.id().as_uuid())
            .bind(post.id().as_uuid())
            .bind(comment.content())
            .bind(comment.created_at())
            .execute(tx.conn())
            .await?;
        }

        Ok(())
    }

    async fn update(&self, tx: &mut TxContext, post: &BlogPost) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE blog_posts
            SET title      = $2,
                content    = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(post.id().as_uuid())
        .bind(post.title())
        .bind(post.content())
        .bind(post.updated_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    async fn delete(&self, tx: &mut TxContext, id: &PostId) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            DELETE FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    async fn delete_by_author(
        &self,
        tx: &mut TxContext,
        author_id: &AuthorId,
    ) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM blog_posts
            WHERE author_id = $1
            "#,
        )
        .bind(author_id.as_uuid())
        .execute(tx.conn())
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<BlogPost>, InfraError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, content, author_id, created, updated_at
            FROM blog_posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let comment_rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let comments = comment_rows.into_iter().map(Comment::from).collect();

        Ok(Some(row.into_post(comments)))
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, InfraError> {
        let post_rows = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, content, author_id, created, updated_at
            FROM blog_posts
            ORDER BY created, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if post_rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = post_rows.iter().map(|row| row.id).collect();

        // 一覧分のコメントを一括取得し、記事 ID ごとにまとめる（N+1 回避）
        let comment_rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, content, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(&post_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut comment_map: std::collections::HashMap<Uuid, Vec<Comment>> = comment_rows
            .into_iter()
            .map(|row| (row.post_id, Comment::from(row)))
            .into_group_map();

        Ok(post_rows
            .into_iter()
            .map(|row| {
                let comments = comment_map.remove(&row.id).unwrap_or_default();
                row.into_post(comments)
            })
            .collect())
    }
}
