//! # ブログ記事・コメント
//!
//! ブログ記事エンティティと、記事に従属するコメントを定義する。
//!
//! コメントは記事の子要素であり、単独では存在しない。
//! 記事の取得時に一緒に読み込まれ、記事の削除時に一緒に消える。

use chrono::{DateTime, Utc};

use crate::author::AuthorId;

define_uuid_id! {
    /// ブログ記事 ID（一意識別子）
    pub struct PostId;
}

define_uuid_id! {
    /// コメント ID（一意識別子）
    pub struct CommentId;
}

/// 記事に付くコメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    content: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: CommentId, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            created_at: now,
        }
    }

    /// 既存のデータからコメントを復元する（データベースから取得時）
    pub fn from_db(id: CommentId, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// ブログ記事エンティティ
///
/// 著者への参照は `AuthorId` のみ保持する。著者の実体は
/// 読み取り時に別途解決され、存在しない場合も記事は有効なまま残る。
///
/// `created` は投稿日時（リクエストで指定可能）、
/// `updated_at` は行が最後に変更された日時。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    id: PostId,
    title: String,
    content: String,
    author_id: AuthorId,
    created: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    comments: Vec<Comment>,
}

impl BlogPost {
    /// 新しい記事を作成する
    ///
    /// 作成直後の記事にコメントはない。
    pub fn new(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: AuthorId,
        created: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author_id,
            created,
            updated_at: now,
            comments: Vec::new(),
        }
    }

    /// 既存のデータから記事を復元する（データベースから取得時）
    pub fn from_db(
        id: PostId,
        title: String,
        content: String,
        author_id: AuthorId,
        created: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            author_id,
            created,
            updated_at,
            comments,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    // ビジネスロジックメソッド

    /// タイトルを変更した新しいインスタンスを返す
    pub fn with_title(self, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            updated_at: now,
            ..self
        }
    }

    /// 本文を変更した新しいインスタンスを返す
    pub fn with_content(self, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            updated_at: now,
            ..self
        }
    }
}
