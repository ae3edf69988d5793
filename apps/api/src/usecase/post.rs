//! 記事管理ユースケース

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tsuzuri_domain::{
    author::AuthorId,
    clock::Clock,
    post::{BlogPost, PostId},
};
use tsuzuri_infra::{
    TransactionManager,
    repository::{AuthorRepository, PostRepository},
};

use crate::error::ApiError;

/// 記事作成の入力
pub struct CreatePostInput {
    pub title:     String,
    pub content:   String,
    pub author_id: AuthorId,
    pub created:   Option<DateTime<Utc>>,
}

/// 記事更新の入力
///
/// `None` のフィールドは変更なし。更新できるのはタイトルと本文のみ。
pub struct UpdatePostInput {
    pub post_id: PostId,
    pub title:   Option<String>,
    pub content: Option<String>,
}

/// 記事管理ユースケース
pub struct PostUseCaseImpl {
    post_repository: Arc<dyn PostRepository>,
    author_repository: Arc<dyn AuthorRepository>,
    clock: Arc<dyn Clock>,
    transaction_manager: Arc<dyn TransactionManager>,
}

impl PostUseCaseImpl {
    pub fn new(
        post_repository: Arc<dyn PostRepository>,
        author_repository: Arc<dyn AuthorRepository>,
        clock: Arc<dyn Clock>,
        transaction_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            post_repository,
            author_repository,
            clock,
            transaction_manager,
        }
    }

    /// 記事一覧を取得する（作成日時順）
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        let posts = self.post_repository.find_all().await?;
        Ok(posts)
    }

    /// 記事を取得する
    pub async fn get_post(&self, post_id: &PostId) -> Result<BlogPost, ApiError> {
        self.post_repository
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))
    }

    /// 記事を作成する
    ///
    /// 1. 参照先の著者の存在確認（存在しなければ書き込みなしで拒否）
    /// 2. BlogPost エンティティ生成・挿入
    ///
    /// `created` が未指定の場合は現在日時を使う。
    /// 戻り値は作成した記事と著者の表示名。
    pub async fn create_post(&self, input: CreatePostInput) -> Result<(BlogPost, String), ApiError> {
        let author = self
            .author_repository
            .find_by_id(&input.author_id)
            .await?
            .ok_or_else(|| {
                ApiError::Validation(
                    "author does not exist, please choose existing author id".to_string(),
                )
            })?;

        let now = self.clock.now();
        let created = input.created.unwrap_or(now);
        let post = BlogPost::new(
            PostId::new(),
            input.title,
            input.content,
            input.author_id,
            created,
            now,
        );

        let mut tx = self.transaction_manager.begin().await?;
        self.post_repository.insert(&mut tx, &post).await?;
        tx.commit().await?;

        Ok((post, author.display_name()))
    }

    /// 記事を部分更新する
    ///
    /// 1. 既存の記事を取得（存在しなければ NotFound）
    /// 2. 入力に含まれるフィールドだけをマージ
    pub async fn update_post(&self, input: UpdatePostInput) -> Result<BlogPost, ApiError> {
        let mut post = self
            .post_repository
            .find_by_id(&input.post_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

        let now = self.clock.now();
        if let Some(title) = input.title {
            post = post.with_title(title, now);
        }
        if let Some(content) = input.content {
            post = post.with_content(content, now);
        }

        let mut tx = self.transaction_manager.begin().await?;
        self.post_repository.update(&mut tx, &post).await?;
        tx.commit().await?;

        Ok(post)
    }

    /// 記事を削除する
    ///
    /// コメントはデータベースの CASCADE で削除される。
    /// 存在しない ID の削除も成功として扱う。
    pub async fn delete_post(&self, post_id: &PostId) -> Result<(), ApiError> {
        let mut tx = self.transaction_manager.begin().await?;
        self.post_repository.delete(&mut tx, post_id).await?;
        tx.commit().await?;

        Ok(())
    }

    /// 著者 ID の集合を表示名に解決する
    ///
    /// 記事の読み取り系ハンドラがレスポンス組み立てに使う。
    pub async fn resolve_author_names(
        &self,
        author_ids: &[AuthorId],
    ) -> Result<HashMap<AuthorId, String>, ApiError> {
        super::resolve_author_names(self.author_repository.as_ref(), author_ids).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use tsuzuri_domain::{author::Author, clock::FixedClock};
    use tsuzuri_infra::mock::{MockAuthorRepository, MockPostRepository, MockTransactionManager};

    use super::*;

    // --- フィクスチャ ---

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn build_sut(
        post_repo: &MockPostRepository,
        author_repo: &MockAuthorRepository,
    ) -> PostUseCaseImpl {
        PostUseCaseImpl::new(
            Arc::new(post_repo.clone()),
            Arc::new(author_repo.clone()),
            Arc::new(FixedClock::new(fixed_now())),
            Arc::new(MockTransactionManager),
        )
    }

    fn build_author(first_name: &str, last_name: &str, user_name: &str) -> Author {
        Author::new(AuthorId::new(), first_name, last_name, user_name, fixed_now())
    }

    fn build_post(author_id: &AuthorId, title: &str) -> BlogPost {
        BlogPost::new(
            PostId::new(),
            title,
            "本文",
            author_id.clone(),
            fixed_now(),
            fixed_now(),
        )
    }

    // --- テストケース ---

    #[tokio::test]
    async fn test_記事を作成できる() {
        // Arrange
        let author_repo = MockAuthorRepository::new();
        let ada = build_author("Ada", "Lovelace", "ada");
        let ada_id = ada.id().clone();
        author_repo.add_author(ada);
        let post_repo = MockPostRepository::new();
        let sut = build_sut(&post_repo, &author_repo);

        let input = CreatePostInput {
            title:     "はじめての記事".to_string(),
            content:   "本文です".to_string(),
            author_id: ada_id.clone(),
            created:   None,
        };

        // Act
        let (post, author_name) = sut.create_post(input).await.unwrap();

        // Assert: created は現在日時にフォールバックする
        assert_eq!(author_name, "Ada Lovelace");
        assert_eq!(post.author_id(), &ada_id);
        assert_eq!(post.created(), fixed_now());
        assert!(post.comments().is_empty());
        assert_eq!(post_repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_作成日時を指定して記事を作成できる() {
        // Arrange
        let author_repo = MockAuthorRepository::new();
        let ada = build_author("Ada", "Lovelace", "ada");
        let ada_id = ada.id().clone();
        author_repo.add_author(ada);
        let post_repo = MockPostRepository::new();
        let sut = build_sut(&post_repo, &author_repo);

        let backdated = DateTime::from_timestamp(1_600_000_000, 0).unwrap();
        let input = CreatePostInput {
            title:     "過去の記事".to_string(),
            content:   "本文です".to_string(),
            author_id: ada_id,
            created:   Some(backdated),
        };

        // Act
        let (post, _) = sut.create_post(input).await.unwrap();

        // Assert
        assert_eq!(post.created(), backdated);
        assert_eq!(post.updated_at(), fixed_now());
    }

    #[tokio::test]
    async fn test_存在しない著者では記事を作成できない() {
        // Arrange
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let sut = build_sut(&post_repo, &author_repo);

        let input = CreatePostInput {
            title:     "宛先のない記事".to_string(),
            content:   "本文です".to_string(),
            author_id: AuthorId::new(),
            created:   None,
        };

        // Act
        let err = sut.create_post(input).await.unwrap_err();

        // Assert: 書き込みは発生しない
        match err {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "author does not exist, please choose existing author id");
            }
            other => panic!("Validation を期待したが {other:?} を受信"),
        }
        assert!(post_repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_記事を部分更新できる() {
        // Arrange
        let author_repo = MockAuthorRepository::new();
        let ada = build_author("Ada", "Lovelace", "ada");
        let ada_id = ada.id().clone();
        author_repo.add_author(ada);
        let post_repo = MockPostRepository::new();
        let original = build_post(&ada_id, "元のタイトル");
        let post_id = original.id().clone();
        post_repo.add_post(original);
        let sut = build_sut(&post_repo, &author_repo);

        let input = UpdatePostInput {
            post_id: post_id.clone(),
            title:   Some("新しいタイトル".to_string()),
            content: None,
        };

        // Act
        let post = sut.update_post(input).await.unwrap();

        // Assert: タイトルだけが変わり、本文と作成日時は保持される
        assert_eq!(post.title(), "新しいタイトル");
        assert_eq!(post.content(), "本文");
        assert_eq!(post.created(), fixed_now());
        let stored = post_repo.find_by_id(&post_id).await.unwrap().unwrap();
        assert_eq!(stored.title(), "新しいタイトル");
    }

    #[tokio::test]
    async fn test_存在しない記事の更新はnot_foundになる() {
        // Arrange
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let sut = build_sut(&post_repo, &author_repo);

        let input = UpdatePostInput {
            post_id: PostId::new(),
            title:   Some("新しいタイトル".to_string()),
            content: None,
        };

        // Act
        let err = sut.update_post(input).await.unwrap_err();

        // Assert
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Post not found"),
            other => panic!("NotFound を期待したが {other:?} を受信"),
        }
    }

    #[tokio::test]
    async fn test_記事を取得できる() {
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let post = build_post(&AuthorId::new(), "読みたい記事");
        let post_id = post.id().clone();
        post_repo.add_post(post);
        let sut = build_sut(&post_repo, &author_repo);

        let found = sut.get_post(&post_id).await.unwrap();

        assert_eq!(found.title(), "読みたい記事");
    }

    #[tokio::test]
    async fn test_存在しない記事の取得はnot_foundになる() {
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let sut = build_sut(&post_repo, &author_repo);

        let err = sut.get_post(&PostId::new()).await.unwrap_err();

        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Post not found"),
            other => panic!("NotFound を期待したが {other:?} を受信"),
        }
    }

    #[tokio::test]
    async fn test_記事一覧を取得できる() {
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let ada_id = AuthorId::new();
        post_repo.add_post(build_post(&ada_id, "最初の記事"));
        post_repo.add_post(build_post(&ada_id, "次の記事"));
        let sut = build_sut(&post_repo, &author_repo);

        let posts = sut.list_posts().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title(), "最初の記事");
        assert_eq!(posts[1].title(), "次の記事");
    }

    #[tokio::test]
    async fn test_記事を削除できる() {
        // Arrange
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let post = build_post(&AuthorId::new(), "消す記事");
        let post_id = post.id().clone();
        post_repo.add_post(post);
        let sut = build_sut(&post_repo, &author_repo);

        // Act
        sut.delete_post(&post_id).await.unwrap();

        // Assert
        assert!(post_repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_存在しない記事の削除も成功する() {
        let author_repo = MockAuthorRepository::new();
        let post_repo = MockPostRepository::new();
        let sut = build_sut(&post_repo, &author_repo);

        let result = sut.delete_post(&PostId::new()).await;

        assert!(result.is_ok());
    }
}
