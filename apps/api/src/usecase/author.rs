//! 著者管理ユースケース

use std::sync::Arc;

use tsuzuri_domain::{
    author::{Author, AuthorId},
    clock::Clock,
};
use tsuzuri_infra::{
    TransactionManager,
    repository::{AuthorRepository, PostRepository, author_repository::USER_NAME_UNIQUE_CONSTRAINT},
};

use crate::error::ApiError;

/// 著者作成の入力
pub struct CreateAuthorInput {
    pub first_name: String,
    pub last_name:  String,
    pub user_name:  String,
}

/// 著者更新の入力
///
/// `None` のフィールドは変更なし。
pub struct UpdateAuthorInput {
    pub author_id:  AuthorId,
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    pub user_name:  Option<String>,
}

/// 著者管理ユースケース
pub struct AuthorUseCaseImpl {
    author_repository: Arc<dyn AuthorRepository>,
    post_repository: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
    transaction_manager: Arc<dyn TransactionManager>,
}

impl AuthorUseCaseImpl {
    pub fn new(
        author_repository: Arc<dyn AuthorRepository>,
        post_repository: Arc<dyn PostRepository>,
        clock: Arc<dyn Clock>,
        transaction_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            author_repository,
            post_repository,
            clock,
            transaction_manager,
        }
    }

    /// 著者一覧を取得する（作成日時順）
    pub async fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        let authors = self.author_repository.find_all().await?;
        Ok(authors)
    }

    /// 著者を作成する
    ///
    /// ユーザー名の一意性は事前チェックではなくデータベースの UNIQUE 制約で
    /// 担保し、制約違反をバリデーションエラーにマッピングする。
    pub async fn create_author(&self, input: CreateAuthorInput) -> Result<Author, ApiError> {
        let now = self.clock.now();
        let author = Author::new(
            AuthorId::new(),
            input.first_name,
            input.last_name,
            input.user_name,
            now,
        );

        let mut tx = self.transaction_manager.begin().await?;
        self.author_repository
            .insert(&mut tx, &author)
            .await
            .map_err(|e| {
                if e.as_unique_violation() == Some(USER_NAME_UNIQUE_CONSTRAINT) {
                    return ApiError::Validation(
                        "User name already taken, choose another user name".to_string(),
                    );
                }
                ApiError::Storage(e)
            })?;
        tx.commit().await?;

        Ok(author)
    }

    /// 著者を部分更新する
    ///
    /// 1. 既存の著者を取得（存在しなければ NotFound）
    /// 2. 入力に含まれるフィールドだけをマージ
    /// 3. UNIQUE 制約違反はバリデーションエラーにマッピング
    pub async fn update_author(&self, input: UpdateAuthorInput) -> Result<Author, ApiError> {
        let mut author = self
            .author_repository
            .find_by_id(&input.author_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Author not found".to_string()))?;

        let now = self.clock.now();
        if let Some(first_name) = input.first_name {
            author = author.with_first_name(first_name, now);
        }
        if let Some(last_name) = input.last_name {
            author = author.with_last_name(last_name, now);
        }
        if let Some(user_name) = input.user_name {
            author = author.with_user_name(user_name, now);
        }

        let mut tx = self.transaction_manager.begin().await?;
        self.author_repository
            .update(&mut tx, &author)
            .await
            .map_err(|e| {
                if e.as_unique_violation() == Some(USER_NAME_UNIQUE_CONSTRAINT) {
                    return ApiError::Validation("Username already taken".to_string());
                }
                ApiError::Storage(e)
            })?;
        tx.commit().await?;

        Ok(author)
    }

    /// 著者を削除する
    ///
    /// 1. 著者が所有する記事をすべて削除
    /// 2. 著者本体を削除
    /// 3. 同一トランザクションでコミット（孤児記事を残さない）
    ///
    /// 存在しない ID の削除も成功として扱う。
    pub async fn delete_author(&self, author_id: &AuthorId) -> Result<(), ApiError> {
        let mut tx = self.transaction_manager.begin().await?;

        let deleted_posts = self
            .post_repository
            .delete_by_author(&mut tx, author_id)
            .await?;
        self.author_repository.delete(&mut tx, author_id).await?;

        tx.commit().await?;

        tracing::debug!(%author_id, deleted_posts, "著者と所有記事を削除しました");
        Ok(())
    }
}
