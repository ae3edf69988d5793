//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tsuzuri-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tsuzuri_domain::{
    author::{Author, AuthorId},
    post::{BlogPost, PostId},
};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    repository::{
        AuthorRepository, PostRepository, author_repository::USER_NAME_UNIQUE_CONSTRAINT,
    },
};

// ===== MockAuthorRepository =====

/// インメモリの著者リポジトリ
///
/// `user_name` の重複挿入・重複更新は本物の DB と同じく
/// `UniqueViolation` として失敗させる。
#[derive(Clone, Default)]
pub struct MockAuthorRepository {
    authors: Arc<Mutex<Vec<Author>>>,
}

impl MockAuthorRepository {
    pub fn new() -> Self {
        Self {
            authors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_author(&self, author: Author) {
        self.authors.lock().unwrap().push(author);
    }
}

#[async_trait]
impl AuthorRepository for MockAuthorRepository {
    async fn insert(&self, _tx: &mut TxContext, author: &Author) -> Result<(), InfraError> {
        let mut authors = self.authors.lock().unwrap();

        // 一意制約 authors_user_name_key の模倣
        if authors.iter().any(|a| a.user_name() == author.user_name()) {
            return Err(InfraError::unique_violation(USER_NAME_UNIQUE_CONSTRAINT));
        }

        authors.push(author.clone());
        Ok(())
    }

    async fn update(&self, _tx: &mut TxContext, author: &Author) -> Result<(), InfraError> {
        let mut authors = self.authors.lock().unwrap();

        if authors
            .iter()
            .any(|a| a.id() != author.id() && a.user_name() == author.user_name())
        {
            return Err(InfraError::unique_violation(USER_NAME_UNIQUE_CONSTRAINT));
        }

        let Some(pos) = authors.iter().position(|a| a.id() == author.id()) else {
            return Err(InfraError::unexpected(format!(
                "更新対象の著者が存在しません: {}",
                author.id()
            )));
        };
        authors[pos] = author.clone();
        Ok(())
    }

    async fn delete(&self, _tx: &mut TxContext, id: &AuthorId) -> Result<(), InfraError> {
        self.authors.lock().unwrap().retain(|a| a.id() != id);
        Ok(())
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, InfraError> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, InfraError> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .filter(|a| ids.contains(a.id()))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Author>, InfraError> {
        Ok(self.authors.lock().unwrap().iter().cloned().collect())
    }
}

// ===== MockPostRepository =====

/// インメモリのブログ記事リポジトリ
#[derive(Clone, Default)]
pub struct MockPostRepository {
    posts: Arc<Mutex<Vec<BlogPost>>>,
}

impl MockPostRepository {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_post(&self, post: BlogPost) {
        self.posts.lock().unwrap().push(post);
    }
}

#[async_trait]
impl PostRepository for MockPostRepository {
    async fn insert(&self, _tx: &mut TxContext, post: &BlogPost) -> Result<(), InfraError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn update(&self, _tx: &mut TxContext, post: &BlogPost) -> Result<(), InfraError> {
        let mut posts = self.posts.lock().unwrap();

        let Some(pos) = posts.iter().position(|p| p.id() == post.id()) else {
            return Err(InfraError::unexpected(format!(
                "更新対象の記事が存在しません: {}",
                post.id()
            )));
        };
        posts[pos] = post.clone();
        Ok(())
    }

    async fn delete(&self, _tx: &mut TxContext, id: &PostId) -> Result<(), InfraError> {
        self.posts.lock().unwrap().retain(|p| p.id() != id);
        Ok(())
    }

    async fn delete_by_author(
        &self,
        _tx: &mut TxContext,
        author_id: &AuthorId,
    ) -> Result<u64, InfraError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.author_id() != author_id);
        Ok((before - posts.len()) as u64)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<BlogPost>, InfraError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, InfraError> {
        Ok(self.posts.lock().unwrap().iter().cloned().collect())
    }
}

// ===== MockTransactionManager =====

/// テスト用 TransactionManager
///
/// Mock リポジトリはインメモリで動くため、実際のトランザクションは張らず
/// [`TxContext::mock()`] を返す。
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}
