//! # リポジトリ実装
//!
//! ドメインエンティティの永続化操作をトレイトとして定義し、
//! PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを利用
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod author_repository;
pub mod post_repository;

pub use author_repository::{AuthorRepository, PostgresAuthorRepository};
pub use post_repository::{PostRepository, PostgresPostRepository};
