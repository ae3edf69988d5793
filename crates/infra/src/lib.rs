//! # Tsuzuri インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層のエンティティを永続化するリポジトリを提供する。
//! 外部システムの詳細をカプセル化し、ドメイン層をインフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **トランザクション管理**: `TxContext` による書き込みの構造的強制
//! - **リポジトリ実装**: 著者・記事リポジトリの PostgreSQL 実装
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`mock`] - テスト用インメモリ実装（`test-utils` フィーチャ）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use tsuzuri_infra::db;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     // データベース接続プールの作成
//!     let pool = db::create_pool("postgres://localhost/tsuzuri").await?;
//!
//!     // マイグレーションの適用
//!     db::run_migrations(&pool).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{PgTransactionManager, TransactionManager, TxContext};
pub use error::{InfraError, InfraErrorKind};
