//! # Tsuzuri ドメイン層
//!
//! ブログの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Author, BlogPost）
//! - **識別子型**: UUID v7 ベースの型安全な ID（例: AuthorId, PostId）
//! - **時刻抽象**: テストで固定時刻を注入するための `Clock` トレイト
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`author`] - 著者エンティティ
//! - [`clock`] - 時刻抽象
//! - [`post`] - ブログ記事・コメントエンティティ
//!
//! ## 使用例
//!
//! ```rust
//! use tsuzuri_domain::author::{Author, AuthorId};
//! use tsuzuri_domain::clock::{Clock, SystemClock};
//!
//! let now = SystemClock.now();
//! let author = Author::new(AuthorId::new(), "Ada", "Lovelace", "ada", now);
//! assert_eq!(author.display_name(), "Ada Lovelace");
//! ```

#[macro_use]
mod macros;

pub mod author;
pub mod clock;
pub mod post;
