//! # Tsuzuri API ライブラリ
//!
//! ブログ API のユースケースとハンドラを公開する。
//! テスト用に内部モジュールへのアクセスを提供する。

pub mod error;
pub mod handler;
pub mod usecase;
