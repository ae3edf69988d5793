//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `API_HOST` と `API_PORT` は省略可能（デフォルト: `0.0.0.0:8080`）。
    /// `DATABASE_URL` は必須。
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host:         env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:         env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
        })
    }
}
