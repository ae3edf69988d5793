//! # Tsuzuri API サーバー
//!
//! ブログの REST API サーバー。
//!
//! ## 役割
//!
//! Tsuzuri API はブログコンテンツの管理と配信を担当する:
//!
//! - **著者管理**: 著者の一覧・作成・更新・削除
//! - **記事管理**: 記事の一覧・取得・作成・更新・削除（読み取りはコメント込み）
//! - **データ永続化**: PostgreSQL へのエンティティ保存
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p tsuzuri-api
//!
//! # 本番環境
//! API_PORT=8080 DATABASE_URL=postgres://... cargo run -p tsuzuri-api --release
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, put},
};
use config::ApiConfig;
use handler::{
    AuthorState,
    PostState,
    create_author,
    create_post,
    delete_author,
    delete_post,
    get_post,
    health_check,
    list_authors,
    list_posts,
    not_found,
    update_author,
    update_post,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tsuzuri_domain::clock::{Clock, SystemClock};
use tsuzuri_infra::{
    PgTransactionManager,
    TransactionManager,
    db,
    repository::{
        AuthorRepository,
        PostRepository,
        PostgresAuthorRepository,
        PostgresPostRepository,
    },
};
use tsuzuri_shared::observability::TracingConfig;
use usecase::{AuthorUseCaseImpl, PostUseCaseImpl};

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. データベース接続とマイグレーションの適用
/// 5. ルーターの構築
/// 6. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("tsuzuri-api");
    tsuzuri_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "tsuzuri-api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let author_repository: Arc<dyn AuthorRepository> =
        Arc::new(PostgresAuthorRepository::new(pool.clone()));
    let post_repository: Arc<dyn PostRepository> =
        Arc::new(PostgresPostRepository::new(pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let transaction_manager: Arc<dyn TransactionManager> =
        Arc::new(PgTransactionManager::new(pool));

    let author_usecase = AuthorUseCaseImpl::new(
        author_repository.clone(),
        post_repository.clone(),
        clock.clone(),
        transaction_manager.clone(),
    );
    let author_state = Arc::new(AuthorState {
        usecase: author_usecase,
    });

    let post_usecase = PostUseCaseImpl::new(
        post_repository,
        author_repository,
        clock,
        transaction_manager,
    );
    let post_state = Arc::new(PostState {
        usecase: post_usecase,
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/authors", get(list_authors).post(create_author))
                .route("/authors/{id}", put(update_author).delete(delete_author))
                .with_state(author_state),
        )
        .merge(
            Router::new()
                .route("/posts", get(list_posts).post(create_post))
                .route(
                    "/posts/{id}",
                    get(get_post).put(update_post).delete(delete_post),
                )
                .with_state(post_state),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
