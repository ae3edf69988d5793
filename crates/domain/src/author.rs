//! # 著者
//!
//! ブログ記事を書く著者エンティティを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: AuthorId は UUID をラップし、型安全性を確保
//! - **不変性**: フィールドは基本的に不変、変更は `with_*` メソッド経由
//! - **緩い値制約**: 氏名・ユーザー名は空文字列も保持できる。
//!   フィールドの有無は API 境界で検証し、内容の検証はしない
//!
//! ## 使用例
//!
//! ```rust
//! use tsuzuri_domain::author::{Author, AuthorId};
//!
//! let now = chrono::Utc::now();
//! let author = Author::new(AuthorId::new(), "Ada", "Lovelace", "ada", now);
//!
//! assert_eq!(author.display_name(), "Ada Lovelace");
//! assert_eq!(author.user_name(), "ada");
//! ```

use chrono::{DateTime, Utc};

define_uuid_id! {
    /// 著者 ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    pub struct AuthorId;
}

/// 著者エンティティ
///
/// # 不変条件
///
/// - `user_name` はシステム全体で一意（DB の一意制約で担保）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: AuthorId,
    first_name: String,
    last_name: String,
    user_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Author {
    /// 新しい著者を作成する
    ///
    /// # 引数
    ///
    /// - `id`: 著者 ID
    /// - `first_name`: 名
    /// - `last_name`: 姓
    /// - `user_name`: ユーザー名（ログイン名相当、システム全体で一意）
    /// - `now`: 現在日時（呼び出し元から注入）
    pub fn new(
        id: AuthorId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_name: user_name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータから著者を復元する（データベースから取得時）
    pub fn from_db(
        id: AuthorId,
        first_name: String,
        last_name: String,
        user_name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            user_name,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &AuthorId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ビジネスロジックメソッド

    /// 表示名を返す
    ///
    /// 名と姓をスペースで結合し、前後の空白を取り除いた文字列。
    /// どちらかが空の場合は残った方のみ、両方空の場合は空文字列になる。
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// 名を変更した新しいインスタンスを返す
    pub fn with_first_name(self, first_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            first_name: first_name.into(),
            updated_at: now,
            ..self
        }
    }

    /// 姓を変更した新しいインスタンスを返す
    pub fn with_last_name(self, last_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            last_name: last_name.into(),
            updated_at: now,
            ..self
        }
    }

    /// ユーザー名を変更した新しいインスタンスを返す
    pub fn with_user_name(self, user_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_name: user_name.into(),
            updated_at: now,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    // フィクスチャ

    /// テスト用の固定タイムスタンプ
    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn ada(now: DateTime<Utc>) -> Author {
        Author::new(AuthorId::new(), "Ada", "Lovelace", "ada", now)
    }

    // display_name のテスト

    #[rstest]
    #[case("Ada", "Lovelace", "Ada Lovelace")]
    #[case("Ada", "", "Ada")]
    #[case("", "Lovelace", "Lovelace")]
    #[case("", "", "")]
    fn test_表示名は名と姓を結合してトリムする(
        now: DateTime<Utc>,
        #[case] first_name: &str,
        #[case] last_name: &str,
        #[case] expected: &str,
    ) {
        let author = Author::new(AuthorId::new(), first_name, last_name, "ada", now);

        assert_eq!(author.display_name(), expected);
    }

    // Author のテスト

    #[rstest]
    fn test_新規作成時は作成日時と更新日時が一致する(ada: Author, now: DateTime<Utc>) {
        assert_eq!(ada.created_at(), now);
        assert_eq!(ada.updated_at(), now);
    }

    #[rstest]
    fn test_ユーザー名を変更すると更新日時だけが進む(ada: Author, now: DateTime<Utc>) {
        let later = now + chrono::Duration::hours(1);

        let updated = ada.clone().with_user_name("lovelace", later);

        let expected = Author::from_db(
            ada.id().clone(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "lovelace".to_string(),
            now,
            later,
        );
        assert_eq!(updated, expected);
    }

    #[rstest]
    fn test_名と姓の変更は他のフィールドを保持する(ada: Author, now: DateTime<Utc>) {
        let later = now + chrono::Duration::hours(1);

        let updated = ada
            .clone()
            .with_first_name("Augusta", later)
            .with_last_name("King", later);

        assert_eq!(updated.first_name(), "Augusta");
        assert_eq!(updated.last_name(), "King");
        assert_eq!(updated.user_name(), "ada");
        assert_eq!(updated.created_at(), now);
        assert_eq!(updated.updated_at(), later);
    }
}
