//! # ドメイン層エラー定義
//!
//! 設定値の検証失敗など、I/O を伴わずに検出できる異常を表現する。
//!
//! ## 設計方針
//!
//! - **I/O 前に検出**: このエラーが返る時点ではファイルもログも開かれていない
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//!
//! ## 使用例
//!
//! ```rust
//! use s3purge_domain::DomainError;
//!
//! fn validate_bucket(bucket: &str) -> Result<(), DomainError> {
//!     if bucket.is_empty() {
//!         return Err(DomainError::Validation("バケット名は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 設定値がルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - バケット名が空
    /// - 入力ファイルパスが空
    /// - バッチサイズが 1〜1000 の範囲外
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
