//! # s3purge 共有ユーティリティ
//!
//! 削除 / 復元の両 CLI で共通して使用するユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - ドメイン層・インフラ層には依存しない

pub mod event_log;
pub mod observability;

pub use observability::{LogFormat, LogSession, TracingConfig};
