//! # s3purge インフラ層
//!
//! 外部システム（ローカルファイル、S3）との入出力を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **Batch Reader**: 入力ファイルを一定件数ずつストリーミングで読み出す
//! - **Bulk Mutation Client**: S3 DeleteObjects API の呼び出しと結果の分類
//!
//! ## 依存関係
//!
//! ```text
//! cli → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`batch_reader`] - 入力ファイルの行グループ読み出し
//! - [`error`] - インフラ層エラー定義
//! - [`s3`] - S3 一括削除クライアント

pub mod batch_reader;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod s3;

pub use batch_reader::BatchReader;
pub use error::{InfraError, InfraErrorKind};
pub use s3::{AwsS3ObjectDeleter, ObjectDeleter};
