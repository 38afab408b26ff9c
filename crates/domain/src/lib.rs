//! # s3purge ドメイン層
//!
//! S3 オブジェクト一括削除（および削除によるバージョン復元）の中核となる
//! ドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **外部依存なし**: AWS SDK やファイル I/O には依存しない純粋なモデル
//! - **生成時バリデーション**: 不正な設定値（空バケット名、上限超過のバッチサイズ）は
//!   構築時点で拒否する
//! - **不変性**: 実行開始後の設定 [`RunConfig`](run::RunConfig) は変更不可
//!
//! ## 依存関係の方向
//!
//! ```text
//! cli → infra → domain
//!  ↘
//!   shared
//! ```
//!
//! ドメイン層は他の内部クレートに依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`target`] - 削除対象（キー / キー + バージョン ID）
//! - [`record`] - 入力行から削除対象への変換
//! - [`batch`] - バッチとその実行結果
//! - [`run`] - 実行設定・状態・集計
//! - [`clock`] - 時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use s3purge_domain::{record::OperationMode, run::RunConfig};
//!
//! let config = RunConfig::new(
//!     OperationMode::Delete,
//!     "my-bucket",
//!     "objects.txt",
//!     500,
//!     "logs/results.log",
//! )
//! .unwrap();
//! assert_eq!(config.batch_size().as_usize(), 500);
//! ```

pub mod batch;
pub mod clock;
pub mod error;
pub mod record;
pub mod run;
pub mod target;

pub use error::DomainError;
