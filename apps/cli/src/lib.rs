//! # s3purge CLI
//!
//! 入力ファイルに列挙したオブジェクトを S3 から一括削除 / 復元する CLI。
//!
//! ## バイナリ
//!
//! | バイナリ | モード | 入力形式 |
//! |----------|--------|----------|
//! | `delete-objects` | 削除 | 1 行 1 キー |
//! | `restore-objects` | 復元 | 1 行 `key,versionId` |
//!
//! 復元は指定バージョン（削除マーカー等）を削除することで、1 つ前のバージョンを最新に戻す。
//!
//! ## 使用例
//!
//! ```bash
//! delete-objects my-bucket objects.txt -b 500
//! restore-objects my-bucket versions.txt -l logs/restore.log
//!
//! # ローカル（MinIO）
//! S3_ENDPOINT_URL=http://localhost:19000 delete-objects dev-bucket objects.txt
//! ```
//!
//! ## モジュール構成
//!
//! - [`app`] - 起動処理（設定 → ログ → 実行）
//! - [`config`] - CLI 引数
//! - [`error`] - CLI エラー定義
//! - [`reporter`] - 実行イベントのログ出力
//! - [`runner`] - バッチ処理の Orchestrator

pub mod app;
pub mod config;
pub mod error;
pub mod reporter;
pub mod runner;

pub use app::run;
