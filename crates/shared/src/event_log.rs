//! # 実行イベントログとエラーコンテキストの構造化ヘルパー
//!
//! JSON 形式のログファイルを `jq` で効率的に調査できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## 実行イベント
//!
//! [`log_run_event!`] マクロで出力する。`event.kind = "run_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "run_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! 既存の `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.action`、`error.kind`）を使用。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// 実行イベントを構造化ログとして出力する。
///
/// `event.kind = "run_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.mode`: 実行モード（`delete` / `restore`）
///
/// ## 推奨フィールド
///
/// - `event.result`: 結果（[`event::result`] の定数を使用）
/// - `batch.sequence`: バッチ通し番号
#[macro_export]
macro_rules! log_run_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "run_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントアクション
    pub mod action {
        pub const RUN_STARTED: &str = "run.started";
        pub const RUN_COMPLETED: &str = "run.completed";
        pub const RUN_FAILED: &str = "run.failed";
        pub const BATCH_SUBMITTED: &str = "batch.submitted";
        pub const BATCH_SKIPPED: &str = "batch.skipped";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        /// 一部のオブジェクトのみ削除に失敗
        pub const PARTIAL: &str = "partial";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
///
/// S3 呼び出しのエラー（`external_service` / `s3`）は infra クレートが
/// 文字列リテラルで出力する（infra は shared に依存しない）。
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// ローカルのファイル I/O
        pub const INFRASTRUCTURE: &str = "infrastructure";
    }

    /// エラー種別
    pub mod kind {
        pub const FILE_ACCESS: &str = "file_access";
        pub const INTERNAL: &str = "internal";
    }
}
