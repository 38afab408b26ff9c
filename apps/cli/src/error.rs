//! # CLI エラー定義
//!
//! 実行の各段階で発生しうる致命的エラーをまとめる。
//! いずれもバイナリの `main` で `anyhow::Error` に変換され、非ゼロで終了する。

use std::io;

use s3purge_domain::{DomainError, run::RunState};
use s3purge_infra::InfraError;
use thiserror::Error;

/// CLI で発生するエラー
#[derive(Debug, Error)]
pub enum CliError {
    /// 設定エラー
    ///
    /// I/O の前に検出される。ログシンクはまだ開いていない。
    #[error("設定エラー: {0}")]
    Config(#[from] DomainError),

    /// 実行中の致命的エラー（入力ファイル、S3 呼び出し）
    #[error(transparent)]
    Infra(#[from] InfraError),

    /// 終端状態（完了 / 失敗）の実行を再度開始しようとした
    #[error("実行は既に終了しています（状態: {0}）")]
    AlreadyFinished(RunState),

    /// ログファイルを開けない
    #[error("ログファイル {path} を開けません: {source}")]
    LogSetup {
        path:   String,
        #[source]
        source: io::Error,
    },
}
