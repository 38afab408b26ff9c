//! # Outcome Reporter
//!
//! Orchestrator の各段階をログシンクへ出力する。
//!
//! Orchestrator には [`RunReporter`] として注入する。本番では [`TracingRunReporter`] が
//! `tracing` のイベントを発行し、[`LogSession`](s3purge_shared::LogSession) が
//! ログファイルと標準出力に振り分ける。
//!
//! | イベント | ログファイル | 標準出力 |
//! |----------|--------------|----------|
//! | 開始メッセージ・ログパス | info | ○ |
//! | 実行メタデータ・バッチ集計 | info | - |
//! | 入力ファイルエラー | error | - |
//! | 完了メッセージ | info | ○ |
//!
//! 削除済み / 失敗キーの一覧は S3 クライアント側で出力する。

use s3purge_domain::{
    batch::{Batch, BatchOutcome},
    record::OperationMode,
    run::{RunConfig, RunSummary},
};
use s3purge_infra::{InfraError, InfraErrorKind};
use s3purge_shared::{
    event_log::{error as error_fields, event},
    log_run_event,
    observability::CONSOLE_TARGET,
};

/// 実行イベントの出力先
pub trait RunReporter {
    /// 実行開始（入力ファイルを開けた後、バッチ処理の前）
    fn run_started(&self, config: &RunConfig);

    /// バッチを送信し結果を受け取った
    fn batch_submitted(&self, batch: &Batch, outcome: &BatchOutcome);

    /// 全行が破棄されたため送信しなかった
    fn batch_skipped(&self, batch: &Batch);

    /// 入力を最後まで処理した
    fn run_completed(&self, config: &RunConfig, summary: &RunSummary);

    /// 致命的エラーで中断した
    fn run_failed(&self, config: &RunConfig, error: &InfraError);
}

/// `tracing` へ出力する Reporter
pub struct TracingRunReporter {
    mode: OperationMode,
}

impl TracingRunReporter {
    pub fn new(mode: OperationMode) -> Self {
        Self { mode }
    }
}

impl RunReporter for TracingRunReporter {
    fn run_started(&self, config: &RunConfig) {
        tracing::info!(target: CONSOLE_TARGET, "{}", self.mode.start_message());
        tracing::info!(
            target: CONSOLE_TARGET,
            "ログファイル: {}",
            config.log_file().display()
        );
        log_run_event!(
            event.action = event::action::RUN_STARTED,
            event.mode = %self.mode,
            run.bucket = %config.bucket(),
            run.source_file = %config.source_file().display(),
            run.batch_size = config.batch_size().as_usize(),
            "バケット '{}' に対して {} を処理します（バッチサイズ {}）",
            config.bucket(),
            config.source_file().display(),
            config.batch_size()
        );
    }

    fn batch_submitted(&self, batch: &Batch, outcome: &BatchOutcome) {
        log_run_event!(
            event.action = event::action::BATCH_SUBMITTED,
            event.mode = %self.mode,
            event.result = batch_result(outcome),
            batch.sequence = batch.sequence(),
            batch.submitted = batch.len(),
            batch.deleted = outcome.deleted().len(),
            batch.failed = outcome.failed().len(),
            batch.dropped = batch.dropped(),
            "バッチ {}: 送信 {} 件（成功 {} 件、失敗 {} 件、破棄 {} 行）",
            batch.sequence(),
            batch.len(),
            outcome.deleted().len(),
            outcome.failed().len(),
            batch.dropped()
        );
    }

    fn batch_skipped(&self, batch: &Batch) {
        log_run_event!(
            event.action = event::action::BATCH_SKIPPED,
            event.mode = %self.mode,
            batch.sequence = batch.sequence(),
            batch.dropped = batch.dropped(),
            "バッチ {}: 有効な行が無いため送信しません（破棄 {} 行）",
            batch.sequence(),
            batch.dropped()
        );
    }

    fn run_completed(&self, _config: &RunConfig, summary: &RunSummary) {
        let result = if summary.failed == 0 {
            event::result::SUCCESS
        } else {
            event::result::PARTIAL
        };
        log_run_event!(
            event.action = event::action::RUN_COMPLETED,
            event.mode = %self.mode,
            event.result = result,
            run.batches = summary.batches,
            run.submitted = summary.submitted,
            run.deleted = summary.deleted,
            run.failed = summary.failed,
            run.dropped = summary.dropped,
            "集計: バッチ {} 件、送信 {} 件、成功 {} 件、失敗 {} 件、破棄 {} 行",
            summary.batches,
            summary.submitted,
            summary.deleted,
            summary.failed,
            summary.dropped
        );
        tracing::info!(target: CONSOLE_TARGET, "{}", self.mode.complete_message());
    }

    fn run_failed(&self, config: &RunConfig, error: &InfraError) {
        match error.kind() {
            InfraErrorKind::FileAccess { .. } if error.is_not_found() => {
                tracing::error!(
                    error.category = error_fields::category::INFRASTRUCTURE,
                    error.kind = error_fields::kind::FILE_ACCESS,
                    "ファイル {} が見つかりません",
                    config.source_file().display()
                );
            }
            InfraErrorKind::FileAccess { .. } => {
                tracing::error!(
                    error.category = error_fields::category::INFRASTRUCTURE,
                    error.kind = error_fields::kind::FILE_ACCESS,
                    span_trace = %error.span_trace(),
                    "{}",
                    error
                );
            }
            // DeleteObjects の失敗は S3 クライアントが詳細付きで出力済み
            InfraErrorKind::S3(_) => {}
            InfraErrorKind::InvalidInput(_) => {
                tracing::error!(
                    error.category = error_fields::category::INFRASTRUCTURE,
                    error.kind = error_fields::kind::INTERNAL,
                    span_trace = %error.span_trace(),
                    "{}",
                    error
                );
            }
        }

        log_run_event!(
            event.action = event::action::RUN_FAILED,
            event.mode = %self.mode,
            event.result = event::result::FAILURE,
            "実行を中断しました"
        );
    }
}

/// バッチ結果をイベント結果に変換する
fn batch_result(outcome: &BatchOutcome) -> &'static str {
    match (outcome.deleted().is_empty(), outcome.has_failures()) {
        (_, false) => event::result::SUCCESS,
        (false, true) => event::result::PARTIAL,
        (true, true) => event::result::FAILURE,
    }
}
