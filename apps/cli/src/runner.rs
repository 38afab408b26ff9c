//! # Orchestrator
//!
//! 1 回の実行を駆動する。入力ファイルを行グループ単位で読み出し、
//! Record Parser → Bulk Mutation Client → Outcome Reporter の順にバッチを 1 件ずつ処理する。
//!
//! ## 状態遷移
//!
//! ```text
//! Configuring ──run()──→ Running ──入力終端──→ Completed
//!                           │
//!                           └──致命的エラー──→ Failed
//! ```
//!
//! - バッチは入力ファイルの順に、前のバッチの応答を待ってから次を読む
//! - パース後に送信対象が 0 件のグループは送信せずに次へ進む
//! - 入力ファイルのエラーと DeleteObjects 呼び出し自体の失敗は致命的（リトライしない）
//! - 個々のオブジェクトの削除失敗は致命的ではなく、次のバッチへ進む
//! - Completed / Failed からは遷移しない（再度 `run()` しても入力ファイルも S3 も触らない）

use s3purge_domain::{
    batch::Batch,
    run::{RunConfig, RunState, RunSummary},
};
use s3purge_infra::{BatchReader, InfraError, ObjectDeleter};

use crate::{error::CliError, reporter::RunReporter};

/// 1 回の実行を駆動する Orchestrator
///
/// D: ObjectDeleter, R: RunReporter
pub struct Orchestrator<D, R> {
    config:   RunConfig,
    deleter:  D,
    reporter: R,
    state:    RunState,
}

impl<D, R> Orchestrator<D, R>
where
    D: ObjectDeleter,
    R: RunReporter,
{
    pub fn new(config: RunConfig, deleter: D, reporter: R) -> Self {
        Self {
            config,
            deleter,
            reporter,
            state: RunState::Configuring,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// 入力ファイルを最後まで処理する
    ///
    /// 成功時は [`RunState::Completed`] に、致命的エラー時は [`RunState::Failed`] に遷移する。
    /// 開始メッセージは入力ファイルを開けた後に出力する。
    ///
    /// # エラー
    ///
    /// - 入力ファイルを開けない / 読み込めない: `InfraErrorKind::FileAccess`
    /// - DeleteObjects 呼び出し自体の失敗: `InfraErrorKind::S3`
    /// - 終端状態からの再実行: [`CliError::AlreadyFinished`]（入力ファイルも S3 も触らない）
    #[tracing::instrument(
        skip_all,
        fields(mode = %self.config.mode(), bucket = %self.deleter.bucket_name())
    )]
    pub async fn run(&mut self) -> Result<RunSummary, CliError> {
        if self.state.is_terminal() {
            return Err(CliError::AlreadyFinished(self.state));
        }
        self.state = RunState::Running;

        match self.process_batches().await {
            Ok(summary) => {
                self.state = RunState::Completed;
                self.reporter.run_completed(&self.config, &summary);
                Ok(summary)
            }
            Err(e) => {
                self.state = RunState::Failed;
                self.reporter.run_failed(&self.config, &e);
                Err(e.into())
            }
        }
    }

    async fn process_batches(&self) -> Result<RunSummary, InfraError> {
        let mut reader =
            BatchReader::open(self.config.source_file(), self.config.batch_size()).await?;
        self.reporter.run_started(&self.config);

        let mut summary = RunSummary::default();
        let mut sequence = 0;

        loop {
            let lines = reader.next_batch().await?;
            if lines.is_empty() {
                return Ok(summary);
            }

            sequence += 1;
            let parsed = self.config.mode().parse_lines(lines);
            let batch = Batch::new(sequence, parsed.targets, parsed.dropped);

            if batch.is_empty() {
                summary.record_skipped(batch.dropped());
                self.reporter.batch_skipped(&batch);
                continue;
            }

            let outcome = self.deleter.delete_objects(&batch).await?;
            summary.record_batch(&batch, &outcome);
            self.reporter.batch_submitted(&batch, &outcome);
        }
    }
}
