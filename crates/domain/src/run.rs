//! # 実行設定・状態・集計
//!
//! - [`RunConfig`]: 1 回の実行の設定。構築時に一度だけ検証し、以後は不変
//! - [`RunState`]: Orchestrator の状態機械
//! - [`RunSummary`]: 実行全体の件数集計
//!
//! ## 状態遷移
//!
//! ```text
//! Configuring ──→ Running ──→ Completed
//!                    │
//!                    └──→ Failed（致命的エラー、吸収状態）
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use derive_more::Display;
use strum::IntoStaticStr;

use crate::{
    DomainError,
    batch::{Batch, BatchOutcome, BatchSize},
    record::OperationMode,
};

/// デフォルトのログディレクトリ
pub const DEFAULT_LOG_DIR: &str = "logs";

/// 実行時刻からデフォルトのログファイルパスを生成する
///
/// 形式: `logs/results-YYYYmmddHHMMSS.log`
pub fn default_log_file(now: DateTime<Utc>) -> PathBuf {
    Path::new(DEFAULT_LOG_DIR).join(format!("results-{}.log", now.format("%Y%m%d%H%M%S")))
}

// =========================================================================
// BucketName（バケット名）
// =========================================================================

/// バケット名（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列（空白のみを含む）ではない
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "'bucket' は空にできません".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// RunConfig（実行設定）
// =========================================================================

/// 1 回の実行の設定
///
/// Orchestrator が所有し、実行開始後は変更されない。
/// 不正な値は [`RunConfig::new`] で即座に拒否する（最初の使用時まで遅延させない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    mode:         OperationMode,
    bucket:       BucketName,
    source_file:  PathBuf,
    batch_size:   BatchSize,
    log_file:     PathBuf,
    endpoint_url: Option<String>,
}

impl RunConfig {
    /// 実行設定を作成する
    ///
    /// # バリデーション
    ///
    /// - `bucket` が空でない
    /// - `source_file` が空でない
    /// - `batch_size` が 1〜1000
    pub fn new(
        mode: OperationMode,
        bucket: impl Into<String>,
        source_file: impl Into<PathBuf>,
        batch_size: usize,
        log_file: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let bucket = BucketName::new(bucket)?;

        let source_file = source_file.into();
        if source_file.as_os_str().is_empty() {
            return Err(DomainError::Validation(
                "'data_file' は空にできません".to_string(),
            ));
        }

        let batch_size = BatchSize::new(batch_size)?;

        let log_file = log_file.into();
        if log_file.as_os_str().is_empty() {
            return Err(DomainError::Validation(
                "'log_file' は空にできません".to_string(),
            ));
        }

        Ok(Self {
            mode,
            bucket,
            source_file,
            batch_size,
            log_file,
            endpoint_url: None,
        })
    }

    /// S3 互換エンドポイント（MinIO 等）を指定する
    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url.filter(|url| !url.trim().is_empty());
        self
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn batch_size(&self) -> BatchSize {
        self.batch_size
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }
}

// =========================================================================
// RunState（実行状態）
// =========================================================================

/// Orchestrator の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RunState {
    /// 設定検証中（まだ I/O は発生していない）
    Configuring,
    /// バッチを順に処理中
    Running,
    /// 入力を最後まで処理した
    Completed,
    /// 致命的エラーで中断した（以降の遷移なし）
    Failed,
}

impl RunState {
    /// 終端状態かどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

// =========================================================================
// RunSummary（実行集計）
// =========================================================================

/// 実行全体の件数集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// DeleteObjects を呼び出した回数
    pub batches:   usize,
    /// 送信した削除対象の件数
    pub submitted: usize,
    /// 削除に成功した件数
    pub deleted:   usize,
    /// 削除に失敗した件数
    pub failed:    usize,
    /// Record Parser が破棄した行数
    pub dropped:   usize,
}

impl RunSummary {
    /// 送信したバッチの結果を加算する
    pub fn record_batch(&mut self, batch: &Batch, outcome: &BatchOutcome) {
        self.batches += 1;
        self.submitted += batch.len();
        self.deleted += outcome.deleted().len();
        self.failed += outcome.failed().len();
        self.dropped += batch.dropped();
    }

    /// 送信せずにスキップしたグループ（全行が破棄された）の破棄件数を加算する
    pub fn record_skipped(&mut self, dropped: usize) {
        self.dropped += dropped;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        batch::{DeletedObject, FailedObject},
        target::DeletionTarget,
    };

    fn config_with(bucket: &str, source: &str, batch_size: usize) -> Result<RunConfig, DomainError> {
        RunConfig::new(
            OperationMode::Delete,
            bucket,
            source,
            batch_size,
            "logs/test.log",
        )
    }

    // ===== RunConfig =====

    #[test]
    fn test_正常な値で実行設定を作成できる() {
        let config = config_with("my-bucket", "objects.txt", 1000).unwrap();

        assert_eq!(config.mode(), OperationMode::Delete);
        assert_eq!(config.bucket().as_str(), "my-bucket");
        assert_eq!(config.source_file(), Path::new("objects.txt"));
        assert_eq!(config.batch_size().as_usize(), 1000);
        assert_eq!(config.log_file(), Path::new("logs/test.log"));
        assert_eq!(config.endpoint_url(), None);
    }

    #[test]
    fn test_バッチサイズ1001は設定検証で拒否される() {
        assert!(matches!(
            config_with("my-bucket", "objects.txt", 1001),
            Err(DomainError::Validation(_))
        ));
    }

    #[rstest]
    #[case("", "objects.txt", "空のバケット名")]
    #[case("   ", "objects.txt", "空白のみのバケット名")]
    #[case("my-bucket", "", "空の入力ファイルパス")]
    fn test_必須項目が空の場合は拒否される(
        #[case] bucket: &str,
        #[case] source: &str,
        #[case] _description: &str,
    ) {
        assert!(config_with(bucket, source, 10).is_err());
    }

    #[test]
    fn test_バッチサイズ0は拒否される() {
        assert!(config_with("my-bucket", "objects.txt", 0).is_err());
    }

    #[test]
    fn test_空のエンドポイントは未指定として扱う() {
        let config = config_with("b", "f", 1)
            .unwrap()
            .with_endpoint_url(Some("  ".to_string()));
        assert_eq!(config.endpoint_url(), None);

        let config = config_with("b", "f", 1)
            .unwrap()
            .with_endpoint_url(Some("http://localhost:19000".to_string()));
        assert_eq!(config.endpoint_url(), Some("http://localhost:19000"));
    }

    #[test]
    fn test_デフォルトのログファイル名に実行時刻を含む() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();

        assert_eq!(
            default_log_file(now),
            Path::new("logs").join("results-20260304050607.log")
        );
    }

    // ===== RunState =====

    #[test]
    fn test_終端状態はcompletedとfailedのみ() {
        assert!(!RunState::Configuring.is_terminal());
        assert!(!RunState::Running.is_terminal());
        assert!(RunState::Completed.is_terminal());
        assert!(RunState::Failed.is_terminal());
        assert_eq!(RunState::Completed.to_string(), "completed");
    }

    // ===== RunSummary =====

    #[test]
    fn test_record_batchで件数が加算される() {
        let batch = Batch::new(
            1,
            vec![
                DeletionTarget::Key("a".to_string()),
                DeletionTarget::Key("b".to_string()),
            ],
            1,
        );
        let outcome = BatchOutcome::new(
            vec![DeletedObject {
                key:        "a".to_string(),
                version_id: None,
            }],
            vec![FailedObject {
                key:        "b".to_string(),
                version_id: None,
                code:       "AccessDenied".to_string(),
                message:    None,
            }],
        );

        let mut summary = RunSummary::default();
        summary.record_batch(&batch, &outcome);
        summary.record_skipped(2);

        assert_eq!(summary, RunSummary {
            batches:   1,
            submitted: 2,
            deleted:   1,
            failed:    1,
            dropped:   3,
        });
    }
}
