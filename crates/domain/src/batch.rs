//! # バッチとバッチ実行結果
//!
//! - [`BatchSize`]: 1 回の DeleteObjects に含める最大件数（1〜1000）
//! - [`Batch`]: 1 回のループで送信する削除対象の並び
//! - [`BatchOutcome`]: DeleteObjects のレスポンスを削除成功 / 失敗に分類したもの

use derive_more::Display;
use itertools::Itertools;

use crate::{DomainError, target::DeletionTarget};

// =========================================================================
// BatchSize（バッチサイズ）
// =========================================================================

/// バッチサイズ（値オブジェクト）
///
/// # 不変条件
///
/// - 1 以上 [`BatchSize::MAX`] 以下（S3 DeleteObjects API の上限）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct BatchSize(usize);

impl BatchSize {
    /// DeleteObjects 1 回あたりの上限件数
    pub const MAX: usize = 1000;

    /// バッチサイズを作成する
    ///
    /// # エラー
    ///
    /// 0 または [`BatchSize::MAX`] を超える場合は `DomainError::Validation` を返す。
    pub fn new(value: usize) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::Validation(
                "バッチサイズは 1 以上である必要があります".to_string(),
            ));
        }
        if value > Self::MAX {
            return Err(DomainError::Validation(format!(
                "バッチサイズは {} 以下である必要があります（指定値: {value}）",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

// =========================================================================
// Batch（バッチ）
// =========================================================================

/// 1 回の DeleteObjects で送信する削除対象の並び
///
/// 1 回のループで生成され、送信後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    sequence: usize,
    targets:  Vec<DeletionTarget>,
    dropped:  usize,
}

impl Batch {
    /// バッチを作成する
    ///
    /// # 引数
    ///
    /// * `sequence` - ファイル先頭からの通し番号（1 始まり）
    /// * `targets` - 送信対象（ファイル順）
    /// * `dropped` - このバッチの元になった行のうち Record Parser が破棄した行数
    pub fn new(sequence: usize, targets: Vec<DeletionTarget>, dropped: usize) -> Self {
        Self {
            sequence,
            targets,
            dropped,
        }
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn targets(&self) -> &[DeletionTarget] {
        &self.targets
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

// =========================================================================
// BatchOutcome（バッチ実行結果）
// =========================================================================

/// 削除に成功したオブジェクト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedObject {
    pub key:        String,
    pub version_id: Option<String>,
}

/// 削除に失敗したオブジェクト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedObject {
    pub key:        String,
    pub version_id: Option<String>,
    /// S3 のエラーコード（例: `AccessDenied`）
    pub code:       String,
    pub message:    Option<String>,
}

impl DeletedObject {
    fn label(&self) -> String {
        object_label(&self.key, self.version_id.as_deref())
    }
}

impl FailedObject {
    fn label(&self) -> String {
        format!(
            "{}: {}",
            object_label(&self.key, self.version_id.as_deref()),
            self.code
        )
    }
}

fn sorted_labels(labels: impl Iterator<Item = String>) -> Vec<String> {
    labels.sorted().collect()
}

fn object_label(key: &str, version_id: Option<&str>) -> String {
    match version_id {
        Some(version_id) => format!("{key}?versionId={version_id}"),
        None => key.to_string(),
    }
}

/// DeleteObjects のレスポンスを分類した結果
///
/// # 不変条件
///
/// - 呼び出しが成功した場合、送信した各対象は `deleted` と `failed` のどちらか一方にのみ現れる
/// - 呼び出し自体が失敗した場合はこの値は生成されない（エラーとして伝播する）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    deleted: Vec<DeletedObject>,
    failed:  Vec<FailedObject>,
}

impl BatchOutcome {
    pub fn new(deleted: Vec<DeletedObject>, failed: Vec<FailedObject>) -> Self {
        Self { deleted, failed }
    }

    pub fn deleted(&self) -> &[DeletedObject] {
        &self.deleted
    }

    pub fn failed(&self) -> &[FailedObject] {
        &self.failed
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// 削除済みオブジェクトの表示用ラベル（ソート済み）
    ///
    /// ログ出力を決定的にするためにソートする。
    pub fn deleted_labels(&self) -> Vec<String> {
        sorted_labels(self.deleted.iter().map(DeletedObject::label))
    }

    /// 削除失敗オブジェクトの表示用ラベル（`key: ErrorCode` 形式、ソート済み）
    pub fn failed_labels(&self) -> Vec<String> {
        sorted_labels(self.failed.iter().map(FailedObject::label))
    }
}
