//! # 削除対象
//!
//! 1 回の DeleteObjects 呼び出しに含める個々のオブジェクト指定。
//!
//! - 削除モード: オブジェクトキーのみ（最新バージョンに削除マーカーが付く）
//! - 復元モード: キー + バージョン ID（指定バージョンを物理削除し、一つ前のバージョンを見えるようにする）

use derive_more::Display;

/// 削除対象（値オブジェクト）
///
/// Record Parser が入力 1 行ごとに生成し、Bulk Mutation Client が 1 度だけ消費する。
///
/// # 不変条件
///
/// - [`Version`](DeletionTarget::Version) の `version_id` は空文字列ではない
///   （空のものは [`record`](crate::record) で除外される）
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DeletionTarget {
    /// オブジェクトキーのみ
    #[display("{_0}")]
    Key(String),
    /// オブジェクトキーとバージョン ID の組
    #[display("{key}?versionId={version_id}")]
    Version { key: String, version_id: String },
}

impl DeletionTarget {
    /// オブジェクトキーを取得する
    pub fn key(&self) -> &str {
        match self {
            Self::Key(key) => key,
            Self::Version { key, .. } => key,
        }
    }

    /// バージョン ID を取得する（キーのみの場合は `None`）
    pub fn version_id(&self) -> Option<&str> {
        match self {
            Self::Key(_) => None,
            Self::Version { version_id, .. } => Some(version_id),
        }
    }
}
