//! # Record Parser
//!
//! 入力ファイルの生の行（改行除去済み）を [`DeletionTarget`] に変換する。
//!
//! ## モード別の変換規則
//!
//! | モード | 入力形式 | 不正行の扱い |
//! |--------|----------|--------------|
//! | [`Delete`](OperationMode::Delete) | `key` | なし（空行も空キーとしてそのまま通す） |
//! | [`Restore`](OperationMode::Restore) | `key,versionId` | カンマがちょうど 1 つでない行、空バージョン ID の行は破棄 |
//!
//! 破棄はエラーではない。破棄件数は [`ParsedLines::dropped`] で呼び出し元に返し、
//! バッチごとのログに出力する。

use strum::{Display, EnumString, IntoStaticStr};

use crate::target::DeletionTarget;

/// 実行モード
///
/// 同じ状態機械を共有し、使用する Record Parser と DeleteObjects の呼び出し形式のみが異なる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum OperationMode {
    /// キー指定でオブジェクトを削除する
    Delete,
    /// キー + バージョン ID 指定で特定バージョンを削除し、以前のバージョンを復元する
    Restore,
}

/// 1 グループ分の変換結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLines {
    /// 送信対象
    pub targets: Vec<DeletionTarget>,
    /// 破棄した行数
    pub dropped: usize,
}

impl OperationMode {
    /// 生の行グループを削除対象に変換する
    ///
    /// 行の順序は保持される。
    pub fn parse_lines(self, lines: Vec<String>) -> ParsedLines {
        match self {
            Self::Delete => ParsedLines {
                targets: lines.into_iter().map(DeletionTarget::Key).collect(),
                dropped: 0,
            },
            Self::Restore => {
                let total = lines.len();
                let targets: Vec<DeletionTarget> =
                    lines.iter().filter_map(|line| parse_versioned(line)).collect();
                ParsedLines {
                    dropped: total - targets.len(),
                    targets,
                }
            }
        }
    }

    /// 実行開始時のログメッセージ
    pub fn start_message(self) -> &'static str {
        match self {
            Self::Delete => "削除を開始します",
            Self::Restore => "復元を開始します",
        }
    }

    /// 実行完了時のログメッセージ
    pub fn complete_message(self) -> &'static str {
        match self {
            Self::Delete => "削除が完了しました",
            Self::Restore => "復元が完了しました",
        }
    }
}

/// `key,versionId` 形式の 1 行を変換する
///
/// カンマで分割してちょうど 2 フィールドにならない行、
/// 前後の空白を除いたバージョン ID が空の行は `None` を返す。
fn parse_versioned(line: &str) -> Option<DeletionTarget> {
    let mut fields = line.split(',');
    let (Some(key), Some(version_id), None) = (fields.next(), fields.next(), fields.next()) else {
        return None;
    };

    let version_id = version_id.trim();
    if version_id.is_empty() {
        return None;
    }

    Some(DeletionTarget::Version {
        key:        key.to_string(),
        version_id: version_id.to_string(),
    })
}
