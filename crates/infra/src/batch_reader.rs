//! # Batch Reader
//!
//! 入力ファイルを 1 行ずつストリーミングし、最大 `n` 行のグループ単位で返す。
//! ファイル全体をメモリに載せないため、入力サイズに関係なくメモリ使用量は
//! バッチサイズ分で一定になる。
//!
//! ## 終端の扱い
//!
//! ソースを読み切ると空のグループを返す。呼び出し側は空グループを終了シグナルとして扱う:
//!
//! ```rust,ignore
//! let mut reader = BatchReader::open(path, batch_size).await?;
//! loop {
//!     let lines = reader.next_batch().await?;
//!     if lines.is_empty() {
//!         break;
//!     }
//!     // ...
//! }
//! ```

use std::path::{Path, PathBuf};

use s3purge_domain::batch::BatchSize;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines},
};

use crate::InfraError;

/// 入力ソースから行グループを順に読み出すリーダー
pub struct BatchReader<R> {
    lines:      Lines<R>,
    batch_size: BatchSize,
    path:       PathBuf,
    exhausted:  bool,
}

impl BatchReader<BufReader<File>> {
    /// ファイルを開いてリーダーを作成する
    ///
    /// # エラー
    ///
    /// ファイルが存在しない、または開けない場合は `InfraErrorKind::FileAccess` を返す。
    pub async fn open(path: &Path, batch_size: BatchSize) -> Result<Self, InfraError> {
        let file = File::open(path)
            .await
            .map_err(|e| InfraError::file_access(path, e))?;
        Ok(Self::new(BufReader::new(file), batch_size, path))
    }
}

impl<R> BatchReader<R>
where
    R: AsyncBufRead + Unpin,
{
    /// 任意の読み込みソースからリーダーを作成する
    ///
    /// `path` はエラーメッセージに含めるソース名として使用する。
    pub fn new(reader: R, batch_size: BatchSize, path: impl Into<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            batch_size,
            path: path.into(),
            exhausted: false,
        }
    }

    /// 次の行グループを読み出す
    ///
    /// 各行の末尾の改行（`\n` / `\r\n`）は除去される。
    /// 最終グループは `n` 行未満になりうる。ソースを読み切った後は空の `Vec` を返す。
    ///
    /// # エラー
    ///
    /// 読み込み途中の I/O エラー（不正な UTF-8 を含む）は `InfraErrorKind::FileAccess` を返す。
    pub async fn next_batch(&mut self) -> Result<Vec<String>, InfraError> {
        let capacity = self.batch_size.as_usize();
        let mut group = Vec::with_capacity(capacity);

        while !self.exhausted && group.len() < capacity {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| InfraError::file_access(&self.path, e))?;

            match line {
                Some(line) => group.push(line),
                None => self.exhausted = true,
            }
        }

        Ok(group)
    }

    /// ソース名（ファイルパス）
    pub fn path(&self) -> &Path {
        &self.path
    }
}
