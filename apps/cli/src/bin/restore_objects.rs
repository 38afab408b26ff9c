//! # restore-objects
//!
//! 入力ファイルに `key,versionId` 形式で列挙したバージョンを削除し、
//! 1 つ前のバージョンを復元する。
//!
//! ```bash
//! restore-objects <bucket> <filename> [-b N] [-l PATH]
//! ```

use s3purge_domain::record::OperationMode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    s3purge_cli::run(OperationMode::Restore).await
}
