//! # delete-objects
//!
//! 入力ファイルに 1 行 1 キーで列挙したオブジェクトを一括削除する。
//!
//! ```bash
//! delete-objects <bucket> <filename> [-b N] [-l PATH]
//! ```

use s3purge_domain::record::OperationMode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    s3purge_cli::run(OperationMode::Delete).await
}
