//! # 実行エントリーポイント
//!
//! 削除 / 復元の両バイナリから呼ばれる共通の起動処理。
//!
//! ## 起動順序
//!
//! 1. `.env` を読み込む（存在する場合）
//! 2. CLI 引数をパースし [`RunConfig`] を検証する（ここで失敗した場合はログを書かない）
//! 3. [`LogSession`] を開く
//! 4. S3 クライアントを作成し、Orchestrator で入力を処理する
//! 5. [`LogSession`] の drop でログシンクを閉じる

use s3purge_domain::{
    clock::SystemClock,
    record::OperationMode,
    run::{RunConfig, RunSummary},
};
use s3purge_infra::{AwsS3ObjectDeleter, s3};
use s3purge_shared::{LogFormat, LogSession, TracingConfig};

use crate::{
    config::CliArgs,
    error::CliError,
    reporter::TracingRunReporter,
    runner::Orchestrator,
};

/// プロセス引数を読み込み、指定モードで 1 回の実行を行う
///
/// バイナリの `main` から呼ぶ。ログシンクはスレッドローカルなデフォルトとして
/// 設定するため、current-thread ランタイム上で実行すること。
pub async fn run(mode: OperationMode) -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let args = CliArgs::parse_for(mode);
    let log_format = args.log_format();
    let config = args
        .into_run_config(mode, &SystemClock)
        .map_err(CliError::from)?;

    let _session = open_log_session(&config, log_format)?;

    execute(config).await?;
    Ok(())
}

/// ログシンクを開く
fn open_log_session(config: &RunConfig, log_format: LogFormat) -> Result<LogSession, CliError> {
    LogSession::open(&TracingConfig::new(config.log_file(), log_format)).map_err(|source| {
        CliError::LogSetup {
            path: config.log_file().display().to_string(),
            source,
        }
    })
}

/// S3 クライアントを作成して入力ファイルを最後まで処理する
pub async fn execute(config: RunConfig) -> Result<RunSummary, CliError> {
    let client = s3::create_client(config.endpoint_url()).await;
    let deleter = AwsS3ObjectDeleter::new(client, config.bucket().to_string());
    let reporter = TracingRunReporter::new(config.mode());

    let mut orchestrator = Orchestrator::new(config, deleter, reporter);
    Ok(orchestrator.run().await?)
}
