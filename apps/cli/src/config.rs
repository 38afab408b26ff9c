//! # CLI 引数
//!
//! コマンドライン引数と環境変数から [`RunConfig`] を組み立てる。
//!
//! ## 引数
//!
//! | 引数 | 環境変数 | 説明 |
//! |------|----------|------|
//! | `<bucket>` | - | 対象バケット名 |
//! | `<filename>` | - | 入力ファイル（1 行 1 件） |
//! | `-b`, `--batch-size` | - | 1 リクエストあたりの件数（1〜1000、デフォルト: 1000） |
//! | `-l`, `--log-file` | - | ログファイル（デフォルト: `logs/results-<時刻>.log`） |
//! | `--endpoint-url` | `S3_ENDPOINT_URL` | S3 互換エンドポイント（MinIO 等） |
//! | `--log-format` | `LOG_FORMAT` | ログファイルの形式（`pretty` / `json`） |

use std::path::PathBuf;

use clap::{
    CommandFactory, FromArgMatches, Parser,
    builder::{OsStringValueParser, TypedValueParser},
};
use s3purge_domain::{
    DomainError,
    batch::BatchSize,
    clock::Clock,
    record::OperationMode,
    run::{RunConfig, default_log_file},
};
use s3purge_shared::LogFormat;

/// 削除 / 復元 CLI の共通引数
#[derive(Debug, Clone, Parser)]
pub struct CliArgs {
    /// 対象の S3 バケット名
    pub bucket: String,

    /// 対象を 1 行 1 件で記載した入力ファイル
    pub filename: PathBuf,

    /// 1 回の DeleteObjects で送信する最大件数（1〜1000）
    #[arg(short = 'b', long, default_value = "1000", value_parser = parse_batch_size)]
    pub batch_size: BatchSize,

    /// ログファイルのパス（親ディレクトリが無ければ作成する。空ならデフォルト）
    #[arg(short = 'l', long, value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub log_file: Option<PathBuf>,

    /// S3 互換エンドポイント（未指定で AWS S3 デフォルト）
    #[arg(long, env = "S3_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// ログファイルの出力形式（pretty / json）
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

impl CliArgs {
    /// モードに応じたコマンド名・説明でプロセス引数をパースする
    ///
    /// 引数が不正な場合は clap が使用方法を表示してプロセスを終了する。
    pub fn parse_for(mode: OperationMode) -> Self {
        let matches = Self::command()
            .name(program_name(mode))
            .about(about(mode))
            .get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// ログファイルの出力形式
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format)
    }

    /// 実行設定に変換する
    ///
    /// `--log-file` が未指定または空の場合は `clock` の現在時刻からファイル名を生成する。
    pub fn into_run_config(
        self,
        mode: OperationMode,
        clock: &dyn Clock,
    ) -> Result<RunConfig, DomainError> {
        let log_file = self
            .log_file
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| default_log_file(clock.now()));

        Ok(RunConfig::new(
            mode,
            self.bucket,
            self.filename,
            self.batch_size.as_usize(),
            log_file,
        )?
        .with_endpoint_url(self.endpoint_url))
    }
}

fn program_name(mode: OperationMode) -> &'static str {
    match mode {
        OperationMode::Delete => "delete-objects",
        OperationMode::Restore => "restore-objects",
    }
}

fn about(mode: OperationMode) -> &'static str {
    match mode {
        OperationMode::Delete => "ファイルに列挙したキーのオブジェクトを一括削除する",
        OperationMode::Restore => {
            "ファイルに列挙したキーとバージョン ID の組を削除し、以前のバージョンを復元する"
        }
    }
}

/// `--batch-size` の値パーサ
fn parse_batch_size(s: &str) -> Result<BatchSize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' は正の整数ではありません"))?;
    BatchSize::new(value).map_err(|e| e.to_string())
}
