//! # Observability 基盤
//!
//! 1 回の実行に紐づくログ出力先（シンク）の初期化を提供する。
//! 削除 / 復元の両 CLI で共通のログ初期化ロジックを集約し、
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えに対応する。
//!
//! ## 出力先
//!
//! | シンク | レベル | 内容 |
//! |--------|--------|------|
//! | ログファイル | `RUST_LOG`（デフォルト `info`） | すべてのイベント |
//! | 標準出力 | info | ターゲットが [`CONSOLE_TARGET`] のイベントのみ（開始・ログパス・完了） |
//!
//! ## ライフサイクル
//!
//! [`LogSession::open`] で実行開始時に両シンクを開き、[`LogSession`] の drop で閉じる。
//! グローバルなサブスクライバは登録せず、`tracing::subscriber::set_default` による
//! スコープ付きのデフォルトとして設定する。

use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::subscriber::DefaultGuard;

/// 標準出力にも出すイベントのターゲット
///
/// ```rust,ignore
/// tracing::info!(target: s3purge_shared::observability::CONSOLE_TARGET, "削除が完了しました");
/// ```
pub const CONSOLE_TARGET: &str = "console";

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（`jq` での集計向け）
    Json,
    /// 人間が読みやすい形式
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    ///
    /// 未設定の場合は [`Pretty`](LogFormat::Pretty) をデフォルトとする。
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// ログファイルのパス（親ディレクトリが無ければ作成する）
    pub log_file:   PathBuf,
    /// ログファイルの出力形式
    pub log_format: LogFormat,
}

impl TracingConfig {
    /// 新しい設定を作成する
    pub fn new(log_file: impl Into<PathBuf>, log_format: LogFormat) -> Self {
        Self {
            log_file: log_file.into(),
            log_format,
        }
    }
}

/// 1 回の実行に紐づくログシンク
///
/// 生存期間中、このスレッドのデフォルトサブスクライバとして
/// ファイルシンクと標準出力シンクを設定する。drop でファイルを閉じる。
pub struct LogSession {
    log_file: PathBuf,
    _guard:   DefaultGuard,
}

impl LogSession {
    /// ログシンクを開く
    ///
    /// ログファイルは追記モードで開く。`RUST_LOG` 環境変数でファイルシンクの
    /// ログレベルを制御可能。未設定の場合は `"info"` をデフォルトとする。
    ///
    /// # エラー
    ///
    /// 親ディレクトリの作成やログファイルのオープンに失敗した場合。
    pub fn open(config: &TracingConfig) -> io::Result<Self> {
        use tracing_subscriber::{
            Layer as _,
            filter::filter_fn,
            fmt,
            layer::SubscriberExt,
        };

        create_parent_dir(&config.log_file)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;

        let file_filter =
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

        let file_layer = match config.log_format {
            LogFormat::Json => fmt::layer()
                .json()
                .flatten_event(true)
                .with_target(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(Mutex::new(file))
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .boxed(),
        };

        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(io::stdout)
            .with_filter(filter_fn(|metadata| {
                metadata.target() == CONSOLE_TARGET && *metadata.level() <= tracing::Level::INFO
            }));

        let subscriber = tracing_subscriber::registry()
            .with(file_layer.with_filter(file_filter))
            .with(console_layer)
            .with(tracing_error::ErrorLayer::default());

        Ok(Self {
            log_file: config.log_file.clone(),
            _guard:   tracing::subscriber::set_default(subscriber),
        })
    }

    /// ログファイルのパス
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// ログファイルの親ディレクトリを作成する（存在する場合は何もしない）
fn create_parent_dir(log_file: &Path) -> io::Result<()> {
    match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // ===== LogFormat::parse テスト =====

    #[test]
    fn test_parse_jsonでjsonを返す() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    }

    #[test]
    fn test_parse_不正な値でprettyにフォールバックする() {
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Pretty);
    }

    #[test]
    fn test_defaultでprettyを返す() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    // ===== LogSession テスト =====

    #[test]
    fn test_openで親ディレクトリを作成しログを書き込む() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("nested").join("logs").join("run.log");

        {
            let session =
                LogSession::open(&TracingConfig::new(&log_file, LogFormat::Pretty)).unwrap();
            assert_eq!(session.log_file(), log_file.as_path());

            tracing::info!(bucket = "my-bucket", "Bucket: my-bucket");
            tracing::warn!("Could not delete objects");
            tracing::debug!("出力されないデバッグログ");
        }

        let contents = std::fs::read_to_string(&log_file).unwrap();
        assert!(contents.contains("INFO"), "{contents}");
        assert!(contents.contains("Bucket: my-bucket"), "{contents}");
        assert!(contents.contains("WARN"), "{contents}");
        assert!(!contents.contains("出力されないデバッグログ"), "{contents}");
    }

    #[test]
    fn test_openは既存のログファイルに追記する() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("run.log");
        std::fs::write(&log_file, "existing line\n").unwrap();

        {
            let _session =
                LogSession::open(&TracingConfig::new(&log_file, LogFormat::Pretty)).unwrap();
            tracing::info!(target: CONSOLE_TARGET, "削除が完了しました");
        }

        let contents = std::fs::read_to_string(&log_file).unwrap();
        assert!(contents.starts_with("existing line\n"));
        assert!(contents.contains("削除が完了しました"), "{contents}");
    }

    #[test]
    fn test_json形式ではメッセージがトップレベルに出力される() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("run.json.log");

        {
            let _session =
                LogSession::open(&TracingConfig::new(&log_file, LogFormat::Json)).unwrap();
            tracing::info!(batch.sequence = 1, "Batch submitted");
        }

        let contents = std::fs::read_to_string(&log_file).unwrap();
        assert!(contents.contains("\"message\":\"Batch submitted\""), "{contents}");
        assert!(contents.contains("\"batch.sequence\":1"), "{contents}");
    }

    #[test]
    fn test_create_parent_dirは親なしのパスでも成功する() {
        assert!(create_parent_dir(Path::new("run.log")).is_ok());
    }
}
