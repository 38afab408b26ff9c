//! # インフラ層エラー定義
//!
//! 入力ファイルの読み込みや S3 との通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **コンテキストの付与**: ファイル I/O エラーは必ず対象パスと一緒に保持する
//!   （`From<std::io::Error>` は意図的に提供しない）
//! - **SpanTrace 自動捕捉**: convenience constructor でエラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（FileAccess, S3 等）

use std::{fmt, io, path::Path};

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::FileAccess { path, .. } => { /* 入力ファイルの問題 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 入力ファイルエラー
    ///
    /// ファイルが存在しない、権限がない、読み込み途中で失敗したなど。
    /// 実行全体にとって致命的で、リトライしない。
    #[error("ファイル {path} にアクセスできません: {source}")]
    FileAccess {
        /// 対象ファイルのパス
        path:   String,
        #[source]
        source: io::Error,
    },

    /// S3 エラー
    ///
    /// DeleteObjects 呼び出し自体の失敗（通信エラー、サービスエラー）。
    /// 個々のオブジェクトの削除失敗はエラーではなく
    /// [`BatchOutcome`](s3purge_domain::batch::BatchOutcome) に記録される。
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("S3 エラー: {0}")]
    S3(String),

    /// リクエスト構築エラー
    ///
    /// 削除対象から S3 リクエストを組み立てられなかった場合に使用する。
    #[error("入力エラー: {0}")]
    InvalidInput(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// ファイルが存在しないことによるエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(
            &self.kind,
            InfraErrorKind::FileAccess { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }

    // ===== Convenience constructors =====

    /// 入力ファイルエラーを生成する
    pub fn file_access(path: &Path, source: io::Error) -> Self {
        Self {
            kind:       InfraErrorKind::FileAccess {
                path: path.display().to_string(),
                source,
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// S3 エラーを生成する
    pub fn s3(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::S3(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// リクエスト構築エラーを生成する
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::InvalidInput(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_file_accessでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_open_source", path = "objects.txt");
            let _enter = span.enter();

            let err = InfraError::file_access(
                Path::new("objects.txt"),
                io::Error::from(io::ErrorKind::NotFound),
            );

            assert!(matches!(
                err.kind(),
                InfraErrorKind::FileAccess { path, .. } if path == "objects.txt"
            ));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_open_source"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_is_not_foundはファイル不存在のみtrueを返す() {
        let not_found = InfraError::file_access(
            Path::new("missing.txt"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        let denied = InfraError::file_access(
            Path::new("secret.txt"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );

        assert!(not_found.is_not_found());
        assert!(!denied.is_not_found());
        assert!(!InfraError::s3("timeout").is_not_found());
    }

    #[test]
    fn test_displayにファイルパスが含まれる() {
        let err = InfraError::file_access(
            Path::new("data/objects.txt"),
            io::Error::from(io::ErrorKind::NotFound),
        );

        assert!(format!("{err}").starts_with("ファイル data/objects.txt にアクセスできません"));
    }

    #[test]
    fn test_sourceがio_errorに委譲する() {
        let err = InfraError::file_access(
            Path::new("objects.txt"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.source().is_some());

        assert!(InfraError::s3("接続失敗").source().is_none());
    }

    #[test]
    fn test_s3とinvalid_inputは種別とメッセージを保持する() {
        with_error_layer(|| {
            let err = InfraError::s3("接続失敗");
            assert!(matches!(err.kind(), InfraErrorKind::S3(msg) if msg == "接続失敗"));
            assert_eq!(format!("{err}"), "S3 エラー: 接続失敗");

            let err = InfraError::invalid_input("キーが不正");
            assert!(matches!(
                err.kind(),
                InfraErrorKind::InvalidInput(msg) if msg == "キーが不正"
            ));
        });
    }
}
