//! # S3 一括削除クライアント
//!
//! DeleteObjects API によるバッチ単位のオブジェクト削除を行う。
//!
//! ## 設計方針
//!
//! - **1 バッチ 1 リクエスト**: バッチ内の全対象を 1 回の DeleteObjects で送信する
//!   （上限 1000 件を超えないことは呼び出し側が保証する）
//! - **バージョン指定**: バージョン ID を持つ対象はバージョン指定で削除する
//! - **部分失敗はエラーにしない**: 個々のオブジェクトの失敗は [`BatchOutcome`] に記録し、
//!   呼び出し自体の失敗のみを [`InfraError`] として返す
//! - **ローカル開発**: MinIO を使用（`S3_ENDPOINT_URL` で接続先を指定）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use s3purge_infra::s3::{self, AwsS3ObjectDeleter, ObjectDeleter};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     // ローカル（MinIO）
//!     let client = s3::create_client(Some("http://localhost:19000")).await;
//!     let deleter = AwsS3ObjectDeleter::new(client, "dev-bucket".to_string());
//!
//!     // 本番（AWS S3）
//!     let client = s3::create_client(None).await;
//!     let deleter = AwsS3ObjectDeleter::new(client, "prod-bucket".to_string());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    error::DisplayErrorContext,
    operation::delete_objects::DeleteObjectsOutput,
    types::{Delete, ObjectIdentifier},
};
use s3purge_domain::{
    batch::{Batch, BatchOutcome, DeletedObject, FailedObject},
    target::DeletionTarget,
};

use crate::InfraError;

/// S3 がエラーコードを返さなかった場合に使用するコード
const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// オブジェクト一括削除のインターフェース
///
/// テスト時はモックに差し替え可能。
#[async_trait]
pub trait ObjectDeleter: Send + Sync {
    /// 削除対象のバケット名
    fn bucket_name(&self) -> &str;

    /// バッチ内の全対象を 1 回のリクエストで削除する
    ///
    /// # 戻り値
    ///
    /// 削除成功 / 失敗に分類した結果。
    /// リクエスト自体が失敗した場合は `InfraErrorKind::S3` を返す（リトライしない）。
    async fn delete_objects(&self, batch: &Batch) -> Result<BatchOutcome, InfraError>;
}

/// AWS S3 一括削除クライアント
///
/// `aws-sdk-s3` を使用した [`ObjectDeleter`] の実装。
/// MinIO とも互換動作する。
pub struct AwsS3ObjectDeleter {
    client:      Client,
    bucket_name: String,
}

impl AwsS3ObjectDeleter {
    /// 新しい一括削除クライアントを作成する
    pub fn new(client: Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }
}

#[async_trait]
impl ObjectDeleter for AwsS3ObjectDeleter {
    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    #[tracing::instrument(
        skip_all,
        fields(bucket = %self.bucket_name, batch.sequence = batch.sequence(), batch.size = batch.len())
    )]
    async fn delete_objects(&self, batch: &Batch) -> Result<BatchOutcome, InfraError> {
        let objects = batch
            .targets()
            .iter()
            .map(to_object_identifier)
            .collect::<Result<Vec<_>, _>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| InfraError::invalid_input(format!("Delete リクエストの構築に失敗: {e}")))?;

        let output = self
            .client
            .delete_objects()
            .bucket(&self.bucket_name)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error.category = "external_service",
                    error.kind = "s3",
                    error.detail = %DisplayErrorContext(&e),
                    "バケット '{}' のオブジェクトを削除できませんでした",
                    self.bucket_name
                );
                InfraError::s3(format!(
                    "オブジェクトの削除に失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let outcome = outcome_from_output(&output);
        log_outcome(&self.bucket_name, &outcome);
        Ok(outcome)
    }
}

/// 削除対象を S3 のオブジェクト識別子に変換する
fn to_object_identifier(target: &DeletionTarget) -> Result<ObjectIdentifier, InfraError> {
    ObjectIdentifier::builder()
        .key(target.key())
        .set_version_id(target.version_id().map(String::from))
        .build()
        .map_err(|e| {
            InfraError::invalid_input(format!("オブジェクト識別子の構築に失敗 ({target}): {e}"))
        })
}

/// DeleteObjects のレスポンスを削除成功 / 失敗に分類する
///
/// `Deleted` / `Errors` はそれぞれ省略・空・一部のみ設定のいずれもありうる。
/// キーを持たない `Deleted` 要素は無視する。キーを持たない `Errors` 要素は
/// 空キーの失敗として記録する（失敗件数から漏らさない）。
fn outcome_from_output(output: &DeleteObjectsOutput) -> BatchOutcome {
    let deleted = output
        .deleted()
        .iter()
        .filter_map(|object| {
            object.key().map(|key| DeletedObject {
                key:        key.to_string(),
                version_id: object.version_id().map(String::from),
            })
        })
        .collect();

    let failed = output
        .errors()
        .iter()
        .map(|error| FailedObject {
            key:        error.key().unwrap_or_default().to_string(),
            version_id: error.version_id().map(String::from),
            code:       error.code().unwrap_or(UNKNOWN_ERROR_CODE).to_string(),
            message:    error.message().map(String::from),
        })
        .collect();

    BatchOutcome::new(deleted, failed)
}

/// バッチ結果をログに出力する
///
/// 空のリストについては何も出力しない。
fn log_outcome(bucket_name: &str, outcome: &BatchOutcome) {
    if !outcome.deleted().is_empty() {
        tracing::info!(
            deleted_count = outcome.deleted().len(),
            "バケット '{}' からオブジェクトを削除しました: {:?}",
            bucket_name,
            outcome.deleted_labels()
        );
    }

    if outcome.has_failures() {
        tracing::warn!(
            failed_count = outcome.failed().len(),
            "バケット '{}' のオブジェクトを削除できませんでした: {:?}",
            bucket_name,
            outcome.failed_labels()
        );
    }
}

/// S3 クライアントを作成する
///
/// `endpoint` が `Some` の場合は MinIO 等のカスタムエンドポイントに接続する。
/// `None` の場合は AWS S3 のデフォルトエンドポイントを使用する。
///
/// 認証情報とリージョンは SDK のデフォルトチェーンで解決する
/// （リージョン未設定時は `us-east-1`）。
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let region = aws_config::meta::region::RegionProviderChain::default_provider()
        .or_else(aws_config::Region::new("us-east-1"));

    let mut config_builder =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint_url) = endpoint {
        config_builder = config_builder.endpoint_url(endpoint_url);
    }

    let config = config_builder.load().await;

    // MinIO はパススタイルが必要（バーチャルホスト型 URL を使わない）
    let s3_config_builder = aws_sdk_s3::config::Builder::from(&config);
    let s3_config = if endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    Client::from_conf(s3_config)
}
