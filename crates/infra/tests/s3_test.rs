//! S3 / MinIO 統合テスト
//!
//! MinIO を使用した DeleteObjects の統合テスト。接続先が必要なため通常は実行しない。
//!
//! 実行方法:
//! ```bash
//! S3_ENDPOINT_URL=http://localhost:19000 cargo test -p s3purge-infra --test s3_test -- --ignored
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use aws_sdk_s3::primitives::ByteStream;
use s3purge_domain::{batch::Batch, target::DeletionTarget};
use s3purge_infra::s3::{self, AwsS3ObjectDeleter, ObjectDeleter};

/// テスト用の S3（MinIO）エンドポイント
fn s3_endpoint() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:19000".to_string())
}

/// テスト用のバケット名
fn s3_bucket() -> String {
    std::env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "s3purge-dev".to_string())
}

/// テストごとに一意なキー接頭辞を生成する
fn test_prefix(name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test/{name}/{}-{nanos}", std::process::id())
}

async fn create_test_client() -> aws_sdk_s3::Client {
    dotenvy::dotenv().ok();
    s3::create_client(Some(&s3_endpoint())).await
}

async fn put_object(client: &aws_sdk_s3::Client, key: &str) {
    client
        .put_object()
        .bucket(s3_bucket())
        .key(key)
        .body(ByteStream::from_static(b"s3purge"))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "MinIO が必要"]
async fn test_バッチ内の全オブジェクトを削除できる() {
    let client = create_test_client().await;
    let prefix = test_prefix("delete");
    let keys: Vec<String> = (0..3).map(|i| format!("{prefix}/{i}.txt")).collect();
    for key in &keys {
        put_object(&client, key).await;
    }
    let sut = AwsS3ObjectDeleter::new(client.clone(), s3_bucket());
    let batch = Batch::new(
        1,
        keys.iter().cloned().map(DeletionTarget::Key).collect(),
        0,
    );

    let outcome = sut.delete_objects(&batch).await.unwrap();

    assert!(!outcome.has_failures());
    let mut expected = keys.clone();
    expected.sort();
    assert_eq!(outcome.deleted_labels(), expected);

    let head = client
        .head_object()
        .bucket(s3_bucket())
        .key(&keys[0])
        .send()
        .await;
    assert!(head.is_err(), "削除後もオブジェクトが存在する");
}

#[tokio::test]
#[ignore = "MinIO が必要"]
async fn test_存在しないバケットへの削除はs3エラーになる() {
    let client = create_test_client().await;
    let sut = AwsS3ObjectDeleter::new(client, format!("missing-{}", std::process::id()));
    let batch = Batch::new(1, vec![DeletionTarget::Key("a".to_string())], 0);

    let result = sut.delete_objects(&batch).await;

    assert!(matches!(
        result.unwrap_err().kind(),
        s3purge_infra::InfraErrorKind::S3(_)
    ));
}
