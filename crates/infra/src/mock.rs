//! # テスト用モック
//!
//! Orchestrator のテストで使用するインメモリの [`ObjectDeleter`] 実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! s3purge-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use s3purge_domain::batch::{Batch, BatchOutcome, DeletedObject, FailedObject};

use crate::{InfraError, s3::ObjectDeleter};

// ===== MockObjectDeleter =====

/// 送信されたバッチを記録するモック
///
/// - [`with_item_failure`](MockObjectDeleter::with_item_failure) で指定したキーは
///   per-item エラーとして `failed` に入る
/// - [`with_call_failure`](MockObjectDeleter::with_call_failure) で指定した回の呼び出しは
///   リクエスト自体の失敗として `InfraError` を返す
#[derive(Clone, Default)]
pub struct MockObjectDeleter {
    bucket_name:   String,
    submitted:     Arc<Mutex<Vec<Batch>>>,
    item_failures: Arc<Mutex<HashMap<String, String>>>,
    failing_call:  Option<usize>,
}

impl MockObjectDeleter {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Self::default()
        }
    }

    /// 指定キーの削除を `code` で失敗させる
    pub fn with_item_failure(self, key: impl Into<String>, code: impl Into<String>) -> Self {
        self.item_failures
            .lock()
            .unwrap()
            .insert(key.into(), code.into());
        self
    }

    /// `call`（1 始まり）回目の呼び出し自体を失敗させる
    pub fn with_call_failure(mut self, call: usize) -> Self {
        self.failing_call = Some(call);
        self
    }

    /// 送信されたバッチ（失敗した呼び出しを含む）
    pub fn submitted_batches(&self) -> Vec<Batch> {
        self.submitted.lock().unwrap().clone()
    }

    /// 呼び出し回数
    pub fn call_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectDeleter for MockObjectDeleter {
    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    async fn delete_objects(&self, batch: &Batch) -> Result<BatchOutcome, InfraError> {
        let call = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(batch.clone());
            submitted.len()
        };

        if self.failing_call == Some(call) {
            return Err(InfraError::s3(format!(
                "モック: {call} 回目の DeleteObjects が失敗"
            )));
        }

        let item_failures = self.item_failures.lock().unwrap();
        let (failed, deleted): (Vec<_>, Vec<_>) = batch
            .targets()
            .iter()
            .partition(|target| item_failures.contains_key(target.key()));

        Ok(BatchOutcome::new(
            deleted
                .into_iter()
                .map(|target| DeletedObject {
                    key:        target.key().to_string(),
                    version_id: target.version_id().map(String::from),
                })
                .collect(),
            failed
                .into_iter()
                .map(|target| FailedObject {
                    key:        target.key().to_string(),
                    version_id: target.version_id().map(String::from),
                    code:       item_failures[target.key()].clone(),
                    message:    None,
                })
                .collect(),
        ))
    }
}
