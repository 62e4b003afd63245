//! 植物認識サービス連携モジュール
//!
//! 外部の認識サービスを `RecognitionService` トレイトで抽象化する。
//! 本番実装は Pl@ntNet、テストではモックを差し込む。

mod plantnet;
mod types;

pub use plantnet::PlantNetClient;
pub use types::{Candidate, PlantNetResponse, ReferenceImage, Species};

use async_trait::async_trait;
use thiserror::Error;

/// 認識サービスの失敗（呼び出し元へは伝播せず、フォールバックで吸収される）
///
/// メッセージにAPIキーやリクエストURLを含めないこと。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognitionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,
}

impl RecognitionError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.without_url().to_string())
        }
    }
}

/// 画像1枚を認識サービスへ送り、候補一覧を得る
#[async_trait]
pub trait RecognitionService: Send + Sync {
    async fn recognize(&self, image: Vec<u8>) -> Result<PlantNetResponse, RecognitionError>;
}
