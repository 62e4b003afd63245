//! 植物識別オーケストレータ
//!
//! 正規化済み画像を認識サービスへ送り、最上位候補を薬用植物データベースと
//! 照合して識別結果を組み立てる。サービスの失敗は呼び出し元へ伝播させず、
//! フォールバック結果（degraded）で応答する。リトライはしない。

mod fallback;
mod types;

pub use fallback::{
    fallback_result, no_candidate_result, FALLBACK_CONFIDENCE, FALLBACK_IMAGES, NO_CANDIDATE_ADVICE,
    NO_CANDIDATE_ERROR,
};
pub use types::{IdentificationOutcome, RequestState};

use crate::error::{PlantIdError, Result};
use crate::recognizer::{Candidate, RecognitionError, RecognitionService};
use futures::stream::{self, StreamExt};
use plant_id_common::{IdentificationResult, IdentifiedPlant, KnowledgeBase, MatchMode, PlantMatcher};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 参考画像の最大枚数
pub const MAX_REFERENCE_IMAGES: usize = 3;

/// 割り込みシグナルの待機をキャンセル用Futureに変換する
///
/// シグナルハンドラを登録できなかった場合はキャンセルを無効化し、永久に完了しない。
pub async fn cancel_on_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("interrupt received, cancelling identification"),
        Err(e) => {
            warn!(error = %e, "ctrl-c handler unavailable; cancellation disabled");
            std::future::pending::<()>().await
        }
    }
}

pub struct Identifier<S> {
    /// None はAPIキー未設定（ネットワークを使わずフォールバック）
    service: Option<S>,
    knowledge_base: Arc<KnowledgeBase>,
    mode: MatchMode,
    fallback_seed: Option<u64>,
}

impl<S: RecognitionService> Identifier<S> {
    pub fn new(service: Option<S>, knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self {
            service,
            knowledge_base,
            mode: MatchMode::Loose,
            fallback_seed: None,
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// フォールバック選択の乱数シードを固定（テスト用）
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = Some(seed);
        self
    }

    /// 画像1枚を識別（キャンセルなし）
    pub async fn identify(&self, image: Vec<u8>) -> Result<IdentificationOutcome> {
        self.identify_with_cancel(image, std::future::pending::<()>()).await
    }

    /// 画像1枚を識別
    ///
    /// `cancel` が先に完了した場合はサービス呼び出しを破棄して ServiceFailed 扱いにする。
    /// エラーになるのは空の画像を渡したときだけ。
    pub async fn identify_with_cancel<C>(&self, image: Vec<u8>, cancel: C) -> Result<IdentificationOutcome>
    where
        C: Future<Output = ()>,
    {
        if image.is_empty() {
            return Err(PlantIdError::InvalidInput("画像データが空です".into()));
        }
        debug!(state = ?RequestState::Submitted, bytes = image.len(), "identification submitted");

        let outcome = match &self.service {
            None => {
                warn!("API key not configured; skipping recognition service");
                self.fallback()
            }
            Some(service) => {
                debug!(state = ?RequestState::ServiceCalled, "calling recognition service");
                let response = tokio::select! {
                    response = service.recognize(image) => response,
                    _ = cancel => Err(RecognitionError::Cancelled),
                };

                match response {
                    Ok(response) => match response.best_match() {
                        Some(best) => self.enrich(best),
                        None => {
                            info!("recognition service returned no candidates");
                            IdentificationOutcome {
                                result: no_candidate_result(),
                                state: RequestState::NoCandidate,
                                degraded: false,
                            }
                        }
                    },
                    Err(e) => {
                        warn!(error = %e, "recognition service failed");
                        self.fallback()
                    }
                }
            }
        };

        info!(
            state = ?RequestState::Responded,
            branch = ?outcome.state,
            degraded = outcome.degraded,
            "identification responded"
        );
        Ok(outcome)
    }

    /// 複数画像を並行して識別（結果は入力順）
    pub async fn identify_all<C>(
        &self,
        images: Vec<(String, Vec<u8>)>,
        concurrency: usize,
        cancel: C,
    ) -> Vec<(String, Result<IdentificationOutcome>)>
    where
        C: Future<Output = ()> + Clone,
    {
        let mut results: Vec<(usize, String, Result<IdentificationOutcome>)> =
            stream::iter(images.into_iter().enumerate())
                .map(|(index, (label, bytes))| {
                    let cancel = cancel.clone();
                    async move {
                        debug!(image = %label, "identifying");
                        let outcome = self.identify_with_cancel(bytes, cancel).await;
                        (index, label, outcome)
                    }
                })
                .buffer_unordered(concurrency.max(1))
                .collect()
                .await;

        results.sort_by_key(|(index, _, _)| *index);
        results
            .into_iter()
            .map(|(_, label, outcome)| (label, outcome))
            .collect()
    }

    /// 最上位候補をデータベースと照合
    fn enrich(&self, best: &Candidate) -> IdentificationOutcome {
        let scientific_name = best.species.scientific_name_without_author.trim();
        if scientific_name.is_empty() {
            warn!("best candidate has no scientific name; treating response as malformed");
            return self.fallback();
        }

        let common_names = &best.species.common_names;
        debug!(
            scientific_name,
            common_names = ?common_names,
            score = best.score,
            reference_images = best.images.len(),
            "best match"
        );

        let matched = match PlantMatcher::new(&self.knowledge_base)
            .with_mode(self.mode)
            .find(scientific_name, common_names)
        {
            Ok(matched) => matched,
            Err(e) => {
                warn!(error = %e, "matcher rejected candidate");
                return self.fallback();
            }
        };

        let plant_name = common_names
            .first()
            .cloned()
            .unwrap_or_else(|| scientific_name.to_string());

        let images = best
            .images
            .iter()
            .take(MAX_REFERENCE_IMAGES)
            .map(|img| img.url.clone())
            .collect();

        IdentificationOutcome {
            result: IdentificationResult::Identified(IdentifiedPlant {
                plant_name,
                common_names: common_names.clone(),
                confidence: best.score,
                scientific_name: matched.scientific_name.or_else(|| Some(scientific_name.to_string())),
                medicinal_properties: matched.medicinal_properties,
                images,
                note: matched.note,
            }),
            state: RequestState::Matched,
            degraded: false,
        }
    }

    fn fallback(&self) -> IdentificationOutcome {
        let mut rng = match self.fallback_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let result = fallback_result(&self.knowledge_base, &mut rng);
        warn!(degraded = true, "responding with fallback result");

        IdentificationOutcome {
            result,
            state: RequestState::ServiceFailed,
            degraded: true,
        }
    }
}
