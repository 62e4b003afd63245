use plant_id_common::IdentificationResult;

/// 1リクエストの状態遷移
///
/// `Submitted → ServiceCalled → {Matched | NoCandidate | ServiceFailed} → Responded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Submitted,
    ServiceCalled,
    Matched,
    NoCandidate,
    ServiceFailed,
    Responded,
}

/// 識別処理の結果
///
/// `degraded` はフォールバック結果のときだけ true。呼び出し元のJSONには出さない。
#[derive(Debug, Clone)]
pub struct IdentificationOutcome {
    pub result: IdentificationResult,
    /// 応答直前の分岐（Matched / NoCandidate / ServiceFailed）
    pub state: RequestState,
    pub degraded: bool,
}
