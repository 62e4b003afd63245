use serde::{Deserialize, Serialize};

/// Pl@ntNet 識別APIレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantNetResponse {
    #[serde(default)]
    pub results: Vec<Candidate>,
}

/// 識別候補（スコア順）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub species: Species,

    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub images: Vec<ReferenceImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub scientific_name_without_author: String,

    #[serde(default)]
    pub common_names: Vec<String>,
}

/// 参考画像
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub url: String,
}

impl PlantNetResponse {
    /// 最上位の候補
    pub fn best_match(&self) -> Option<&Candidate> {
        self.results.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "query": {"project": "all"},
            "results": [
                {
                    "score": 0.87,
                    "species": {
                        "scientificNameWithoutAuthor": "Ocimum tenuiflorum",
                        "scientificNameAuthorship": "L.",
                        "commonNames": ["Holy basil", "Tulsi"]
                    },
                    "images": [{"url": "https://example.org/1.jpg", "organ": "leaf"}]
                }
            ],
            "remainingIdentificationRequests": 499
        }"#;

        let response: PlantNetResponse = serde_json::from_str(json).unwrap();
        let best = response.best_match().unwrap();
        assert_eq!(best.species.scientific_name_without_author, "Ocimum tenuiflorum");
        assert_eq!(best.species.common_names, vec!["Holy basil", "Tulsi"]);
        assert_eq!(best.images[0].url, "https://example.org/1.jpg");
        assert!((best.score - 0.87).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"results": [{"species": {"scientificNameWithoutAuthor": "Quercus robur"}}]}"#;
        let response: PlantNetResponse = serde_json::from_str(json).unwrap();
        let best = response.best_match().unwrap();
        assert!(best.species.common_names.is_empty());
        assert!(best.images.is_empty());
    }

    #[test]
    fn test_empty_results() {
        let response: PlantNetResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(response.best_match().is_none());
    }

    #[test]
    fn test_missing_species_is_malformed() {
        let json = r#"{"results": [{"score": 0.5}]}"#;
        assert!(serde_json::from_str::<PlantNetResponse>(json).is_err());
    }
}
