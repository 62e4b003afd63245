//! 照合・識別結果の型定義
//!
//! CLIとライブラリで共有される型:
//! - PlantRecord: 薬用植物データベースの1レコード
//! - MatchResult: 植物照合（Matcher）の出力
//! - IdentificationResult: 最終出力（認識サービス + 照合結果）

use serde::{Deserialize, Serialize};

/// 薬用植物データベースの1レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub name: String,

    #[serde(default)]
    pub scientific_name: String,

    #[serde(default)]
    pub medicinal_properties: Vec<String>,
}

/// 照合がどの段階で決まったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// データベースのレコードに一致
    KnowledgeBase,
    /// 科（family）のキーワードに一致
    Family(&'static str),
    /// どれにも一致しない
    Generic,
}

/// 植物照合結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub medicinal_properties: Vec<String>,
    pub scientific_name: Option<String>,
    pub note: Option<String>,

    #[serde(skip)]
    pub tier: MatchTier,
}

/// 識別結果（呼び出し元へ返すJSON）
///
/// 候補なしの場合は `error` と `medicinalProperties` のみ、
/// それ以外は全フィールドを出力する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentificationResult {
    Identified(IdentifiedPlant),
    Unidentified(Unidentified),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedPlant {
    pub plant_name: String,
    pub common_names: Vec<String>,
    pub confidence: f64,
    pub scientific_name: Option<String>,
    pub medicinal_properties: Vec<String>,
    pub images: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unidentified {
    pub error: String,
    pub medicinal_properties: Vec<String>,
}

impl IdentificationResult {
    pub fn medicinal_properties(&self) -> &[String] {
        match self {
            Self::Identified(p) => &p.medicinal_properties,
            Self::Unidentified(u) => &u.medicinal_properties,
        }
    }

    pub fn images(&self) -> &[String] {
        match self {
            Self::Identified(p) => &p.images,
            Self::Unidentified(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Identified(_) => None,
            Self::Unidentified(u) => Some(&u.error),
        }
    }

    pub fn identified(&self) -> Option<&IdentifiedPlant> {
        match self {
            Self::Identified(p) => Some(p),
            Self::Unidentified(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_record_camel_case() {
        let json = r#"{"name": "Neem", "scientificName": "Azadirachta indica", "medicinalProperties": ["Antifungal"]}"#;
        let record: PlantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Neem");
        assert_eq!(record.scientific_name, "Azadirachta indica");
        assert_eq!(record.medicinal_properties, vec!["Antifungal"]);
    }

    #[test]
    fn test_plant_record_missing_fields_default() {
        let record: PlantRecord = serde_json::from_str(r#"{"name": "Mystery"}"#).unwrap();
        assert!(record.scientific_name.is_empty());
        assert!(record.medicinal_properties.is_empty());
    }

    #[test]
    fn test_identified_serializes_full_shape() {
        let result = IdentificationResult::Identified(IdentifiedPlant {
            plant_name: "Peppermint".into(),
            common_names: vec!["Peppermint".into()],
            confidence: 0.81,
            scientific_name: Some("Mentha piperita".into()),
            medicinal_properties: vec!["Digestive aid".into()],
            images: vec![],
            note: None,
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["plantName"], "Peppermint");
        assert_eq!(value["confidence"], 0.81);
        assert!(value["note"].is_null());
        assert!(value.as_object().unwrap().contains_key("note"));
        assert!(!value.as_object().unwrap().contains_key("error"));
    }

    #[test]
    fn test_unidentified_serializes_error_only_shape() {
        let result = IdentificationResult::Unidentified(Unidentified {
            error: "no match".into(),
            medicinal_properties: vec!["try again".into()],
        });

        let value = serde_json::to_value(&result).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(value["error"], "no match");
        assert!(!obj.contains_key("plantName"));
        assert!(!obj.contains_key("confidence"));
    }

    #[test]
    fn test_identification_result_roundtrip_picks_variant() {
        let json = r#"{"error": "nothing", "medicinalProperties": []}"#;
        let result: IdentificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.error(), Some("nothing"));
        assert!(result.identified().is_none());
    }

    #[test]
    fn test_match_result_hides_tier() {
        let result = MatchResult {
            medicinal_properties: vec!["Calming".into()],
            scientific_name: None,
            note: Some("note".into()),
            tier: MatchTier::Family("Lamiaceae (Mint family)"),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("tier").is_none());
        assert!(value["scientificName"].is_null());
    }
}
