//! 薬用植物データベースモジュール
//!
//! `{ "plants": [ { name, scientificName, medicinalProperties } ] }` 形式の
//! JSONを起動時に一度だけ読み込み、以後は読み取り専用で共有する。

use crate::error::{Error, Result};
use crate::types::PlantRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

/// バイナリに埋め込まれた既定データベース
const EMBEDDED_PLANTS_JSON: &str = include_str!("../data/medicinal_plants.json");

#[derive(Deserialize)]
struct PlantDocument {
    plants: Vec<PlantRecord>,
}

/// 薬用植物データベース（不変）
///
/// 少なくとも1件のレコードを持つことを構築時に保証する。
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    plants: Vec<PlantRecord>,
}

impl KnowledgeBase {
    /// 埋め込みデータから読み込み
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_PLANTS_JSON)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let document: PlantDocument = serde_json::from_str(json)?;
        Self::from_records(document.plants)
    }

    /// レコード列から構築
    pub fn from_records(plants: Vec<PlantRecord>) -> Result<Self> {
        if plants.is_empty() {
            return Err(Error::DataLoad("knowledge base has no plants".into()));
        }
        if let Some(index) = plants.iter().position(|p| p.name.trim().is_empty()) {
            return Err(Error::DataLoad(format!("plant #{} has an empty name", index)));
        }

        tracing::debug!(count = plants.len(), "knowledge base loaded");
        Ok(Self { plants })
    }

    /// 全レコード（テーブル順）
    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// ランダムに1件選ぶ（フォールバック結果用）
    pub fn random_plant<R: Rng + ?Sized>(&self, rng: &mut R) -> &PlantRecord {
        // 空でないことは構築時に保証済み
        self.plants.choose(rng).unwrap_or(&self.plants[0])
    }

    /// 名前・学名の部分一致で絞り込み（大文字小文字を区別しない）
    pub fn filter(&self, text: &str) -> Vec<&PlantRecord> {
        let needle = text.to_lowercase();
        self.plants
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.scientific_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_embedded_loads() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert_eq!(kb.len(), 65);
        assert_eq!(kb.plants()[0].name, "Tulsi (Holy Basil)");
    }

    #[test]
    fn test_from_json_empty_plants_is_data_load_error() {
        let err = KnowledgeBase::from_json(r#"{"plants": []}"#).unwrap_err();
        assert!(matches!(err, Error::DataLoad(_)));
    }

    #[test]
    fn test_from_json_malformed_keeps_json_error() {
        let err = KnowledgeBase::from_json(r#"{"plants": "#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_json_missing_plants_key() {
        let err = KnowledgeBase::from_json(r#"{"herbs": []}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_file_missing_keeps_io_error() {
        let err = KnowledgeBase::from_file(Path::new("/nonexistent/plants.json")).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let json = r#"{"plants": [{"name": "  ", "scientificName": "X", "medicinalProperties": []}]}"#;
        assert!(KnowledgeBase::from_json(json).is_err());
    }

    #[test]
    fn test_duplicates_allowed_and_order_kept() {
        let json = r#"{"plants": [
            {"name": "Basil", "scientificName": "Ocimum basilicum", "medicinalProperties": ["A"]},
            {"name": "Basil", "scientificName": "Ocimum basilicum", "medicinalProperties": ["B"]}
        ]}"#;
        let kb = KnowledgeBase::from_json(json).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.plants()[0].medicinal_properties, vec!["A"]);
    }

    #[test]
    fn test_random_plant_is_from_table() {
        let kb = KnowledgeBase::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let plant = kb.random_plant(&mut rng);
            assert!(kb.plants().contains(plant));
        }
    }

    #[test]
    fn test_filter() {
        let kb = KnowledgeBase::embedded().unwrap();
        let hits = kb.filter("MENTHA");
        assert!(hits.iter().any(|p| p.name == "Mint"));
        assert!(hits.iter().any(|p| p.name == "Peppermint"));
        assert!(kb.filter("no such plant").is_empty());
    }
}
