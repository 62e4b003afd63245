//! データベース読み込みと照合のテスト

use plant_id_common::{find_medicinal_properties, MatchTier};
use plant_id_rust::knowledge::load_knowledge_base;
use tempfile::tempdir;

const CUSTOM_PLANTS: &str = r#"{
  "plants": [
    { "name": "Tulsi (Holy Basil)", "scientificName": "Ocimum sanctum", "medicinalProperties": ["Antibacterial", "Stress reduction"] },
    { "name": "Holy Basil", "scientificName": "Ocimum tenuiflorum", "medicinalProperties": ["Second entry"] }
  ]
}"#;

/// 組み込みデータベース
#[test]
fn test_embedded_knowledge_base() {
    let kb = load_knowledge_base(None).expect("組み込みデータの読み込み失敗");
    assert!(!kb.is_empty());

    let result = find_medicinal_properties(&kb, "Ocimum sanctum", &["Tulsi".to_string()]).unwrap();
    assert_eq!(result.tier, MatchTier::KnowledgeBase);
    assert_eq!(result.scientific_name.as_deref(), Some("Ocimum sanctum"));
}

/// ファイルから読み込んだデータベースで照合
#[test]
fn test_custom_knowledge_base_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("plants.json");
    std::fs::write(&path, CUSTOM_PLANTS).unwrap();

    let kb = load_knowledge_base(Some(&path)).expect("読み込み失敗");
    assert_eq!(kb.len(), 2);

    // "Holy Basil" は両方のレコードに部分一致するが、先頭が優先
    let result = find_medicinal_properties(&kb, "Holy Basil", &[]).unwrap();
    assert_eq!(result.medicinal_properties, vec!["Antibacterial", "Stress reduction"]);
}

/// 全レコードが自身の名前・学名で引ける
#[test]
fn test_every_embedded_record_is_reachable() {
    let kb = load_knowledge_base(None).unwrap();

    for plant in kb.plants() {
        let by_name = find_medicinal_properties(&kb, &plant.name, &[]).unwrap();
        assert_eq!(by_name.tier, MatchTier::KnowledgeBase, "{}", plant.name);
        assert!(by_name.scientific_name.is_some());

        let by_scientific = find_medicinal_properties(&kb, &plant.scientific_name, &[]).unwrap();
        assert_eq!(by_scientific.tier, MatchTier::KnowledgeBase, "{}", plant.scientific_name);
    }
}

/// どれにも一致しない名前
#[test]
fn test_unknown_plant_is_generic() {
    let kb = load_knowledge_base(None).unwrap();
    let result = find_medicinal_properties(&kb, "Quercus robur", &["English oak".to_string()]).unwrap();
    assert_eq!(result.tier, MatchTier::Generic);
    assert_eq!(result.scientific_name, None);
    assert_eq!(result.medicinal_properties.len(), 1);
}
