use crate::error::{PlantIdError, Result};
use plant_id_common::KnowledgeBase;
use std::path::Path;
use tracing::info;

/// 起動時にデータベースを読み込む（失敗時は識別を一切行わない）
pub fn load_knowledge_base(path: Option<&Path>) -> Result<KnowledgeBase> {
    let knowledge_base = match path {
        Some(path) => {
            if !path.exists() {
                return Err(PlantIdError::FileNotFound(path.display().to_string()));
            }
            KnowledgeBase::from_file(path)
        }
        None => KnowledgeBase::embedded(),
    }
    .map_err(|e| PlantIdError::DataLoad(e.to_string()))?;

    info!(
        plants = knowledge_base.len(),
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".into()),
        "knowledge base ready"
    );
    Ok(knowledge_base)
}
