//! 植物照合モジュール
//!
//! 認識サービスが返した学名・一般名を薬用植物データベースと照合する。
//! 3段階で評価し、最初に当たった段階の結果を返す:
//! 1. データベースのレコードと双方向の部分一致
//! 2. 学名の属名キーワードから科を推定
//! 3. 汎用の「未登録」結果

use crate::error::{Error, Result};
use crate::family::determine_family;
use crate::knowledge_base::KnowledgeBase;
use crate::types::{MatchResult, MatchTier, PlantRecord};
use tracing::{debug, info};

pub const FAMILY_NOTE: &str =
    "Based on plant family characteristics. Consult with a specialist for specific medicinal uses.";

pub const GENERIC_PROPERTY: &str = "This plant is not in our medicinal database. Many plants have potential medicinal properties that are yet to be fully documented. Please consult with a herbalist or botanical expert for more information.";

pub const GENERIC_NOTE: &str = "This plant was not found in our medicinal database. Always consult with experts before using any plant for medicinal purposes.";

/// 照合モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// 双方向の部分一致のみ
    #[default]
    Loose,
    /// 正規化した名前の完全一致を先に試し、無ければ部分一致
    Strict,
}

/// 照合対象の名前（小文字化済み）
struct Query {
    name: String,
    alternates: Vec<String>,
}

impl Query {
    fn new(candidate_name: &str, alternate_names: &[String]) -> Self {
        Self {
            name: normalize(candidate_name),
            alternates: alternate_names
                .iter()
                .map(|n| normalize(n))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// どちらかが他方を含むか（空文字列は一致扱いしない）
fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// 薬用植物照合器
pub struct PlantMatcher<'a> {
    knowledge_base: &'a KnowledgeBase,
    mode: MatchMode,
}

impl<'a> PlantMatcher<'a> {
    pub fn new(knowledge_base: &'a KnowledgeBase) -> Self {
        Self {
            knowledge_base,
            mode: MatchMode::Loose,
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// 候補名（と別名）から薬効情報を引く
    pub fn find(&self, candidate_name: &str, alternate_names: &[String]) -> Result<MatchResult> {
        if candidate_name.trim().is_empty() {
            return Err(Error::InvalidArgument("candidate name is empty".into()));
        }

        let query = Query::new(candidate_name, alternate_names);
        debug!(candidate = candidate_name, alternates = ?alternate_names, mode = ?self.mode, "matching plant");

        let record = match self.mode {
            MatchMode::Strict => self.find_exact(&query).or_else(|| self.find_loose(&query)),
            MatchMode::Loose => self.find_loose(&query),
        };

        if let Some(plant) = record {
            info!(candidate = candidate_name, plant = %plant.name, "matched knowledge base record");
            return Ok(MatchResult {
                medicinal_properties: plant.medicinal_properties.clone(),
                scientific_name: Some(plant.scientific_name.clone()).filter(|s| !s.is_empty()),
                note: None,
                tier: MatchTier::KnowledgeBase,
            });
        }

        if let Some(family) = determine_family(candidate_name) {
            info!(candidate = candidate_name, family = family.family_label, "matched plant family");
            return Ok(MatchResult {
                medicinal_properties: family.properties_owned(),
                scientific_name: None,
                note: Some(FAMILY_NOTE.to_string()),
                tier: MatchTier::Family(family.family_label),
            });
        }

        info!(candidate = candidate_name, "no knowledge base or family match");
        Ok(MatchResult {
            medicinal_properties: vec![GENERIC_PROPERTY.to_string()],
            scientific_name: None,
            note: Some(GENERIC_NOTE.to_string()),
            tier: MatchTier::Generic,
        })
    }

    /// 段階1: 双方向の部分一致（テーブル順で最初のレコード）
    fn find_loose(&self, query: &Query) -> Option<&'a PlantRecord> {
        self.knowledge_base.plants().iter().find(|p| {
            let name = p.name.to_lowercase();
            let scientific = p.scientific_name.to_lowercase();

            let scientific_match = overlaps(&scientific, &query.name);
            let name_match = overlaps(&name, &query.name);
            let alternate_match = query.alternates.iter().any(|alt| overlaps(&name, alt));

            if scientific_match || name_match || alternate_match {
                debug!(
                    plant = %p.name,
                    scientific_match,
                    name_match,
                    alternate_match,
                    "knowledge base candidate"
                );
                true
            } else {
                false
            }
        })
    }

    /// 正規化した名前の完全一致
    fn find_exact(&self, query: &Query) -> Option<&'a PlantRecord> {
        self.knowledge_base.plants().iter().find(|p| {
            let name = normalize(&p.name);
            let scientific = normalize(&p.scientific_name);
            let names = std::iter::once(&query.name).chain(query.alternates.iter());
            names
                .into_iter()
                .any(|n| *n == name || (!scientific.is_empty() && *n == scientific))
        })
    }
}

/// データベースと照合（既定の部分一致モード）
pub fn find_medicinal_properties(
    knowledge_base: &KnowledgeBase,
    candidate_name: &str,
    alternate_names: &[String],
) -> Result<MatchResult> {
    PlantMatcher::new(knowledge_base).find(candidate_name, alternate_names)
}
