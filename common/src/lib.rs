//! Plant ID Common Library
//!
//! 薬用植物データベース・科ヒューリスティック・植物照合の共通ロジック。
//! I/Oを持たず、CLIから共有される。

pub mod types;
pub mod error;
pub mod family;
pub mod knowledge_base;
pub mod matcher;

pub use types::{IdentificationResult, IdentifiedPlant, MatchResult, MatchTier, PlantRecord, Unidentified};
pub use error::{Error, Result};
pub use family::{determine_family, FamilyHeuristic, FAMILY_HEURISTICS};
pub use knowledge_base::KnowledgeBase;
pub use matcher::{find_medicinal_properties, MatchMode, PlantMatcher};
