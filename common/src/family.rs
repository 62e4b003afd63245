//! 科（family）ヒューリスティックモジュール
//!
//! データベースに無い植物について、学名に含まれる属名キーワードから
//! 科を推定し、その科に共通する一般的な薬効を返す。

/// 科ごとのキーワードと一般的な薬効
#[derive(Debug)]
pub struct FamilyHeuristic {
    pub family_label: &'static str,
    /// 小文字の部分一致キーワード
    pub keywords: &'static [&'static str],
    pub properties: &'static [&'static str],
}

/// 科ヒューリスティック表（先頭から順に評価）
pub static FAMILY_HEURISTICS: &[FamilyHeuristic] = &[
    FamilyHeuristic {
        family_label: "Lamiaceae (Mint family)",
        keywords: &["mentha", "lavandula", "salvia", "thymus", "rosmarinus", "ocimum", "origanum", "melissa"],
        properties: &[
            "Many plants in the mint family contain essential oils",
            "Often have aromatic properties",
            "Commonly used for digestive issues",
            "May have calming or soothing effects",
            "Often used in respiratory treatments",
        ],
    },
    FamilyHeuristic {
        family_label: "Asteraceae (Sunflower family)",
        keywords: &["helianthus", "echinacea", "calendula", "chamomilla", "artemisia", "taraxacum", "achillea"],
        properties: &[
            "Many have anti-inflammatory properties",
            "Often used to support immune function",
            "Some may have detoxifying effects",
            "Commonly used for skin conditions",
            "May help with digestive issues",
        ],
    },
    FamilyHeuristic {
        family_label: "Rosaceae (Rose family)",
        keywords: &["rosa", "rubus", "fragaria", "malus", "prunus", "crataegus"],
        properties: &[
            "Often rich in antioxidants",
            "Many have astringent properties",
            "Some support cardiovascular health",
            "May have anti-inflammatory effects",
            "Often used for digestive issues",
        ],
    },
    FamilyHeuristic {
        family_label: "Apiaceae (Carrot family)",
        keywords: &["daucus", "anethum", "coriandrum", "cuminum", "foeniculum", "apium"],
        properties: &[
            "Many support digestive function",
            "Often have carminative properties (reduce gas)",
            "Some have antispasmodic effects",
            "May support kidney and urinary tract health",
            "Often used for respiratory conditions",
        ],
    },
    FamilyHeuristic {
        family_label: "Fabaceae (Legume family)",
        keywords: &["glycyrrhiza", "astragalus", "trigonella", "cassia", "acacia", "trifolium"],
        properties: &[
            "Many have adaptogenic properties",
            "Often support immune function",
            "Some have anti-inflammatory effects",
            "May help balance hormones",
            "Often used for respiratory support",
        ],
    },
    FamilyHeuristic {
        family_label: "Zingiberaceae (Ginger family)",
        keywords: &["zingiber", "curcuma", "alpinia", "elettaria"],
        properties: &[
            "Many have anti-inflammatory properties",
            "Often support digestive health",
            "Some have warming effects",
            "May help with nausea and motion sickness",
            "Often used for joint health",
        ],
    },
];

impl FamilyHeuristic {
    pub fn properties_owned(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.to_string()).collect()
    }

    fn matches(&self, lower_name: &str) -> bool {
        self.keywords.iter().any(|k| lower_name.contains(k))
    }
}

/// 学名から科を推定（最初に一致した科を返す）
pub fn determine_family(scientific_name: &str) -> Option<&'static FamilyHeuristic> {
    let lower_name = scientific_name.to_lowercase();
    FAMILY_HEURISTICS.iter().find(|f| f.matches(&lower_name))
}
