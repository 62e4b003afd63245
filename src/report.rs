//! テキスト形式の出力

use plant_id_common::{IdentificationResult, MatchResult, PlantRecord};
use std::fmt::Write;

pub fn render_identification(label: &str, result: &IdentificationResult) -> String {
    let mut out = String::new();

    match result {
        IdentificationResult::Identified(plant) => {
            let _ = writeln!(out, "🌿 {} [{}]", plant.plant_name, label);
            if let Some(scientific) = &plant.scientific_name {
                let _ = writeln!(out, "  学名: {}", scientific);
            }
            let _ = writeln!(out, "  信頼度: {:.1}%", plant.confidence * 100.0);
            if !plant.common_names.is_empty() {
                let _ = writeln!(out, "  一般名: {}", plant.common_names.join(", "));
            }
            write_list(&mut out, "薬効", &plant.medicinal_properties);
            if let Some(note) = &plant.note {
                let _ = writeln!(out, "  注記: {}", note);
            }
            write_list(&mut out, "参考画像", &plant.images);
        }
        IdentificationResult::Unidentified(unidentified) => {
            let _ = writeln!(out, "✖ {} [{}]", unidentified.error, label);
            write_list(&mut out, "案内", &unidentified.medicinal_properties);
        }
    }

    out
}

pub fn render_match(name: &str, result: &MatchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔎 {}", name);
    if let Some(scientific) = &result.scientific_name {
        let _ = writeln!(out, "  学名: {}", scientific);
    }
    write_list(&mut out, "薬効", &result.medicinal_properties);
    if let Some(note) = &result.note {
        let _ = writeln!(out, "  注記: {}", note);
    }
    out
}

pub fn render_plant(plant: &PlantRecord) -> String {
    format!(
        "{} ({}): {}",
        plant.name,
        plant.scientific_name,
        plant.medicinal_properties.join(", ")
    )
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {}:", title);
    for item in items {
        let _ = writeln!(out, "    - {}", item);
    }
}
