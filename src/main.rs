use clap::Parser;
use futures::FutureExt;
use indicatif::ProgressBar;
use plant_id_common::{MatchMode, PlantMatcher};
use plant_id_rust::{cli, config, error, identifier, knowledge, logging, normalizer, recognizer, report, scanner};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::{PlantIdError, Result};
use identifier::{IdentificationOutcome, Identifier};
use recognizer::PlantNetClient;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Identify { path, base64, output, format, concurrency, strict } => {
            let knowledge_base = load_knowledge_base(cli.knowledge_base.as_deref(), &config)?;

            let service = config
                .resolve_api_key()
                .map(|key| PlantNetClient::new(key, &config))
                .transpose()?;
            if service.is_none() {
                eprintln!("⚠ APIキーが未設定のため、参考用のサンプル結果を返します");
            }

            let identifier = Identifier::new(service, Arc::new(knowledge_base))
                .with_match_mode(match_mode(strict));

            // 1. 画像読み込み・正規化
            let (inputs, single) = match (path, base64) {
                (_, Some(base64_path)) => {
                    let text = read_file(&base64_path)?;
                    let bytes = normalizer::normalize_image(&normalizer::decode_base64_image(&text)?)?;
                    (vec![(base64_path.display().to_string(), bytes)], true)
                }
                (Some(path), None) if path.is_dir() => (load_folder(&path)?, false),
                (Some(path), None) => (vec![(path.display().to_string(), load_image(&path)?)], true),
                (None, None) => {
                    return Err(PlantIdError::InvalidInput("画像パスを指定してください".into()));
                }
            };

            // 2. 識別（Ctrl-Cでキャンセル → フォールバック）
            let cancel = identifier::cancel_on_signal(tokio::signal::ctrl_c())
                .boxed()
                .shared();

            let spinner = ProgressBar::new_spinner();
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner.set_message(format!("{}枚の写真を識別中...", inputs.len()));

            let results = identifier
                .identify_all(inputs, concurrency.unwrap_or(config.concurrency), cancel)
                .await;
            spinner.finish_and_clear();

            let mut outcomes: Vec<(String, IdentificationOutcome)> = Vec::new();
            for (label, outcome) in results {
                match outcome {
                    Ok(outcome) => outcomes.push((label, outcome)),
                    Err(e) if single => return Err(e),
                    Err(e) => eprintln!("✖ {}: {}", label, e),
                }
            }

            // 3. 出力
            let content = match format {
                OutputFormat::Json if single => match outcomes.first() {
                    Some((_, outcome)) => serde_json::to_string_pretty(&outcome.result)?,
                    None => String::new(),
                },
                OutputFormat::Json => {
                    let results: Vec<_> = outcomes.iter().map(|(_, o)| &o.result).collect();
                    serde_json::to_string_pretty(&results)?
                }
                OutputFormat::Text => outcomes
                    .iter()
                    .map(|(label, o)| report::render_identification(label, &o.result))
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            write_output(output.as_deref(), &content)?;

            let degraded = outcomes.iter().filter(|(_, o)| o.degraded).count();
            if degraded > 0 {
                eprintln!("⚠ {}件は認識サービスを利用できずサンプル結果です", degraded);
            }
        }

        Commands::Lookup { name, alternates, format, strict } => {
            let knowledge_base = load_knowledge_base(cli.knowledge_base.as_deref(), &config)?;
            let result = PlantMatcher::new(&knowledge_base)
                .with_mode(match_mode(strict))
                .find(&name, &alternates)?;

            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => report::render_match(&name, &result),
            };
            write_output(None, &content)?;
        }

        Commands::Plants { filter } => {
            let knowledge_base = load_knowledge_base(cli.knowledge_base.as_deref(), &config)?;
            let plants = match filter.as_deref() {
                Some(text) => knowledge_base.filter(text),
                None => knowledge_base.plants().iter().collect(),
            };

            for plant in &plants {
                println!("{}", report::render_plant(plant));
            }
            eprintln!("{}件", plants.len());
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.base_url);
                println!("  プロジェクト: {}", config.project);
                println!("  言語: {}", config.lang);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  同時実行数: {}", config.concurrency);
                println!(
                    "  データベース: {}",
                    config
                        .knowledge_base_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  APIキー: {}", if config.resolve_api_key().is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn match_mode(strict: bool) -> MatchMode {
    if strict { MatchMode::Strict } else { MatchMode::Loose }
}

fn load_knowledge_base(cli_path: Option<&Path>, config: &Config) -> Result<plant_id_common::KnowledgeBase> {
    let path = cli_path.or(config.knowledge_base_path.as_deref());
    knowledge::load_knowledge_base(path)
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(PlantIdError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn load_image(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(PlantIdError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    normalizer::normalize_image(&bytes)
}

fn load_folder(folder: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let images = scanner::scan_folder(folder)?;
    if images.is_empty() {
        return Err(PlantIdError::NoImagesFound(folder.display().to_string()));
    }

    let mut inputs = Vec::with_capacity(images.len());
    for image in images {
        match load_image(&image.path) {
            Ok(bytes) => inputs.push((image.file_name, bytes)),
            Err(e) => eprintln!("✖ {}: {}", image.file_name, e),
        }
    }
    Ok(inputs)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            eprintln!("✔ 結果を保存: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
