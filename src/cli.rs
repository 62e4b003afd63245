use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-id")]
#[command(about = "植物写真を識別し、薬用情報を照合するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 薬用植物データベースJSON（省略時は組み込みデータ）
    #[arg(long, global = true)]
    pub knowledge_base: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真（またはフォルダ内の写真）を識別
    Identify {
        /// 画像ファイルまたはフォルダのパス
        #[arg(required_unless_present = "base64")]
        path: Option<PathBuf>,

        /// Base64（Data URL可）で書かれたテキストファイルから読み込む
        #[arg(long, conflicts_with = "path")]
        base64: Option<PathBuf>,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/text)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// 同時に識別する枚数（フォルダ指定時）
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// 名前の完全一致を部分一致より優先
        #[arg(long)]
        strict: bool,
    },

    /// 植物名をデータベースと照合（認識サービスを使わない）
    Lookup {
        /// 学名または一般名
        #[arg(required = true)]
        name: String,

        /// 別名（複数指定可）
        #[arg(short, long = "alt")]
        alternates: Vec<String>,

        /// 出力形式 (json/text)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// 名前の完全一致を部分一致より優先
        #[arg(long)]
        strict: bool,
    },

    /// データベースの植物一覧を表示
    Plants {
        /// 名前・学名で絞り込み
        #[arg(long)]
        filter: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown format: {}. Use json or text", s)),
        }
    }
}
