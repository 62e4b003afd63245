use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantIdError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("データ読み込みエラー: {0}")]
    DataLoad(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] plant_id_common::Error),
}

pub type Result<T> = std::result::Result<T, PlantIdError>;
