use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("エンコーディング宣言がありません: {0}")]
    MissingCoding(String),

    #[error("未対応のエンコーディング: {0}")]
    UnsupportedEncoding(String),

    #[error("デコードエラー: {0}")]
    Decode(String),

    #[error("パートナーエリア表が不正: {0}")]
    InvalidTable(String),

    #[error("整形済みでない行: {0:?}")]
    UntrimmedLine(String),

    #[error("パートナーエリア {0} が二重に照合されました")]
    DoubleClaim(u32),
}

pub type Result<T> = std::result::Result<T, ListingError>;
