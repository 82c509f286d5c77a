//! エンコーディング判定とデコード
//!
//! 入力ファイル先頭のコメント `# -*- coding: <name> -*-` を読んで
//! 全体のデコード方式を決める。

use crate::error::{ListingError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

/// ヘッダ走査に使う先頭バイト数
pub const PROBE_LEN: usize = 40;

/// 対応エンコーディング
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Ascii,
    Utf8,
    Latin1,
}

impl FromStr for Encoding {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(ListingError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl Encoding {
    /// バイト列を宣言どおりにデコードする
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Ascii => {
                if !bytes.is_ascii() {
                    return Err(ListingError::Decode(
                        "ASCII範囲外のバイトが含まれています".into(),
                    ));
                }
                // ASCII確認済みなのでUTF-8としても有効
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| ListingError::Decode(e.to_string())),
            // Latin-1はU+0000..U+00FFへ1:1対応
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

/// 先頭行からエンコーディング宣言を取り出す
///
/// `coding:` の直後にトークンがなければ既定のASCIIとする。
/// 宣言自体が見つからない行は不正として扱う。
pub fn probe_coding(first_line: &str, name: &str) -> Result<Encoding> {
    lazy_static! {
        static ref CODING_RE: Regex = Regex::new(r"coding:\s*(\S*)").unwrap();
    }

    let caps = CODING_RE
        .captures(first_line)
        .ok_or_else(|| ListingError::MissingCoding(name.to_string()))?;

    let token = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    if token.is_empty() {
        return Ok(Encoding::Ascii);
    }
    token.parse()
}
