//! パートナーエリア表モジュール
//!
//! 外部JSON（partnerAreas.json）を数値ID→表示名のマップへ読み込み、
//! 照合時の利用マーカーと、ID別の注記（_comment / _status）を管理する。

use crate::error::{ListingError, Result};
use crate::listing::exe_dir;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const PARTNER_AREAS_JSON: &str = "partnerAreas.json";

/// JSONの生エントリ
///
/// 必須は id / text のみ。それ以外の未知フィールドは flatten で受けて
/// 警告対象にする（読み込み自体は続行）。
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    text: String,
    #[serde(rename = "_comment")]
    comment: Option<String>,
    #[serde(rename = "_status")]
    status: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    results: Vec<RawEntry>,
}

/// パートナーエリア1件
#[derive(Debug)]
pub struct PartnerArea {
    pub text: String,
    claimed_by: Option<String>,
}

impl PartnerArea {
    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }

    pub fn claimed_by(&self) -> Option<&str> {
        self.claimed_by.as_deref()
    }
}

/// 数値ID→エントリの表。注記は別テーブルで持つ。
#[derive(Debug, Default)]
pub struct PartnerAreaTable {
    entries: BTreeMap<u32, PartnerArea>,
    comments: BTreeMap<u32, String>,
}

impl PartnerAreaTable {
    pub fn get(&self, id: u32) -> Option<&PartnerArea> {
        self.entries.get(&id)
    }

    pub fn comment(&self, id: u32) -> Option<&str> {
        self.comments.get(&id).map(|s| s.as_str())
    }

    /// 昇順IDで走査する
    pub fn iter(&self) -> impl Iterator<Item = (u32, &PartnerArea)> {
        self.entries.iter().map(|(&id, e)| (id, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 利用マーカーを立てる
    ///
    /// 戻り値は照合に使う表示名。IDが表に無ければ `Ok(None)`。
    /// 既にマーカーが立っているIDへの再照合は致命的エラー。
    pub fn claim(&mut self, id: u32, line: &str) -> Result<Option<&str>> {
        match self.entries.get_mut(&id) {
            None => Ok(None),
            Some(entry) => {
                if entry.claimed_by.is_some() {
                    return Err(ListingError::DoubleClaim(id));
                }
                entry.claimed_by = Some(line.to_string());
                Ok(Some(entry.text.as_str()))
            }
        }
    }
}

/// パートナーエリア表を読み込む
///
/// パス解決は二段構え: 明示パスが無ければカレントの
/// partnerAreas.json、それも無ければ実行ファイルの隣を再試行する。
/// 既定パスがどこにも無い場合は `Ok(None)`（照合なしで続行）。
pub fn load<W: Write>(path: Option<&Path>, err: &mut W) -> Result<Option<PartnerAreaTable>> {
    let bytes = match read_table_bytes(path)? {
        Some(bytes) => bytes,
        None => return Ok(None),
    };

    let raw: RawTable = serde_json::from_slice(&bytes)?;
    let mut table = PartnerAreaTable::default();

    for entry in raw.results {
        if !entry.extra.is_empty() {
            let keys: Vec<&str> = entry.extra.keys().map(|k| k.as_str()).collect();
            writeln!(
                err,
                "Unexpected fields for id={}: {}",
                entry.id,
                keys.join(", ")
            )?;
        }

        if entry.id == "all" {
            // 全地域を指す番兵値。実在のエリアではないので落とす
            continue;
        }

        let id: i64 = entry.id.parse().map_err(|_| {
            ListingError::InvalidTable(format!("数値でないid: {:?}", entry.id))
        })?;
        if id < 0 {
            return Err(ListingError::InvalidTable(format!("負のid: {}", id)));
        }
        let id = id as u32;

        // _statusが_commentより優先（両方ある場合は上書きする方針）
        let annotation = match (entry.status, entry.comment) {
            (Some(status), _) => Some(format!("STATUS: {}", status)),
            (None, comment) => comment,
        };
        if let Some(annotation) = annotation {
            table.comments.insert(id, annotation);
        }

        table.entries.insert(
            id,
            PartnerArea {
                text: entry.text,
                claimed_by: None,
            },
        );
    }

    Ok(Some(table))
}

fn read_table_bytes(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    match path {
        Some(path) => match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ListingError::FileNotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        },
        None => match fs::read(PARTNER_AREAS_JSON) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let retry = exe_dir().join(PARTNER_AREAS_JSON);
                match fs::read(&retry) {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        },
    }
}
