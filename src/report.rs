//! 未照合パートナーエリアの報告
//!
//! 整形パスの最後に呼ばれ、どの入力行にも照合されなかった
//! 正のIDを昇順でエラーストリームへ列挙する。

use crate::error::Result;
use crate::partner_areas::PartnerAreaTable;
use crate::translit::simple_ascii;
use std::io::Write;

/// 未照合エントリを書き出す
///
/// 注記（_comment / _status 由来）があれば ` ; # ...` を後置する。
/// 診断のみで、出力があっても失敗扱いにはしない。
pub fn report_unmatched<E: Write>(table: &PartnerAreaTable, err: &mut E) -> Result<()> {
    for (id, entry) in table.iter() {
        if id == 0 || entry.is_claimed() {
            continue;
        }
        let suffix = match table.comment(id) {
            Some(annotation) => format!(" ; # {}", annotation),
            None => String::new(),
        };
        writeln!(err, "No hit for pa[{}] = {}{}", id, simple_ascii(&entry.text), suffix)?;
    }
    Ok(())
}
