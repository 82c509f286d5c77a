//! ISO-3361一覧の整形パス
//!
//! 入力ファイルを宣言エンコーディングでデコードし、1行ずつ
//! 転写・列並べ替え・パートナーエリア照合を行って出力する。
//!
//! ## 処理フロー
//! 1. 先頭40バイトのヘッダ走査でエンコーディングを決定
//! 2. パートナーエリア表の読み込み（無ければ照合なしで続行）
//! 3. 行整形と照合、最後に未照合エントリの報告

use crate::encoding::{probe_coding, PROBE_LEN};
use crate::error::{ListingError, Result};
use crate::partner_areas::{self, PartnerAreaTable, PARTNER_AREAS_JSON};
use crate::report::report_unmatched;
use crate::translit::simple_ascii;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 既定の入力ファイル名（実行ファイルの隣を探す）
pub const ISO_3361_LIST_FILE: &str = "ISO_3361_list.txt";

/// 実行ファイルのあるディレクトリ
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// 一覧整形の本体
///
/// 戻り値はプロセスの終了コード。ヘッダ走査に失敗した場合のみ 1、
/// 正常完了（診断出力の有無は問わない）は 0。
pub fn run_list<O: Write, E: Write>(
    out: &mut O,
    err: &mut E,
    name: &Path,
    pa_path: Option<&Path>,
    verbose: bool,
) -> Result<i32> {
    let bytes = match fs::read(name) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ListingError::FileNotFound(name.display().to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    // ヘッダ走査: 先頭40バイトだけを見て2行以上あることを確認する。
    // 40バイト目が後続行のマルチバイト文字を割ることがあるので、
    // ここは損失ありのデコードでよい（1行目はASCIIコメントの想定）
    let probe = &bytes[..bytes.len().min(PROBE_LEN)];
    let header = String::from_utf8_lossy(probe);
    let header_lines: Vec<&str> = header.split('\n').collect();
    if header_lines.len() < 2 {
        writeln!(err, "Invalid file: {}", name.display())?;
        return Ok(1);
    }

    let kind = probe_coding(header_lines[0], &name.display().to_string())?;
    if verbose {
        writeln!(err, "Reading '{}', of kind '{:?}'", name.display(), kind)?;
    }

    let mut table = partner_areas::load(pa_path, err)?;
    if table.is_none() {
        writeln!(err, "No partner areas found: {}", PARTNER_AREAS_JSON)?;
    }

    let text = kind.decode(&bytes)?;
    for line in text.split('\n') {
        // 入力は整形済み（前後空白なし）が前提。崩れていたら続行しない
        if line != line.trim() {
            return Err(ListingError::UntrimmedLine(line.to_string()));
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        format_line(out, err, line, table.as_mut(), verbose)?;
    }

    if let Some(table) = &table {
        report_unmatched(table, err)?;
    }

    Ok(0)
}

/// 1レコードを整形して書き出す
///
/// タブ区切りの複数列なら、転写後の行を下敷きに
/// 空白→アンダースコア化・タブ分割・最終列（国名）の先頭への
/// 回転・空白結合を行う。単一フィールドは転写のみ。
/// 仕上げにアンダースコアを空白へ戻す。
fn format_line<O: Write, E: Write>(
    out: &mut O,
    err: &mut E,
    line: &str,
    table: Option<&mut PartnerAreaTable>,
    verbose: bool,
) -> Result<()> {
    let plain = simple_ascii(line);
    if verbose {
        writeln!(
            err,
            "Debug: '{}' {} '{}'",
            plain,
            if plain == line { "=" } else { "!=" },
            line
        )?;
    }

    let joined = if line.contains('\t') {
        let underscored = plain.replace(' ', "_");
        let mut columns: Vec<&str> = underscored.split('\t').collect();
        // 国名は最終列にあるので先頭へ回す
        if let Some(name_column) = columns.pop() {
            columns.insert(0, name_column);
        }
        columns.join(" ")
    } else {
        plain
    };

    let lean = joined.replace('_', " ");
    writeln!(out, "{}", lean)?;

    if let Some(table) = table {
        // 回転後は国名の直後（元の先頭列）が数値の国コード
        if let Some(token) = joined.split(' ').nth(1) {
            if let Ok(code) = token.parse::<u32>() {
                if let Some(text) = table.claim(code, line)? {
                    writeln!(out, "#\t{} = {}", code, text)?;
                    writeln!(out)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_only(line: &str) -> String {
        let mut out = Vec::new();
        let mut err = Vec::new();
        format_line(&mut out, &mut err, line, None, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_field_passthrough() {
        assert_eq!(format_only("Some free text"), "Some free text\n");
    }

    #[test]
    fn test_single_field_transliterated() {
        assert_eq!(format_only("Åland Islands"), "Aland Islands\n");
    }

    #[test]
    fn test_column_rotation() {
        // 最終列（国名）が先頭へ、残りの列順は保たれる
        assert_eq!(format_only("001\tFoo Å\tSomeland"), "Someland 001 Foo A\n");
        assert_eq!(format_only("004\tAF\tAFG\tAfghanistan"), "Afghanistan 004 AF AFG\n");
    }

    #[test]
    fn test_underscores_restored_in_multiword_name() {
        assert_eq!(
            format_only("258\tPF\tFrench Polynesia"),
            "French Polynesia 258 PF\n"
        );
    }

    #[test]
    fn test_crossref_hit_writes_annotation() {
        let mut err = Vec::new();
        let mut table = {
            use std::io::Write as _;
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(br#"{"results": [{"id": "1", "text": "Someland"}]}"#)
                .unwrap();
            partner_areas::load(Some(file.path()), &mut err)
                .unwrap()
                .unwrap()
        };

        let mut out = Vec::new();
        format_line(&mut out, &mut err, "001\tFoo Å\tSomeland", Some(&mut table), false).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output, "Someland 001 Foo A\n#\t1 = Someland\n\n");
        assert_eq!(table.get(1).unwrap().claimed_by(), Some("001\tFoo Å\tSomeland"));
    }

    #[test]
    fn test_crossref_double_claim_is_fatal() {
        let mut err = Vec::new();
        let mut table = {
            use std::io::Write as _;
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(br#"{"results": [{"id": "1", "text": "Someland"}]}"#)
                .unwrap();
            partner_areas::load(Some(file.path()), &mut err)
                .unwrap()
                .unwrap()
        };

        let mut out = Vec::new();
        format_line(&mut out, &mut err, "001\tAA\tSomeland", Some(&mut table), false).unwrap();
        let result = format_line(&mut out, &mut err, "001\tBB\tSameland", Some(&mut table), false);
        assert!(matches!(result, Err(ListingError::DoubleClaim(1))));
    }

    #[test]
    fn test_crossref_miss_is_silent() {
        let mut err = Vec::new();
        let mut table = {
            use std::io::Write as _;
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(br#"{"results": [{"id": "2", "text": "Otherland"}]}"#)
                .unwrap();
            partner_areas::load(Some(file.path()), &mut err)
                .unwrap()
                .unwrap()
        };

        let mut out = Vec::new();
        format_line(&mut out, &mut err, "001\tFoo\tSomeland", Some(&mut table), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Someland 001 Foo\n");
        assert!(!table.get(2).unwrap().is_claimed());
    }
}
