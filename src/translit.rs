//! ASCII転写モジュール
//!
//! 国名に含まれるアクセント付き文字を近いASCII表現へ落とす。
//! 汎用表（Latin-1 Supplement / Latin Extended-A）に、リング付きA用の
//! 上書き表を重ねた二段構成。

/// 文字列全体を転写する
///
/// 上書き表 → 汎用表の順で1文字ずつ解決し、結果を連結する。
/// どちらの表にもない文字はそのまま残る。
pub fn simple_ascii(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            // 上書き表: リング付きは "Aa"/"aa" ではなく1文字へ
            'Å' => plain.push('A'),
            'å' => plain.push('a'),
            _ => match simpler_ascii(c) {
                Some(to) => plain.push_str(to),
                None => plain.push(c),
            },
        }
    }
    plain
}

/// 汎用の1文字転写表
///
/// 対応しない文字には `None` を返す（呼び出し側がそのまま通す）。
pub fn simpler_ascii(c: char) -> Option<&'static str> {
    let to = match c {
        '\u{00A0}' => " ",
        'µ' => "u",
        'À' | 'Á' | 'Â' | 'Ã' => "A",
        'Ä' => "Ae",
        'Å' => "Aa",
        'Æ' => "AE",
        'Ç' => "C",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ð' => "D",
        'Ñ' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ø' => "O",
        'Ö' => "Oe",
        '×' => "x",
        'Ù' | 'Ú' | 'Û' => "U",
        'Ü' => "Ue",
        'Ý' => "Y",
        'Þ' => "Th",
        'ß' => "ss",
        'à' | 'á' | 'â' | 'ã' => "a",
        'ä' => "ae",
        'å' => "aa",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' => "o",
        'ö' => "oe",
        '÷' => ":",
        'ù' | 'ú' | 'û' => "u",
        'ü' => "ue",
        'ý' | 'ÿ' => "y",
        'þ' => "th",
        // Latin Extended-A
        'Ā' | 'Ă' | 'Ą' => "A",
        'ā' | 'ă' | 'ą' => "a",
        'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ď' | 'Đ' => "D",
        'ď' | 'đ' => "d",
        'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' | 'ĸ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ń' | 'Ņ' | 'Ň' => "N",
        'ń' | 'ņ' | 'ň' | 'ŉ' => "n",
        'Ŋ' => "NG",
        'ŋ' => "ng",
        'Ō' | 'Ŏ' | 'Ő' => "O",
        'ō' | 'ŏ' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ŷ' | 'Ÿ' => "Y",
        'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        'ſ' => "s",
        _ => return None,
    };
    Some(to)
}
