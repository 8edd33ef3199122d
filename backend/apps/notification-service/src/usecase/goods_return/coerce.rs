//! # 入力値の型変換
//!
//! 型付けされていない JSON の値を整数・文字列に寄せる規則をまとめる。
//! 呼び出し元は数値を文字列で送ることがあるため、厳密な型検査は行わない。
//!
//! | 入力 | 整数 | 文字列 |
//! |------|------|--------|
//! | 欠落 / `null` | `0` | `""` |
//! | 数値 | 小数は切り捨て | 数値表記 |
//! | 文字列 | 先頭の数値部分（なければ `0`） | そのまま |
//! | `true` / `false` | `1` / `0` | `"1"` / `""` |
//! | 配列・オブジェクト | `0` | `""` |

use serde_json::Value;

/// 整数に変換する
pub fn int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or_default(),
        Some(Value::String(s)) => leading_number(s),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// 文字列に変換する
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}

/// キーが存在すれば整数に変換する（欠落は `None`）
pub fn optional_int(object: Option<&Value>, key: &str) -> Option<i64> {
    object
        .and_then(Value::as_object)
        .and_then(|map| map.get(key))
        .map(|value| int(Some(value)))
}

fn truncate(value: f64) -> i64 {
    // `as` は範囲外で飽和し、NaN は 0 になる
    value.trunc() as i64
}

/// 先頭の空白を除き、符号・数字・小数部からなる接頭辞を読む
fn leading_number(s: &str) -> i64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        return s[..frac_end].parse::<f64>().map(truncate).unwrap_or_default();
    }

    s[..end]
        .parse::<i64>()
        .unwrap_or_else(|_| if s.starts_with('-') { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(42), 42)]
    #[case(json!(-3), -3)]
    #[case(json!(7.9), 7)]
    #[case(json!("15"), 15)]
    #[case(json!("  15abc"), 15)]
    #[case(json!("12.7"), 12)]
    #[case(json!("-4"), -4)]
    #[case(json!("abc"), 0)]
    #[case(json!(""), 0)]
    #[case(json!(true), 1)]
    #[case(json!(false), 0)]
    #[case(json!(null), 0)]
    #[case(json!([1, 2]), 0)]
    #[case(json!({"id": 1}), 0)]
    fn intの変換規則(#[case] input: Value, #[case] expected: i64) {
        assert_eq!(int(Some(&input)), expected);
    }

    #[test]
    fn intは欠落を0にする() {
        assert_eq!(int(None), 0);
    }

    #[test]
    fn intは桁あふれで飽和する() {
        assert_eq!(int(Some(&json!("99999999999999999999"))), i64::MAX);
    }

    #[rstest]
    #[case(json!("C-10"), "C-10")]
    #[case(json!(10), "10")]
    #[case(json!(true), "1")]
    #[case(json!(false), "")]
    #[case(json!(null), "")]
    #[case(json!(["x"]), "")]
    fn textの変換規則(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(text(Some(&input)), expected);
    }

    #[test]
    fn optional_intはキーの有無を区別する() {
        let differences = json!({"from": "3", "to": null});

        assert_eq!(optional_int(Some(&differences), "from"), Some(3));
        assert_eq!(optional_int(Some(&differences), "to"), Some(0));
        assert_eq!(optional_int(Some(&json!({})), "from"), None);
        assert_eq!(optional_int(None, "from"), None);
        assert_eq!(optional_int(Some(&json!("oops")), "from"), None);
    }
}
