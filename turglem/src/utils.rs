//! ユーティリティ関数
//!
//! 辞書ソースのCSV行の解析と、フィールド値の変換を提供します。

use csv_core::ReadFieldResult;

use crate::errors::{Result, TurglemError};

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
///
/// # 例
///
/// ```
/// # use turglem::utils::parse_csv_row;
/// let fields = parse_csv_row("книга,0,0").unwrap();
/// assert_eq!(fields, vec!["книга", "0", "0"]);
///
/// let fields_with_quote = parse_csv_row("0,1,,и,1,\",2,7,\"").unwrap();
/// assert_eq!(fields_with_quote, vec!["0", "1", "", "и", "1", ",2,7,"]);
/// ```
///
/// # エラー
///
/// フィールドがUTF-8として不正な場合にエラーを返します。
pub fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut features = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::End => true,
            // The field continues in the next chunk.
            ReadFieldResult::OutputFull => continue,
        };
        let value = String::from_utf8(std::mem::take(&mut field))
            .map_err(|e| TurglemError::invalid_format("csv", e.to_string()))?;
        features.push(value);
        if end {
            break;
        }
    }
    Ok(features)
}

/// ソースの各行をCSVとして解析します。
///
/// 空行と `#` で始まる行は読み飛ばします。戻り値は (1始まりの行番号, フィールド) の列です。
pub(crate) fn csv_records<'a>(
    text: &'a str,
) -> impl Iterator<Item = Result<(usize, Vec<String>)>> + 'a {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| Ok((i + 1, parse_csv_row(line.trim_end_matches('\r'))?)))
}

/// フィールドを数値として読み取ります。
pub(crate) fn parse_field<T>(
    name: &'static str,
    line: usize,
    column: &'static str,
    value: &str,
) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        TurglemError::invalid_format(name, format!("line {line}: {column}: {value:?}: {e}"))
    })
}
