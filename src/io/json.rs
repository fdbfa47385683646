use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;

/// JSONファイルからDataFrameを読み込む
///
/// レコード形式 `[{col: val, ...}, ...]` と列形式 `{col: [val, ...], ...}` の両方を受け付ける。
/// 全ての列は文字列列として読み込まれる。
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    let json_value: Value = serde_json::from_reader(BufReader::new(file))?;
    from_value(json_value)
}

/// JSON文字列からDataFrameを読み込む
pub fn read_json_from_str(text: &str) -> Result<DataFrame> {
    let json_value: Value = serde_json::from_str(text)?;
    from_value(json_value)
}

fn from_value(value: Value) -> Result<DataFrame> {
    match value {
        Value::Array(array) => read_records_array(array),
        Value::Object(map) => read_column_oriented(map),
        _ => Err(Error::Format(
            "JSON table must be an array of records or an object of columns".to_string(),
        )),
    }
}

// セルの値を文字列にする。文字列は引用符なし、null は空文字列
fn cell_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// レコード指向JSONから読み込む
fn read_records_array(array: Vec<Value>) -> Result<DataFrame> {
    // 全てのキーを最初に現れた順に収集
    let mut keys: Vec<String> = Vec::new();
    for item in &array {
        match item {
            Value::Object(map) => {
                for key in map.keys() {
                    if !keys.contains(key) {
                        keys.push(key.clone());
                    }
                }
            }
            _ => {
                return Err(Error::Format(
                    "every element of a record array must be an object".to_string(),
                ))
            }
        }
    }

    let mut df = DataFrame::new();
    for key in keys {
        // キーが存在しない場合は空文字列
        let values: Vec<String> = array
            .iter()
            .map(|item| item.get(&key).map(cell_string).unwrap_or_default())
            .collect();
        df.add_column(key, Series::new(values, None))?;
    }

    Ok(df)
}

// 列指向JSONから読み込む
fn read_column_oriented(map: Map<String, Value>) -> Result<DataFrame> {
    let mut df = DataFrame::new();

    for (key, value) in map {
        match value {
            Value::Array(array) => {
                let values: Vec<String> = array.iter().map(cell_string).collect();
                df.add_column(key, Series::new(values, None))?;
            }
            _ => {
                return Err(Error::Format(format!(
                    "column '{}' must be an array",
                    key
                )))
            }
        }
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records() {
        let df = read_json_from_str(
            r#"[{"gender": "Male", "Annual_Income": 5000000},
                {"gender": "Female", "Annual_Income": 7500000.5}]"#,
        )
        .unwrap();
        assert_eq!(df.row_count(), 2);
        assert_eq!(
            df.get_column_string_values("gender").unwrap(),
            vec!["Male", "Female"]
        );
        assert_eq!(
            df.get_column_string_values("Annual_Income").unwrap(),
            vec!["5000000", "7500000.5"]
        );
    }

    #[test]
    fn test_read_columns() {
        let df = read_json_from_str(r#"{"province": ["Aceh", "Bali"], "latitude": [4.7, null]}"#)
            .unwrap();
        assert_eq!(df.row_count(), 2);
        assert_eq!(df.get_column_string_values("latitude").unwrap(), vec!["4.7", ""]);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = read_json_from_str(r#"{"a": [1, 2], "b": [1]}"#).unwrap_err();
        assert!(matches!(err, Error::InconsistentRowCount { .. }));
    }

    #[test]
    fn test_scalar_rejected() {
        assert!(matches!(read_json_from_str("42"), Err(Error::Format(_))));
    }
}
