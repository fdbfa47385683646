use std::collections::HashMap;

use super::{Column, DataFrame};
use crate::error::{Error, Result};
use crate::series::Series;

/// 結合タイプの列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// 内部結合 (両方の表に一致する行のみ)
    Inner,
    /// 左結合 (左側の表の全ての行と、右側の表の一致する行)
    Left,
}

impl DataFrame {
    /// 2つのDataFrameをキー列で結合する
    ///
    /// 結果の行順は左側のDataFrameの順序を保つ。右側の列名が左側と重複する場合は
    /// `_right` を付ける。
    pub fn join(&self, other: &DataFrame, on: &str, join_type: JoinType) -> Result<DataFrame> {
        // 結合列が存在するか確認
        if !self.contains_column(on) {
            return Err(Error::ColumnNotFound(format!(
                "join key '{}' missing from left frame",
                on
            )));
        }
        if !other.contains_column(on) {
            return Err(Error::ColumnNotFound(format!(
                "join key '{}' missing from right frame",
                on
            )));
        }

        let left_keys = self.get_column_string_values(on)?;
        let right_keys = other.get_column_string_values(on)?;

        // 右側のキー -> 行インデックス
        let mut right_index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, key) in right_keys.iter().enumerate() {
            right_index.entry(key.as_str()).or_default().push(i);
        }

        // (左の行, 右の行) の組を作る。右に一致がない左結合の行は None
        let mut pairs: Vec<(usize, Option<usize>)> = Vec::new();
        for (left_idx, key) in left_keys.iter().enumerate() {
            match right_index.get(key.as_str()) {
                Some(matches) => {
                    for &right_idx in matches {
                        pairs.push((left_idx, Some(right_idx)));
                    }
                }
                None if join_type == JoinType::Left => pairs.push((left_idx, None)),
                None => {}
            }
        }

        let left_rows: Vec<usize> = pairs.iter().map(|(l, _)| *l).collect();
        let mut result = self.take(&left_rows)?;

        for name in other.column_names() {
            if name == on {
                continue;
            }
            let out_name = if self.contains_column(name) {
                format!("{}_right", name)
            } else {
                name.clone()
            };
            let column = gather_optional(other.column(name)?, &pairs);
            result.add_column(out_name, column)?;
        }

        Ok(result)
    }
}

// 右側の列から行を集める。欠損は NaN / 空文字列 / 0 で埋める
fn gather_optional(column: &Column, pairs: &[(usize, Option<usize>)]) -> Column {
    match column {
        Column::Str(s) => Column::Str(Series::new(
            pairs
                .iter()
                .map(|(_, r)| r.and_then(|i| s.get(i).cloned()).unwrap_or_default())
                .collect(),
            None,
        )),
        Column::Float(s) => Column::Float(Series::new(
            pairs
                .iter()
                .map(|(_, r)| r.and_then(|i| s.get(i).copied()).unwrap_or(f64::NAN))
                .collect(),
            None,
        )),
        Column::Int(s) => Column::Int(Series::new(
            pairs
                .iter()
                .map(|(_, r)| r.and_then(|i| s.get(i).copied()).unwrap_or_default())
                .collect(),
            None,
        )),
    }
}
