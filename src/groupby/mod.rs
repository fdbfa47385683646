use std::collections::BTreeMap;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::pivot::AggFunction;
use crate::series::Series;

/// DataFrameのグループ化結果
///
/// グループは最初はキーのソート順に並ぶ。`with_key_order` で固定の順序に並べ替えられる。
#[derive(Debug)]
pub struct DataFrameGroupBy<'a> {
    /// グループのキーと行インデックス（表示順）
    groups: Vec<(String, Vec<usize>)>,

    /// 元のDataFrame
    source: &'a DataFrame,

    /// グループ化に使用した列名
    by: String,
}

impl DataFrame {
    /// 指定された列でのグループ化
    pub fn groupby(&self, by: &str) -> Result<DataFrameGroupBy<'_>> {
        let keys = self.get_column_string_values(by)?;

        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, key) in keys.into_iter().enumerate() {
            groups.entry(key).or_default().push(i);
        }

        Ok(DataFrameGroupBy {
            groups: groups.into_iter().collect(),
            source: self,
            by: by.to_string(),
        })
    }
}

impl<'a> DataFrameGroupBy<'a> {
    /// グループ数を取得
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// グループのキー（表示順）
    pub fn keys(&self) -> Vec<&str> {
        self.groups.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// キーを固定の順序で並べ替える。順序にないキーはソート順で末尾に置く
    pub fn with_key_order(mut self, order: &[&str]) -> Self {
        let rank = |key: &str| order.iter().position(|o| *o == key).unwrap_or(order.len());
        self.groups
            .sort_by(|(a, _), (b, _)| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));
        self
    }

    /// 各グループのサイズ（`size` 列）
    pub fn size(&self) -> Result<DataFrame> {
        let mut result = self.key_frame()?;
        let sizes: Vec<i64> = self.groups.iter().map(|(_, rows)| rows.len() as i64).collect();
        result.add_column("size", Series::new(sizes, None))?;
        Ok(result)
    }

    /// 集計操作を実行。結果の列名は元の列名のまま
    pub fn agg(&self, columns: &[&str], aggfunc: AggFunction) -> Result<DataFrame> {
        for col in columns {
            if !self.source.contains_column(col) {
                return Err(Error::ColumnNotFound(col.to_string()));
            }
        }

        let mut result = self.key_frame()?;
        for &col in columns {
            let values = self.source.get_column_numeric_values(col)?;
            let aggregated: Vec<f64> = self
                .groups
                .iter()
                .map(|(_, rows)| {
                    let group_values: Vec<f64> = rows.iter().map(|&i| values[i]).collect();
                    aggfunc.apply(&group_values)
                })
                .collect();
            result.add_column(col, Series::new(aggregated, None))?;
        }

        Ok(result)
    }

    /// 平均を計算
    pub fn mean(&self, columns: &[&str]) -> Result<DataFrame> {
        self.agg(columns, AggFunction::Mean)
    }

    /// 合計を計算
    pub fn sum(&self, columns: &[&str]) -> Result<DataFrame> {
        self.agg(columns, AggFunction::Sum)
    }

    fn key_frame(&self) -> Result<DataFrame> {
        let keys: Vec<String> = self.groups.iter().map(|(k, _)| k.clone()).collect();
        let mut df = DataFrame::new();
        df.add_column(self.by.clone(), Series::new(keys, None))?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column(
            "generation",
            Series::new(
                ["Gen. X", "Boomers", "Gen. X", "Gen. Z"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>(),
                None,
            ),
        )
        .unwrap();
        df.add_column("income", Series::new(vec![10.0, 20.0, 30.0, 5.0], None))
            .unwrap();
        df
    }

    #[test]
    fn test_groupby_mean() {
        let df = sample();
        let grouped = df.groupby("generation").unwrap();
        assert_eq!(grouped.group_count(), 3);

        let means = grouped.mean(&["income"]).unwrap();
        assert_eq!(
            means.get_column_string_values("generation").unwrap(),
            vec!["Boomers", "Gen. X", "Gen. Z"]
        );
        assert_eq!(
            means.get_column_numeric_values("income").unwrap(),
            vec![20.0, 20.0, 5.0]
        );
    }

    #[test]
    fn test_groupby_key_order() {
        let df = sample();
        let grouped = df
            .groupby("generation")
            .unwrap()
            .with_key_order(&["Gen. Z", "Gen. X"]);
        assert_eq!(grouped.keys(), vec!["Gen. Z", "Gen. X", "Boomers"]);
    }

    #[test]
    fn test_groupby_size_and_missing_column() {
        let df = sample();
        let grouped = df.groupby("generation").unwrap();
        let size = grouped.size().unwrap();
        assert_eq!(size.get_column_int_values("size").unwrap(), vec![1, 2, 1]);
        assert!(grouped.mean(&["spending"]).is_err());
    }
}
