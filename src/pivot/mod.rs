//! ピボットテーブルとクロス集計を提供するモジュール

use std::collections::{BTreeSet, HashMap};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;

/// 集計関数の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunction {
    /// 合計
    Sum,
    /// 平均
    Mean,
    /// 最小値
    Min,
    /// 最大値
    Max,
    /// カウント
    Count,
}

impl AggFunction {
    /// 関数名を文字列で取得
    pub fn name(&self) -> &'static str {
        match self {
            AggFunction::Sum => "sum",
            AggFunction::Mean => "mean",
            AggFunction::Min => "min",
            AggFunction::Max => "max",
            AggFunction::Count => "count",
        }
    }

    /// 文字列から集計関数を解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Some(AggFunction::Sum),
            "mean" | "avg" | "average" => Some(AggFunction::Mean),
            "min" | "minimum" => Some(AggFunction::Min),
            "max" | "maximum" => Some(AggFunction::Max),
            "count" => Some(AggFunction::Count),
            _ => None,
        }
    }

    /// 値の集合を集計する。空の場合は NaN（カウントは 0）
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return match self {
                AggFunction::Count => 0.0,
                _ => f64::NAN,
            };
        }

        match self {
            AggFunction::Sum => values.iter().sum(),
            AggFunction::Mean => values.iter().sum::<f64>() / values.len() as f64,
            AggFunction::Min => values.iter().cloned().fold(f64::INFINITY, f64::min),
            AggFunction::Max => values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            AggFunction::Count => values.len() as f64,
        }
    }
}

/// クロス集計のオプション
#[derive(Debug, Clone)]
pub struct CrosstabOptions {
    /// 結果の行ラベル列の名前
    pub index_name: String,
    /// 行ラベルの固定ドメイン。None の場合は観測された値をソートして使う
    pub row_domain: Option<Vec<String>>,
    /// 列ラベルの固定ドメイン。None の場合は観測された値をソートして使う
    pub column_domain: Option<Vec<String>>,
}

impl CrosstabOptions {
    /// 行ラベル列の名前だけを指定したオプション
    pub fn new(index_name: impl Into<String>) -> Self {
        CrosstabOptions {
            index_name: index_name.into(),
            row_domain: None,
            column_domain: None,
        }
    }

    /// 行ラベルのドメインを固定
    pub fn with_row_domain(mut self, domain: Vec<String>) -> Self {
        self.row_domain = Some(domain);
        self
    }

    /// 列ラベルのドメインを固定
    pub fn with_column_domain(mut self, domain: Vec<String>) -> Self {
        self.column_domain = Some(domain);
        self
    }
}

/// 2つのキー列から度数表を作る
///
/// `index[i]` と `columns[i]` は同じ行に属する。ドメインを固定した場合、
/// ドメイン外のキーを持つ行は数えない。存在しない組み合わせは 0。
pub fn crosstab(index: &[String], columns: &[String], options: &CrosstabOptions) -> Result<DataFrame> {
    if index.len() != columns.len() {
        return Err(Error::InconsistentRowCount {
            expected: index.len(),
            found: columns.len(),
        });
    }

    let row_labels = options
        .row_domain
        .clone()
        .unwrap_or_else(|| sorted_unique(index));
    let col_labels = options
        .column_domain
        .clone()
        .unwrap_or_else(|| sorted_unique(columns));

    let row_pos: HashMap<&str, usize> = row_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();
    let col_pos: HashMap<&str, usize> = col_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    // counts[列][行]
    let mut counts = vec![vec![0i64; row_labels.len()]; col_labels.len()];
    for (row_key, col_key) in index.iter().zip(columns) {
        if let (Some(&r), Some(&c)) = (row_pos.get(row_key.as_str()), col_pos.get(col_key.as_str())) {
            counts[c][r] += 1;
        }
    }

    let mut result = DataFrame::new();
    result.add_column(options.index_name.clone(), Series::new(row_labels, None))?;
    for (label, column) in col_labels.into_iter().zip(counts) {
        result.add_column(label, Series::new(column, None))?;
    }

    Ok(result)
}

fn sorted_unique(values: &[String]) -> Vec<String> {
    values
        .iter()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// DataFrameの拡張: ピボットテーブルとクロス集計
impl DataFrame {
    /// 2つの列のクロス集計
    pub fn crosstab(&self, index: &str, columns: &str) -> Result<DataFrame> {
        let index_values = self.get_column_string_values(index)?;
        let column_values = self.get_column_string_values(columns)?;
        crosstab(&index_values, &column_values, &CrosstabOptions::new(index))
    }

    /// ピボットテーブルを作成
    ///
    /// 行・列ラベルは観測値のソート順。値のない組み合わせは NaN
    /// （カウントの場合は 0）。
    pub fn pivot_table(
        &self,
        index: &str,
        columns: &str,
        values: &str,
        aggfunc: AggFunction,
    ) -> Result<DataFrame> {
        self.require_columns(&[index, columns, values])?;

        let index_values = self.get_column_string_values(index)?;
        let column_values = self.get_column_string_values(columns)?;
        let data = self.get_column_numeric_values(values)?;

        // (インデックス値, カラム値) -> 値のリスト
        let mut groups: HashMap<(&str, &str), Vec<f64>> = HashMap::new();
        for ((r, c), v) in index_values.iter().zip(&column_values).zip(&data) {
            groups.entry((r.as_str(), c.as_str())).or_default().push(*v);
        }

        let row_labels = sorted_unique(&index_values);
        let col_labels = sorted_unique(&column_values);

        let mut result = DataFrame::new();
        result.add_column(index, Series::new(row_labels.clone(), None))?;
        for col in &col_labels {
            let cells: Vec<f64> = row_labels
                .iter()
                .map(|row| {
                    let empty = Vec::new();
                    let values = groups.get(&(row.as_str(), col.as_str())).unwrap_or(&empty);
                    aggfunc.apply(values)
                })
                .collect();
            result.add_column(col.clone(), Series::new(cells, None))?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_crosstab_counts_and_zero_fill() {
        let index = strings(&["Gen. X", "Boomers", "Gen. X"]);
        let columns = strings(&["Male", "Female", "Male"]);
        let table = crosstab(&index, &columns, &CrosstabOptions::new("generation")).unwrap();

        assert_eq!(table.column_names(), &["generation", "Female", "Male"]);
        assert_eq!(
            table.get_column_string_values("generation").unwrap(),
            vec!["Boomers", "Gen. X"]
        );
        assert_eq!(table.get_column_int_values("Female").unwrap(), vec![1, 0]);
        assert_eq!(table.get_column_int_values("Male").unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_crosstab_fixed_domains() {
        let index = strings(&["Doctor", "Doctor"]);
        let columns = strings(&["Boomers", "Gen. Z"]);
        let options = CrosstabOptions::new("Profession")
            .with_column_domain(strings(&["Boomers", "Gen. X", "Gen. Z"]));
        let table = crosstab(&index, &columns, &options).unwrap();

        assert_eq!(table.column_count(), 4);
        assert_eq!(table.get_column_int_values("Gen. X").unwrap(), vec![0]);
    }

    #[test]
    fn test_crosstab_length_mismatch() {
        let err = crosstab(&strings(&["a"]), &strings(&[]), &CrosstabOptions::new("k")).unwrap_err();
        assert!(matches!(err, Error::InconsistentRowCount { .. }));
    }

    #[test]
    fn test_pivot_table_mean() {
        let mut df = DataFrame::new();
        df.add_column("generation", Series::new(strings(&["Gen. X", "Gen. X", "Boomers"]), None))
            .unwrap();
        df.add_column("gender", Series::new(strings(&["Male", "Male", "Female"]), None))
            .unwrap();
        df.add_column("income", Series::new(vec![10.0, 20.0, 40.0], None))
            .unwrap();

        let table = df
            .pivot_table("generation", "gender", "income", AggFunction::Mean)
            .unwrap();
        let male = table.get_column_numeric_values("Male").unwrap();
        assert!(male[0].is_nan());
        assert_eq!(male[1], 15.0);
        assert_eq!(table.get_column_numeric_values("Female").unwrap()[0], 40.0);
    }

    #[test]
    fn test_agg_function_parse() {
        assert_eq!(AggFunction::parse("AVG"), Some(AggFunction::Mean));
        assert_eq!(AggFunction::parse("median"), None);
        assert_eq!(AggFunction::Count.apply(&[]), 0.0);
    }
}
