use std::cmp::Ordering;

use super::{Column, DataFrame};
use crate::error::{Error, Result};
use crate::series::Series;

/// データフレームの形状変換オプション - melt操作
#[derive(Debug, Clone)]
pub struct MeltOptions {
    /// 固定する列の名前（識別列）
    pub id_vars: Vec<String>,
    /// 可変列の名前（値列）。None の場合は識別列以外の全ての列
    pub value_vars: Option<Vec<String>>,
    /// 変数名の列名
    pub var_name: String,
    /// 値の列名
    pub value_name: String,
}

impl Default for MeltOptions {
    fn default() -> Self {
        Self {
            id_vars: Vec::new(),
            value_vars: None,
            var_name: "variable".to_string(),
            value_name: "value".to_string(),
        }
    }
}

impl DataFrame {
    /// データフレームを長形式に変換（ワイド形式から長形式へ）
    ///
    /// 値列を外側、行を内側にして並べる。
    ///
    /// ```
    /// use demographrs::{DataFrame, MeltOptions, Series};
    ///
    /// // | Profession | Boomers | Gen. X |
    /// // | Doctor     | 1       | 2      |
    /// let mut df = DataFrame::new();
    /// df.add_column("Profession", Series::new(vec!["Doctor".to_string()], None)).unwrap();
    /// df.add_column("Boomers", Series::new(vec![1i64], None)).unwrap();
    /// df.add_column("Gen. X", Series::new(vec![2i64], None)).unwrap();
    ///
    /// let long = df
    ///     .melt(&MeltOptions {
    ///         id_vars: vec!["Profession".to_string()],
    ///         var_name: "generation".to_string(),
    ///         value_name: "num_people".to_string(),
    ///         ..MeltOptions::default()
    ///     })
    ///     .unwrap();
    ///
    /// // | Profession | generation | num_people |
    /// // | Doctor     | Boomers    | 1          |
    /// // | Doctor     | Gen. X     | 2          |
    /// assert_eq!(long.row_count(), 2);
    /// assert_eq!(long.get_column_int_values("num_people").unwrap(), vec![1, 2]);
    /// ```
    pub fn melt(&self, options: &MeltOptions) -> Result<DataFrame> {
        // 列名のチェック
        for col in &options.id_vars {
            if !self.contains_column(col) {
                return Err(Error::ColumnNotFound(col.clone()));
            }
        }

        // 値列の決定
        let value_vars: Vec<String> = match &options.value_vars {
            Some(vars) => {
                for col in vars {
                    if !self.contains_column(col) {
                        return Err(Error::ColumnNotFound(col.clone()));
                    }
                }
                vars.clone()
            }
            None => self
                .column_names()
                .iter()
                .filter(|c| !options.id_vars.contains(c))
                .cloned()
                .collect(),
        };

        let rows = self.row_count();
        let repeated: Vec<usize> = (0..value_vars.len()).flat_map(|_| 0..rows).collect();

        let mut result = DataFrame::new();
        for id in &options.id_vars {
            result.add_column(id.clone(), self.column(id)?.take(&repeated))?;
        }

        let variables: Vec<String> = value_vars
            .iter()
            .flat_map(|v| std::iter::repeat(v.clone()).take(rows))
            .collect();
        result.add_column(options.var_name.clone(), Series::new(variables, None))?;

        let all_int = value_vars
            .iter()
            .map(|v| self.column(v))
            .collect::<Result<Vec<_>>>()?
            .iter()
            .all(|c| matches!(c, Column::Int(_)));

        if all_int {
            let mut values = Vec::with_capacity(rows * value_vars.len());
            for var in &value_vars {
                values.extend(self.get_column_int_values(var)?);
            }
            result.add_column(options.value_name.clone(), Series::new(values, None))?;
        } else {
            let mut values = Vec::with_capacity(rows * value_vars.len());
            for var in &value_vars {
                values.extend(self.get_column_numeric_values(var)?);
            }
            result.add_column(options.value_name.clone(), Series::new(values, None))?;
        }

        Ok(result)
    }

    /// 列の値で行を並べ替える（安定ソート）
    pub fn sort_values(&self, column: &str, ascending: bool) -> Result<DataFrame> {
        let mut order: Vec<usize> = (0..self.row_count()).collect();

        match self.column(column)? {
            Column::Str(s) => {
                let keys = s.values();
                order.sort_by(|&a, &b| directed(keys[a].cmp(&keys[b]), ascending));
            }
            Column::Float(_) | Column::Int(_) => {
                let keys = self.get_column_numeric_values(column)?;
                order.sort_by(|&a, &b| {
                    let ord = keys[a].partial_cmp(&keys[b]).unwrap_or(Ordering::Equal);
                    directed(ord, ascending)
                });
            }
        }

        self.take(&order)
    }
}

fn directed(ord: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ord
    } else {
        ord.reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column(
            "Profession",
            Series::new(vec!["Doctor".to_string(), "Lawyer".to_string()], None),
        )
        .unwrap();
        df.add_column("Boomers", Series::new(vec![3i64, 0], None))
            .unwrap();
        df.add_column("Gen. X", Series::new(vec![1i64, 2], None))
            .unwrap();
        df
    }

    fn melt_options() -> MeltOptions {
        MeltOptions {
            id_vars: vec!["Profession".to_string()],
            var_name: "generation".to_string(),
            value_name: "num_people".to_string(),
            ..MeltOptions::default()
        }
    }

    #[test]
    fn test_melt_value_columns_outermost() {
        let long = wide().melt(&melt_options()).unwrap();
        assert_eq!(long.row_count(), 4);
        assert_eq!(
            long.get_column_string_values("Profession").unwrap(),
            vec!["Doctor", "Lawyer", "Doctor", "Lawyer"]
        );
        assert_eq!(
            long.get_column_string_values("generation").unwrap(),
            vec!["Boomers", "Boomers", "Gen. X", "Gen. X"]
        );
        assert_eq!(
            long.get_column_int_values("num_people").unwrap(),
            vec![3, 0, 1, 2]
        );
    }

    #[test]
    fn test_melt_unknown_id() {
        let options = MeltOptions {
            id_vars: vec!["Job".to_string()],
            ..MeltOptions::default()
        };
        assert!(wide().melt(&options).is_err());
    }

    #[test]
    fn test_sort_values_is_stable() {
        let long = wide().melt(&melt_options()).unwrap();
        let sorted = long.sort_values("num_people", true).unwrap();
        assert_eq!(
            sorted.get_column_int_values("num_people").unwrap(),
            vec![0, 1, 2, 3]
        );

        let mut df = DataFrame::new();
        df.add_column(
            "name",
            Series::new(vec!["b".to_string(), "a".to_string(), "c".to_string()], None),
        )
        .unwrap();
        df.add_column("n", Series::new(vec![1i64, 1, 0], None)).unwrap();
        let sorted = df.sort_values("n", true).unwrap();
        assert_eq!(
            sorted.get_column_string_values("name").unwrap(),
            vec!["c", "b", "a"]
        );
        let desc = df.sort_values("name", false).unwrap();
        assert_eq!(
            desc.get_column_string_values("name").unwrap(),
            vec!["c", "b", "a"]
        );
    }
}
