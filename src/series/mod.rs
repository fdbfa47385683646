use num_traits::ToPrimitive;
use std::fmt::Debug;
use std::iter::Sum;

use crate::error::{Error, Result};

/// Series構造体: 名前付きの一次元の値の配列
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T>
where
    T: Debug + Clone,
{
    /// Seriesのデータ値
    values: Vec<T>,

    /// 名前（オプション）
    name: Option<String>,
}

// 基本実装
impl<T> Series<T>
where
    T: Debug + Clone,
{
    /// 新しいSeriesをベクトルから作成
    pub fn new(values: Vec<T>, name: Option<String>) -> Self {
        Series { values, name }
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// 値の配列を取り出す
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// 名前を設定
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 指定位置の値だけを持つ新しいSeriesを作成
    pub fn take(&self, indices: &[usize]) -> Self {
        let values = indices
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect();
        Series {
            values,
            name: self.name.clone(),
        }
    }
}

// 数値型のSeriesに対する特化実装
impl<T> Series<T>
where
    T: Debug + Clone + Copy + Sum<T> + ToPrimitive + Default,
{
    /// 合計を計算
    pub fn sum(&self) -> T {
        if self.values.is_empty() {
            T::default()
        } else {
            self.values.iter().copied().sum()
        }
    }

    /// 平均を計算
    pub fn mean(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(Error::Empty(
                "cannot compute the mean of an empty series".to_string(),
            ));
        }

        let sum = self
            .sum()
            .to_f64()
            .ok_or_else(|| Error::InvalidInput("series sum is not representable as f64".into()))?;

        Ok(sum / self.len() as f64)
    }
}
