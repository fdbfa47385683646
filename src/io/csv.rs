use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::series::Series;

/// CSVファイルからDataFrameを読み込む
///
/// 全ての列は文字列列として読み込まれる。型付けは呼び出し側で行う。
pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    read_csv_from_reader(file, has_header)
}

/// 任意のリーダーからCSVを読み込む
pub fn read_csv_from_reader<R: Read>(reader: R, has_header: bool) -> Result<DataFrame> {
    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    // ヘッダー行を取得
    let headers: Vec<String> = if has_header {
        rdr.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        // ヘッダーがない場合は "column_0", "column_1" などとする
        match records.first() {
            Some(first) => (0..first.len()).map(|i| format!("column_{}", i)).collect(),
            None => return Ok(DataFrame::new()),
        }
    };

    // データを列ごとに収集
    let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(records.len()); headers.len()];
    for record in &records {
        for (i, column) in columns.iter_mut().enumerate() {
            // 行の長さが足りない場合は空文字列
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut df = DataFrame::new();
    for (header, values) in headers.into_iter().zip(columns) {
        df.add_column(header, Series::new(values, None))?;
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_with_header() {
        let data = "province,latitude,longitude\n Aceh , 4.69,96.74\nBali,-8.34,115.09\n";
        let df = read_csv_from_reader(data.as_bytes(), true).unwrap();
        assert_eq!(df.column_names(), &["province", "latitude", "longitude"]);
        assert_eq!(df.row_count(), 2);
        assert_eq!(
            df.get_column_string_values("province").unwrap(),
            vec!["Aceh", "Bali"]
        );
    }

    #[test]
    fn test_read_csv_short_rows_and_no_header() {
        let data = "a,b\nc\n";
        let df = read_csv_from_reader(data.as_bytes(), false).unwrap();
        assert_eq!(df.column_names(), &["column_0", "column_1"]);
        assert_eq!(df.get_column_string_values("column_1").unwrap(), vec!["b", ""]);
    }

    #[test]
    fn test_read_csv_header_only() {
        let df = read_csv_from_reader("province,latitude\n".as_bytes(), true).unwrap();
        assert_eq!(df.row_count(), 0);
        assert!(df.contains_column("latitude"));
    }
}
