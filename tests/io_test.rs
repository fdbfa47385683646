mod common;

use common::{coordinate_csv, customer_csv, customer_json, four_customers, indonesia_coordinates, FixtureDir};
use demographrs::io::{read_csv, read_json, read_table};
use demographrs::Error;

// CSVファイル読み込みのテスト (一時ファイルを利用)
#[test]
fn test_read_csv_file() {
    let dir = FixtureDir::new();
    let path = dir.write("coordinate.csv", &coordinate_csv(&indonesia_coordinates()));

    let df = read_csv(&path, true).unwrap();
    assert_eq!(df.row_count(), 3);
    assert_eq!(df.column_names(), &["province", "latitude", "longitude"]);
    assert_eq!(
        df.get_column_string_values("province").unwrap(),
        vec!["Aceh", "Bali", "Papua"]
    );
}

#[test]
fn test_read_json_file() {
    let dir = FixtureDir::new();
    let path = dir.write("customers.json", &customer_json(&four_customers()));

    let df = read_json(&path).unwrap();
    assert_eq!(df.row_count(), 4);
    assert_eq!(
        df.get_column_string_values("gender").unwrap(),
        vec!["Male", "Male", "Female", "Female"]
    );
    // 数値セルは文字列として読み込まれる
    let income: Vec<f64> = df
        .get_column_string_values("Annual_Income")
        .unwrap()
        .iter()
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(income[0], 10_000_000.0);
}

#[test]
fn test_read_table_dispatch() {
    let dir = FixtureDir::new();
    let csv_path = dir.write("customers.csv", &customer_csv(&four_customers()));
    let json_path = dir.write("customers.json", &customer_json(&four_customers()));
    let other = dir.write("customers.pkl", "binary");

    let from_csv = read_table(&csv_path).unwrap();
    let from_json = read_table(&json_path).unwrap();
    assert_eq!(from_csv.row_count(), from_json.row_count());
    assert_eq!(
        from_csv.get_column_string_values("Profession").unwrap(),
        from_json.get_column_string_values("Profession").unwrap()
    );

    assert!(matches!(read_table(&other), Err(Error::Format(_))));
}

#[test]
fn test_missing_file() {
    let dir = FixtureDir::new();
    let result = read_csv(dir.path().join("nope.csv"), true);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_json() {
    let dir = FixtureDir::new();
    let path = dir.write("broken.json", "[{\"gender\": ");
    assert!(matches!(read_json(&path), Err(Error::Json(_))));

    let scalar = dir.write("scalar.json", "42");
    assert!(matches!(read_json(&scalar), Err(Error::Format(_))));
}
