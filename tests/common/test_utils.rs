//! Fixture helpers for integration tests
//!
//! Fixture files are written into a `tempfile` scratch directory that is
//! removed when the [`FixtureDir`] is dropped.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use demographrs::DashboardData;
use tempfile::TempDir;

/// One customer record
#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub generation: &'static str,
    pub gender: &'static str,
    pub province: &'static str,
    pub income: f64,
    pub spending: f64,
    pub profession: &'static str,
}

/// Build customer rows from tuples
pub fn customers(
    rows: &[(&'static str, &'static str, &'static str, f64, f64, &'static str)],
) -> Vec<CustomerRow> {
    rows.iter()
        .map(
            |&(generation, gender, province, income, spending, profession)| CustomerRow {
                generation,
                gender,
                province,
                income,
                spending,
                profession,
            },
        )
        .collect()
}

/// 2 Male Gen. X, 1 Female Boomers, 1 Female Gen. Z
pub fn four_customers() -> Vec<CustomerRow> {
    customers(&[
        ("Gen. X", "Male", "Bali", 10_000_000.0, 40.0, "Lawyer"),
        ("Gen. X", "Male", "Aceh", 30_000_000.0, 60.0, "Doctor"),
        ("Boomers", "Female", "Bali", 20_000_000.0, 50.0, "Doctor"),
        ("Gen. Z (Zoomers)", "Female", "Papua", 5_000_000.0, 90.0, "Artist"),
    ])
}

/// Coordinates for the provinces used in the fixtures
pub fn indonesia_coordinates() -> Vec<(&'static str, f64, f64)> {
    vec![
        ("Aceh", 4.695135, 96.749397),
        ("Bali", -8.340539, 115.091949),
        ("Papua", -4.269928, 138.080353),
    ]
}

/// Customer table in JSON records orientation
pub fn customer_json(rows: &[CustomerRow]) -> String {
    let records: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "generation": r.generation,
                "gender": r.gender,
                "province": r.province,
                "Annual_Income": r.income,
                "Spending_Score": r.spending,
                "Profession": r.profession,
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

/// Customer table as CSV with a header row
pub fn customer_csv(rows: &[CustomerRow]) -> String {
    let mut text =
        String::from("generation,gender,province,Annual_Income,Spending_Score,Profession\n");
    for r in rows {
        text.push_str(&format!(
            "{},{},{},{},{},{}\n",
            r.generation, r.gender, r.province, r.income, r.spending, r.profession
        ));
    }
    text
}

/// Coordinate table as CSV with a header row
pub fn coordinate_csv(rows: &[(&str, f64, f64)]) -> String {
    let mut text = String::from("province,latitude,longitude\n");
    for (province, lat, lon) in rows {
        text.push_str(&format!("{},{},{}\n", province, lat, lon));
    }
    text
}

/// Scratch directory for fixture files
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        FixtureDir {
            dir: TempDir::new().expect("Failed to create scratch directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the directory
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }
}

/// Write the customer JSON and coordinate CSV, then load them
pub fn load_fixture(rows: &[CustomerRow]) -> DashboardData {
    let dir = FixtureDir::new();
    let customers = dir.write("customers.json", &customer_json(rows));
    let coordinates = dir.write("coordinate.csv", &coordinate_csv(&indonesia_coordinates()));
    DashboardData::load(customers, coordinates).expect("Failed to load fixture")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dir_cleanup() {
        let path;
        {
            let dir = FixtureDir::new();
            path = dir.write("a.csv", "x\n1\n");
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_customer_csv_header() {
        let text = customer_csv(&four_customers());
        assert!(text.starts_with("generation,gender,province,"));
        assert_eq!(text.lines().count(), 5);
    }
}
