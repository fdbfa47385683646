//! Loading and validating the dashboard input tables

use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io;
use crate::model::{columns, Gender, Generation};
use crate::series::Series;

/// The two validated input tables, read-only for the session
#[derive(Debug, Clone)]
pub struct DashboardData {
    customers: DataFrame,
    coordinates: DataFrame,
    genders: Vec<Gender>,
}

impl DashboardData {
    /// Load the customer table (CSV or JSON) and the coordinate CSV
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(customers: P, coordinates: Q) -> Result<Self> {
        let customers_path = customers.as_ref();
        let coordinates_path = coordinates.as_ref();

        info!("loading customer table from {}", customers_path.display());
        let customers = io::read_table(customers_path)?;

        info!("loading coordinate table from {}", coordinates_path.display());
        let coordinates = io::read_csv(coordinates_path, true)?;

        Self::from_frames(customers, coordinates)
    }

    /// Validate raw string tables and convert them to typed frames
    pub fn from_frames(customers: DataFrame, coordinates: DataFrame) -> Result<Self> {
        let customers = type_customers(&customers)?;
        let coordinates = type_coordinates(&coordinates)?;

        let genders: Vec<Gender> = customers
            .unique_sorted(columns::GENDER)?
            .iter()
            .filter_map(|label| Gender::parse(label))
            .collect();

        debug!(
            "loaded {} customers, {} provinces with coordinates",
            customers.row_count(),
            coordinates.row_count()
        );

        Ok(DashboardData {
            customers,
            coordinates,
            genders,
        })
    }

    /// Typed customer table
    pub fn customers(&self) -> &DataFrame {
        &self.customers
    }

    /// Typed coordinate table
    pub fn coordinates(&self) -> &DataFrame {
        &self.coordinates
    }

    /// Sorted distinct genders observed in the customer table
    pub fn genders(&self) -> &[Gender] {
        &self.genders
    }
}

fn type_customers(raw: &DataFrame) -> Result<DataFrame> {
    raw.require_columns(&columns::CUSTOMER)?;
    if raw.row_count() == 0 {
        return Err(Error::Empty("customer table has no rows".to_string()));
    }

    let mut typed = DataFrame::new();
    for name in raw.column_names() {
        let values = raw.get_column_string_values(name)?;
        match name.as_str() {
            columns::GENERATION => {
                let labels = normalise(name, values, |v| Generation::parse(v).map(|g| g.label()))?;
                typed.add_column(name.clone(), Series::new(labels, None))?;
            }
            columns::GENDER => {
                let labels = normalise(name, values, |v| Gender::parse(v).map(|g| g.label()))?;
                typed.add_column(name.clone(), Series::new(labels, None))?;
            }
            columns::ANNUAL_INCOME | columns::SPENDING_SCORE => {
                typed.add_column(name.clone(), Series::new(parse_numbers(name, &values)?, None))?;
            }
            _ => typed.add_column(name.clone(), Series::new(values, None))?,
        }
    }

    Ok(typed)
}

fn type_coordinates(raw: &DataFrame) -> Result<DataFrame> {
    raw.require_columns(&columns::COORDINATE)?;

    let provinces = raw.get_column_string_values(columns::PROVINCE)?;
    let mut seen = HashSet::new();
    for province in &provinces {
        if !seen.insert(province.as_str()) {
            return Err(Error::DuplicateKey {
                column: columns::PROVINCE.to_string(),
                key: province.clone(),
            });
        }
    }

    let latitude = parse_numbers(
        columns::LATITUDE,
        &raw.get_column_string_values(columns::LATITUDE)?,
    )?;
    let longitude = parse_numbers(
        columns::LONGITUDE,
        &raw.get_column_string_values(columns::LONGITUDE)?,
    )?;

    let mut typed = DataFrame::new();
    typed.add_column(columns::PROVINCE, Series::new(provinces, None))?;
    typed.add_column(columns::LATITUDE, Series::new(latitude, None))?;
    typed.add_column(columns::LONGITUDE, Series::new(longitude, None))?;
    Ok(typed)
}

// Map every value onto its canonical label; rows are reported 1-based
fn normalise<F>(column: &str, values: Vec<String>, canonical: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> Option<&'static str>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| match canonical(&value) {
            Some(label) => Ok(label.to_string()),
            None => Err(Error::UnknownCategory {
                column: column.to_string(),
                value,
                row: i + 1,
            }),
        })
        .collect()
}

fn parse_numbers(column: &str, values: &[String]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value.trim().parse::<f64>().map_err(|_| Error::Parse {
                column: column.to_string(),
                row: i + 1,
                value: value.clone(),
            })
        })
        .collect()
}
