//! The derived tables behind each chart
//!
//! Every function is pure and recomputes its result from the loaded tables.

use log::debug;

use crate::dataframe::{DataFrame, JoinType, MeltOptions};
use crate::error::Result;
use crate::model::{columns, Gender, Generation};
use crate::pivot::{crosstab, CrosstabOptions};
use crate::series::Series;

/// Income is shown in millions
pub const INCOME_SCALE: f64 = 1_000_000.0;

/// Generations present in a table, in cohort order
pub fn present_generations(customers: &DataFrame) -> Result<Vec<String>> {
    let mut present: Vec<Generation> = customers
        .unique_sorted(columns::GENERATION)?
        .iter()
        .filter_map(|label| Generation::parse(label))
        .collect();
    present.sort();
    Ok(present.iter().map(|g| g.label().to_string()).collect())
}

/// Customer counts per generation (rows) and gender (columns)
///
/// Rows are the generations present, in cohort order; columns are the observed
/// genders in sorted order. Absent combinations are zero.
pub fn gender_by_generation(customers: &DataFrame) -> Result<DataFrame> {
    let generations = customers.get_column_string_values(columns::GENERATION)?;
    let genders = customers.get_column_string_values(columns::GENDER)?;

    let options = CrosstabOptions::new(columns::GENERATION)
        .with_row_domain(present_generations(customers)?);
    crosstab(&generations, &genders, &options)
}

/// Customer counts per province and generation, with `Total` and coordinates
///
/// All four generation columns are always present. Provinces without a
/// coordinate row are dropped.
pub fn province_by_generation(customers: &DataFrame, coordinates: &DataFrame) -> Result<DataFrame> {
    let provinces = customers.get_column_string_values(columns::PROVINCE)?;
    let generations = customers.get_column_string_values(columns::GENERATION)?;

    let options =
        CrosstabOptions::new(columns::PROVINCE).with_column_domain(Generation::labels());
    let mut table = crosstab(&provinces, &generations, &options)?;

    let mut totals = vec![0i64; table.row_count()];
    for generation in Generation::ALL {
        let counts = table.get_column_int_values(generation.label())?;
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
    }
    table.add_column(columns::TOTAL, Series::new(totals, None))?;

    let joined = table.join(coordinates, columns::PROVINCE, JoinType::Inner)?;
    if joined.row_count() < table.row_count() {
        debug!(
            "{} province(s) without coordinates dropped from the map",
            table.row_count() - joined.row_count()
        );
    }

    Ok(joined)
}

/// Mean income (millions) and mean spending score per generation for one gender
///
/// Generations without customers of that gender are absent.
pub fn income_spending_by_generation(customers: &DataFrame, gender: Gender) -> Result<DataFrame> {
    let filtered = customers.filter_eq(columns::GENDER, gender.label())?;
    let order = Generation::ALL.map(|g| g.label());

    let means = filtered
        .groupby(columns::GENERATION)?
        .with_key_order(&order)
        .mean(&[columns::ANNUAL_INCOME, columns::SPENDING_SCORE])?;

    let income: Vec<f64> = means
        .get_column_numeric_values(columns::ANNUAL_INCOME)?
        .into_iter()
        .map(|v| v / INCOME_SCALE)
        .collect();

    let mut result = DataFrame::new();
    result.add_column(
        columns::GENERATION,
        Series::new(means.get_column_string_values(columns::GENERATION)?, None),
    )?;
    result.add_column(columns::ANNUAL_INCOME, Series::new(income, None))?;
    result.add_column(
        columns::SPENDING_SCORE,
        Series::new(means.get_column_numeric_values(columns::SPENDING_SCORE)?, None),
    )?;
    Ok(result)
}

/// Long-form profession counts per generation for one gender
///
/// Professions come from customers of the given gender, but the generation
/// axis spans every generation in the full table, so generations with no
/// customers of that gender still appear with zero counts. Sorted ascending by
/// count.
pub fn profession_by_generation(customers: &DataFrame, gender: Gender) -> Result<DataFrame> {
    let generation_axis = present_generations(customers)?;

    let filtered = customers.filter_eq(columns::GENDER, gender.label())?;
    let professions = filtered.get_column_string_values(columns::PROFESSION)?;
    let generations = filtered.get_column_string_values(columns::GENERATION)?;

    let options =
        CrosstabOptions::new(columns::PROFESSION).with_column_domain(generation_axis);
    let wide = crosstab(&professions, &generations, &options)?;

    let long = wide.melt(&MeltOptions {
        id_vars: vec![columns::PROFESSION.to_string()],
        value_vars: None,
        var_name: columns::GENERATION.to_string(),
        value_name: columns::NUM_PEOPLE.to_string(),
    })?;

    long.sort_values(columns::NUM_PEOPLE, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row<'a> = (&'a str, &'a str, &'a str, f64, f64, &'a str);

    fn customers(rows: &[Row<'_>]) -> DataFrame {
        let mut generation = Vec::new();
        let mut gender = Vec::new();
        let mut province = Vec::new();
        let mut income = Vec::new();
        let mut spending = Vec::new();
        let mut profession = Vec::new();
        for row in rows {
            generation.push(row.0.to_string());
            gender.push(row.1.to_string());
            province.push(row.2.to_string());
            income.push(row.3);
            spending.push(row.4);
            profession.push(row.5.to_string());
        }

        let mut df = DataFrame::new();
        df.add_column(columns::GENERATION, Series::new(generation, None))
            .unwrap();
        df.add_column(columns::GENDER, Series::new(gender, None))
            .unwrap();
        df.add_column(columns::PROVINCE, Series::new(province, None))
            .unwrap();
        df.add_column(columns::ANNUAL_INCOME, Series::new(income, None))
            .unwrap();
        df.add_column(columns::SPENDING_SCORE, Series::new(spending, None))
            .unwrap();
        df.add_column(columns::PROFESSION, Series::new(profession, None))
            .unwrap();
        df
    }

    #[test]
    fn test_present_generations_cohort_order() {
        let df = customers(&[
            ("Gen. Z (Zoomers)", "Male", "Bali", 1.0, 1.0, "Artist"),
            ("Boomers", "Male", "Bali", 1.0, 1.0, "Artist"),
        ]);
        assert_eq!(
            present_generations(&df).unwrap(),
            vec!["Boomers", "Gen. Z (Zoomers)"]
        );
    }

    #[test]
    fn test_income_mean_hand_computed() {
        let df = customers(&[
            ("Boomers", "Female", "Bali", 2_000_000.0, 40.0, "Doctor"),
            ("Boomers", "Female", "Aceh", 4_000_000.0, 60.0, "Lawyer"),
            ("Gen. X", "Female", "Bali", 3_000_000.0, 10.0, "Doctor"),
            ("Gen. X", "Male", "Bali", 9_000_000.0, 90.0, "Doctor"),
        ]);
        let table = income_spending_by_generation(&df, Gender::Female).unwrap();
        assert_eq!(
            table.get_column_string_values(columns::GENERATION).unwrap(),
            vec!["Boomers", "Gen. X"]
        );
        assert_eq!(
            table.get_column_numeric_values(columns::ANNUAL_INCOME).unwrap(),
            vec![3.0, 3.0]
        );
        assert_eq!(
            table.get_column_numeric_values(columns::SPENDING_SCORE).unwrap(),
            vec![50.0, 10.0]
        );
    }

    #[test]
    fn test_province_total_is_row_sum() {
        let df = customers(&[
            ("Boomers", "Female", "Bali", 1.0, 1.0, "Doctor"),
            ("Gen. X", "Male", "Bali", 1.0, 1.0, "Doctor"),
            ("Gen. Z (Zoomers)", "Male", "Aceh", 1.0, 1.0, "Doctor"),
        ]);
        let mut coords = DataFrame::new();
        coords
            .add_column(
                columns::PROVINCE,
                Series::new(vec!["Aceh".to_string(), "Bali".to_string()], None),
            )
            .unwrap();
        coords
            .add_column(columns::LATITUDE, Series::new(vec![4.7, -8.3], None))
            .unwrap();
        coords
            .add_column(columns::LONGITUDE, Series::new(vec![96.7, 115.1], None))
            .unwrap();

        let map = province_by_generation(&df, &coords).unwrap();
        assert_eq!(
            map.get_column_int_values(columns::TOTAL).unwrap(),
            vec![1, 2]
        );
        assert_eq!(
            map.get_column_int_values("Gen. Y (Millenials)").unwrap(),
            vec![0, 0]
        );
    }
}
