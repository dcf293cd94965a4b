//! Historical weather dataset loading and cleaning

use crate::calendar::parse_date_cell;
use crate::encoding::WeatherCode;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Source column names and the canonical names they are renamed to
pub const COLUMN_RENAMES: [(&str, &str); 4] = [
    ("time", "date"),
    ("temperature_2m_mean", "temperature_mean"),
    ("rain_sum", "rainfall_sum"),
    ("weathercode", "weather_code"),
];

/// Columns kept after cleaning, in order
pub const CLEAN_COLUMNS: [&str; 5] = [
    "city",
    "date",
    "temperature_mean",
    "rainfall_sum",
    "weather_code",
];

/// One cleaned historical record
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub city: String,
    pub date: NaiveDate,
    /// Daily mean temperature in °C
    pub temperature_mean: f64,
    /// Daily rainfall in mm
    pub rainfall_sum: f64,
    pub weather_code: WeatherCode,
}

/// Cleaned dataset: the projected frame plus its typed rows
#[derive(Debug, Clone)]
pub struct WeatherData {
    /// Data frame with the canonical columns and no missing values
    df: DataFrame,
    /// Typed rows, in frame order
    observations: Vec<Observation>,
}

/// Data loader for the historical weather dataset
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load and clean the dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<WeatherData> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "loaded weather dataset");
        Self::from_dataframe(df)
    }

    /// Clean a raw data frame with the source column names
    pub fn from_dataframe(df: DataFrame) -> Result<WeatherData> {
        let df = Self::clean(df)?;
        let observations = Self::extract_observations(&df)?;
        Ok(WeatherData { df, observations })
    }

    /// Rename, project, cast and drop incomplete rows
    fn clean(mut df: DataFrame) -> Result<DataFrame> {
        for (source, target) in COLUMN_RENAMES {
            df.rename(source, target)?;
        }
        let mut df = df.select(CLEAN_COLUMNS)?;

        for name in ["temperature_mean", "rainfall_sum"] {
            let cast = df.column(name)?.cast(&DataType::Float64)?;
            df.with_column(cast)?;
        }
        for name in ["city", "date", "weather_code"] {
            let cast = df.column(name)?.cast(&DataType::Utf8)?;
            df.with_column(cast)?;
        }

        let before = df.height();
        let df = df.drop_nulls::<String>(None)?;
        let dropped = before - df.height();
        if dropped > 0 {
            warn!(dropped, "dropped rows with missing values");
        }

        Ok(df)
    }

    fn extract_observations(df: &DataFrame) -> Result<Vec<Observation>> {
        let cities = df.column("city")?.utf8()?;
        let dates = df.column("date")?.utf8()?;
        let temperatures = df.column("temperature_mean")?.f64()?;
        let rainfall = df.column("rainfall_sum")?.f64()?;
        let codes = df.column("weather_code")?.utf8()?;

        let mut observations = Vec::with_capacity(df.height());
        for (row, ((((city, date), temperature), rain), code)) in cities
            .into_iter()
            .zip(dates.into_iter())
            .zip(temperatures.into_iter())
            .zip(rainfall.into_iter())
            .zip(codes.into_iter())
            .enumerate()
        {
            let (Some(city), Some(date), Some(temperature), Some(rain), Some(code)) =
                (city, date, temperature, rain, code)
            else {
                return Err(ForecastError::DataError(format!(
                    "Missing value in row {} after cleaning",
                    row
                )));
            };

            let date = parse_date_cell(date).ok_or_else(|| {
                ForecastError::DataError(format!("Invalid date '{}' in row {}", date, row))
            })?;

            observations.push(Observation {
                city: city.to_string(),
                date,
                temperature_mean: temperature,
                rainfall_sum: rain,
                weather_code: WeatherCode::new(code),
            });
        }

        Ok(observations)
    }
}

impl WeatherData {
    /// Build a dataset directly from typed rows (for testing)
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self> {
        let city = Series::new(
            "city",
            observations
                .iter()
                .map(|o| o.city.as_str())
                .collect::<Vec<&str>>(),
        );
        let date = Series::new(
            "date",
            observations
                .iter()
                .map(|o| o.date.format("%Y-%m-%d").to_string())
                .collect::<Vec<String>>(),
        );
        let temperature = Series::new(
            "temperature_mean",
            observations
                .iter()
                .map(|o| o.temperature_mean)
                .collect::<Vec<f64>>(),
        );
        let rainfall = Series::new(
            "rainfall_sum",
            observations
                .iter()
                .map(|o| o.rainfall_sum)
                .collect::<Vec<f64>>(),
        );
        let code = Series::new(
            "weather_code",
            observations
                .iter()
                .map(|o| o.weather_code.as_str())
                .collect::<Vec<&str>>(),
        );

        let df = DataFrame::new(vec![city, date, temperature, rainfall, code])?;
        Ok(Self { df, observations })
    }

    /// Get the cleaned DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the typed rows
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct city names, sorted
    pub fn cities(&self) -> Vec<&str> {
        self.observations
            .iter()
            .map(|o| o.city.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows recorded for one city
    pub fn observations_for<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a Observation> {
        self.observations.iter().filter(move |o| o.city == city)
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }
}
