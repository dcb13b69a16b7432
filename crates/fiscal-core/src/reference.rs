use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::{EntityId, FiscalError, ReferenceData};

#[derive(Debug, Deserialize)]
struct ReferenceDocument {
    #[serde(default)]
    gdp_per_capita: Vec<ReferenceEntry>,
    #[serde(default)]
    population: Vec<ReferenceEntry>,
}

#[derive(Debug, Deserialize)]
struct ReferenceEntry {
    entity: EntityId,
    #[serde(default)]
    year: Option<i32>,
    value: f64,
}

/// In-memory GDP per capita and population tables.
///
/// Population may be recorded without a year (a single census snapshot);
/// such an entry answers for every year unless a year-specific one exists.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    gdp_per_capita: HashMap<(EntityId, i32), f64>,
    population_by_year: HashMap<(EntityId, i32), f64>,
    population_snapshot: HashMap<EntityId, f64>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gdp_per_capita(mut self, entity: EntityId, year: i32, value: f64) -> Self {
        self.gdp_per_capita.insert((entity, year), value);
        self
    }

    pub fn with_population(mut self, entity: EntityId, year: Option<i32>, value: f64) -> Self {
        match year {
            Some(year) => {
                self.population_by_year.insert((entity, year), value);
            }
            None => {
                self.population_snapshot.insert(entity, value);
            }
        }
        self
    }

    /// Parse the JSON reference document:
    /// `{"gdp_per_capita": [{"entity", "year", "value"}], "population": [{"entity", "year"?, "value"}]}`
    pub fn from_json(json: &str) -> Result<Self, FiscalError> {
        let doc: ReferenceDocument = serde_json::from_str(json)
            .map_err(|e| FiscalError::InvalidData(format!("reference document: {}", e)))?;

        let mut table = Self::new();
        for entry in doc.gdp_per_capita {
            let year = entry.year.ok_or_else(|| {
                FiscalError::InvalidData(format!("GDP entry for {} has no year", entry.entity))
            })?;
            table = table.with_gdp_per_capita(entry.entity, year, entry.value);
        }
        for entry in doc.population {
            table = table.with_population(entry.entity, entry.year, entry.value);
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FiscalError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn is_empty(&self) -> bool {
        self.gdp_per_capita.is_empty()
            && self.population_by_year.is_empty()
            && self.population_snapshot.is_empty()
    }
}

impl ReferenceData for ReferenceTable {
    fn gdp_per_capita(&self, entity: EntityId, year: i32) -> Option<f64> {
        self.gdp_per_capita.get(&(entity, year)).copied()
    }

    fn population(&self, entity: EntityId, year: i32) -> Option<f64> {
        self.population_by_year
            .get(&(entity, year))
            .or_else(|| self.population_snapshot.get(&entity))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RIO: EntityId = EntityId(3304557);

    #[test]
    fn test_parse_reference_document() {
        let json = r#"{
            "gdp_per_capita": [{"entity": 3304557, "year": 2021, "value": 62000.5}],
            "population": [
                {"entity": 3304557, "value": 6211423},
                {"entity": 3304557, "year": 2020, "value": 6747815}
            ]
        }"#;
        let table = ReferenceTable::from_json(json).unwrap();

        assert_relative_eq!(table.gdp_per_capita(RIO, 2021).unwrap(), 62000.5);
        assert_eq!(table.gdp_per_capita(RIO, 2020), None);
        // year-specific entry wins over the snapshot
        assert_relative_eq!(table.population(RIO, 2020).unwrap(), 6747815.0);
        assert_relative_eq!(table.population(RIO, 2015).unwrap(), 6211423.0);
        assert_eq!(table.population(EntityId(1), 2015), None);
    }

    #[test]
    fn test_gdp_without_year_is_rejected() {
        let json = r#"{"gdp_per_capita": [{"entity": 3304557, "value": 1.0}]}"#;
        assert!(matches!(
            ReferenceTable::from_json(json),
            Err(FiscalError::InvalidData(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ReferenceTable::from_path("/nonexistent/reference.json");
        assert!(matches!(result, Err(FiscalError::Io(_))));
    }
}
