use fiscal_core::{IndicatorKey, IndicatorRecord, Roster};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Deviation band of an entity relative to the cross-entity mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeviationClass {
    /// |deviation| <= 10%
    Low = 1,
    /// 10% < |deviation| <= 30%
    Moderate = 2,
    /// |deviation| > 30%
    High = 3,
}

impl DeviationClass {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl Serialize for DeviationClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Bucket an absolute deviation; each boundary belongs to the lower class.
pub fn classify(deviation_pct: f64) -> DeviationClass {
    let abs = deviation_pct.abs();
    if abs <= 10.0 {
        DeviationClass::Low
    } else if abs <= 30.0 {
        DeviationClass::Moderate
    } else {
        DeviationClass::High
    }
}

/// Percentage deviation of `value` from `mean`; 0 when the mean is 0 or the result is not finite.
pub fn deviation_pct(value: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        return 0.0;
    }
    let deviation = (value - mean) / mean * 100.0;
    if deviation.is_finite() {
        deviation
    } else {
        0.0
    }
}

/// One entity's value for one indicator and how far it sits from the mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityCell {
    pub value: f64,
    pub deviation_pct: f64,
    pub classification: DeviationClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub key: IndicatorKey,
    pub label: &'static str,
    /// One cell per entity, in the matrix's entity order
    pub cells: Vec<EntityCell>,
    pub mean: f64,
    pub interpretation: &'static str,
    pub formula: &'static str,
}

/// Indicators by entity for one year, normalized against the cross-entity mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorMatrix {
    pub year: i32,
    /// Entity display names, sorted
    pub entities: Vec<String>,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorMatrix {
    pub fn empty(year: i32) -> Self {
        Self { year, entities: Vec::new(), rows: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn row(&self, key: IndicatorKey) -> Option<&IndicatorRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    pub fn cell(&self, key: IndicatorKey, entity: &str) -> Option<&EntityCell> {
        let idx = self.entities.iter().position(|e| e == entity)?;
        self.row(key).and_then(|row| row.cells.get(idx))
    }
}

/// Pivot per-entity records into one row per indicator with mean, deviation and class.
///
/// Records sharing a display name are averaged into one column.
pub fn aggregate(records: &[IndicatorRecord], year: i32, roster: &Roster) -> IndicatorMatrix {
    if records.is_empty() {
        return IndicatorMatrix::empty(year);
    }

    let mut columns: BTreeMap<String, Vec<&IndicatorRecord>> = BTreeMap::new();
    for record in records {
        columns
            .entry(roster.display_name(record.entity))
            .or_default()
            .push(record);
    }

    let rows = IndicatorKey::ALL
        .iter()
        .map(|&key| {
            let values: Vec<f64> = columns
                .values()
                .map(|group| group.iter().map(|r| r.get(key)).sum::<f64>() / group.len() as f64)
                .collect();

            // mean over entity columns only, computed before any derived column
            let mean = values.iter().sum::<f64>() / values.len() as f64;

            let cells = values
                .into_iter()
                .map(|value| {
                    let deviation = deviation_pct(value, mean);
                    EntityCell {
                        value,
                        deviation_pct: deviation,
                        classification: classify(deviation),
                    }
                })
                .collect();

            IndicatorRow {
                key,
                label: key.label(),
                cells,
                mean,
                interpretation: key.interpretation(),
                formula: key.formula(),
            }
        })
        .collect();

    IndicatorMatrix {
        year,
        entities: columns.into_keys().collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fiscal_core::EntityId;

    fn record(id: u32, revenue_per_capita: f64) -> IndicatorRecord {
        IndicatorRecord::from_fn(EntityId(id), 2021, |key| match key {
            IndicatorKey::RevenuePerCapita => revenue_per_capita,
            _ => 0.0,
        })
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(0.0), DeviationClass::Low);
        assert_eq!(classify(10.0), DeviationClass::Low);
        assert_eq!(classify(-10.0), DeviationClass::Low);
        assert_eq!(classify(10.0001), DeviationClass::Moderate);
        assert_eq!(classify(30.0), DeviationClass::Moderate);
        assert_eq!(classify(-30.0), DeviationClass::Moderate);
        assert_eq!(classify(30.0001), DeviationClass::High);
        assert_eq!(classify(-60.0), DeviationClass::High);
        assert_eq!(classify(30.0001).as_u8(), 3);
    }

    #[test]
    fn test_deviation_pct() {
        assert_eq!(deviation_pct(20.0, 20.0), 0.0);
        assert_relative_eq!(deviation_pct(30.0, 20.0), 50.0);
        assert_relative_eq!(deviation_pct(10.0, 20.0), -50.0);
        assert_eq!(deviation_pct(5.0, 0.0), 0.0);
        assert_eq!(deviation_pct(f64::INFINITY, 1.0), 0.0);
    }

    #[test]
    fn test_mean_over_entity_columns() {
        let records = vec![record(3304557, 10.0), record(3304904, 20.0), record(3301702, 30.0)];
        let matrix = aggregate(&records, 2021, &Roster::default());

        let row = matrix.row(IndicatorKey::RevenuePerCapita).unwrap();
        assert_relative_eq!(row.mean, 20.0);
        assert_eq!(row.cells[1].deviation_pct, 0.0);
        assert_relative_eq!(row.cells[2].deviation_pct, 50.0);
        assert_eq!(row.cells[2].classification, DeviationClass::High);
    }

    #[test]
    fn test_empty_records_give_empty_matrix() {
        let matrix = aggregate(&[], 2020, &Roster::default());
        assert!(matrix.is_empty());
        assert!(matrix.rows.is_empty());
        assert_eq!(matrix.year, 2020);
    }

    #[test]
    fn test_columns_renamed_and_sorted() {
        let records = vec![record(3301009, 1.0), record(3304557, 2.0), record(9999999, 3.0)];
        let matrix = aggregate(&records, 2021, &Roster::default());

        assert_eq!(
            matrix.entities,
            vec!["1_Rio de Janeiro", "5_Campos dos Goytacazes", "9999999"]
        );
        assert_relative_eq!(matrix.cell(IndicatorKey::RevenuePerCapita, "1_Rio de Janeiro").unwrap().value, 2.0);
    }

    #[test]
    fn test_rows_carry_metadata() {
        let matrix = aggregate(&[record(3304557, 1.0)], 2019, &Roster::default());

        assert_eq!(matrix.rows.len(), IndicatorKey::ALL.len());
        let row = matrix.row(IndicatorKey::GeneralIndebtedness).unwrap();
        assert_eq!(row.label, "F1_Endividamento Geral");
        assert_eq!(row.formula, "(Passivo Exigível / Ativo Total) x 100");
        assert_eq!(row.interpretation, "Quanto do Ativo está Endividado?");
    }

    #[test]
    fn test_zero_mean_row_has_zero_deviation() {
        let matrix = aggregate(&[record(3304557, 0.0), record(3304904, 0.0)], 2021, &Roster::default());
        let row = matrix.row(IndicatorKey::IssPerCapita).unwrap();

        assert_eq!(row.mean, 0.0);
        assert!(row.cells.iter().all(|c| c.deviation_pct == 0.0));
        assert!(row.cells.iter().all(|c| c.classification == DeviationClass::Low));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = vec![record(3304557, 10.0), record(3304904, 40.0)];
        let first = aggregate(&records, 2021, &Roster::default());
        let second = aggregate(&records, 2021, &Roster::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_classification_as_number() {
        let matrix = aggregate(&[record(3304557, 10.0), record(3304904, 40.0)], 2021, &Roster::default());
        let json = serde_json::to_value(&matrix).unwrap();

        assert_eq!(json["rows"][1]["cells"][0]["classification"], 3);
        assert_eq!(json["rows"][1]["label"], "A2_Receita Total per Capita");
    }
}
