use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::IndicatorKey;

/// IBGE municipality code (UF code followed by the municipality code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntityId)
    }
}

/// The four statement annexes the indicator panel is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnexKind {
    /// RREO Annex 01: budget balance (revenue and expense by economic category)
    RreoAnnex01,
    /// RREO Annex 02: expense by function
    RreoAnnex02,
    /// RREO Annex 03: net current revenue
    RreoAnnex03,
    /// DCA Annex I-AB: balance sheet assets and liabilities
    DcaAnnexIAB,
}

impl AnnexKind {
    pub const ALL: [AnnexKind; 4] = [
        AnnexKind::RreoAnnex01,
        AnnexKind::RreoAnnex02,
        AnnexKind::RreoAnnex03,
        AnnexKind::DcaAnnexIAB,
    ];

    /// Annex identifier as the remote service expects it in `no_anexo`.
    pub fn identifier(&self) -> &'static str {
        match self {
            AnnexKind::RreoAnnex01 => "RREO-Anexo 01",
            AnnexKind::RreoAnnex02 => "RREO-Anexo 02",
            AnnexKind::RreoAnnex03 => "RREO-Anexo 03",
            AnnexKind::DcaAnnexIAB => "DCA-Anexo I-AB",
        }
    }

    /// Budget-execution annexes are bimonthly reports; the balance sheet is annual.
    pub fn is_budget_execution(&self) -> bool {
        !matches!(self, AnnexKind::DcaAnnexIAB)
    }
}

impl fmt::Display for AnnexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// One line item of a published statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Account label (`conta`)
    #[serde(default)]
    pub label: Option<String>,
    /// Account code (`cod_conta`)
    #[serde(default)]
    pub code: Option<String>,
    /// Reporting column tag (`coluna`)
    #[serde(default)]
    pub column: Option<String>,
    /// Monetary value (`valor`)
    #[serde(default)]
    pub value: Option<f64>,
}

impl StatementLine {
    pub fn new(code: &str, label: &str, column: &str, value: f64) -> Self {
        Self {
            label: Some(label.to_string()),
            code: Some(code.to_string()),
            column: Some(column.to_string()),
            value: Some(value),
        }
    }

    /// Value with absence coerced to zero.
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// All line items of one annex for one (entity, year). Empty is a valid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    pub annex: AnnexKind,
    pub lines: Vec<StatementLine>,
}

impl StatementTable {
    pub fn new(annex: AnnexKind, lines: Vec<StatementLine>) -> Self {
        Self { annex, lines }
    }

    pub fn empty(annex: AnnexKind) -> Self {
        Self { annex, lines: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// The four tables of one (entity, year). Only built once every fetch succeeded.
#[derive(Debug, Clone)]
pub struct StatementSet {
    pub rreo_01: StatementTable,
    pub rreo_02: StatementTable,
    pub rreo_03: StatementTable,
    pub dca_ab: StatementTable,
}

impl StatementSet {
    pub fn table(&self, annex: AnnexKind) -> &StatementTable {
        match annex {
            AnnexKind::RreoAnnex01 => &self.rreo_01,
            AnnexKind::RreoAnnex02 => &self.rreo_02,
            AnnexKind::RreoAnnex03 => &self.rreo_03,
            AnnexKind::DcaAnnexIAB => &self.dca_ab,
        }
    }
}

/// Computed indicator values for one entity and year.
///
/// Every [`IndicatorKey`] is present and every value is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRecord {
    pub entity: EntityId,
    pub year: i32,
    values: BTreeMap<IndicatorKey, f64>,
}

impl IndicatorRecord {
    /// Build a record by evaluating `f` for every indicator. Non-finite results become 0.
    pub fn from_fn(entity: EntityId, year: i32, mut f: impl FnMut(IndicatorKey) -> f64) -> Self {
        let values = IndicatorKey::ALL
            .iter()
            .map(|&key| {
                let v = f(key);
                (key, if v.is_finite() { v } else { 0.0 })
            })
            .collect();
        Self { entity, year, values }
    }

    pub fn get(&self, key: IndicatorKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_has_every_key_and_sanitizes_non_finite() {
        let record = IndicatorRecord::from_fn(EntityId(3304557), 2021, |key| match key {
            IndicatorKey::RevenuePerCapita => f64::INFINITY,
            IndicatorKey::IptuPerCapita => f64::NAN,
            _ => 1.5,
        });

        assert_eq!(record.len(), IndicatorKey::ALL.len());
        assert_eq!(record.get(IndicatorKey::RevenuePerCapita), 0.0);
        assert_eq!(record.get(IndicatorKey::IptuPerCapita), 0.0);
        assert_eq!(record.get(IndicatorKey::GdpPerCapita), 1.5);
        assert!(record.iter().all(|(_, v)| v.is_finite()));
    }

    #[test]
    fn test_missing_value_counts_as_zero() {
        let line = StatementLine { label: Some("IPTU".to_string()), ..Default::default() };
        assert_eq!(line.value_or_zero(), 0.0);
        assert_eq!(StatementLine::new("X", "Y", "Z", 4.0).value_or_zero(), 4.0);
    }

    #[test]
    fn test_annex_identifiers() {
        assert_eq!(AnnexKind::RreoAnnex02.identifier(), "RREO-Anexo 02");
        assert_eq!(AnnexKind::DcaAnnexIAB.to_string(), "DCA-Anexo I-AB");
        assert!(AnnexKind::RreoAnnex03.is_budget_execution());
        assert!(!AnnexKind::DcaAnnexIAB.is_budget_execution());
    }

    #[test]
    fn test_entity_id_parse() {
        assert_eq!(" 3304557 ".parse::<EntityId>().unwrap(), EntityId(3304557));
        assert!("rio".parse::<EntityId>().is_err());
    }
}
