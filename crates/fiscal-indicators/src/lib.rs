pub mod calculator;
pub mod extractor;
pub mod scalars;

pub use calculator::{compute_indicators, safe_division, IndicatorCalculator, ReferenceFigures, SkipReason};
pub use extractor::{extract, AccountMatch, ScalarQuery};
pub use scalars::StatementScalars;
