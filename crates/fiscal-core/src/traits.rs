use async_trait::async_trait;
use crate::{AnnexKind, EntityId, FiscalError, StatementTable};

/// Source of published fiscal statements (RREO / DCA annexes).
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn fetch_statement(
        &self,
        entity: EntityId,
        year: i32,
        annex: AnnexKind,
    ) -> Result<StatementTable, FiscalError>;
}

/// Per-entity reference figures that do not come from the statements.
///
/// `None` means the figure is absent for that entity/year; callers decide the default.
pub trait ReferenceData: Send + Sync {
    fn gdp_per_capita(&self, entity: EntityId, year: i32) -> Option<f64>;
    fn population(&self, entity: EntityId, year: i32) -> Option<f64>;
}
