use fiscal_core::{EntityId, IndicatorRecord, ReferenceData, Roster, StatementSource};
use fiscal_indicators::{IndicatorCalculator, SkipReason};
use serde::Serialize;
use std::fmt;
use tokio::sync::Mutex;

pub mod aggregator;
pub mod cache;

pub use aggregator::{aggregate, classify, deviation_pct, DeviationClass, EntityCell, IndicatorMatrix, IndicatorRow};
pub use cache::{PanelCache, PanelKey};

/// An entity left out of a run, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEntity {
    pub entity: EntityId,
    pub name: String,
    pub year: i32,
    pub reason: String,
}

impl fmt::Display for SkippedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not compute indicators for {} in {}; skipping this municipality ({})",
            self.name, self.year, self.reason
        )
    }
}

/// Result of one panel computation. Partial results are normal: any entity
/// that could not be computed is listed in `skipped`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRun {
    pub matrix: IndicatorMatrix,
    pub skipped: Vec<SkippedEntity>,
}

/// Computes indicator panels for a selection of municipalities, keeping the
/// last result until the year or the selection changes.
pub struct FiscalPanel<S, R> {
    source: S,
    reference: R,
    roster: Roster,
    calculator: IndicatorCalculator,
    cache: Mutex<PanelCache>,
}

impl<S, R> FiscalPanel<S, R>
where
    S: StatementSource,
    R: ReferenceData,
{
    pub fn new(source: S, reference: R, roster: Roster) -> Self {
        Self {
            source,
            reference,
            roster,
            calculator: IndicatorCalculator::new(),
            cache: Mutex::new(PanelCache::new()),
        }
    }

    /// Panel for `year` over `entities`, served from the cache when the same
    /// year and entity set was computed last.
    pub async fn run(&self, year: i32, entities: &[EntityId]) -> PanelRun {
        let key = PanelKey::new(year, entities);
        let mut cache = self.cache.lock().await;

        if let Some(run) = cache.get(&key) {
            let run = run.clone();
            if let Some(computed_at) = cache.computed_at() {
                tracing::info!(
                    "Serving cached panel for {} ({} entities), computed at {}",
                    year,
                    key.entities().len(),
                    computed_at.to_rfc3339()
                );
            }
            return run;
        }

        let run = self.compute(&key).await;
        cache.store(key, run.clone());
        run
    }

    /// Drop the cached panel so the next `run` recomputes.
    pub async fn invalidate(&self) {
        self.cache.lock().await.invalidate();
    }

    async fn compute(&self, key: &PanelKey) -> PanelRun {
        let year = key.year;
        tracing::info!("Computing panel for {} ({} entities)", year, key.entities().len());

        let mut records: Vec<IndicatorRecord> = Vec::with_capacity(key.entities().len());
        let mut skipped = Vec::new();

        for &entity in key.entities() {
            let name = self.roster.display_name(entity);
            match self
                .calculator
                .compute(&self.source, &self.reference, entity, year)
                .await
            {
                Ok(record) => {
                    tracing::info!("{} {}: {} indicators", name, year, record.len());
                    records.push(record);
                }
                Err(reason) => {
                    let notice = skip_notice(entity, name, year, &reason);
                    tracing::warn!("{}", notice);
                    skipped.push(notice);
                }
            }
        }

        let matrix = aggregate(&records, year, &self.roster);
        tracing::info!(
            "Panel for {}: {} computed, {} skipped",
            year,
            matrix.entities.len(),
            skipped.len()
        );

        PanelRun { matrix, skipped }
    }
}

fn skip_notice(entity: EntityId, name: String, year: i32, reason: &SkipReason) -> SkippedEntity {
    SkippedEntity {
        entity,
        name,
        year,
        reason: reason.to_string(),
    }
}
