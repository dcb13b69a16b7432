use fiscal_core::{
    AnnexKind, EntityId, FiscalError, IndicatorKey, IndicatorRecord, ReferenceData, StatementSet,
    StatementSource,
};
use thiserror::Error;

use crate::scalars::StatementScalars;

/// Why an entity was left out of a panel. Both cases are recoverable.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("statements unavailable: {0}")]
    Fetch(#[from] FiscalError),

    #[error("no population or GDP reference data")]
    NoReferenceData,
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn safe_division(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Reference figures for one entity and year, absent values already coerced to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceFigures {
    pub population: f64,
    pub gdp_per_capita: f64,
}

impl ReferenceFigures {
    pub fn lookup<R: ReferenceData + ?Sized>(reference: &R, entity: EntityId, year: i32) -> Self {
        Self {
            population: reference.population(entity, year).unwrap_or(0.0),
            gdp_per_capita: reference.gdp_per_capita(entity, year).unwrap_or(0.0),
        }
    }

    /// Both figures missing means the entity is not covered by the reference base.
    pub fn is_missing(&self) -> bool {
        self.population == 0.0 && self.gdp_per_capita == 0.0
    }
}

/// Derive every indicator from the extracted scalars and the reference figures.
pub fn compute_indicators(
    entity: EntityId,
    year: i32,
    s: &StatementScalars,
    reference: ReferenceFigures,
) -> IndicatorRecord {
    let pop = reference.population;
    let own_current_revenue = s.current_revenue - s.current_transfers;
    let payable = s.current_liabilities + s.non_current_liabilities;

    IndicatorRecord::from_fn(entity, year, |key| {
        let value = match key {
            IndicatorKey::GdpPerCapita => reference.gdp_per_capita,
            IndicatorKey::RevenuePerCapita => safe_division(s.total_revenue, pop),
            IndicatorKey::IptuPerCapita => safe_division(s.iptu_revenue, pop),
            IndicatorKey::IssPerCapita => safe_division(s.iss_revenue, pop),
            IndicatorKey::ActiveDebtPerCapita => safe_division(s.active_debt, pop),
            IndicatorKey::BudgetExpensePerCapita => safe_division(s.total_expense, pop),
            IndicatorKey::InvestmentPerCapita => safe_division(s.investment_expense, pop),
            IndicatorKey::HealthPerCapita => safe_division(s.health_expense, pop),
            IndicatorKey::EducationPerCapita => safe_division(s.education_expense, pop),
            IndicatorKey::LegislativePerCapita => safe_division(s.legislative_expense, pop),
            IndicatorKey::TaxRevenuePerCapita => safe_division(s.tax_revenue, pop),
            IndicatorKey::TransferRevenuePerCapita => safe_division(s.current_transfers, pop),

            IndicatorKey::ImmediateLiquidity => safe_division(s.available_current_assets, s.current_liabilities),
            IndicatorKey::ThirdPartyLiquidity => safe_division(s.available_current_assets, s.restitution_deposits),
            IndicatorKey::CurrentLiquidity => safe_division(s.current_assets, s.current_liabilities),
            IndicatorKey::QuickLiquidity => safe_division(s.current_assets - s.inventory, s.current_liabilities),
            IndicatorKey::GeneralLiquidity => safe_division(s.current_assets + s.non_current_assets, payable),
            IndicatorKey::GeneralSolvency => safe_division(s.total_assets, payable),

            IndicatorKey::GeneralIndebtedness => safe_division(s.liabilities, s.total_assets),
            IndicatorKey::LiabilityComposition => safe_division(s.current_liabilities, s.liabilities),
            IndicatorKey::EquityImmobilization => safe_division(s.fixed_assets + s.investment_assets, s.net_equity),
            IndicatorKey::CurrentCategoryCommitment => safe_division(s.current_expense, s.current_revenue),
            IndicatorKey::CapitalCategoryCommitment => safe_division(s.capital_expense, s.capital_revenue),

            // G1 and G2 are measured against current expense, not total budget expense
            IndicatorKey::PersonnelToBudgetExpense => safe_division(s.personnel_expense, s.current_expense),
            IndicatorKey::InvestmentToBudgetExpense => safe_division(s.investment_expense, s.current_expense),
            IndicatorKey::PersonnelToNetCurrentRevenue => safe_division(s.personnel_expense, s.net_current_revenue),
            IndicatorKey::OwnCurrentRevenue => safe_division(own_current_revenue, s.current_revenue),

            IndicatorKey::RevenueExecution => safe_division(s.total_revenue, s.forecast_revenue),
            IndicatorKey::ExpenseExecution => safe_division(s.total_expense, s.fixed_expense),
            IndicatorKey::ExecutionResult => safe_division(s.total_expense, s.total_revenue),
            IndicatorKey::BudgetAutonomy => safe_division(own_current_revenue, s.total_expense),
            IndicatorKey::DebtAmortization => safe_division(s.credit_operations, s.total_expense),
            IndicatorKey::DebtChargesToExpense => safe_division(s.debt_interest, s.total_expense),
        };
        if key.is_percentage() {
            value * 100.0
        } else {
            value
        }
    })
}

pub struct IndicatorCalculator;

impl IndicatorCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Fetch the four annexes in order. Any failure abandons the whole set.
    pub async fn fetch_statements<S: StatementSource + ?Sized>(
        &self,
        source: &S,
        entity: EntityId,
        year: i32,
    ) -> Result<StatementSet, FiscalError> {
        Ok(StatementSet {
            rreo_01: source.fetch_statement(entity, year, AnnexKind::RreoAnnex01).await?,
            rreo_02: source.fetch_statement(entity, year, AnnexKind::RreoAnnex02).await?,
            rreo_03: source.fetch_statement(entity, year, AnnexKind::RreoAnnex03).await?,
            dca_ab: source.fetch_statement(entity, year, AnnexKind::DcaAnnexIAB).await?,
        })
    }

    /// Compute the indicator record of one entity for one year.
    pub async fn compute<S, R>(
        &self,
        source: &S,
        reference: &R,
        entity: EntityId,
        year: i32,
    ) -> Result<IndicatorRecord, SkipReason>
    where
        S: StatementSource + ?Sized,
        R: ReferenceData + ?Sized,
    {
        let statements = self.fetch_statements(source, entity, year).await?;

        let figures = ReferenceFigures::lookup(reference, entity, year);
        if figures.is_missing() {
            return Err(SkipReason::NoReferenceData);
        }

        let scalars = StatementScalars::from_statements(&statements);
        tracing::debug!(
            "{} {}: revenue={:.2} expense={:.2} population={}",
            entity,
            year,
            scalars.total_revenue,
            scalars.total_expense,
            figures.population
        );

        Ok(compute_indicators(entity, year, &scalars, figures))
    }
}

impl Default for IndicatorCalculator {
    fn default() -> Self {
        Self::new()
    }
}
