//! Account queries against the SICONFI chart of accounts.
//!
//! Codes, labels and column tags are the literal values published in the
//! RREO and DCA annexes and must match them byte for byte.

use fiscal_core::StatementSet;

use crate::extractor::{extract, ScalarQuery};

const REVENUE_TO_DATE: &str = "Até o Bimestre (c)";
const SETTLED_EXPENSE_H: &str = "DESPESAS LIQUIDADAS ATÉ O BIMESTRE (h)";
const SETTLED_EXPENSE_D: &str = "DESPESAS LIQUIDADAS ATÉ O BIMESTRE (d)";
const LAST_12_MONTHS: &str = "TOTAL (ÚLTIMOS 12 MESES)";
const UPDATED_FORECAST: &str = "PREVISÃO ATUALIZADA (a)";
const INITIAL_APPROPRIATION: &str = "DOTAÇÃO INICIAL (d)";

use fiscal_core::AnnexKind::{DcaAnnexIAB as DCA, RreoAnnex01 as RREO1, RreoAnnex02 as RREO2, RreoAnnex03 as RREO3};

pub const TOTAL_REVENUE: ScalarQuery = ScalarQuery::code(RREO1, &["TotalReceitas"], Some(REVENUE_TO_DATE));
pub const IPTU_REVENUE: ScalarQuery = ScalarQuery::label_contains(RREO3, "IPTU", LAST_12_MONTHS);
pub const ISS_REVENUE: ScalarQuery = ScalarQuery::label_contains(RREO3, "ISS", LAST_12_MONTHS);
pub const ACTIVE_DEBT: ScalarQuery = ScalarQuery::code(DCA, &["P1.1.2.5.0.00.00", "P1.2.1.1.1.04.00"], None);
pub const TOTAL_EXPENSE: ScalarQuery = ScalarQuery::code(RREO1, &["TotalDespesas"], Some(SETTLED_EXPENSE_H));
pub const INVESTMENT_EXPENSE: ScalarQuery = ScalarQuery::code(RREO1, &["Investimentos"], Some(SETTLED_EXPENSE_H));
pub const HEALTH_EXPENSE: ScalarQuery =
    ScalarQuery::code_and_label(RREO2, "RREO2TotalDespesas", "Saúde", SETTLED_EXPENSE_D);
pub const EDUCATION_EXPENSE: ScalarQuery =
    ScalarQuery::code_and_label(RREO2, "RREO2TotalDespesas", "Educação", SETTLED_EXPENSE_D);
pub const LEGISLATIVE_EXPENSE: ScalarQuery =
    ScalarQuery::code_and_label(RREO2, "RREO2TotalDespesas", "Legislativa", SETTLED_EXPENSE_D);
pub const TAX_REVENUE: ScalarQuery = ScalarQuery::code(RREO1, &["ReceitaTributaria"], Some(REVENUE_TO_DATE));
pub const CURRENT_TRANSFERS: ScalarQuery =
    ScalarQuery::code(RREO1, &["TransferenciasCorrentes"], Some(REVENUE_TO_DATE));

pub const CURRENT_ASSETS: ScalarQuery = ScalarQuery::code(DCA, &["P1.1.0.0.0.00.00"], None);
pub const AVAILABLE_CURRENT_ASSETS: ScalarQuery = ScalarQuery::code(DCA, &["P1.1.1.0.0.00.00"], None);
pub const NON_CURRENT_ASSETS: ScalarQuery = ScalarQuery::code(DCA, &["P1.2.0.0.0.00.00"], None);
pub const CURRENT_LIABILITIES: ScalarQuery = ScalarQuery::code(DCA, &["P2.1.0.0.0.00.00"], None);
pub const NON_CURRENT_LIABILITIES: ScalarQuery = ScalarQuery::code(DCA, &["P2.2.0.0.0.00.00"], None);
pub const RESTITUTION_DEPOSITS: ScalarQuery = ScalarQuery::code(DCA, &["P2.1.8.8.0.00.00"], None);
pub const INVENTORY: ScalarQuery = ScalarQuery::code(DCA, &["P1.1.5.0.0.00.00"], None);
pub const TOTAL_ASSETS: ScalarQuery = ScalarQuery::code(DCA, &["P1.0.0.0.0.00.00"], None);
pub const LIABILITIES: ScalarQuery = ScalarQuery::code(DCA, &["P2.1.0.0.0.00.00", "P2.2.0.0.0.00.00"], None);
pub const FIXED_ASSETS: ScalarQuery = ScalarQuery::code(DCA, &["P1.2.3.0.0.00.00"], None);
pub const INVESTMENT_ASSETS: ScalarQuery = ScalarQuery::code(DCA, &["P1.1.4.0.0.00.00"], None);
pub const NET_EQUITY: ScalarQuery = ScalarQuery::code(DCA, &["P2.3.0.0.0.00.00"], None);

pub const CURRENT_EXPENSE: ScalarQuery = ScalarQuery::code(RREO1, &["DespesasCorrentes"], Some(SETTLED_EXPENSE_H));
pub const CURRENT_REVENUE: ScalarQuery = ScalarQuery::code(RREO1, &["ReceitasCorrentes"], Some(REVENUE_TO_DATE));
pub const CAPITAL_EXPENSE: ScalarQuery = ScalarQuery::code(RREO1, &["DespesasDeCapital"], Some(SETTLED_EXPENSE_H));
pub const CAPITAL_REVENUE: ScalarQuery = ScalarQuery::code(RREO1, &["ReceitasDeCapital"], Some(REVENUE_TO_DATE));
pub const PERSONNEL_EXPENSE: ScalarQuery =
    ScalarQuery::code(RREO1, &["PessoalEEncargosSociais"], Some(SETTLED_EXPENSE_H));
pub const NET_CURRENT_REVENUE: ScalarQuery =
    ScalarQuery::code(RREO3, &["RREO3ReceitaCorrenteLiquida"], Some(LAST_12_MONTHS));
pub const FORECAST_REVENUE: ScalarQuery = ScalarQuery::code(RREO1, &["TotalReceitas"], Some(UPDATED_FORECAST));
pub const FIXED_EXPENSE: ScalarQuery = ScalarQuery::code(RREO1, &["TotalDespesas"], Some(INITIAL_APPROPRIATION));
pub const CREDIT_OPERATIONS: ScalarQuery =
    ScalarQuery::code(RREO1, &["ReceitasDeOperacoesDeCredito"], Some(REVENUE_TO_DATE));
pub const DEBT_INTEREST: ScalarQuery =
    ScalarQuery::code(RREO1, &["JurosEEncargosDaDivida"], Some(SETTLED_EXPENSE_H));

/// Accounting quantities pulled from one entity's statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementScalars {
    pub total_revenue: f64,
    pub iptu_revenue: f64,
    pub iss_revenue: f64,
    pub active_debt: f64,
    pub total_expense: f64,
    pub investment_expense: f64,
    pub health_expense: f64,
    pub education_expense: f64,
    pub legislative_expense: f64,
    pub tax_revenue: f64,
    pub current_transfers: f64,
    pub current_assets: f64,
    pub available_current_assets: f64,
    pub non_current_assets: f64,
    pub current_liabilities: f64,
    pub non_current_liabilities: f64,
    pub restitution_deposits: f64,
    pub inventory: f64,
    pub total_assets: f64,
    pub liabilities: f64,
    pub fixed_assets: f64,
    pub investment_assets: f64,
    pub net_equity: f64,
    pub current_expense: f64,
    pub current_revenue: f64,
    pub capital_expense: f64,
    pub capital_revenue: f64,
    pub personnel_expense: f64,
    pub net_current_revenue: f64,
    pub forecast_revenue: f64,
    pub fixed_expense: f64,
    pub credit_operations: f64,
    pub debt_interest: f64,
}

impl StatementScalars {
    pub fn from_statements(set: &StatementSet) -> Self {
        let get = |query: &ScalarQuery| extract(set.table(query.annex), query);

        Self {
            total_revenue: get(&TOTAL_REVENUE),
            iptu_revenue: get(&IPTU_REVENUE),
            iss_revenue: get(&ISS_REVENUE),
            active_debt: get(&ACTIVE_DEBT),
            total_expense: get(&TOTAL_EXPENSE),
            investment_expense: get(&INVESTMENT_EXPENSE),
            health_expense: get(&HEALTH_EXPENSE),
            education_expense: get(&EDUCATION_EXPENSE),
            legislative_expense: get(&LEGISLATIVE_EXPENSE),
            tax_revenue: get(&TAX_REVENUE),
            current_transfers: get(&CURRENT_TRANSFERS),
            current_assets: get(&CURRENT_ASSETS),
            available_current_assets: get(&AVAILABLE_CURRENT_ASSETS),
            non_current_assets: get(&NON_CURRENT_ASSETS),
            current_liabilities: get(&CURRENT_LIABILITIES),
            non_current_liabilities: get(&NON_CURRENT_LIABILITIES),
            restitution_deposits: get(&RESTITUTION_DEPOSITS),
            inventory: get(&INVENTORY),
            total_assets: get(&TOTAL_ASSETS),
            liabilities: get(&LIABILITIES),
            fixed_assets: get(&FIXED_ASSETS),
            investment_assets: get(&INVESTMENT_ASSETS),
            net_equity: get(&NET_EQUITY),
            current_expense: get(&CURRENT_EXPENSE),
            current_revenue: get(&CURRENT_REVENUE),
            capital_expense: get(&CAPITAL_EXPENSE),
            capital_revenue: get(&CAPITAL_REVENUE),
            personnel_expense: get(&PERSONNEL_EXPENSE),
            net_current_revenue: get(&NET_CURRENT_REVENUE),
            forecast_revenue: get(&FORECAST_REVENUE),
            fixed_expense: get(&FIXED_EXPENSE),
            credit_operations: get(&CREDIT_OPERATIONS),
            debt_interest: get(&DEBT_INTEREST),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fiscal_core::{StatementLine, StatementTable};

    fn empty_set() -> StatementSet {
        StatementSet {
            rreo_01: StatementTable::empty(RREO1),
            rreo_02: StatementTable::empty(RREO2),
            rreo_03: StatementTable::empty(RREO3),
            dca_ab: StatementTable::empty(DCA),
        }
    }

    #[test]
    fn test_empty_statements_give_all_zero_scalars() {
        assert_eq!(StatementScalars::from_statements(&empty_set()), StatementScalars::default());
    }

    #[test]
    fn test_same_code_different_columns() {
        let mut set = empty_set();
        set.rreo_01 = StatementTable::new(
            RREO1,
            vec![
                StatementLine::new("TotalReceitas", "TOTAL DAS RECEITAS", REVENUE_TO_DATE, 950.0),
                StatementLine::new("TotalReceitas", "TOTAL DAS RECEITAS", UPDATED_FORECAST, 1000.0),
                StatementLine::new("TotalDespesas", "TOTAL DAS DESPESAS", SETTLED_EXPENSE_H, 900.0),
                StatementLine::new("TotalDespesas", "TOTAL DAS DESPESAS", INITIAL_APPROPRIATION, 1200.0),
            ],
        );
        let scalars = StatementScalars::from_statements(&set);

        assert_relative_eq!(scalars.total_revenue, 950.0);
        assert_relative_eq!(scalars.forecast_revenue, 1000.0);
        assert_relative_eq!(scalars.total_expense, 900.0);
        assert_relative_eq!(scalars.fixed_expense, 1200.0);
    }

    #[test]
    fn test_balance_sheet_ignores_column() {
        let mut set = empty_set();
        set.dca_ab = StatementTable::new(
            DCA,
            vec![
                StatementLine::new("P2.1.0.0.0.00.00", "Passivo Circulante", "Saldo Final", 300.0),
                StatementLine::new("P2.2.0.0.0.00.00", "Passivo Não Circulante", "Saldo Final", 700.0),
                StatementLine::new("P1.1.2.5.0.00.00", "Dívida Ativa Tributária", "Saldo Final", 50.0),
                StatementLine::new("P1.2.1.1.1.04.00", "Dívida Ativa Tributária LP", "Saldo Final", 150.0),
            ],
        );
        let scalars = StatementScalars::from_statements(&set);

        assert_relative_eq!(scalars.current_liabilities, 300.0);
        assert_relative_eq!(scalars.non_current_liabilities, 700.0);
        assert_relative_eq!(scalars.liabilities, 1000.0);
        assert_relative_eq!(scalars.active_debt, 200.0);
    }

    #[test]
    fn test_function_expenses_from_annex_02() {
        let mut set = empty_set();
        set.rreo_02 = StatementTable::new(
            RREO2,
            vec![
                StatementLine::new("RREO2TotalDespesas", "Saúde", SETTLED_EXPENSE_D, 80.0),
                StatementLine::new("RREO2TotalDespesas", "Educação", SETTLED_EXPENSE_D, 90.0),
                StatementLine::new("RREO2TotalDespesas", "Legislativa", SETTLED_EXPENSE_D, 10.0),
                StatementLine::new("RREO2TotalDespesas", "Saúde", "DESPESAS EMPENHADAS ATÉ O BIMESTRE (b)", 99.0),
            ],
        );
        let scalars = StatementScalars::from_statements(&set);

        assert_relative_eq!(scalars.health_expense, 80.0);
        assert_relative_eq!(scalars.education_expense, 90.0);
        assert_relative_eq!(scalars.legislative_expense, 10.0);
    }
}
