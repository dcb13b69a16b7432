use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator groups
///
/// - A: wealth and revenue per inhabitant
/// - B: expense per inhabitant
/// - C: revenue composition per inhabitant
/// - D/E: liquidity and solvency (balance sheet)
/// - F: indebtedness and commitment of economic categories
/// - G: expense composition
/// - H: budget execution
///
/// Declaration order is the display order of the panel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKey {
    GdpPerCapita,
    RevenuePerCapita,
    IptuPerCapita,
    IssPerCapita,
    ActiveDebtPerCapita,
    BudgetExpensePerCapita,
    InvestmentPerCapita,
    HealthPerCapita,
    EducationPerCapita,
    LegislativePerCapita,
    TaxRevenuePerCapita,
    TransferRevenuePerCapita,
    ImmediateLiquidity,
    ThirdPartyLiquidity,
    CurrentLiquidity,
    QuickLiquidity,
    GeneralLiquidity,
    GeneralSolvency,
    GeneralIndebtedness,
    LiabilityComposition,
    EquityImmobilization,
    CurrentCategoryCommitment,
    CapitalCategoryCommitment,
    PersonnelToBudgetExpense,
    InvestmentToBudgetExpense,
    PersonnelToNetCurrentRevenue,
    OwnCurrentRevenue,
    RevenueExecution,
    ExpenseExecution,
    ExecutionResult,
    BudgetAutonomy,
    DebtAmortization,
    DebtChargesToExpense,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 33] = [
        IndicatorKey::GdpPerCapita,
        IndicatorKey::RevenuePerCapita,
        IndicatorKey::IptuPerCapita,
        IndicatorKey::IssPerCapita,
        IndicatorKey::ActiveDebtPerCapita,
        IndicatorKey::BudgetExpensePerCapita,
        IndicatorKey::InvestmentPerCapita,
        IndicatorKey::HealthPerCapita,
        IndicatorKey::EducationPerCapita,
        IndicatorKey::LegislativePerCapita,
        IndicatorKey::TaxRevenuePerCapita,
        IndicatorKey::TransferRevenuePerCapita,
        IndicatorKey::ImmediateLiquidity,
        IndicatorKey::ThirdPartyLiquidity,
        IndicatorKey::CurrentLiquidity,
        IndicatorKey::QuickLiquidity,
        IndicatorKey::GeneralLiquidity,
        IndicatorKey::GeneralSolvency,
        IndicatorKey::GeneralIndebtedness,
        IndicatorKey::LiabilityComposition,
        IndicatorKey::EquityImmobilization,
        IndicatorKey::CurrentCategoryCommitment,
        IndicatorKey::CapitalCategoryCommitment,
        IndicatorKey::PersonnelToBudgetExpense,
        IndicatorKey::InvestmentToBudgetExpense,
        IndicatorKey::PersonnelToNetCurrentRevenue,
        IndicatorKey::OwnCurrentRevenue,
        IndicatorKey::RevenueExecution,
        IndicatorKey::ExpenseExecution,
        IndicatorKey::ExecutionResult,
        IndicatorKey::BudgetAutonomy,
        IndicatorKey::DebtAmortization,
        IndicatorKey::DebtChargesToExpense,
    ];

    /// Row label shown in the panel. The trailing space on G4 is part of the published key.
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKey::GdpPerCapita => "A1_PIB per Capita",
            IndicatorKey::RevenuePerCapita => "A2_Receita Total per Capita",
            IndicatorKey::IptuPerCapita => "A3_IPTU per Capita",
            IndicatorKey::IssPerCapita => "A4_ISS per Capita",
            IndicatorKey::ActiveDebtPerCapita => "A5_Dívida Ativa per Capita",
            IndicatorKey::BudgetExpensePerCapita => "B1_Despesas Orçamentárias per Capita",
            IndicatorKey::InvestmentPerCapita => "B2_Investimentos per Capita",
            IndicatorKey::HealthPerCapita => "B3_Gastos com Saúde per Capita",
            IndicatorKey::EducationPerCapita => "B4_Gastos com Educação per Capita",
            IndicatorKey::LegislativePerCapita => "B5_Transferências para o Legislativo per Capita",
            IndicatorKey::TaxRevenuePerCapita => "C1_Receita Tributária per Capita",
            IndicatorKey::TransferRevenuePerCapita => "C2_Receita de Transferências per Capita",
            IndicatorKey::ImmediateLiquidity => "D1_Liquidez Instantânea ou Imediata",
            IndicatorKey::ThirdPartyLiquidity => "D3_Liquidez com recursos de terceiros",
            IndicatorKey::CurrentLiquidity => "D4_Liquidez Corrente",
            IndicatorKey::QuickLiquidity => "E2_Liquidez Seca",
            IndicatorKey::GeneralLiquidity => "E3_Liquidez Geral",
            IndicatorKey::GeneralSolvency => "E6_Solvência Geral",
            IndicatorKey::GeneralIndebtedness => "F1_Endividamento Geral",
            IndicatorKey::LiabilityComposition => "F2_Composição das Exigibilidades",
            IndicatorKey::EquityImmobilization => "F3_Imobilização do Patrimônio Líquido ou Capital Próprio",
            IndicatorKey::CurrentCategoryCommitment => "F4_Grau de Comprometimento da Categoria Econômica Corrente",
            IndicatorKey::CapitalCategoryCommitment => "F5_Grau de Comprometimento da Categoria Econômica de Capital",
            IndicatorKey::PersonnelToBudgetExpense => "G1_Grau de Gasto com Pessoal em relação a Despesa Orçamentária",
            IndicatorKey::InvestmentToBudgetExpense => "G2_Grau de Investimento em relação a Despesa Orçamentária",
            IndicatorKey::PersonnelToNetCurrentRevenue => "G3_Grau de Gasto com Pessoal em relação a Receita corrente Líquida",
            IndicatorKey::OwnCurrentRevenue => "G4_Grau de Receitas Correntes Próprias ",
            IndicatorKey::RevenueExecution => "H1_Grau de Execução Orçamentária da Receita",
            IndicatorKey::ExpenseExecution => "H2_Grau de Execução Orçamentária da Despesa",
            IndicatorKey::ExecutionResult => "H3_Grau do Resultado da Execução Orçamentária",
            IndicatorKey::BudgetAutonomy => "H4_Grau de Autonomia Orçamentária",
            IndicatorKey::DebtAmortization => "H5_Grau de Amortização e refinanciamento de dívida",
            IndicatorKey::DebtChargesToExpense => "H6_Grau de Encargos da dívida na despesa corrente",
        }
    }

    /// Question the indicator answers, for the reader of the panel.
    pub fn interpretation(&self) -> &'static str {
        match self {
            IndicatorKey::GdpPerCapita => "Renda média por habitante",
            IndicatorKey::RevenuePerCapita => "Arrecadação por habitante",
            IndicatorKey::IptuPerCapita => "Arrecadação de IPTU por habitante",
            IndicatorKey::IssPerCapita => "Arrecadação de ISS por habitante",
            IndicatorKey::ActiveDebtPerCapita => "Valor em Dívida Ativa por habitante",
            IndicatorKey::BudgetExpensePerCapita => "Quanto representa a Despesa por habitantes?",
            IndicatorKey::InvestmentPerCapita => "Quanto representa o investimento por habitantes?",
            IndicatorKey::HealthPerCapita => "Quanto representa o gasto com Saúde por pessoa?",
            IndicatorKey::EducationPerCapita => "Quanto representa o gasto com Educação por pessoa?",
            IndicatorKey::LegislativePerCapita => "Quanto representa o gasto com Legislativo por habitante?",
            IndicatorKey::TaxRevenuePerCapita => "Quanto representa a Receita Tributária por habitante?",
            IndicatorKey::TransferRevenuePerCapita => "Quanto representa a Receita de Transferências por habitante?",
            IndicatorKey::ImmediateLiquidity => "Hoje consegue pagar suas dívidas de um ano?",
            IndicatorKey::ThirdPartyLiquidity => "Hoje consegue pagar os recursos de terceiros? ",
            IndicatorKey::CurrentLiquidity => "Durante um ano consegue pagar suas dívidas?",
            IndicatorKey::QuickLiquidity => "Sem Estoque consegue pagar suas dívidas de um ano?",
            IndicatorKey::GeneralLiquidity => "No futuro conseguirá pagar suas dívidas?",
            IndicatorKey::GeneralSolvency => "No geral conseguirá pagar suas Dívidas?",
            IndicatorKey::GeneralIndebtedness => "Quanto do Ativo está Endividado?",
            IndicatorKey::LiabilityComposition => "Quanto representa o PC do total da Dívida?",
            IndicatorKey::EquityImmobilization => "Quanto os Ativos Investimento e Imobilizado usaram do Patrimônio Líquido?",
            IndicatorKey::CurrentCategoryCommitment => "Quanto a Despesa Corrente utilizou da Receita Corrente?",
            IndicatorKey::CapitalCategoryCommitment => "Quanto a Despesa de Capital utilizou da Receita de Capital?",
            IndicatorKey::PersonnelToBudgetExpense => "Quanto representou o Gasto com Pessoal em relação a Despesa Orçamentária?",
            IndicatorKey::InvestmentToBudgetExpense => "Quanto representou o Investimento em relação a Despesa Orçamentária?",
            IndicatorKey::PersonnelToNetCurrentRevenue => "Quanto representou o Gasto com Pessoal em relação Receita corrente Líquida?",
            IndicatorKey::OwnCurrentRevenue => "Qual o Grau de independência das Receitas Correntes? ",
            IndicatorKey::RevenueExecution => "Quanto da Receita foi Executada?",
            IndicatorKey::ExpenseExecution => "Quanto da Despesa foi Executada?",
            IndicatorKey::ExecutionResult => "Qual o grau do resultado da execução orçamentária?",
            IndicatorKey::BudgetAutonomy => "Quanto representa a receita própria em relação a despesa executada",
            IndicatorKey::DebtAmortization => "Quanto representam as operações de crédito em relação a despesa executada",
            IndicatorKey::DebtChargesToExpense => "Quanto representa a despesa financeira da despesa orçamentária",
        }
    }

    /// Formula text as published alongside the panel.
    pub fn formula(&self) -> &'static str {
        match self {
            IndicatorKey::GdpPerCapita => "PIB Total/ Nr Habitantes",
            IndicatorKey::RevenuePerCapita => "Receita Arrecadada / Nr Habitantes",
            IndicatorKey::IptuPerCapita => "IPTU / Nr Habitantes",
            IndicatorKey::IssPerCapita => "ISS / Nr Habitantes",
            IndicatorKey::ActiveDebtPerCapita => "Dívida Ativa / Nr Habitante",
            IndicatorKey::BudgetExpensePerCapita => "Despesa Executada / Nr Habitantes",
            IndicatorKey::InvestmentPerCapita => "Investimentos / Nr Habitantes",
            IndicatorKey::HealthPerCapita => "Despesas com Saúde / Nr Habitantes",
            IndicatorKey::EducationPerCapita => "Despesas com Educação / Nr Habitantes",
            IndicatorKey::LegislativePerCapita => "Transferência para o Legislativo / Nr de Habitantes",
            IndicatorKey::TaxRevenuePerCapita => "Receita Tributária / Nr de Habitantes",
            IndicatorKey::TransferRevenuePerCapita => "Receita de Transferências / Nr de Habitantes",
            IndicatorKey::ImmediateLiquidity => "Ativo Circulante Disponível / Passivo Circulante",
            IndicatorKey::ThirdPartyLiquidity => "Ativo Circulante Disponibilidade / Depósitos de Diversas Origens",
            IndicatorKey::CurrentLiquidity => "Ativo Circulante / Passivo Circulante",
            IndicatorKey::QuickLiquidity => "(Ativo circulante – Estoques) / Passivo Circulante",
            IndicatorKey::GeneralLiquidity => "(Ativo Circulante + Ativo Não Circulante Direitos) / (Passivo Circulante + Passivo Não Circulante)",
            IndicatorKey::GeneralSolvency => "Ativo Total / Passivo Exigível",
            IndicatorKey::GeneralIndebtedness => "(Passivo Exigível / Ativo Total) x 100",
            IndicatorKey::LiabilityComposition => "(Passivo Circulante / Passivo Exigível) x 100",
            IndicatorKey::EquityImmobilization => "((Ativos Investimento + Imobilizado) / Patrimônio Líquido) x 100",
            IndicatorKey::CurrentCategoryCommitment => "(Despesas Correntes / Receitas Correntes) x 100",
            IndicatorKey::CapitalCategoryCommitment => "(Despesas de Capital / Receitas de Capital) x 100",
            IndicatorKey::PersonnelToBudgetExpense => "(Pessoal Ativo e Encargos / Despesas Orçamentárias) x 100",
            IndicatorKey::InvestmentToBudgetExpense => "(Investimentos / Despesas Orçamentária) x 100",
            IndicatorKey::PersonnelToNetCurrentRevenue => "(Pessoal Ativo e Encargos / Receita corrente Líquida) x 100",
            IndicatorKey::OwnCurrentRevenue => "((Receitas Correntes – Transferências) / Receitas Correntes) x 100",
            IndicatorKey::RevenueExecution => "(Receita Executada / Receita Prevista) x 100",
            IndicatorKey::ExpenseExecution => "(Despesa Executada / Despesa Fixada) x 100",
            IndicatorKey::ExecutionResult => "(Despesa Executada / Receita Executada) x 100",
            IndicatorKey::BudgetAutonomy => "((Receitas Correntes – Transferências) / despesas totais) x 100",
            IndicatorKey::DebtAmortization => "(Operações de Crédito / despesas totais) x 100",
            IndicatorKey::DebtChargesToExpense => "(Juros e encargos da dívida / Despesas Executadas) x 100",
        }
    }

    /// Percentage-style indicators are scaled by 100.
    pub fn is_percentage(&self) -> bool {
        *self >= IndicatorKey::GeneralIndebtedness
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_keys_are_unique_and_ordered_by_label() {
        let unique: HashSet<_> = IndicatorKey::ALL.iter().collect();
        assert_eq!(unique.len(), IndicatorKey::ALL.len());

        // Row order follows label order, the same order a sorted index would produce
        let labels: Vec<&str> = IndicatorKey::ALL.iter().map(|k| k.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);

        let mut keys = IndicatorKey::ALL.to_vec();
        keys.sort();
        assert_eq!(keys, IndicatorKey::ALL.to_vec());
    }

    #[test]
    fn test_percentage_indicators_match_formula_text() {
        for key in IndicatorKey::ALL {
            assert_eq!(
                key.is_percentage(),
                key.formula().ends_with("x 100"),
                "{} scale disagrees with its formula",
                key
            );
        }
    }

    #[test]
    fn test_every_key_has_metadata() {
        for key in IndicatorKey::ALL {
            assert!(!key.interpretation().is_empty());
            assert!(!key.formula().is_empty());
        }
        assert_eq!(IndicatorKey::OwnCurrentRevenue.label(), "G4_Grau de Receitas Correntes Próprias ");
    }
}
