use fiscal_core::{AnnexKind, StatementLine, StatementTable};

/// Which lines of a statement an account query selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountMatch {
    /// Account code is one of the listed codes
    CodeIn(&'static [&'static str]),
    /// Account label contains the substring. Lines without a label never match.
    LabelContains(&'static str),
    /// Account code and label both equal the given values
    CodeAndLabel {
        code: &'static str,
        label: &'static str,
    },
}

/// A fixed query over one statement annex, reduced by summing `valor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarQuery {
    pub annex: AnnexKind,
    pub account: AccountMatch,
    /// Reporting column the line must belong to; `None` accepts every column.
    pub column: Option<&'static str>,
}

impl ScalarQuery {
    pub const fn code(annex: AnnexKind, code: &'static [&'static str], column: Option<&'static str>) -> Self {
        Self { annex, account: AccountMatch::CodeIn(code), column }
    }

    pub const fn label_contains(annex: AnnexKind, needle: &'static str, column: &'static str) -> Self {
        Self { annex, account: AccountMatch::LabelContains(needle), column: Some(column) }
    }

    pub const fn code_and_label(
        annex: AnnexKind,
        code: &'static str,
        label: &'static str,
        column: &'static str,
    ) -> Self {
        Self { annex, account: AccountMatch::CodeAndLabel { code, label }, column: Some(column) }
    }

    pub fn matches(&self, line: &StatementLine) -> bool {
        if let Some(column) = self.column {
            if line.column.as_deref() != Some(column) {
                return false;
            }
        }

        match self.account {
            AccountMatch::CodeIn(codes) => line
                .code
                .as_deref()
                .is_some_and(|code| codes.contains(&code)),
            AccountMatch::LabelContains(needle) => line
                .label
                .as_deref()
                .is_some_and(|label| label.contains(needle)),
            AccountMatch::CodeAndLabel { code, label } => {
                line.code.as_deref() == Some(code) && line.label.as_deref() == Some(label)
            }
        }
    }
}

/// Sum of the values of every matching line. Zero for an empty table or no match.
pub fn extract(table: &StatementTable, query: &ScalarQuery) -> f64 {
    table
        .lines
        .iter()
        .filter(|line| query.matches(line))
        .map(StatementLine::value_or_zero)
        .sum()
}
