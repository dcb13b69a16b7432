use indicator_panel::IndicatorMatrix;
use tabled::{builder::Builder, settings::Style};

/// Deviation and class columns are shown unrounded; other numbers get two decimals.
fn keeps_full_precision(header: &str) -> bool {
    ["Variação", "Deviation", "Classificação", "Classification"]
        .iter()
        .any(|marker| header.contains(marker))
}

fn format_number(header: &str, value: f64) -> String {
    if keeps_full_precision(header) {
        value.to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Column headers in the published panel order: entity values, mean,
/// deviation and class per entity, then interpretation, formula and year.
pub fn headers(matrix: &IndicatorMatrix) -> Vec<String> {
    let mut headers = vec!["Índice".to_string()];
    headers.extend(matrix.entities.iter().cloned());
    headers.push("Média".to_string());
    for name in &matrix.entities {
        headers.push(format!("{}_Variação (%)", name));
        headers.push(format!("{}_Classificação", name));
    }
    headers.extend(["Interpretações", "Fórmulas", "Ano"].map(String::from));
    headers
}

/// One formatted row per indicator, aligned with [`headers`].
pub fn formatted_rows(matrix: &IndicatorMatrix) -> Vec<Vec<String>> {
    let headers = headers(matrix);
    let entity_count = matrix.entities.len();
    let number = |col: usize, value: f64| format_number(&headers[col], value);

    matrix
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.to_string()];
            cells.extend(row.cells.iter().enumerate().map(|(i, c)| number(1 + i, c.value)));
            cells.push(number(1 + entity_count, row.mean));
            for (i, c) in row.cells.iter().enumerate() {
                cells.push(number(2 + entity_count + 2 * i, c.deviation_pct));
                cells.push(c.classification.as_u8().to_string());
            }
            cells.push(row.interpretation.to_string());
            cells.push(row.formula.to_string());
            cells.push(matrix.year.to_string());
            cells
        })
        .collect()
}

/// Markdown-style text table of the whole panel.
pub fn matrix_table(matrix: &IndicatorMatrix) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers(matrix));
    for row in formatted_rows(matrix) {
        builder.push_record(row);
    }
    builder.build().with(Style::markdown()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_core::{EntityId, IndicatorKey, IndicatorRecord, Roster};
    use indicator_panel::aggregate;

    fn matrix() -> IndicatorMatrix {
        let records = [(3304557, 10.0), (3304904, 40.0)]
            .iter()
            .map(|&(id, v)| {
                IndicatorRecord::from_fn(EntityId(id), 2021, |key| match key {
                    IndicatorKey::RevenuePerCapita => v,
                    _ => 1.0 / 3.0,
                })
            })
            .collect::<Vec<_>>();
        aggregate(&records, 2021, &Roster::default())
    }

    #[test]
    fn test_headers_follow_panel_layout() {
        let matrix = matrix();
        assert_eq!(
            headers(&matrix),
            vec![
                "Índice",
                "1_Rio de Janeiro",
                "2_São Gonçalo",
                "Média",
                "1_Rio de Janeiro_Variação (%)",
                "1_Rio de Janeiro_Classificação",
                "2_São Gonçalo_Variação (%)",
                "2_São Gonçalo_Classificação",
                "Interpretações",
                "Fórmulas",
                "Ano",
            ]
        );
        assert_eq!(formatted_rows(&matrix).len(), IndicatorKey::ALL.len());
    }

    #[test]
    fn test_two_decimals_except_deviation_and_class() {
        let rows = formatted_rows(&matrix());
        let revenue = &rows[1];

        assert_eq!(revenue[0], "A2_Receita Total per Capita");
        assert_eq!(revenue[1], "10.00");
        assert_eq!(revenue[2], "40.00");
        assert_eq!(revenue[3], "25.00");
        assert_eq!(revenue[4], "-60");
        assert_eq!(revenue[5], "3");
        assert_eq!(revenue[6], "60");
        assert_eq!(revenue[10], "2021");

        assert_eq!(rows[0][1], "0.33");
    }

    #[test]
    fn test_markdown_table_has_header_separator_and_rows() {
        let text = matrix_table(&matrix());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + IndicatorKey::ALL.len());
        assert!(lines[0].starts_with("| Índice"));
        assert!(lines[1].chars().all(|c| c == '-' || c == '|'));
        assert!(lines[3].starts_with("| A2_Receita Total per Capita"));
    }
}
