//! Result sets returned by the store

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// Text value (dates and timestamps included)
    Text(String),
}

impl Value {
    /// Integer view, if this value is an integer
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view, if this value is text
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One row, values in column order
pub type Row = Vec<Value>;

/// Ordered rows with the column names the store reported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Column names in store order
    pub columns: Vec<String>,
    /// Rows in store order
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Create a result set
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column (case-insensitive)
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Whether the column is present (case-insensitive)
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Value at `row` for the named column
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Render as an aligned plain-text table (header, then one line per row)
    #[must_use]
    pub fn render_table(&self) -> String {
        if self.columns.is_empty() {
            return "(no columns)".to_string();
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let render_line = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(v, &w)| format!("{v:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = vec![render_line(&self.columns)];
        if cells.is_empty() {
            lines.push("(no rows)".to_string());
        }
        lines.extend(cells.iter().map(|row| render_line(row)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::new(
            vec!["id".into(), "company".into(), "needs".into()],
            vec![
                vec![
                    Value::Integer(1),
                    Value::Text("Acme".into()),
                    Value::Text("CRM implementation".into()),
                ],
                vec![
                    Value::Integer(12),
                    Value::Text("Northwind Traders".into()),
                    Value::Null,
                ],
            ],
        )
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let rs = sample();
        assert!(rs.has_column("ID"));
        assert!(!rs.has_column("budget"));
        assert_eq!(rs.get(1, "Company"), Some(&Value::Text("Northwind Traders".into())));
        assert_eq!(rs.get(5, "company"), None);
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = sample().render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id  company"));
        assert!(lines[1].starts_with("1   Acme"));
        assert!(lines[2].ends_with("NULL"));
    }

    #[test]
    fn test_render_empty() {
        let rs = ResultSet::new(vec!["total".into()], vec![]);
        assert_eq!(rs.render_table(), "total\n(no rows)");
        assert_eq!(ResultSet::default().render_table(), "(no columns)");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Real(1250.5).to_string(), "1250.5");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(7).as_i64(), Some(7));
        assert_eq!(Value::Text("x".into()).as_str(), Some("x"));
    }
}
