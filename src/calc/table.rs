use serde::{Deserialize, Serialize};

/// One table cell, serialized as a bare JSON number or string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub values: Vec<Cell>,
    pub is_best: Vec<bool>,
}

/// Calculator output; every row is as wide as the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        ResultTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, values: Vec<Cell>) {
        assert_eq!(
            values.len(),
            self.headers.len(),
            "row width must match header width"
        );
        let is_best = vec![false; values.len()];
        self.rows.push(Row { values, is_best });
    }

    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Flag one cell as the best value of its column
    pub fn mark_best(&mut self, column: usize, row: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            if let Some(flag) = r.is_best.get_mut(column) {
                *flag = true;
            }
        }
    }

    /// Index of the row flagged best in a column, if any
    pub fn best_row(&self, column: usize) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.is_best.get(column).copied().unwrap_or(false))
    }
}

/// Position of the maximum; a later value must be strictly greater to win
pub fn best_index<I: IntoIterator<Item = f64>>(values: I) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Rate guard: a zero or negative denominator gives a zero rate
pub fn per(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && numerator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}

/// Round to hundredths for display
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
