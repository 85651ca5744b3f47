use num_traits::ToPrimitive;
use stepplex_solver::{Pivot, Rational, Tableau};

/// Exact fraction, or rounded to two decimals.
pub fn value(v: &Rational, decimals: bool) -> String {
    if decimals {
        match v.to_f64() {
            Some(f) => format!("{:.2}", f),
            None => v.to_string(),
        }
    } else {
        v.to_string()
    }
}

/// Grid with `x<k>` column/row headers, `b` for the RHS and `f` for the
/// objective row.
pub fn tableau(t: &Tableau, decimals: bool) -> String {
    let mut header = vec![String::new()];
    header.extend(t.column_labels().iter().map(|l| format!("x{}", l)));
    header.push("b".to_string());

    let mut lines = vec![header];
    for (i, row) in t.grid().iter().enumerate() {
        let label = match t.row_labels().get(i) {
            Some(l) => format!("x{}", l),
            None => "f".to_string(),
        };
        let mut line = vec![label];
        line.extend(row.iter().map(|v| value(v, decimals)));
        lines.push(line);
    }

    let width = lines
        .iter()
        .flat_map(|line| line.iter().map(|cell| cell.chars().count()))
        .max()
        .unwrap_or(1);

    lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|cell| format!("{:>width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn pivots(list: &[Pivot]) -> String {
    list.iter()
        .map(|p| format!("({}, {})", p.row, p.column))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn vector(values: &[Rational], decimals: bool) -> String {
    let parts: Vec<String> = values.iter().map(|v| value(v, decimals)).collect();
    format!("({})", parts.join(", "))
}
