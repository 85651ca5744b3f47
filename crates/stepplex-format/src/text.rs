//! Plain-text problem layout.
//!
//! ```text
//! 2 2          <- variables, constraints
//! 3 2          <- objective coefficients
//! 1 1 <= 4     <- one line per constraint: coefficients, relation, rhs
//! 1 0 = 2
//! max          <- optional, defaults to max
//! ```
//!
//! Blank lines are ignored; line numbers in errors count them anyway.

use crate::error::FormatError;
use crate::file::{ConstraintEntry, ProblemFile, Scalar, SenseTag};

impl ProblemFile {
    pub fn from_text(source: &str) -> Result<Self, FormatError> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (line_no, header) = lines.next().ok_or(FormatError::Empty("problem file"))?;
        let counts: Vec<&str> = header.split_whitespace().collect();
        if counts.len() < 2 {
            return Err(text_error(
                line_no,
                "first line must hold the number of variables and constraints",
            ));
        }
        let num_vars = parse_count(line_no, counts[0])?;
        let num_constraints = parse_count(line_no, counts[1])?;

        let (line_no, objective) = lines
            .next()
            .ok_or_else(|| text_error(line_no + 1, "missing objective function line"))?;
        let function: Vec<Scalar> = objective.split_whitespace().map(Scalar::from).collect();
        if function.len() != num_vars {
            return Err(text_error(
                line_no,
                format!("expected {} objective coefficients, found {}", num_vars, function.len()),
            ));
        }

        let mut constraints = Vec::with_capacity(num_constraints);
        let mut last_line = line_no;
        for k in 0..num_constraints {
            let (line_no, line) = lines.next().ok_or_else(|| {
                text_error(
                    last_line + 1,
                    format!("expected {} constraints, found {}", num_constraints, k),
                )
            })?;
            last_line = line_no;

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != num_vars + 2 {
                return Err(text_error(
                    line_no,
                    format!("expected {} fields, found {}", num_vars + 2, parts.len()),
                ));
            }
            constraints.push(ConstraintEntry {
                coeffs: parts[..num_vars].iter().copied().map(Scalar::from).collect(),
                relation: parts[num_vars].parse()?,
                rhs: Scalar::from(parts[num_vars + 1]),
            });
        }

        let minmax = match lines.next() {
            Some((_, tag)) => tag.parse::<SenseTag>()?,
            None => SenseTag::default(),
        };

        let file = ProblemFile {
            function,
            constraints,
            minmax,
        };
        file.validate()?;
        Ok(file)
    }
}

fn text_error(line: usize, message: impl Into<String>) -> FormatError {
    FormatError::Text {
        line,
        message: message.into(),
    }
}

fn parse_count(line: usize, text: &str) -> Result<usize, FormatError> {
    text.parse()
        .map_err(|_| text_error(line, format!("invalid count: {}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::Relation;
    use stepplex_solver::{integer, ratio};

    #[test]
    fn test_parse_text_problem() {
        let source = "2 3\n\n3 2\n1 1 <= 4\n1 0 ≤ 3\n0 1/2 >= 1.5\nmin\n";
        let file = ProblemFile::from_text(source).unwrap();

        assert_eq!(file.num_variables(), 2);
        assert_eq!(file.constraints.len(), 3);
        assert_eq!(file.minmax, SenseTag::Min);
        assert_eq!(file.constraints[1].relation, Relation::Le);
        assert_eq!(file.constraints[2].relation, Relation::Ge);
        assert_eq!(file.constraints[2].coeffs[1].to_rational().unwrap(), ratio(1, 2));
        assert_eq!(file.constraints[2].rhs.to_rational().unwrap(), ratio(3, 2));
        assert_eq!(file.function[0].to_rational().unwrap(), integer(3));
    }

    #[test]
    fn test_sense_defaults_to_max() {
        let file = ProblemFile::from_text("1 1\n1\n1 = 2").unwrap();
        assert_eq!(file.minmax, SenseTag::Max);
        assert_eq!(file.constraints[0].relation, Relation::Eq);
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = ProblemFile::from_text("2 1\n1 1\n1 <= 4\n").unwrap_err();
        match err {
            FormatError::Text { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 4 fields"));
            }
            other => panic!("Expected text error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_constraint_lines() {
        let err = ProblemFile::from_text("1 2\n1\n1 = 2\n").unwrap_err();
        assert!(matches!(err, FormatError::Text { line: 4, .. }));
    }

    #[test]
    fn test_bad_header() {
        assert!(matches!(
            ProblemFile::from_text("two 1\n1\n1 = 1"),
            Err(FormatError::Text { line: 1, .. })
        ));
        assert!(matches!(ProblemFile::from_text("   \n"), Err(FormatError::Empty(_))));
    }

    #[test]
    fn test_unknown_relation_and_sense() {
        assert!(matches!(
            ProblemFile::from_text("1 1\n1\n1 < 2"),
            Err(FormatError::UnknownRelation(_))
        ));
        assert!(matches!(
            ProblemFile::from_text("1 1\n1\n1 = 2\nbest"),
            Err(FormatError::UnknownSense(_))
        ));
    }
}
