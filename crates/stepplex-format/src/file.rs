use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use stepplex_solver::{Rational, Sense};
use tracing::debug;

use crate::error::FormatError;
use crate::scalar::parse_rational;

/// A coefficient as written in a problem file: text or a bare JSON number.
/// Always written back as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    pub fn to_rational(&self) -> Result<Rational, FormatError> {
        match self {
            Scalar::Text(text) => parse_rational(text),
            Scalar::Number(number) => parse_rational(&number.to_string()),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(text) => write!(f, "{}", text),
            Scalar::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Comparison between a constraint's left-hand side and its RHS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "=")]
    Eq,
    #[default]
    #[serde(rename = "<=", alias = "≤")]
    Le,
    #[serde(rename = ">=", alias = "≥")]
    Ge,
}

impl FromStr for Relation {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Relation::Eq),
            "<=" | "≤" => Ok(Relation::Le),
            ">=" | "≥" => Ok(Relation::Ge),
            other => Err(FormatError::UnknownRelation(other.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relation::Eq => "=",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        };
        f.write_str(symbol)
    }
}

/// `min` / `max` tag of a problem file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenseTag {
    Min,
    #[default]
    Max,
}

impl FromStr for SenseTag {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" => Ok(SenseTag::Min),
            "max" => Ok(SenseTag::Max),
            other => Err(FormatError::UnknownSense(other.to_string())),
        }
    }
}

impl From<SenseTag> for Sense {
    fn from(tag: SenseTag) -> Self {
        match tag {
            SenseTag::Min => Sense::Minimize,
            SenseTag::Max => Sense::Maximize,
        }
    }
}

impl From<Sense> for SenseTag {
    fn from(sense: Sense) -> Self {
        match sense {
            Sense::Minimize => SenseTag::Min,
            Sense::Maximize => SenseTag::Max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    pub coeffs: Vec<Scalar>,
    #[serde(rename = "type", default)]
    pub relation: Relation,
    pub rhs: Scalar,
}

/// A problem as stored on disk, before any normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    /// Objective function coefficients
    pub function: Vec<Scalar>,
    pub constraints: Vec<ConstraintEntry>,
    #[serde(default)]
    pub minmax: SenseTag,
}

impl ProblemFile {
    pub fn from_json(source: &str) -> Result<Self, FormatError> {
        let file: ProblemFile = serde_json::from_str(source)?;
        file.validate()?;
        Ok(file)
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a file, choosing JSON for `.json` and the plain-text layout otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| FormatError::IoError(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading problem file");

        if is_json {
            Self::from_json(&source)
        } else {
            Self::from_text(&source)
        }
    }

    /// Write the problem as pretty JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .map_err(|e| FormatError::IoError(format!("{}: {}", path.display(), e)))
    }

    pub fn num_variables(&self) -> usize {
        self.function.len()
    }

    pub fn sense(&self) -> Sense {
        self.minmax.into()
    }

    /// Reject empty problems and rows whose width differs from the objective.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.function.is_empty() {
            return Err(FormatError::Empty("objective function"));
        }
        if self.constraints.is_empty() {
            return Err(FormatError::Empty("constraint list"));
        }
        let expected = self.function.len();
        for (i, c) in self.constraints.iter().enumerate() {
            if c.coeffs.len() != expected {
                return Err(FormatError::Dimension {
                    constraint: i + 1,
                    expected,
                    found: c.coeffs.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepplex_solver::{integer, ratio};

    const SAMPLE: &str = r#"{
        "function": ["3", "2"],
        "constraints": [
            {"coeffs": ["1", "1"], "type": "≤", "rhs": "4"},
            {"coeffs": [1, 0.5], "type": ">=", "rhs": 1},
            {"coeffs": ["1/2", "0"], "type": "=", "rhs": "1"}
        ],
        "minmax": "min"
    }"#;

    #[test]
    fn test_load_json() {
        let file = ProblemFile::from_json(SAMPLE).unwrap();

        assert_eq!(file.num_variables(), 2);
        assert_eq!(file.sense(), Sense::Minimize);
        assert_eq!(file.constraints[0].relation, Relation::Le);
        assert_eq!(file.constraints[1].relation, Relation::Ge);
        assert_eq!(file.constraints[2].relation, Relation::Eq);
        assert_eq!(file.constraints[1].coeffs[1].to_rational().unwrap(), ratio(1, 2));
        assert_eq!(file.constraints[1].rhs.to_rational().unwrap(), integer(1));
        assert_eq!(file.constraints[2].coeffs[0].to_rational().unwrap(), ratio(1, 2));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let file = ProblemFile::from_json(
            r#"{"function": ["1"], "constraints": [{"coeffs": ["1"], "rhs": "2"}]}"#,
        )
        .unwrap();
        assert_eq!(file.minmax, SenseTag::Max);
        assert_eq!(file.constraints[0].relation, Relation::Le);
    }

    #[test]
    fn test_json_survives_save_and_load() {
        let file = ProblemFile::from_json(SAMPLE).unwrap();
        let written = file.to_json().unwrap();
        assert!(written.contains("\"<=\""));

        let reloaded = ProblemFile::from_json(&written).unwrap();
        assert_eq!(reloaded.to_json().unwrap(), written);
        assert_eq!(reloaded.to_lp().unwrap(), file.to_lp().unwrap());
    }

    #[test]
    fn test_numbers_are_saved_as_strings() {
        let file = ProblemFile::from_json(
            r#"{"function": [3, 0.5], "constraints": [{"coeffs": [1, -2], "rhs": 4}]}"#,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();

        assert_eq!(value["function"], serde_json::json!(["3", "0.5"]));
        assert_eq!(value["constraints"][0]["coeffs"], serde_json::json!(["1", "-2"]));
        assert_eq!(value["constraints"][0]["rhs"], serde_json::json!("4"));
    }

    #[test]
    fn test_rejects_mismatched_row() {
        let err = ProblemFile::from_json(
            r#"{"function": ["1", "2"], "constraints": [{"coeffs": ["1"], "type": "=", "rhs": "2"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormatError::Dimension { constraint: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_rejects_empty_problem() {
        let err = ProblemFile::from_json(r#"{"function": [], "constraints": []}"#).unwrap_err();
        assert!(matches!(err, FormatError::Empty(_)));
    }

    #[test]
    fn test_rejects_unknown_relation() {
        let err = ProblemFile::from_json(
            r#"{"function": ["1"], "constraints": [{"coeffs": ["1"], "type": "<", "rhs": "2"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }

    #[test]
    fn test_relation_and_sense_from_str() {
        assert_eq!("≥".parse::<Relation>().unwrap(), Relation::Ge);
        assert_eq!(" <= ".parse::<Relation>().unwrap(), Relation::Le);
        assert!(matches!("<>".parse::<Relation>(), Err(FormatError::UnknownRelation(_))));
        assert_eq!("MIN".parse::<SenseTag>().unwrap(), SenseTag::Min);
        assert!(matches!("best".parse::<SenseTag>(), Err(FormatError::UnknownSense(_))));
    }
}
