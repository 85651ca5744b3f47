pub mod error;
pub mod file;
pub mod normalize;
pub mod scalar;
pub mod text;

pub use error::FormatError;
pub use file::{ConstraintEntry, ProblemFile, Relation, Scalar, SenseTag};
pub use normalize::{AddedColumn, Normalized};
pub use scalar::{parse_rational, MAX_DECIMAL_SCALE};
