pub mod evaluator;
pub mod result;

pub use evaluator::{Condition, StateChecker};
pub use result::{Message, ReadinessResult, ReadinessResults, Severity};
