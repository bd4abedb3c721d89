mod category;
mod evaluation;
mod month;
mod threshold;

pub use category::{Bucket, Category};
pub use evaluation::{CategoryRatio, EvaluationResult, GroupRatio};
pub use month::Month;
pub use threshold::{Group, GroupLimit, ThresholdTable};

#[cfg(test)]
mod tests;
