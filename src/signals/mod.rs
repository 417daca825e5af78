//! Signal evaluation interfaces.

pub mod conditions;
pub mod evaluator;

pub use conditions::{ConditionOutcome, SignalCondition};
pub use evaluator::{DecisionKind, SignalDecision, SignalEvaluator};
