//! Placement validation and rules

mod rules;
mod validator;

pub use rules::{
    BlockBudgetRule, HeightCeilingRule, NoAdjacentDuplicateRule, PlacementQuery, Rule, RuleSet,
    RuleVerdict,
};
pub use validator::{PlacementValidator, RotationOrder};
