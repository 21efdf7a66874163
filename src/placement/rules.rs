//! Pluggable placement rules
//!
//! Rules veto placements that are already socket-valid, and may react after a
//! placement commits. Two ordered groups: global rules checked for every
//! candidate, and rules bound to specific block names. Evaluation
//! short-circuits on the first rejection; post-placement notification never
//! short-circuits (the placement already happened).

use crate::catalog::BlockDefinition;
use crate::grid::Grid;
use crate::rotation::Rotation;
use glam::IVec3;
use rustc_hash::FxHashMap;

/// The candidate a rule inspects, plus read-only grid access
pub struct PlacementQuery<'a> {
    pub block: &'a BlockDefinition,
    /// Catalog index of `block`; matches `PlacedBlock::block` on grid cells
    pub block_index: usize,
    pub rotation: Rotation,
    pub position: IVec3,
    pub grid: &'a Grid,
}

/// Structured rule outcome. A rejection names the rule and, when the rule
/// knows it, the conflicting grid position, never encoded in the reason
/// string.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleVerdict {
    Allow,
    Reject {
        rule: String,
        reason: String,
        conflict: Option<IVec3>,
    },
}

impl RuleVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RuleVerdict::Allow)
    }

    pub fn reject(rule: &str, reason: impl Into<String>) -> Self {
        RuleVerdict::Reject {
            rule: rule.to_string(),
            reason: reason.into(),
            conflict: None,
        }
    }

    pub fn reject_at(rule: &str, reason: impl Into<String>, conflict: IVec3) -> Self {
        RuleVerdict::Reject {
            rule: rule.to_string(),
            reason: reason.into(),
            conflict: Some(conflict),
        }
    }
}

/// A placement predicate. `evaluate` must not mutate grid state; only
/// `on_placed` may keep bookkeeping for later evaluations.
pub trait Rule {
    fn name(&self) -> &str;

    fn evaluate(&self, query: &PlacementQuery<'_>) -> RuleVerdict;

    /// Called after a placement this rule applies to has committed
    fn on_placed(&mut self, _query: &PlacementQuery<'_>) {}
}

struct RuleEntry {
    rule: Box<dyn Rule>,
    enabled: bool,
}

/// Ordered global rules plus block-name-bound rule groups
#[derive(Default)]
pub struct RuleSet {
    global: Vec<RuleEntry>,
    by_block: FxHashMap<String, Vec<RuleEntry>>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Add a rule consulted for every candidate block
    pub fn add_global(&mut self, rule: Box<dyn Rule>) {
        self.global.push(RuleEntry {
            rule,
            enabled: true,
        });
    }

    /// Add a rule consulted only for the named block
    pub fn add_for_block(&mut self, block_name: impl Into<String>, rule: Box<dyn Rule>) {
        self.by_block
            .entry(block_name.into())
            .or_default()
            .push(RuleEntry {
                rule,
                enabled: true,
            });
    }

    /// Enable or disable every rule with the given name. Returns how many
    /// rules were affected.
    pub fn set_enabled(&mut self, rule_name: &str, enabled: bool) -> usize {
        let mut affected = 0;
        for entry in self
            .global
            .iter_mut()
            .chain(self.by_block.values_mut().flatten())
        {
            if entry.rule.name() == rule_name {
                entry.enabled = enabled;
                affected += 1;
            }
        }
        affected
    }

    /// Evaluate enabled global rules in order, then rules bound to the
    /// block's name, short-circuiting on the first rejection.
    pub fn is_placement_legal(&self, query: &PlacementQuery<'_>) -> RuleVerdict {
        let groups = [
            Some(&self.global),
            self.by_block.get(&query.block.name),
        ];
        for entry in groups.into_iter().flatten().flatten() {
            if !entry.enabled {
                continue;
            }
            let verdict = entry.rule.evaluate(query);
            if let RuleVerdict::Reject { rule, reason, .. } = &verdict {
                log::trace!(
                    "rule '{}' rejected {} at {}: {}",
                    rule,
                    query.block.name,
                    query.position,
                    reason
                );
                return verdict;
            }
        }
        RuleVerdict::Allow
    }

    /// Notify every enabled applicable rule that a placement committed, in
    /// the same order as evaluation, without short-circuiting.
    pub fn notify_placed(&mut self, query: &PlacementQuery<'_>) {
        for entry in &mut self.global {
            if entry.enabled {
                entry.rule.on_placed(query);
            }
        }
        if let Some(group) = self.by_block.get_mut(&query.block.name) {
            for entry in group {
                if entry.enabled {
                    entry.rule.on_placed(query);
                }
            }
        }
    }
}

/// Rejects any placement above a configured layer
pub struct HeightCeilingRule {
    pub max_y: i32,
}

impl Rule for HeightCeilingRule {
    fn name(&self) -> &str {
        "height_ceiling"
    }

    fn evaluate(&self, query: &PlacementQuery<'_>) -> RuleVerdict {
        if query.position.y > self.max_y {
            RuleVerdict::reject(
                self.name(),
                format!("y {} above ceiling {}", query.position.y, self.max_y),
            )
        } else {
            RuleVerdict::Allow
        }
    }
}

/// Caps how many instances of one block may be placed in a run. Stateful:
/// counts committed placements through `on_placed`. Intended to be bound to
/// that block's name.
pub struct BlockBudgetRule {
    block_name: String,
    limit: u32,
    placed: u32,
}

impl BlockBudgetRule {
    pub fn new(block_name: impl Into<String>, limit: u32) -> Self {
        BlockBudgetRule {
            block_name: block_name.into(),
            limit,
            placed: 0,
        }
    }
}

impl Rule for BlockBudgetRule {
    fn name(&self) -> &str {
        "block_budget"
    }

    fn evaluate(&self, query: &PlacementQuery<'_>) -> RuleVerdict {
        if query.block.name == self.block_name && self.placed >= self.limit {
            RuleVerdict::reject(
                self.name(),
                format!("'{}' budget of {} exhausted", self.block_name, self.limit),
            )
        } else {
            RuleVerdict::Allow
        }
    }

    fn on_placed(&mut self, query: &PlacementQuery<'_>) {
        if query.block.name == self.block_name {
            self.placed += 1;
        }
    }
}

/// Rejects a block next to an orthogonal neighbor holding the same block
pub struct NoAdjacentDuplicateRule;

impl Rule for NoAdjacentDuplicateRule {
    fn name(&self) -> &str {
        "no_adjacent_duplicate"
    }

    fn evaluate(&self, query: &PlacementQuery<'_>) -> RuleVerdict {
        use crate::catalog::Direction;

        for direction in Direction::ALL {
            let neighbor = query.position + direction.offset();
            let Some(cell) = query.grid.cell(neighbor) else {
                continue;
            };
            let Some(placed) = &cell.placed else {
                continue;
            };
            if placed.block == query.block_index {
                return RuleVerdict::reject_at(
                    self.name(),
                    format!("adjacent duplicate of '{}'", query.block.name),
                    neighbor,
                );
            }
        }
        RuleVerdict::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SocketLabel, SocketSet};
    use crate::grid::GridConfig;

    fn grid() -> Grid {
        let config = GridConfig::with_full_ground(IVec3::new(3, 3, 3), SocketLabel::from("ground"));
        Grid::new(&config).unwrap()
    }

    fn block(name: &str) -> BlockDefinition {
        BlockDefinition::new(name, SocketSet::empty())
    }

    fn query<'a>(
        block: &'a BlockDefinition,
        grid: &'a Grid,
        position: IVec3,
    ) -> PlacementQuery<'a> {
        PlacementQuery {
            block,
            block_index: 0,
            rotation: Rotation::R0,
            position,
            grid,
        }
    }

    /// Records evaluation order and returns a fixed verdict
    struct ProbeRule {
        name: String,
        allow: bool,
        evaluations: std::cell::Cell<u32>,
    }

    impl ProbeRule {
        fn new(name: &str, allow: bool) -> Self {
            ProbeRule {
                name: name.to_string(),
                allow,
                evaluations: std::cell::Cell::new(0),
            }
        }
    }

    impl Rule for ProbeRule {
        fn name(&self) -> &str {
            &self.name
        }

        fn evaluate(&self, _query: &PlacementQuery<'_>) -> RuleVerdict {
            self.evaluations.set(self.evaluations.get() + 1);
            if self.allow {
                RuleVerdict::Allow
            } else {
                RuleVerdict::reject(&self.name, "probe rejection")
            }
        }
    }

    #[test]
    fn test_short_circuit_on_first_rejection() {
        let grid = grid();
        let wall = block("Wall");
        let mut rules = RuleSet::new();
        rules.add_global(Box::new(ProbeRule::new("first", false)));
        rules.add_global(Box::new(ProbeRule::new("second", true)));

        let verdict = rules.is_placement_legal(&query(&wall, &grid, IVec3::new(1, 0, 1)));
        match verdict {
            RuleVerdict::Reject { rule, .. } => assert_eq!(rule, "first"),
            RuleVerdict::Allow => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let grid = grid();
        let wall = block("Wall");
        let mut rules = RuleSet::new();
        rules.add_global(Box::new(ProbeRule::new("veto", false)));
        assert_eq!(rules.set_enabled("veto", false), 1);

        let verdict = rules.is_placement_legal(&query(&wall, &grid, IVec3::new(1, 0, 1)));
        assert!(verdict.is_allowed());
    }

    #[test]
    fn test_block_bound_rules_apply_by_name() {
        let grid = grid();
        let wall = block("Wall");
        let roof = block("Roof");
        let mut rules = RuleSet::new();
        rules.add_for_block("Wall", Box::new(ProbeRule::new("wall_only", false)));

        assert!(!rules
            .is_placement_legal(&query(&wall, &grid, IVec3::new(1, 0, 1)))
            .is_allowed());
        assert!(rules
            .is_placement_legal(&query(&roof, &grid, IVec3::new(1, 0, 1)))
            .is_allowed());
    }

    #[test]
    fn test_height_ceiling_rule() {
        let grid = grid();
        let wall = block("Wall");
        let rule = HeightCeilingRule { max_y: 1 };

        let below = rule.evaluate(&query(&wall, &grid, IVec3::new(0, 1, 0)));
        assert!(below.is_allowed());
        let above = rule.evaluate(&query(&wall, &grid, IVec3::new(0, 2, 0)));
        assert!(!above.is_allowed());
    }

    #[test]
    fn test_block_budget_counts_via_notify() {
        let grid = grid();
        let wall = block("Wall");
        let mut rules = RuleSet::new();
        rules.add_for_block("Wall", Box::new(BlockBudgetRule::new("Wall", 2)));

        let q = query(&wall, &grid, IVec3::new(1, 0, 1));
        for _ in 0..2 {
            assert!(rules.is_placement_legal(&q).is_allowed());
            rules.notify_placed(&q);
        }
        assert!(!rules.is_placement_legal(&q).is_allowed());
    }

    #[test]
    fn test_adjacent_duplicate_reports_conflict_position() {
        let mut grid = grid();
        let wall = block("Wall");
        let neighbor = IVec3::new(0, 0, 1);
        grid.place(neighbor, 0, Rotation::R0, SocketSet::empty());

        let rule = NoAdjacentDuplicateRule;
        let verdict = rule.evaluate(&query(&wall, &grid, IVec3::new(1, 0, 1)));
        match verdict {
            RuleVerdict::Reject { conflict, .. } => assert_eq!(conflict, Some(neighbor)),
            RuleVerdict::Allow => panic!("expected rejection"),
        }
    }
}
