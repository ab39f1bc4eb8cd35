//! Player resource ledger.
//!
//! One ledger per player holds every banked stack. Adds merge into an
//! existing same-kind stack; consumption spends highest-quality (heaviest)
//! stock first and removes stacks that drain to zero.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ResourceKind, ResourceStack};

/// Ledger operation failures. All recoverable; the ledger is untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerError {
    /// `consume` asked for more than the summed holdings of that kind.
    #[error("insufficient {kind}: requested {requested}, have {available}")]
    InsufficientResource {
        kind: ResourceKind,
        requested: u32,
        available: u32,
    },
}

impl GameError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "insufficient_resource"
    }
}

/// A player's full resource holdings.
///
/// Invariant: at most one stack per (kind, weight-within-tolerance) pair;
/// no zero-amount entries. Insertion order is preserved and breaks ties
/// when consuming stacks of equal weight.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLedger {
    stacks: Vec<ResourceStack>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack, merging into an existing same-kind entry if present.
    ///
    /// Never fails. Zero-amount adds are dropped without creating an entry.
    pub fn add(&mut self, mut stack: ResourceStack) {
        if stack.amount == 0 {
            return;
        }
        stack.set_in_inventory();

        if let Some(existing) = self.stacks.iter_mut().find(|s| s.same_kind(&stack)) {
            existing.amount += stack.amount;
            return;
        }
        self.stacks.push(stack);
    }

    /// Sums holdings of `kind` across all weight levels.
    pub fn total_of(&self, kind: ResourceKind) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.amount)
            .sum()
    }

    pub fn has_at_least(&self, kind: ResourceKind, amount: u32) -> bool {
        self.total_of(kind) >= amount
    }

    /// Spends `amount` units of `kind`, heaviest stock first.
    ///
    /// All-or-nothing: when the summed holdings fall short, nothing is
    /// consumed and `InsufficientResource` is returned. Stacks that drain
    /// to zero are removed.
    pub fn consume(&mut self, kind: ResourceKind, amount: u32) -> Result<(), LedgerError> {
        let available = self.total_of(kind);
        if available < amount {
            return Err(LedgerError::InsufficientResource {
                kind,
                requested: amount,
                available,
            });
        }

        // Indices of matching stacks, heaviest first; equal weights keep
        // insertion order (stable sort).
        let mut order: Vec<usize> = (0..self.stacks.len())
            .filter(|&i| self.stacks[i].kind == kind)
            .collect();
        order.sort_by(|&a, &b| {
            self.stacks[b]
                .unit_weight
                .partial_cmp(&self.stacks[a].unit_weight)
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        let mut remaining = amount;
        for index in order {
            if remaining == 0 {
                break;
            }
            let take = self.stacks[index].amount.min(remaining);
            self.stacks[index].amount -= take;
            remaining -= take;
        }
        debug_assert_eq!(remaining, 0);

        self.stacks.retain(|s| s.amount > 0);
        Ok(())
    }

    /// Every kind present, in insertion order, without duplicates.
    pub fn unique_kinds(&self) -> Vec<ResourceKind> {
        let mut kinds = Vec::new();
        for stack in &self.stacks {
            if !kinds.contains(&stack.kind) {
                kinds.push(stack.kind);
            }
        }
        kinds
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceStack> {
        self.stacks.iter()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(kind: ResourceKind, amount: u32, weight: f32) -> ResourceStack {
        ResourceStack::new(kind, amount, weight)
    }

    #[test]
    fn adds_merge_same_kind_into_one_entry() {
        let mut ledger = ResourceLedger::new();
        for amount in [5, 7, 11] {
            ledger.add(stack(ResourceKind::Wood, amount, 2.5));
        }
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_of(ResourceKind::Wood), 23);
    }

    #[test]
    fn different_weights_stay_separate() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Wood, 5, 1.0));
        ledger.add(stack(ResourceKind::Wood, 5, 2.5));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total_of(ResourceKind::Wood), 10);
    }

    #[test]
    fn zero_amount_add_is_dropped() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Wood, 0, 1.0));
        assert!(ledger.is_empty());
    }

    #[test]
    fn consume_spends_heaviest_stock_first() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Wood, 5, 1.0));
        ledger.add(stack(ResourceKind::Wood, 5, 2.5));
        ledger.add(stack(ResourceKind::Wood, 5, 0.5));

        ledger.consume(ResourceKind::Wood, 7).unwrap();

        // 2.5-weight stack fully drained, 2 taken from the 1.0 stack,
        // 0.5 untouched.
        let remaining: Vec<(f32, u32)> = ledger.iter().map(|s| (s.unit_weight, s.amount)).collect();
        assert_eq!(remaining, vec![(1.0, 3), (0.5, 5)]);
    }

    #[test]
    fn consume_rejects_shortfall_without_mutation() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Wood, 20, 2.5));

        let err = ledger.consume(ResourceKind::Wood, 25).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientResource {
                kind: ResourceKind::Wood,
                requested: 25,
                available: 20,
            }
        );
        assert_eq!(ledger.total_of(ResourceKind::Wood), 20);
    }

    #[test]
    fn race_grant_then_spend_scenario() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Wood, 50, 2.5));

        ledger.consume(ResourceKind::Wood, 30).unwrap();
        assert_eq!(ledger.total_of(ResourceKind::Wood), 20);

        assert!(ledger.consume(ResourceKind::Wood, 25).is_err());
        assert_eq!(ledger.total_of(ResourceKind::Wood), 20);
    }

    #[test]
    fn equal_weight_ties_consume_in_insertion_order() {
        let mut ledger = ResourceLedger::new();
        // Same kind and weight but added as distinct entries is impossible
        // (they merge), so exercise the tie with two kinds of equal weight
        // collapsed into a single-kind query via near-tolerance weights.
        ledger.add(stack(ResourceKind::Sword, 2, 3.5));
        ledger.add(stack(ResourceKind::Sword, 3, 3.5));
        assert_eq!(ledger.len(), 1);
        ledger.consume(ResourceKind::Sword, 4).unwrap();
        assert_eq!(ledger.total_of(ResourceKind::Sword), 1);
    }

    #[test]
    fn emptied_stacks_are_removed() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Wood, 5, 1.0));
        ledger.consume(ResourceKind::Wood, 5).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn unique_kinds_preserves_first_seen_order() {
        let mut ledger = ResourceLedger::new();
        ledger.add(stack(ResourceKind::Sword, 1, 3.5));
        ledger.add(stack(ResourceKind::Wood, 5, 1.0));
        ledger.add(stack(ResourceKind::Wood, 5, 2.0));
        assert_eq!(
            ledger.unique_kinds(),
            vec![ResourceKind::Sword, ResourceKind::Wood]
        );
    }
}
