//! Quotient familial: converting household composition into tax parts.
//!
//! # Weights
//!
//! | Dependant                          | Parts |
//! |------------------------------------|-------|
//! | 1st and 2nd child, exclusive       | 0.5   |
//! | 1st and 2nd child, shared custody  | 0.25  |
//! | 3rd child onwards, exclusive       | 1     |
//! | 3rd child onwards, shared custody  | 0.5   |
//!
//! The first two slots go to exclusive-custody children before any shared
//! child. An isolated single parent adds 0.5 if at least one child is in
//! exclusive custody, otherwise 0.25 per shared child up to 0.5.
//!
//! Two calculators implement [`PartsCalculator`]:
//!
//! - [`PartsFromChildren`] uses the custody mode of each child and is the
//!   reference computation.
//! - [`PartsFromCount`] only knows how many children there are and treats
//!   all of them as exclusive custody. It is a coarser fallback and can
//!   disagree with the detailed form, for instance for an isolated parent
//!   whose children are all in shared custody.

use rust_decimal::Decimal;

use crate::calculations::common::round_quarter;
use crate::models::{Child, CustodyMode, Household};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const QUARTER: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Number of child slots weighted at the reduced rate.
const FIRST_SLOTS: u32 = 2;

/// Computes the number of tax parts of a household.
pub trait PartsCalculator {
    fn parts(
        &self,
        household: &Household,
    ) -> Decimal;
}

/// Parts computed from the custody mode of every child.
#[derive(Debug, Clone, Copy)]
pub struct PartsFromChildren<'a> {
    children: &'a [Child],
}

impl<'a> PartsFromChildren<'a> {
    pub fn new(children: &'a [Child]) -> Self {
        Self { children }
    }

    fn counts(&self) -> (u32, u32) {
        self.children
            .iter()
            .fold((0, 0), |(charge, shared), child| match child.mode {
                CustodyMode::Charge => (charge + 1, shared),
                CustodyMode::Shared => (charge, shared + 1),
            })
    }
}

impl PartsCalculator for PartsFromChildren<'_> {
    fn parts(
        &self,
        household: &Household,
    ) -> Decimal {
        let (charge, shared) = self.counts();

        let charge_in_slots = charge.min(FIRST_SLOTS);
        let shared_in_slots = shared.min(FIRST_SLOTS - charge_in_slots);
        let charge_beyond = charge - charge_in_slots;
        let shared_beyond = shared - shared_in_slots;

        let children_parts = HALF * Decimal::from(charge_in_slots)
            + QUARTER * Decimal::from(shared_in_slots)
            + Decimal::from(charge_beyond)
            + HALF * Decimal::from(shared_beyond);

        let isolated_bonus = if !household.is_isolated_single() {
            Decimal::ZERO
        } else if charge > 0 {
            HALF
        } else {
            (QUARTER * Decimal::from(shared)).min(HALF)
        };

        finalize(household, children_parts + isolated_bonus)
    }
}

/// Parts computed from a bare number of children, all assumed to be in
/// exclusive custody.
#[derive(Debug, Clone, Copy)]
pub struct PartsFromCount {
    count: u32,
}

impl PartsFromCount {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

impl PartsCalculator for PartsFromCount {
    fn parts(
        &self,
        household: &Household,
    ) -> Decimal {
        let in_slots = self.count.min(FIRST_SLOTS);
        let beyond = self.count - in_slots;
        let children_parts = HALF * Decimal::from(in_slots) + Decimal::from(beyond);

        let isolated_bonus = if household.is_isolated_single() && self.count > 0 {
            HALF
        } else {
            Decimal::ZERO
        };

        finalize(household, children_parts + isolated_bonus)
    }
}

fn finalize(
    household: &Household,
    extra: Decimal,
) -> Decimal {
    let base = household.base_parts();
    round_quarter(base + extra).max(base)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{HouseholdStatus, Location};

    fn single() -> Household {
        Household::default()
    }

    fn isolated() -> Household {
        Household {
            status: HouseholdStatus::Single,
            is_isolated: true,
            location: Location::Metropole,
        }
    }

    fn couple() -> Household {
        Household {
            status: HouseholdStatus::Couple,
            ..Household::default()
        }
    }

    fn children(
        charge: usize,
        shared: usize,
    ) -> Vec<Child> {
        let mut list = vec![Child::charge(); charge];
        list.extend(vec![Child::shared(); shared]);
        list
    }

    fn detailed(
        household: &Household,
        list: &[Child],
    ) -> Decimal {
        PartsFromChildren::new(list).parts(household)
    }

    // =========================================================================
    // PartsFromChildren tests
    // =========================================================================

    #[test]
    fn no_children_keeps_base_parts() {
        assert_eq!(detailed(&single(), &[]), dec!(1));
        assert_eq!(detailed(&couple(), &[]), dec!(2));
        assert_eq!(detailed(&isolated(), &[]), dec!(1));
    }

    #[test]
    fn couple_with_one_child_in_charge() {
        assert_eq!(detailed(&couple(), &children(1, 0)), dec!(2.5));
    }

    #[test]
    fn isolated_parent_with_one_child_in_charge() {
        assert_eq!(detailed(&isolated(), &children(1, 0)), dec!(2));
    }

    #[test]
    fn third_child_counts_a_full_part() {
        assert_eq!(detailed(&couple(), &children(3, 0)), dec!(4));
    }

    #[test]
    fn charge_children_fill_first_slots_before_shared() {
        // Two exclusive children take the reduced slots, the shared child is
        // counted as a third child (0.5).
        assert_eq!(detailed(&couple(), &children(2, 1)), dec!(3.5));
    }

    #[test]
    fn shared_children_share_first_slots() {
        assert_eq!(detailed(&couple(), &children(0, 2)), dec!(2.5));
        assert_eq!(detailed(&couple(), &children(0, 3)), dec!(3));
    }

    #[test]
    fn order_of_children_is_irrelevant() {
        let mixed = vec![Child::shared(), Child::charge(), Child::shared()];

        assert_eq!(detailed(&couple(), &mixed), detailed(&couple(), &children(1, 2)));
    }

    #[test]
    fn isolated_bonus_with_shared_children_only() {
        // 1 + 0.25 + 0.25 bonus
        assert_eq!(detailed(&isolated(), &children(0, 1)), dec!(1.5));
        // 1 + 0.5 + 0.5 bonus (capped)
        assert_eq!(detailed(&isolated(), &children(0, 3)), dec!(2.5));
    }

    #[test]
    fn single_not_isolated_gets_no_bonus() {
        assert_eq!(detailed(&single(), &children(1, 0)), dec!(1.5));
    }

    #[test]
    fn parts_are_quarter_multiples_and_at_least_base() {
        for charge in 0..5 {
            for shared in 0..5 {
                for household in [single(), isolated(), couple()] {
                    let parts = detailed(&household, &children(charge, shared));

                    assert!(parts >= household.base_parts());
                    assert_eq!((parts * dec!(4)).fract(), Decimal::ZERO);
                }
            }
        }
    }

    // =========================================================================
    // PartsFromCount tests
    // =========================================================================

    #[test]
    fn count_matches_detailed_for_exclusive_custody() {
        for count in 0..6u32 {
            let list = children(count as usize, 0);
            for household in [single(), isolated(), couple()] {
                assert_eq!(
                    PartsFromCount::new(count).parts(&household),
                    detailed(&household, &list)
                );
            }
        }
    }

    #[test]
    fn count_disagrees_for_isolated_parent_with_shared_children() {
        let coarse = PartsFromCount::new(1).parts(&isolated());
        let precise = detailed(&isolated(), &children(0, 1));

        assert_eq!(coarse, dec!(2));
        assert_eq!(precise, dec!(1.5));
    }
}
