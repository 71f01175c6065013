//! Memoised cover solver
//!
//! Branch-and-bound over the set of still-uncovered requested items. Requested items are
//! numbered in the request's canonical order and sets of them are `u64` bitmasks. Each
//! level resolves the first uncovered item, so only offerings containing that item are
//! tried, and every distinct remainder is solved once.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    offerings::Offering,
    request::Request,
    solvers::{Cover, CoverResult, CoverSolver, OverlapPolicy},
};

/// An offering reduced to the requested items it contains.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Index of the offering in the menu
    offering: usize,

    /// Requested items the offering contains
    mask: u64,

    price: Decimal,
}

/// Best choice for a remainder: total price and the candidate picked first.
type MemoEntry = Option<(Decimal, usize)>;

/// Exact cover solver with memoisation on the uncovered item set
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoSolver {
    overlap: OverlapPolicy,
}

impl MemoSolver {
    /// Create a solver with the given overlap policy.
    pub fn new(overlap: OverlapPolicy) -> Self {
        Self { overlap }
    }

    /// Overlap policy used by this solver.
    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }
}

impl CoverSolver for MemoSolver {
    fn minimum_cost(&self, offerings: &[Offering], request: &Request) -> CoverResult {
        if request.is_empty() {
            return CoverResult::Feasible(Cover::empty());
        }

        let candidates = candidates(offerings, request);
        let all = full_mask(request.len());

        // An item no offering contains can never be covered.
        let reachable = candidates.iter().fold(0, |acc, candidate| acc | candidate.mask);
        if reachable & all != all {
            debug!(
                missing = all & !reachable,
                "request contains items missing from menu"
            );
            return CoverResult::Infeasible;
        }

        let mut search = Search {
            candidates: &candidates,
            overlap: self.overlap,
            memo: FxHashMap::default(),
        };

        let total = search.solve(all);

        debug!(
            candidates = candidates.len(),
            subproblems = search.memo.len(),
            feasible = total.is_some(),
            "cover search finished"
        );

        match total {
            Some(total) => CoverResult::Feasible(Cover {
                total,
                offerings: search.chosen(all),
            }),
            None => CoverResult::Infeasible,
        }
    }
}

struct Search<'a> {
    candidates: &'a [Candidate],
    overlap: OverlapPolicy,
    memo: FxHashMap<u64, MemoEntry>,
}

impl Search<'_> {
    /// Cheapest price covering `remaining`, or `None` if it cannot be covered.
    fn solve(&mut self, remaining: u64) -> Option<Decimal> {
        if remaining == 0 {
            return Some(Decimal::ZERO);
        }

        if let Some(entry) = self.memo.get(&remaining) {
            return entry.map(|(total, _)| total);
        }

        let target = 1_u64 << remaining.trailing_zeros();
        let candidates = self.candidates;
        let mut best: MemoEntry = None;

        for (position, candidate) in candidates.iter().enumerate() {
            if candidate.mask & target == 0 {
                continue;
            }

            if self.overlap == OverlapPolicy::Exact && candidate.mask & !remaining != 0 {
                continue;
            }

            let Some(rest) = self.solve(remaining & !candidate.mask) else {
                continue;
            };

            let Some(total) = candidate.price.checked_add(rest) else {
                continue;
            };

            if best.is_none_or(|(best_total, _)| total < best_total) {
                best = Some((total, position));
            }
        }

        trace!(remaining, best = ?best.map(|(total, _)| total), "subproblem solved");

        self.memo.insert(remaining, best);

        best.map(|(total, _)| total)
    }

    /// Walk the memo from `all` to recover the chosen offerings.
    fn chosen(&self, all: u64) -> SmallVec<[usize; 10]> {
        let mut chosen = SmallVec::new();
        let mut remaining = all;

        while remaining != 0 {
            let Some(Some((_, position))) = self.memo.get(&remaining) else {
                break;
            };

            let Some(candidate) = self.candidates.get(*position) else {
                break;
            };

            chosen.push(candidate.offering);
            remaining &= !candidate.mask;
        }

        chosen
    }
}

/// Offerings that contain at least one requested item, with their item masks.
fn candidates(offerings: &[Offering], request: &Request) -> SmallVec<[Candidate; 16]> {
    offerings
        .iter()
        .enumerate()
        .filter_map(|(index, offering)| {
            let mask = request
                .items()
                .iter()
                .enumerate()
                .filter(|(_, item)| offering.covers(item))
                .fold(0_u64, |mask, (bit, _)| mask | (1 << bit));

            (mask != 0).then_some(Candidate {
                offering: index,
                mask,
                price: offering.price(),
            })
        })
        .collect()
}

fn full_mask(len: usize) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1_u64 << len) - 1
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::ItemSet;

    use super::*;

    fn offering(cents: i64, items: &[&str]) -> Result<Offering, crate::offerings::OfferingError> {
        Offering::new(Decimal::new(cents, 2), ItemSet::from_strs(items))
    }

    fn tea_and_coffee() -> Result<Vec<Offering>, crate::offerings::OfferingError> {
        Ok(vec![
            offering(500, &["tea"])?,
            offering(300, &["coffee"])?,
            offering(700, &["tea", "coffee"])?,
        ])
    }

    #[test]
    fn bundle_beats_singles() -> TestResult {
        let menu = tea_and_coffee()?;
        let request = Request::new(["tea", "coffee"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.price(), Some(Decimal::new(7, 0)));
        assert_eq!(result.cover().map(|cover| cover.offerings.to_vec()), Some(vec![2]));

        Ok(())
    }

    #[test]
    fn single_item_request() -> TestResult {
        let menu = tea_and_coffee()?;
        let request = Request::new(["tea"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.price(), Some(Decimal::new(5, 0)));

        Ok(())
    }

    #[test]
    fn missing_item_is_infeasible() -> TestResult {
        let menu = tea_and_coffee()?;
        let request = Request::new(["tea", "coffee", "sugar"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result, CoverResult::Infeasible);

        Ok(())
    }

    #[test]
    fn singles_win_when_cheaper() -> TestResult {
        let menu = vec![
            offering(200, &["tea"])?,
            offering(300, &["coffee"])?,
            offering(700, &["tea", "coffee"])?,
        ];
        let request = Request::new(["coffee", "tea"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.price(), Some(Decimal::new(5, 0)));

        let mut chosen = result.into_cover().map(|cover| cover.offerings.to_vec());
        if let Some(chosen) = chosen.as_mut() {
            chosen.sort_unstable();
        }
        assert_eq!(chosen, Some(vec![0, 1]));

        Ok(())
    }

    #[test]
    fn bundle_with_unrequested_items_is_usable() -> TestResult {
        let menu = vec![
            offering(400, &["extreme_fajita"])?,
            offering(500, &["fancy_european_water"])?,
            offering(600, &["extreme_fajita", "jalapeno_poppers", "extra_salsa"])?,
        ];
        let request = Request::new(["extreme_fajita", "fancy_european_water"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.price(), Some(Decimal::new(9, 0)));

        let menu = vec![
            offering(800, &["fancy_european_water"])?,
            offering(500, &["fancy_european_water"])?,
            offering(600, &["extreme_fajita", "jalapeno_poppers", "extra_salsa"])?,
        ];

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.price(), Some(Decimal::new(11, 0)));

        Ok(())
    }

    #[test]
    fn empty_request_is_free() -> TestResult {
        let menu = tea_and_coffee()?;
        let request = Request::new(Vec::<String>::new())?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result, CoverResult::Feasible(Cover::empty()));

        Ok(())
    }

    #[test]
    fn empty_menu_is_infeasible() -> TestResult {
        let request = Request::new(["tea"])?;

        let result = MemoSolver::default().minimum_cost(&[], &request);

        assert!(!result.is_feasible());

        Ok(())
    }

    #[test]
    fn exact_policy_never_covers_an_item_twice() -> TestResult {
        let menu = vec![
            offering(100, &["a", "b"])?,
            offering(100, &["b", "c"])?,
            offering(1000, &["c"])?,
        ];
        let request = Request::new(["a", "b", "c"])?;

        let exact = MemoSolver::new(OverlapPolicy::Exact).minimum_cost(&menu, &request);
        let relaxed = MemoSolver::new(OverlapPolicy::Relaxed).minimum_cost(&menu, &request);

        assert_eq!(exact.price(), Some(Decimal::new(11, 0)));
        assert_eq!(relaxed.price(), Some(Decimal::new(2, 0)));

        Ok(())
    }

    #[test]
    fn exact_policy_can_be_infeasible_where_relaxed_is_not() -> TestResult {
        let menu = vec![offering(100, &["a", "b"])?, offering(100, &["b", "c"])?];
        let request = Request::new(["a", "b", "c"])?;

        let exact = MemoSolver::new(OverlapPolicy::Exact).minimum_cost(&menu, &request);
        let relaxed = MemoSolver::new(OverlapPolicy::Relaxed).minimum_cost(&menu, &request);

        assert_eq!(exact, CoverResult::Infeasible);
        assert_eq!(relaxed.price(), Some(Decimal::new(2, 0)));

        Ok(())
    }

    #[test]
    fn ties_pick_the_earliest_offering() -> TestResult {
        let menu = vec![offering(500, &["tea"])?, offering(500, &["tea"])?];
        let request = Request::new(["tea"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.cover().map(|cover| cover.offerings.to_vec()), Some(vec![0]));

        Ok(())
    }

    #[test]
    fn chosen_offerings_partition_the_request() -> TestResult {
        let menu = vec![
            offering(150, &["a"])?,
            offering(150, &["b"])?,
            offering(150, &["c"])?,
            offering(150, &["d"])?,
            offering(250, &["a", "b"])?,
            offering(250, &["c", "d"])?,
            offering(320, &["b", "c", "z"])?,
        ];
        let request = Request::new(["a", "b", "c", "d"])?;

        let result = MemoSolver::default().minimum_cost(&menu, &request);

        assert_eq!(result.price(), Some(Decimal::new(5, 0)));

        let chosen = result.into_cover().map(|cover| cover.offerings).unwrap_or_default();
        let mut covered: Vec<&str> = chosen
            .iter()
            .filter_map(|index| menu.get(*index))
            .flat_map(|offering| offering.items().iter())
            .filter(|item| request.items().contains(item))
            .collect();
        covered.sort_unstable();

        assert_eq!(covered, vec!["a", "b", "c", "d"]);

        Ok(())
    }

    #[test]
    fn full_mask_bounds() {
        assert_eq!(full_mask(0), 0);
        assert_eq!(full_mask(3), 0b111);
        assert_eq!(full_mask(64), u64::MAX);
    }
}
