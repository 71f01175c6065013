//! Cover Solvers
//!
//! A cover solver prices a request against one restaurant's offerings: it picks the
//! cheapest combination of offerings that together supply every requested item.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{offerings::Offering, request::Request};

pub mod memo;

pub use memo::MemoSolver;

/// How a cover may treat requested items that more than one chosen offering contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverlapPolicy {
    /// Every requested item is covered by exactly one chosen offering.
    #[default]
    Exact,

    /// An offering may re-cover items an earlier choice already covered. It is still
    /// paid for in full.
    Relaxed,
}

/// The cheapest set of offerings found for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    /// Total price of the chosen offerings
    pub total: Decimal,

    /// Indexes of the chosen offerings in the menu, in selection order
    pub offerings: SmallVec<[usize; 10]>,
}

impl Cover {
    /// Cover for a request with nothing in it.
    pub fn empty() -> Self {
        Self {
            total: Decimal::ZERO,
            offerings: SmallVec::new(),
        }
    }
}

/// Outcome of pricing a request against one restaurant.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverResult {
    /// Every requested item can be supplied.
    Feasible(Cover),

    /// At least one requested item cannot be supplied.
    Infeasible,
}

impl CoverResult {
    /// Whether the request can be fully supplied.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// Minimum total price, if feasible.
    pub fn price(&self) -> Option<Decimal> {
        self.cover().map(|cover| cover.total)
    }

    /// The cheapest cover, if feasible.
    pub fn cover(&self) -> Option<&Cover> {
        match self {
            Self::Feasible(cover) => Some(cover),
            Self::Infeasible => None,
        }
    }

    /// Consume the result, returning the cover if feasible.
    pub fn into_cover(self) -> Option<Cover> {
        match self {
            Self::Feasible(cover) => Some(cover),
            Self::Infeasible => None,
        }
    }
}

/// Trait for pricing a request against a restaurant's offerings
pub trait CoverSolver {
    /// Find the minimum total price at which `offerings` can supply every item in `request`.
    ///
    /// Infeasibility is reported as [`CoverResult::Infeasible`], never as an error.
    fn minimum_cost(&self, offerings: &[Offering], request: &Request) -> CoverResult;
}
