//! Recommender
//!
//! Prices a request against every restaurant and picks the cheapest one able to supply
//! all of it.

use std::cmp::Ordering;

use rayon::prelude::*;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    menus::{MenuRepository, RestaurantId, RestaurantMenu},
    request::{Request, RequestError},
    solvers::{Cover, CoverSolver, MemoSolver},
};

/// Errors producing a recommendation.
#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    /// No item was requested.
    #[error("no items requested")]
    EmptyRequest,

    /// Wrapped request construction error.
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// The cheapest restaurant for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Winning restaurant
    pub restaurant_id: RestaurantId,

    /// Offerings chosen at that restaurant
    pub cover: Cover,
}

impl Recommendation {
    /// Total price at the winning restaurant.
    pub fn price(&self) -> Decimal {
        self.cover.total
    }

    /// Cheapest first; equal prices go to the lowest restaurant id.
    fn cmp_by_price(&self, other: &Self) -> Ordering {
        self.cover
            .total
            .cmp(&other.cover.total)
            .then_with(|| self.restaurant_id.cmp(&other.restaurant_id))
    }
}

/// Finds the cheapest restaurant for a request
#[derive(Debug, Clone, Default)]
pub struct Recommender<S = MemoSolver> {
    solver: S,
    parallel: bool,
}

impl<S: CoverSolver + Sync> Recommender<S> {
    /// Create a recommender that prices menus with `solver`.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            parallel: false,
        }
    }

    /// Solve restaurants concurrently. The result is the same either way.
    #[must_use]
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Recommend a restaurant for raw item names.
    ///
    /// Names are normalised once here, before any restaurant is solved.
    ///
    /// # Errors
    ///
    /// Returns a [`RecommendError`] if the request is empty or too large. A request no
    /// restaurant can supply is `Ok(None)`.
    pub fn recommend<I, T>(
        &self,
        repository: &MenuRepository,
        names: I,
    ) -> Result<Option<Recommendation>, RecommendError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let request = Request::new(names)?;

        self.recommend_request(repository, &request)
    }

    /// Recommend a restaurant for an already normalised request.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::EmptyRequest`] if the request holds no items.
    #[tracing::instrument(
        name = "recommender.recommend",
        skip(self, repository, request),
        fields(items = request.len(), restaurants = repository.len()),
        err
    )]
    pub fn recommend_request(
        &self,
        repository: &MenuRepository,
        request: &Request,
    ) -> Result<Option<Recommendation>, RecommendError> {
        if request.is_empty() {
            return Err(RecommendError::EmptyRequest);
        }

        let best = if self.parallel {
            let menus: Vec<&RestaurantMenu> = repository.iter().collect();

            menus
                .par_iter()
                .filter_map(|menu| self.solve_menu(menu, request))
                .min_by(Recommendation::cmp_by_price)
        } else {
            repository
                .iter()
                .filter_map(|menu| self.solve_menu(menu, request))
                .min_by(Recommendation::cmp_by_price)
        };

        match &best {
            Some(recommendation) => info!(
                restaurant_id = %recommendation.restaurant_id,
                price = %recommendation.price(),
                "recommended restaurant"
            ),
            None => info!("no restaurant can supply the request"),
        }

        Ok(best)
    }

    fn solve_menu(&self, menu: &RestaurantMenu, request: &Request) -> Option<Recommendation> {
        let result = self.solver.minimum_cost(menu.offerings(), request);

        debug!(
            restaurant_id = %menu.id(),
            price = ?result.price(),
            "priced restaurant"
        );

        result.into_cover().map(|cover| Recommendation {
            restaurant_id: menu.id(),
            cover,
        })
    }
}
