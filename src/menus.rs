//! Menus
//!
//! A [`MenuRepository`] is built once from validated table rows and is read-only afterwards.

use std::{collections::BTreeMap, fmt, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{items::ItemSet, offerings::Offering};

pub mod table;

pub use table::TableError;

/// Identifier of a restaurant in the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RestaurantId(u64);

impl RestaurantId {
    /// Create a restaurant id, returning `None` for zero or negative values.
    pub fn new(id: i64) -> Option<Self> {
        u64::try_from(id).ok().filter(|id| *id > 0).map(Self)
    }

    /// Raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A parsed row of the source table: `restaurant_id, price, item_1, item_2, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow {
    /// Raw restaurant id as written in the table
    pub restaurant_id: i64,

    /// Price of the offering
    pub price: Decimal,

    /// Normalised items covered by the offering
    pub items: ItemSet,
}

impl MenuRow {
    /// Create a new row.
    pub fn new(restaurant_id: i64, price: Decimal, items: ItemSet) -> Self {
        Self {
            restaurant_id,
            price,
            items,
        }
    }
}

/// The deduplicated offerings of a single restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantMenu {
    id: RestaurantId,
    offerings: Vec<Offering>,
}

impl RestaurantMenu {
    /// Restaurant id
    pub fn id(&self) -> RestaurantId {
        self.id
    }

    /// Offerings in table order
    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    /// Offerings covering a single item.
    pub fn singles(&self) -> impl Iterator<Item = &Offering> {
        self.offerings.iter().filter(|offering| !offering.is_bundle())
    }

    /// Offerings covering more than one item.
    pub fn bundles(&self) -> impl Iterator<Item = &Offering> {
        self.offerings.iter().filter(|offering| offering.is_bundle())
    }
}

/// All restaurant menus, keyed by restaurant id.
#[derive(Debug, Clone, Default)]
pub struct MenuRepository {
    menus: BTreeMap<RestaurantId, RestaurantMenu>,
}

impl MenuRepository {
    /// Build the repository from table rows.
    ///
    /// Rows with a non-positive id, a non-positive price or no items are skipped. A row
    /// identical to an earlier one (same id, price and items) is dropped.
    pub fn build(rows: impl IntoIterator<Item = MenuRow>) -> Self {
        let mut menus: BTreeMap<RestaurantId, RestaurantMenu> = BTreeMap::new();
        let mut seen: FxHashSet<(RestaurantId, Offering)> = FxHashSet::default();

        for row in rows {
            let Some(id) = RestaurantId::new(row.restaurant_id) else {
                warn!(restaurant_id = row.restaurant_id, "skipping row with invalid restaurant id");
                continue;
            };

            let offering = match Offering::new(row.price, row.items) {
                Ok(offering) => offering,
                Err(error) => {
                    warn!(restaurant_id = %id, %error, "skipping invalid row");
                    continue;
                }
            };

            if !seen.insert((id, offering.clone())) {
                debug!(restaurant_id = %id, items = %offering.items(), "dropping duplicate row");
                continue;
            }

            menus
                .entry(id)
                .or_insert_with(|| RestaurantMenu {
                    id,
                    offerings: Vec::new(),
                })
                .offerings
                .push(offering);
        }

        let repository = Self { menus };

        info!(
            restaurants = repository.len(),
            offerings = repository.iter().map(|menu| menu.offerings.len()).sum::<usize>(),
            "menu repository built"
        );

        repository
    }

    /// Read a table from disk and build the repository from it.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the table is missing, empty or unreadable.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        Ok(Self::build(table::read_table(path)?))
    }

    /// Get a restaurant's menu.
    pub fn get(&self, id: RestaurantId) -> Option<&RestaurantMenu> {
        self.menus.get(&id)
    }

    /// Iterate over menus in ascending restaurant id order.
    pub fn iter(&self) -> impl Iterator<Item = &RestaurantMenu> {
        self.menus.values()
    }

    /// Number of restaurants.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Check if the repository holds no restaurants.
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}
