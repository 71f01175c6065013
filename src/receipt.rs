//! Receipt
//!
//! Rendering of recommendations: the one-line result, a table of the chosen offerings
//! and a JSON view.

use std::{fmt, io};

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    items::ItemSet,
    menus::{RestaurantId, RestaurantMenu},
    offerings::Offering,
    recommender::Recommendation,
};

/// Printed when no restaurant can supply the request.
pub const NO_RESULT: &str = "Nil";

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The chosen offering index does not exist in the menu.
    #[error("offering {0} not found in menu of restaurant {1}")]
    MissingOffering(usize, RestaurantId),

    /// The menu does not belong to the recommended restaurant.
    #[error("menu of restaurant {menu} does not match recommended restaurant {recommended}")]
    MenuMismatch {
        /// Restaurant owning the menu
        menu: RestaurantId,
        /// Recommended restaurant
        recommended: RestaurantId,
    },

    /// IO error
    #[error(transparent)]
    Io(#[from] io::Error),

    /// JSON serialisation error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Format a price with trailing zeros removed but at least one fractional digit.
///
/// `11.50` becomes `11.5`, `11.00` becomes `11.0`.
pub fn format_price(price: Decimal) -> String {
    let normalized = price.normalize();

    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.restaurant_id, format_price(self.price()))
    }
}

/// Render the single result line: `"<restaurant_id> <price>"` or [`NO_RESULT`].
pub fn render_line(recommendation: Option<&Recommendation>) -> String {
    recommendation.map_or_else(|| NO_RESULT.to_string(), ToString::to_string)
}

#[derive(Debug, Serialize)]
struct OfferingView<'a> {
    price: String,
    items: &'a ItemSet,
}

#[derive(Debug, Serialize)]
struct RecommendationView<'a> {
    restaurant_id: RestaurantId,
    price: String,
    offerings: Vec<OfferingView<'a>>,
}

/// Write the recommendation as JSON, or `null` when there is none.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a chosen offering is missing from `menu` or the output
/// cannot be written.
pub fn write_json(
    mut out: impl io::Write,
    result: Option<(&Recommendation, &RestaurantMenu)>,
) -> Result<(), ReceiptError> {
    let view = match result {
        Some((recommendation, menu)) => {
            check_menu(recommendation, menu)?;

            Some(RecommendationView {
                restaurant_id: recommendation.restaurant_id,
                price: format_price(recommendation.price()),
                offerings: offering_views(recommendation, menu)?,
            })
        }
        None => None,
    };

    serde_json::to_writer(&mut out, &view)?;
    writeln!(out)?;

    Ok(())
}

/// Write a table of the offerings chosen at the recommended restaurant, then the total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a chosen offering is missing from `menu` or the output
/// cannot be written.
pub fn write_breakdown(
    mut out: impl io::Write,
    recommendation: &Recommendation,
    menu: &RestaurantMenu,
) -> Result<(), ReceiptError> {
    check_menu(recommendation, menu)?;

    let mut builder = Builder::default();

    builder.push_record(["Items", "Kind", "Price"]);

    for index in &recommendation.cover.offerings {
        let offering = chosen_offering(menu, *index)?;

        let kind = if offering.is_bundle() {
            "bundle"
        } else {
            "single"
        };

        builder.push_record([
            offering.items().iter().collect::<Vec<_>>().join("\n"),
            kind.to_string(),
            format_price(offering.price()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Restaurant {}: {}",
        recommendation.restaurant_id,
        format_price(recommendation.price())
    )?;

    Ok(())
}

fn offering_views<'a>(
    recommendation: &Recommendation,
    menu: &'a RestaurantMenu,
) -> Result<Vec<OfferingView<'a>>, ReceiptError> {
    let mut views = Vec::with_capacity(recommendation.cover.offerings.len());

    for index in &recommendation.cover.offerings {
        let offering = chosen_offering(menu, *index)?;

        views.push(OfferingView {
            price: format_price(offering.price()),
            items: offering.items(),
        });
    }

    Ok(views)
}

fn chosen_offering(menu: &RestaurantMenu, index: usize) -> Result<&Offering, ReceiptError> {
    menu.offerings()
        .get(index)
        .ok_or(ReceiptError::MissingOffering(index, menu.id()))
}

fn check_menu(recommendation: &Recommendation, menu: &RestaurantMenu) -> Result<(), ReceiptError> {
    if menu.id() == recommendation.restaurant_id {
        Ok(())
    } else {
        Err(ReceiptError::MenuMismatch {
            menu: menu.id(),
            recommended: recommendation.restaurant_id,
        })
    }
}
