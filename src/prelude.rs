//! Platter prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    items::{ItemSet, normalize_item_name},
    menus::{MenuRepository, MenuRow, RestaurantId, RestaurantMenu, TableError},
    offerings::{Offering, OfferingError},
    receipt::{ReceiptError, format_price, render_line},
    recommender::{RecommendError, Recommendation, Recommender},
    request::{Request, RequestError},
    solvers::{Cover, CoverResult, CoverSolver, MemoSolver, OverlapPolicy},
};
