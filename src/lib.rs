//! Platter
//!
//! Platter finds the cheapest single restaurant able to supply every item in a request.
//! Restaurants sell items alone or in bundles; each restaurant's price for a request is
//! the cheapest combination of its offerings that covers every requested item.

pub mod config;
pub mod items;
pub mod menus;
pub mod observability;
pub mod offerings;
pub mod prelude;
pub mod receipt;
pub mod recommender;
pub mod request;
pub mod solvers;
