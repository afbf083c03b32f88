//! Presentation projections for materials.
//!
//! # Responsibility
//! - Turn materials into structured card data the front end can render.
//! - Keep layout/formatting out of the domain model.

pub mod card;
