//! Attribute model.
//!
//! A single vector type, [`Attributes`], carries both actor state (current
//! and maximum resources, primary stats, resistances) and skill templates.
//!
//! ```text
//! [ actor state ] ──weighted_value──▶ [ template ] ──▶ range / radius / cost / damage
//! ```

pub mod attributes;
pub mod resources;

pub use attributes::{AttributeKind, Attributes};
pub use resources::{RESOURCE_WEIGHTS, fraction, fractions, health};
