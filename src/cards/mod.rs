//! Card system: definitions, effects, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Static card data (type, tier, slot cost, effect, target rule)
//! - `CardEffect`: Tagged union of effect kinds
//! - `CardCatalog`: Card definition lookup

pub mod definition;
pub mod effect;
pub mod catalog;

pub use definition::{Card, CardId, CardType, TargetRequirement, Tier};
pub use effect::CardEffect;
pub use catalog::{CardCatalog, CatalogError, DefinitionProblem};
