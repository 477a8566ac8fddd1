//! Card activation: choosing which deck cards to play on a race.
//!
//! ## Lifecycle
//!
//! 1. `ActivationResolver::activate` checks the request and rolls any
//!    Mystery/Random transformation. Re-activating re-rolls.
//! 2. Before the race lock the player may `clear_side` or `clear`.
//! 3. After the lock, `commit` burns the chosen cards in the
//!    `UsedCardLedger` so they can't be played again that season.

mod ledger;
mod targets;
mod resolver;

pub use ledger::UsedCardLedger;
pub use targets::{InvalidTargetReason, Target};
pub use resolver::{
    transformation_pool, ActivatedCard, Activation, ActivationContext, ActivationError,
    ActivationRequest, ActivationResolver, CardPick, InvalidCardReason,
};
