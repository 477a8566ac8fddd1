//! Activation targets.
//!
//! Some cards need the player to name something when they are played:
//! an opponent to mirror, a driver, a team. `Target` carries that choice
//! and `check_target` decides whether it is legal for this race.

use serde::{Deserialize, Serialize};

use crate::cards::TargetRequirement;
use crate::core::{DriverId, PlayerId, TeamId};
use crate::scoring::Selection;

/// A named target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Driver(DriverId),
    Team(TeamId),
}

impl Target {
    /// The requirement this target satisfies.
    #[must_use]
    pub fn requirement(self) -> TargetRequirement {
        match self {
            Target::Player(_) => TargetRequirement::Player,
            Target::Driver(_) => TargetRequirement::Driver,
            Target::Team(_) => TargetRequirement::Team,
        }
    }

    #[must_use]
    pub fn as_player(self) -> Option<PlayerId> {
        match self {
            Target::Player(p) => Some(p),
            _ => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player(p) => write!(f, "{p}"),
            Target::Driver(d) => write!(f, "{d}"),
            Target::Team(t) => write!(f, "{t}"),
        }
    }
}

/// Why a target was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidTargetReason {
    /// Card wants a different kind of target.
    WrongKind,
    /// Card takes no target at all.
    Unexpected,
    /// Target player is not in the league.
    NotLeagueMember,
    /// A player cannot target themselves.
    SelfTarget,
    /// Target driver/team is already part of the player's own selection.
    AlreadySelected,
}

impl std::fmt::Display for InvalidTargetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::WrongKind => "wrong kind of target",
            Self::Unexpected => "card takes no target",
            Self::NotLeagueMember => "not a league member",
            Self::SelfTarget => "cannot target yourself",
            Self::AlreadySelected => "already in your selection",
        };
        f.write_str(text)
    }
}

/// Check a supplied target against a card's requirement.
///
/// `Ok(None)` when the card needs no target and none was given.
pub(crate) fn check_target(
    requirement: TargetRequirement,
    target: Option<Target>,
    activating: PlayerId,
    members: &[PlayerId],
    selection: Option<&Selection>,
) -> Result<Option<Target>, TargetCheck> {
    let target = match (requirement, target) {
        (TargetRequirement::None, None) => return Ok(None),
        (TargetRequirement::None, Some(_)) => {
            return Err(TargetCheck::Invalid(InvalidTargetReason::Unexpected))
        }
        (_, None) => return Err(TargetCheck::Missing),
        (_, Some(t)) => t,
    };

    if target.requirement() != requirement {
        return Err(TargetCheck::Invalid(InvalidTargetReason::WrongKind));
    }

    match target {
        Target::Player(p) if p == activating => {
            Err(TargetCheck::Invalid(InvalidTargetReason::SelfTarget))
        }
        Target::Player(p) if !members.contains(&p) => {
            Err(TargetCheck::Invalid(InvalidTargetReason::NotLeagueMember))
        }
        Target::Driver(d) if selection.is_some_and(|s| s.has_driver(d)) => {
            Err(TargetCheck::Invalid(InvalidTargetReason::AlreadySelected))
        }
        Target::Team(t) if selection.is_some_and(|s| s.team == t) => {
            Err(TargetCheck::Invalid(InvalidTargetReason::AlreadySelected))
        }
        _ => Ok(Some(target)),
    }
}

/// Outcome of a failed target check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TargetCheck {
    Missing,
    Invalid(InvalidTargetReason),
}
