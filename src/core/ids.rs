//! Identifier newtypes.
//!
//! Every entity the engine touches (players, leagues, races, drivers,
//! teams) is referred to by an opaque numeric ID. The engine never
//! interprets the value; collaborators assign them.
//!
//! ```
//! use power_cards::core::{PlayerId, RaceId};
//!
//! let player = PlayerId::new(7);
//! assert_eq!(player.raw(), 7);
//! assert_eq!(format!("{}", RaceId::new(3)), "Race(3)");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

id_type!(
    /// A fantasy player (a user of the game, not a racing driver).
    PlayerId,
    "Player"
);

id_type!(
    /// A league: a group of players competing over one season.
    LeagueId,
    "League"
);

id_type!(
    /// A single race weekend.
    RaceId,
    "Race"
);

id_type!(
    /// A real-world racing driver.
    DriverId,
    "Driver"
);

id_type!(
    /// A real-world constructor team.
    TeamId,
    "Team"
);

/// Championship year, e.g. `2026`.
pub type Season = u16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(format!("{}", PlayerId::new(1)), "Player(1)");
        assert_eq!(format!("{}", LeagueId::new(2)), "League(2)");
        assert_eq!(format!("{}", DriverId::new(44)), "Driver(44)");
        assert_eq!(format!("{}", TeamId::new(9)), "Team(9)");
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let mut ids = vec![RaceId::new(3), RaceId::new(1), RaceId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![RaceId::new(1), RaceId::new(2), RaceId::new(3)]);
    }
}
