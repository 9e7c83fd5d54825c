//! Ideology plane, zones, and the attack predicate
//!
//! Ideology is a point on a bounded [-10, 10] x [-10, 10] plane. The plane is
//! carved into colored zones, four of which carry an "ultra" qualifier; the
//! coalition of a zone is the zone with that qualifier stripped. States on
//! either axis sit in the neutral zone.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::polity::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ideology {
    pub x: i32,
    pub y: i32,
}

impl Ideology {
    pub const MIN: i32 = -10;
    pub const MAX: i32 = 10;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sample a uniform point on the plane
    pub fn random(rng: &mut ChaCha8Rng) -> Self {
        Self {
            x: rng.gen_range(Self::MIN..=Self::MAX),
            y: rng.gen_range(Self::MIN..=Self::MAX),
        }
    }

    pub fn zone(&self) -> IdeologyZone {
        zone_of(self.x, self.y)
    }

    /// Nudge both coordinates by independent uniform deltas, clamped to the plane
    pub fn drift(&mut self, rng: &mut ChaCha8Rng, magnitude: i32) {
        self.x = (self.x + rng.gen_range(-magnitude..=magnitude)).clamp(Self::MIN, Self::MAX);
        self.y = (self.y + rng.gen_range(-magnitude..=magnitude)).clamp(Self::MIN, Self::MAX);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdeologyZone {
    Neutral,
    Red,
    UltraRed,
    Blue,
    UltraBlue,
    Green,
    UltraGreen,
    Yellow,
    UltraYellow,
    Unknown,
}

impl IdeologyZone {
    pub fn name(&self) -> &'static str {
        match self {
            IdeologyZone::Neutral => "neutral",
            IdeologyZone::Red => "red",
            IdeologyZone::UltraRed => "ultra-red",
            IdeologyZone::Blue => "blue",
            IdeologyZone::UltraBlue => "ultra-blue",
            IdeologyZone::Green => "green",
            IdeologyZone::UltraGreen => "ultra-green",
            IdeologyZone::Yellow => "yellow",
            IdeologyZone::UltraYellow => "ultra-yellow",
            IdeologyZone::Unknown => "unknown",
        }
    }

    /// Coalition name: the zone with any ultra qualifier stripped
    pub fn coalition(&self) -> IdeologyZone {
        match self {
            IdeologyZone::UltraRed => IdeologyZone::Red,
            IdeologyZone::UltraBlue => IdeologyZone::Blue,
            IdeologyZone::UltraGreen => IdeologyZone::Green,
            IdeologyZone::UltraYellow => IdeologyZone::Yellow,
            zone => *zone,
        }
    }

    pub fn is_radical(&self) -> bool {
        matches!(
            self,
            IdeologyZone::UltraRed
                | IdeologyZone::UltraBlue
                | IdeologyZone::UltraGreen
                | IdeologyZone::UltraYellow
        )
    }
}

impl std::fmt::Display for IdeologyZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a coordinate pair to its zone
pub fn zone_of(x: i32, y: i32) -> IdeologyZone {
    let within = |v: i32, lo: i32, hi: i32| v >= lo && v <= hi;

    if x == 0 || y == 0 {
        return IdeologyZone::Neutral;
    }
    if (within(x, -10, -3) && within(y, 7, 10)) || (within(x, -10, -7) && within(y, 3, 6)) {
        return IdeologyZone::UltraRed;
    }
    if (within(x, 3, 10) && within(y, 7, 10)) || (within(x, 7, 10) && within(y, 3, 6)) {
        return IdeologyZone::UltraBlue;
    }
    if (within(x, -10, -7) && within(y, -10, -3)) || (within(x, -6, -3) && within(y, -10, -7)) {
        return IdeologyZone::UltraGreen;
    }
    if (within(x, 3, 10) && within(y, -10, -7)) || (within(x, 7, 10) && within(y, -6, -3)) {
        return IdeologyZone::UltraYellow;
    }
    if (within(x, -10, -1) && within(y, 1, 2))
        || (within(x, -2, -1) && within(y, 3, 10))
        || (within(x, -6, -3) && within(y, 3, 6))
    {
        return IdeologyZone::Red;
    }
    if (within(x, 1, 10) && within(y, 1, 2))
        || (within(x, 1, 2) && within(y, 3, 10))
        || (within(x, 3, 6) && within(y, 3, 6))
    {
        return IdeologyZone::Blue;
    }
    if (within(x, -10, -1) && within(y, -2, -1))
        || (within(x, -2, -1) && within(y, -10, -3))
        || (within(x, -6, -3) && within(y, -6, -3))
    {
        return IdeologyZone::Green;
    }
    if (within(x, 1, 10) && within(y, -2, -1))
        || (within(x, 1, 2) && within(y, -10, -3))
        || (within(x, 3, 6) && within(y, -6, -3))
    {
        return IdeologyZone::Yellow;
    }
    IdeologyZone::Unknown
}

/// Whether `attacker` may open hostilities against `defender`
///
/// Neutral states are never attacked; only radical states attack; coalition
/// partners never fight each other.
pub fn can_attack(attacker: &State, defender: &State) -> bool {
    if defender.zone == IdeologyZone::Neutral {
        return false;
    }
    if !attacker.zone.is_radical() {
        return false;
    }
    attacker.zone.coalition() != defender.zone.coalition()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_is_neutral() {
        assert_eq!(zone_of(0, 5), IdeologyZone::Neutral);
        assert_eq!(zone_of(-7, 0), IdeologyZone::Neutral);
        assert_eq!(zone_of(0, 0), IdeologyZone::Neutral);
    }

    #[test]
    fn test_zone_corners() {
        assert_eq!(zone_of(-10, 10), IdeologyZone::UltraRed);
        assert_eq!(zone_of(10, 10), IdeologyZone::UltraBlue);
        assert_eq!(zone_of(-10, -10), IdeologyZone::UltraGreen);
        assert_eq!(zone_of(10, -10), IdeologyZone::UltraYellow);
    }

    #[test]
    fn test_moderate_bands() {
        assert_eq!(zone_of(-5, 1), IdeologyZone::Red);
        assert_eq!(zone_of(5, 5), IdeologyZone::Blue);
        assert_eq!(zone_of(-4, -4), IdeologyZone::Green);
        assert_eq!(zone_of(4, -4), IdeologyZone::Yellow);
    }

    #[test]
    fn test_coalition_strips_qualifier() {
        assert_eq!(IdeologyZone::UltraRed.coalition(), IdeologyZone::Red);
        assert_eq!(IdeologyZone::Red.coalition(), IdeologyZone::Red);
        assert_eq!(IdeologyZone::Neutral.coalition(), IdeologyZone::Neutral);
    }

    #[test]
    fn test_radicalism() {
        assert!(IdeologyZone::UltraYellow.is_radical());
        assert!(!IdeologyZone::Yellow.is_radical());
        assert!(!IdeologyZone::Neutral.is_radical());
    }

    #[test]
    fn test_drift_stays_in_bounds() {
        use rand::SeedableRng;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut ideology = Ideology::new(10, -10);
        for _ in 0..100 {
            ideology.drift(&mut rng, 3);
            assert!(ideology.x >= Ideology::MIN && ideology.x <= Ideology::MAX);
            assert!(ideology.y >= Ideology::MIN && ideology.y <= Ideology::MAX);
        }
    }
}
