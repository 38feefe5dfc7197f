//! Percent-roll checks. Every `roll` is a uniform draw in `[0, 100)`.

/// A move connects unless the roll exceeds its accuracy.
pub fn check_accuracy(accuracy: u32, roll: u32) -> bool {
    roll <= accuracy
}

/// The defender avoids the hit when the roll falls under its dodge stat.
pub fn check_dodge(dodge: u32, roll: u32) -> bool {
    roll < dodge
}

/// The hit is critical when the roll falls under the attacker's crit chance.
pub fn check_critical(crit_chance: u32, roll: u32) -> bool {
    roll < crit_chance
}
