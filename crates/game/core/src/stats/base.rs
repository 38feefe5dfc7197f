use super::StatKind;

/// Base attribute record owned by a combatant.
///
/// Only the progression engine and the combatant factory write these
/// values; equipment is applied on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BaseStats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub crit_chance: u32,
    pub dodge: u32,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::MaxHp => self.max_hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::CritChance => self.crit_chance,
            StatKind::Dodge => self.dodge,
        }
    }

    pub fn get_mut(&mut self, stat: StatKind) -> &mut u32 {
        match stat {
            StatKind::Hp => &mut self.hp,
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::CritChance => &mut self.crit_chance,
            StatKind::Dodge => &mut self.dodge,
        }
    }

    /// Multiplies `stat` by `percent / 100`, rounding down.
    pub fn scale(&mut self, stat: StatKind, percent: u32) {
        let value = self.get_mut(stat);
        *value = scale_percent(*value, percent);
    }
}

/// `floor(value * percent / 100)` without intermediate overflow.
pub fn scale_percent(value: u32, percent: u32) -> u32 {
    let scaled = (value as u64 * percent as u64) / 100;
    scaled.min(u32::MAX as u64) as u32
}
