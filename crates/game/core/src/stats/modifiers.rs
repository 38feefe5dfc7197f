use super::StatKind;

/// Signed stat deltas carried by an item. Absent entries are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StatModifiers {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub crit_chance: i32,
    pub dodge: i32,
}

impl StatModifiers {
    pub const fn new() -> Self {
        Self {
            hp: 0,
            max_hp: 0,
            attack: 0,
            defense: 0,
            speed: 0,
            crit_chance: 0,
            dodge: 0,
        }
    }

    pub fn get(&self, stat: StatKind) -> i32 {
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

    /// Builder-style setter.
    pub fn with(mut self, stat: StatKind, delta: i32) -> Self {
        let slot = match stat {
            StatKind::Hp => &mut self.hp,
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::CritChance => &mut self.crit_chance,
            StatKind::Dodge => &mut self.dodge,
        };
        *slot = delta;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}
