/// Named combatant attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum StatKind {
    /// Current hit points (a pool, not a derived value).
    Hp,
    MaxHp,
    Attack,
    Defense,
    Speed,
    /// Percent chance to land a critical hit.
    CritChance,
    /// Percent chance to avoid an incoming hit.
    Dodge,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
