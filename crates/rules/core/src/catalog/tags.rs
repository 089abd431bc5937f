use bitflags::bitflags;

bitflags! {
    /// Condition and damage tags used for immunities and vulnerabilities.
    ///
    /// Serialized in human-readable formats as `"POISON | DISEASE"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct EffectTags: u16 {
        const GRABBED  = 1 << 0;
        const PRONE    = 1 << 1;
        const MOVED    = 1 << 2;
        const STUN     = 1 << 3;
        const FEAR     = 1 << 4;
        const MENTAL   = 1 << 5;
        const POISON   = 1 << 6;
        const DISEASE  = 1 << 7;
        const BLEED    = 1 << 8;
        const ELECTRIC = 1 << 9;
        const FIRE     = 1 << 10;
        const COLD     = 1 << 11;
    }
}

impl EffectTags {
    /// Tag names in declaration order, lowercase.
    pub fn names(self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}
