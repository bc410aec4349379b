//! Weapon stat channels, stat blocks and additive modifiers

use serde::{Deserialize, Serialize};

/// Number of stat channels
pub const CHANNEL_COUNT: usize = 7;

/// The seven weapon stat channels, in canonical display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatChannel {
    Power,
    Damage,
    FireRate,
    Accuracy,
    Speed,
    Range,
    Reload,
}

impl StatChannel {
    /// All channels in declaration order. Display ordering depends on this sequence.
    pub const ALL: [StatChannel; CHANNEL_COUNT] = [
        Self::Power,
        Self::Damage,
        Self::FireRate,
        Self::Accuracy,
        Self::Speed,
        Self::Range,
        Self::Reload,
    ];

    /// Position of this channel in [`StatChannel::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Damage => "Damage",
            Self::FireRate => "Fire Rate",
            Self::Accuracy => "Accuracy",
            Self::Speed => "Speed",
            Self::Range => "Range",
            Self::Reload => "Reload",
        }
    }

    /// Upper-case label shown on stat rows
    pub fn label(self) -> &'static str {
        match self {
            Self::Power => "POWER",
            Self::Damage => "DAMAGE",
            Self::FireRate => "FIRE RATE",
            Self::Accuracy => "ACCURACY",
            Self::Speed => "SPEED",
            Self::Range => "RANGE",
            Self::Reload => "RELOAD",
        }
    }
}

/// A single additive stat change carried by an attachment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub channel: StatChannel,
    pub value: f32,
}

impl Modifier {
    pub fn new(channel: StatChannel, value: f32) -> Self {
        Self { channel, value }
    }

    /// The same modifier with its sign flipped
    pub fn negated(self) -> Self {
        Self {
            channel: self.channel,
            value: -self.value,
        }
    }
}

/// One numeric value per stat channel. No clamping: values may go negative.
/// Fields missing when deserializing keep the naked weapon value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub power: f32,
    pub damage: f32,
    pub fire_rate: f32,
    pub accuracy: f32,
    pub speed: f32,
    pub range: f32,
    pub reload: f32,
}

impl Default for StatBlock {
    /// Naked weapon profile
    fn default() -> Self {
        Self {
            power: 56.0,
            damage: 82.0,
            fire_rate: 800.0,
            accuracy: 80.0,
            speed: 96.0,
            range: 24.2,
            reload: 2.0,
        }
    }
}

impl StatBlock {
    /// A block with every channel at zero
    pub fn zero() -> Self {
        Self::splat(0.0)
    }

    /// A block with every channel set to `value`
    pub fn splat(value: f32) -> Self {
        Self {
            power: value,
            damage: value,
            fire_rate: value,
            accuracy: value,
            speed: value,
            range: value,
            reload: value,
        }
    }

    /// Get the value of a channel
    pub fn get(&self, channel: StatChannel) -> f32 {
        match channel {
            StatChannel::Power => self.power,
            StatChannel::Damage => self.damage,
            StatChannel::FireRate => self.fire_rate,
            StatChannel::Accuracy => self.accuracy,
            StatChannel::Speed => self.speed,
            StatChannel::Range => self.range,
            StatChannel::Reload => self.reload,
        }
    }

    fn get_mut(&mut self, channel: StatChannel) -> &mut f32 {
        match channel {
            StatChannel::Power => &mut self.power,
            StatChannel::Damage => &mut self.damage,
            StatChannel::FireRate => &mut self.fire_rate,
            StatChannel::Accuracy => &mut self.accuracy,
            StatChannel::Speed => &mut self.speed,
            StatChannel::Range => &mut self.range,
            StatChannel::Reload => &mut self.reload,
        }
    }

    /// Set a channel to an absolute value
    pub fn set(&mut self, channel: StatChannel, value: f32) {
        *self.get_mut(channel) = value;
    }

    /// Add `delta` to a channel in place
    pub fn apply_modifier(&mut self, channel: StatChannel, delta: f32) {
        *self.get_mut(channel) += delta;
    }

    /// Apply one modifier in place
    pub fn apply(&mut self, modifier: &Modifier) {
        self.apply_modifier(modifier.channel, modifier.value);
    }

    /// Apply every modifier in place
    pub fn apply_all<'a>(&mut self, modifiers: impl IntoIterator<Item = &'a Modifier>) {
        for modifier in modifiers {
            self.apply(modifier);
        }
    }

    /// Subtract every modifier in place
    pub fn remove_all<'a>(&mut self, modifiers: impl IntoIterator<Item = &'a Modifier>) {
        for modifier in modifiers {
            self.apply(&modifier.negated());
        }
    }

    /// Copy of this block with the modifiers applied (non-mutating)
    pub fn with_modifiers<'a>(&self, modifiers: impl IntoIterator<Item = &'a Modifier>) -> StatBlock {
        let mut result = *self;
        result.apply_all(modifiers);
        result
    }

    /// `(channel, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (StatChannel, f32)> + '_ {
        StatChannel::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// Per-channel difference between a computed block and the base block.
/// Zero is a real entry, never an absence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatDeltas {
    values: [f32; CHANNEL_COUNT],
}

impl StatDeltas {
    /// `computed - base` for every channel
    pub fn between(computed: &StatBlock, base: &StatBlock) -> Self {
        let mut values = [0.0; CHANNEL_COUNT];
        for channel in StatChannel::ALL {
            values[channel.index()] = computed.get(channel) - base.get(channel);
        }
        Self { values }
    }

    /// Delta for one channel
    pub fn get(&self, channel: StatChannel) -> f32 {
        self.values[channel.index()]
    }

    /// `(channel, delta)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (StatChannel, f32)> + '_ {
        StatChannel::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Whether every channel is zero within `epsilon`
    pub fn is_zero(&self, epsilon: f32) -> bool {
        self.values.iter().all(|d| d.abs() <= epsilon)
    }
}

impl FromIterator<(StatChannel, f32)> for StatDeltas {
    fn from_iter<I: IntoIterator<Item = (StatChannel, f32)>>(iter: I) -> Self {
        let mut values = [0.0; CHANNEL_COUNT];
        for (channel, delta) in iter {
            values[channel.index()] += delta;
        }
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_order_matches_index() {
        for (i, channel) in StatChannel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_default_base_stats() {
        let stats = StatBlock::default();
        assert_eq!(stats.get(StatChannel::Power), 56.0);
        assert_eq!(stats.get(StatChannel::FireRate), 800.0);
        assert_eq!(stats.get(StatChannel::Reload), 2.0);
    }

    #[test]
    fn test_partial_block_deserializes_over_base() {
        let stats: StatBlock = serde_json::from_str(r#"{"power": 60.0}"#).unwrap();
        assert_eq!(stats.power, 60.0);
        assert_eq!(stats.damage, 82.0);
        assert_eq!(stats.range, 24.2);
    }

    #[test]
    fn test_apply_modifier_no_clamping() {
        let mut stats = StatBlock::zero();
        stats.apply_modifier(StatChannel::Reload, -10.0);
        assert_eq!(stats.reload, -10.0);
    }

    #[test]
    fn test_with_modifiers_leaves_original() {
        let base = StatBlock::default();
        let mods = [
            Modifier::new(StatChannel::Damage, 28.0),
            Modifier::new(StatChannel::Speed, -4.0),
        ];
        let result = base.with_modifiers(&mods);
        assert_eq!(base.damage, 82.0);
        assert_eq!(result.damage, 110.0);
        assert_eq!(result.speed, 92.0);
    }

    #[test]
    fn test_remove_undoes_apply() {
        let mods = [Modifier::new(StatChannel::Power, 7.5), Modifier::new(StatChannel::Power, 2.5)];
        let mut stats = StatBlock::default();
        stats.apply_all(&mods);
        assert_eq!(stats.power, 66.0);
        stats.remove_all(&mods);
        assert_eq!(stats.power, 56.0);
    }

    #[test]
    fn test_deltas_between() {
        let base = StatBlock::default();
        let mut computed = base;
        computed.apply_modifier(StatChannel::Accuracy, 12.0);
        let deltas = StatDeltas::between(&computed, &base);
        assert_eq!(deltas.get(StatChannel::Accuracy), 12.0);
        assert_eq!(deltas.get(StatChannel::Power), 0.0);
        assert_eq!(deltas.iter().count(), CHANNEL_COUNT);
    }

    #[test]
    fn test_deltas_from_iter_accumulates() {
        let deltas: StatDeltas = [(StatChannel::Range, 2.0), (StatChannel::Range, 3.0)]
            .into_iter()
            .collect();
        assert_eq!(deltas.get(StatChannel::Range), 5.0);
        assert!(!deltas.is_zero(1e-6));
        assert!(StatDeltas::default().is_zero(1e-6));
    }
}
