//! Stat row ordering and formatting for the stats view
//!
//! Rows are grouped improved / unchanged / worsened. Within a group the
//! canonical channel order is kept.

use std::cmp::Ordering;

use crate::stats::{StatBlock, StatChannel, StatDeltas, CHANNEL_COUNT};

/// Deltas within this distance of zero count as unchanged
pub const DELTA_EPSILON: f32 = 1e-5;

/// Direction of a stat change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Trend {
    Improved,
    Unchanged,
    Worsened,
}

impl Trend {
    /// Classify a delta
    pub fn of(delta: f32) -> Self {
        if delta.abs() <= DELTA_EPSILON {
            Self::Unchanged
        } else if delta > 0.0 {
            Self::Improved
        } else {
            Self::Worsened
        }
    }
}

/// One row of the stats view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatRow {
    pub channel: StatChannel,
    pub value: f32,
    pub delta: f32,
    pub trend: Trend,
}

impl StatRow {
    /// Upper-case label
    pub fn label(&self) -> &'static str {
        self.channel.label()
    }

    /// Value with at most two decimals
    pub fn value_text(&self) -> String {
        format_amount(self.value)
    }

    /// Signed delta text, empty when unchanged
    pub fn delta_text(&self) -> String {
        match self.trend {
            Trend::Unchanged => String::new(),
            Trend::Improved => format!("+{}", format_amount(self.delta)),
            Trend::Worsened => format_amount(self.delta),
        }
    }
}

/// Format with at most two decimals, trailing zeros trimmed
pub fn format_amount(value: f32) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Deterministic display order for the current deltas
pub fn display_order(deltas: &StatDeltas) -> [StatChannel; CHANNEL_COUNT] {
    let mut order = StatChannel::ALL;
    // Stable sort keeps declaration order inside each trend group
    order.sort_by(|a, b| compare(deltas, *a, *b));
    order
}

fn compare(deltas: &StatDeltas, a: StatChannel, b: StatChannel) -> Ordering {
    Trend::of(deltas.get(a)).cmp(&Trend::of(deltas.get(b)))
}

/// Rows for the stats view, in display order
pub fn stat_rows(values: &StatBlock, deltas: &StatDeltas) -> Vec<StatRow> {
    display_order(deltas)
        .into_iter()
        .map(|channel| {
            let delta = deltas.get(channel);
            StatRow {
                channel,
                value: values.get(channel),
                delta,
                trend: Trend::of(delta),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatChannel::*;

    fn deltas(values: [f32; CHANNEL_COUNT]) -> StatDeltas {
        StatChannel::ALL.into_iter().zip(values).collect()
    }

    #[test]
    fn test_mixed_order() {
        let d = deltas([5.0, 0.0, -3.0, 0.0, 1.0, -1.0, 0.0]);
        assert_eq!(
            display_order(&d),
            [Power, Speed, Damage, Accuracy, Reload, FireRate, Range]
        );
    }

    #[test]
    fn test_all_zero_keeps_canonical() {
        assert_eq!(display_order(&StatDeltas::default()), StatChannel::ALL);
    }

    #[test]
    fn test_near_zero_counts_as_unchanged() {
        let d = deltas([1e-7, -1e-7, 0.5, 0.0, 0.0, 0.0, -0.5]);
        assert_eq!(
            display_order(&d),
            [FireRate, Power, Damage, Accuracy, Speed, Range, Reload]
        );
    }

    #[test]
    fn test_trend_classification() {
        assert_eq!(Trend::of(0.1), Trend::Improved);
        assert_eq!(Trend::of(0.0), Trend::Unchanged);
        assert_eq!(Trend::of(-0.1), Trend::Worsened);
    }

    #[test]
    fn test_rows_carry_values() {
        let base = StatBlock::default();
        let d = deltas([0.0, 0.0, 0.0, 0.0, 0.0, 2.2, 0.0]);
        let rows = stat_rows(&base, &d);
        assert_eq!(rows.len(), CHANNEL_COUNT);
        assert_eq!(rows[0].channel, Range);
        assert_eq!(rows[0].value, 24.2);
        assert_eq!(rows[0].label(), "RANGE");
        assert_eq!(rows[1].channel, Power);
    }

    #[test]
    fn test_text_formatting() {
        assert_eq!(format_amount(800.0), "800");
        assert_eq!(format_amount(24.2), "24.2");
        assert_eq!(format_amount(63.39), "63.39");
        assert_eq!(format_amount(-0.001), "0");

        let row = StatRow { channel: Power, value: 63.39, delta: 7.39, trend: Trend::Improved };
        assert_eq!(row.delta_text(), "+7.39");
        let row = StatRow { channel: Speed, value: 90.0, delta: -6.0, trend: Trend::Worsened };
        assert_eq!(row.delta_text(), "-6");
        let row = StatRow { channel: Reload, value: 2.0, delta: 0.0, trend: Trend::Unchanged };
        assert_eq!(row.delta_text(), "");
    }
}
