//! Threat (aggro) accumulator.
//!
//! A bounded scalar in [0, 100] that ramps with time and jumps on gameplay
//! events. Every mutation clamps, so no caller ever observes a value outside
//! the range.

use crate::config::ThreatConfig;
use crate::events::{EventChannel, GameEvent, SubscriberId, Topics};
use crate::math::{clamp01, lerp};

/// Escalating danger owned by the adversary.
#[derive(Clone, Debug)]
pub struct ThreatMeter {
    value: f32,
    config: ThreatConfig,
    subscription: Option<SubscriberId>,
}

impl ThreatMeter {
    pub const MAX: f32 = 100.0;

    /// Topics the meter reacts to.
    pub const TOPICS: Topics = Topics::SKILL_CHECK_FAILED
        .union(Topics::NOISE)
        .union(Topics::RESPAWNED);

    pub fn new(config: ThreatConfig) -> Self {
        Self {
            value: 0.0,
            config,
            subscription: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// `value / 100`, in [0, 1].
    pub fn normalized(&self) -> f32 {
        self.value / Self::MAX
    }

    pub fn is_maxed(&self) -> bool {
        self.value >= Self::MAX
    }

    pub fn config(&self) -> &ThreatConfig {
        &self.config
    }

    /// Adds `amount` (possibly negative) and clamps to [0, 100].
    pub fn add_aggro(&mut self, amount: f32) {
        self.value = (self.value + amount).clamp(0.0, Self::MAX);
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Continuous ramp for one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.add_aggro(self.config.ramp_per_second * self.config.ramp_multiplier * dt);
    }

    /// Subscribes the meter to its topics. Calling it twice keeps the first subscription.
    pub fn attach(&mut self, events: &mut EventChannel) -> SubscriberId {
        *self
            .subscription
            .get_or_insert_with(|| events.subscribe("threat", Self::TOPICS))
    }

    /// Applies every event received since the last pump.
    pub fn pump(&mut self, events: &mut EventChannel) {
        let Some(id) = self.subscription else {
            return;
        };
        for event in events.drain(id) {
            self.apply(&event);
        }
    }

    /// Reacts to a single event. Events outside [`Self::TOPICS`] are ignored.
    pub fn apply(&mut self, event: &GameEvent) {
        let before = self.value;
        match *event {
            GameEvent::SkillCheckFailed { .. } => {
                self.add_aggro(self.config.skill_check_fail_add);
            }
            GameEvent::Noise { intensity, .. } => {
                let amount = lerp(
                    self.config.noise_min_add,
                    self.config.noise_max_add,
                    clamp01(intensity),
                );
                self.add_aggro(amount);
            }
            GameEvent::Respawned => self.reset(),
            _ => return,
        }
        tracing::debug!(
            target: "game_core::threat",
            event = event.kind(),
            before,
            threat = self.value,
            "Threat changed"
        );
    }
}

impl Default for ThreatMeter {
    fn default() -> Self {
        Self::new(ThreatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn add_aggro_clamps_both_ends() {
        let mut meter = ThreatMeter::default();
        meter.add_aggro(200.0);
        assert_eq!(meter.value(), 100.0);
        assert!(meter.is_maxed());

        let mut meter = ThreatMeter::default();
        meter.add_aggro(-50.0);
        assert_eq!(meter.value(), 0.0);

        meter.add_aggro(30.0);
        meter.add_aggro(200.0);
        assert_eq!(meter.value(), 100.0);
    }

    #[test]
    fn normalized_is_linear_and_monotonic() {
        let mut meter = ThreatMeter::default();
        let mut last = -1.0;
        for step in 0..=10 {
            meter.reset();
            meter.add_aggro(step as f32 * 10.0);
            let n = meter.normalized();
            assert_eq!(n, meter.value() / 100.0);
            assert!(n > last);
            last = n;
        }
    }

    #[test]
    fn ramp_uses_rate_and_multiplier() {
        let mut meter = ThreatMeter::new(ThreatConfig {
            ramp_per_second: 2.0,
            ramp_multiplier: 1.5,
            ..ThreatConfig::default()
        });

        meter.tick(2.0);
        assert_eq!(meter.value(), 6.0);
    }

    #[test]
    fn noise_interpolates_and_clamps_intensity() {
        let mut meter = ThreatMeter::default();
        let noise = |intensity| GameEvent::Noise {
            position: Vec3::ZERO,
            intensity,
        };

        meter.apply(&noise(0.0));
        assert_eq!(meter.value(), 5.0);

        meter.reset();
        meter.apply(&noise(1.0));
        assert_eq!(meter.value(), 20.0);

        meter.reset();
        meter.apply(&noise(0.5));
        assert_eq!(meter.value(), 12.5);

        meter.reset();
        meter.apply(&noise(4.0));
        assert_eq!(meter.value(), 20.0);
    }

    #[test]
    fn pump_applies_subscribed_events() {
        let mut events = EventChannel::new();
        let mut meter = ThreatMeter::default();
        meter.attach(&mut events);

        events.publish(GameEvent::SkillCheckFailed { node: NodeId(0) });
        events.publish(GameEvent::HideEntered);
        meter.pump(&mut events);
        assert_eq!(meter.value(), 18.0);

        events.publish(GameEvent::Respawned);
        meter.pump(&mut events);
        assert_eq!(meter.value(), 0.0);
    }

    #[test]
    fn detached_meter_ignores_channel() {
        let mut events = EventChannel::new();
        let mut meter = ThreatMeter::default();

        events.publish(GameEvent::SkillCheckFailed { node: NodeId(0) });
        meter.pump(&mut events);

        assert_eq!(meter.value(), 0.0);
    }
}
