//! Tunable parameters for the encounter.
//!
//! Every value has a default matching the shipped tuning, so a config file
//! only needs to list what it overrides.

use crate::error::{ErrorSeverity, GameError};
use crate::math::lerp;

/// A value that slides linearly with normalized threat.
///
/// `calm` applies at threat 0, `frantic` at threat 100.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    pub calm: f32,
    pub frantic: f32,
}

impl Curve {
    pub const fn new(calm: f32, frantic: f32) -> Self {
        Self { calm, frantic }
    }

    /// Value at normalized threat `t` (clamped to [0, 1]).
    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        lerp(self.calm, self.frantic, t)
    }
}

/// Threat meter tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ThreatConfig {
    /// Continuous rise per second.
    pub ramp_per_second: f32,
    /// Late-game weight applied on top of the ramp.
    pub ramp_multiplier: f32,
    /// Added when a skill check fails.
    pub skill_check_fail_add: f32,
    /// Added for a noise of intensity 0.
    pub noise_min_add: f32,
    /// Added for a noise of intensity 1.
    pub noise_max_add: f32,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            ramp_per_second: 1.5,
            ramp_multiplier: 1.0,
            skill_check_fail_add: 18.0,
            noise_min_add: 5.0,
            noise_max_add: 20.0,
        }
    }
}

/// Adversary decision engine tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AdversaryConfig {
    /// Seconds between think-ticks.
    pub think_interval: Curve,
    /// World units per second while moving between nodes.
    pub move_speed: Curve,
    /// Distance under which a move counts as arrived.
    pub arrive_distance: f32,
    /// Chance of stepping to a random active neighbor instead of the greedy pick.
    pub random_pick_chance: f32,
    /// Largest distance improvement accepted per think-tick.
    pub max_step_jump: f32,
    /// Reach of an attack.
    pub attack_distance: f32,
    /// Used when a disable request carries a non-positive duration.
    pub default_disable_duration: f32,
    /// Chance of abandoning the patrol to chase the player directly.
    pub detour_chance: Curve,
    /// Chance of taking the player-ward patrol waypoint over the next one.
    pub player_ward_bias: Curve,
    /// Number of upcoming patrol waypoints considered.
    pub look_ahead: usize,
    /// Whether a valid patrol path is followed at all.
    pub follow_patrol: bool,
}

impl Default for AdversaryConfig {
    fn default() -> Self {
        Self {
            think_interval: Curve::new(0.55, 0.18),
            move_speed: Curve::new(2.8, 4.8),
            arrive_distance: 0.05,
            random_pick_chance: 0.25,
            max_step_jump: 10.0,
            attack_distance: 0.9,
            default_disable_duration: 6.0,
            detour_chance: Curve::new(0.05, 0.35),
            player_ward_bias: Curve::new(0.15, 0.85),
            look_ahead: 3,
            follow_patrol: true,
        }
    }
}

/// Player node-traversal tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlayerConfig {
    /// Cancellable wind-up before a move starts.
    pub move_delay: f32,
    pub move_speed: f32,
    pub arrive_distance: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_delay: 0.6,
            move_speed: 3.5,
            arrive_distance: 0.05,
        }
    }
}

/// Progress model of gimmick nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GimmickConfig {
    pub max_progress: f32,
    /// Progress lost per second while nobody works on the gimmick.
    pub passive_decay_per_second: f32,
    pub decay_when_idle: bool,
    /// Progress per second before any successful skill check.
    pub base_rate: f32,
    /// Progress per second after a successful skill check.
    pub boosted_rate: f32,
    pub fail_progress_loss: f32,
    pub cancel_progress_loss: f32,
    pub retry_cooldown_on_fail: f32,
    pub retry_cooldown_on_cancel: f32,
}

impl Default for GimmickConfig {
    fn default() -> Self {
        Self {
            max_progress: 100.0,
            passive_decay_per_second: 3.0,
            decay_when_idle: true,
            base_rate: 4.0,
            boosted_rate: 7.0,
            fail_progress_loss: 12.0,
            cancel_progress_loss: 6.0,
            retry_cooldown_on_fail: 2.0,
            retry_cooldown_on_cancel: 1.0,
        }
    }
}

/// Skill-check scheduling during a gimmick session.
///
/// Curves here are driven by gimmick progress, not threat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SkillCheckConfig {
    /// Seconds between checks, from no progress to full progress.
    pub interval: Curve,
    /// Uniform +/- jitter added to each interval.
    pub jitter: f32,
    /// Width of the success zone handed to the check UI.
    pub zone_width: Curve,
    /// Noise intensity raised when the player aborts a session.
    pub cancel_noise: f32,
    /// Noise intensity raised when a check fails.
    pub fail_noise: f32,
}

impl Default for SkillCheckConfig {
    fn default() -> Self {
        Self {
            interval: Curve::new(2.2, 0.7),
            jitter: 0.6,
            zone_width: Curve::new(220.0, 120.0),
            cancel_noise: 0.4,
            fail_noise: 0.7,
        }
    }
}

/// Game configuration: every tunable of the encounter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    pub threat: ThreatConfig,
    pub adversary: AdversaryConfig,
    pub player: PlayerConfig,
    pub gimmick: GimmickConfig,
    pub skill_check: SkillCheckConfig,
}

/// Configuration values that cannot work.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f32 },

    #[error("{field} must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("adversary.look_ahead must be at least 1")]
    ZeroLookAhead,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NotAProbability { .. } => "CONFIG_NOT_PROBABILITY",
            ConfigError::Negative { .. } => "CONFIG_NEGATIVE",
            ConfigError::NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            ConfigError::ZeroLookAhead => "CONFIG_ZERO_LOOK_AHEAD",
        }
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotAProbability { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.threat;
        non_negative("threat.ramp_per_second", t.ramp_per_second)?;
        non_negative("threat.ramp_multiplier", t.ramp_multiplier)?;

        let a = &self.adversary;
        positive("adversary.think_interval.calm", a.think_interval.calm)?;
        positive("adversary.think_interval.frantic", a.think_interval.frantic)?;
        positive("adversary.move_speed.calm", a.move_speed.calm)?;
        positive("adversary.move_speed.frantic", a.move_speed.frantic)?;
        positive("adversary.arrive_distance", a.arrive_distance)?;
        probability("adversary.random_pick_chance", a.random_pick_chance)?;
        non_negative("adversary.max_step_jump", a.max_step_jump)?;
        non_negative("adversary.attack_distance", a.attack_distance)?;
        positive(
            "adversary.default_disable_duration",
            a.default_disable_duration,
        )?;
        probability("adversary.detour_chance.calm", a.detour_chance.calm)?;
        probability("adversary.detour_chance.frantic", a.detour_chance.frantic)?;
        probability("adversary.player_ward_bias.calm", a.player_ward_bias.calm)?;
        probability(
            "adversary.player_ward_bias.frantic",
            a.player_ward_bias.frantic,
        )?;
        if a.look_ahead == 0 {
            return Err(ConfigError::ZeroLookAhead);
        }

        let p = &self.player;
        non_negative("player.move_delay", p.move_delay)?;
        positive("player.move_speed", p.move_speed)?;
        positive("player.arrive_distance", p.arrive_distance)?;

        let g = &self.gimmick;
        positive("gimmick.max_progress", g.max_progress)?;
        non_negative("gimmick.base_rate", g.base_rate)?;
        non_negative("gimmick.boosted_rate", g.boosted_rate)?;

        let s = &self.skill_check;
        positive("skill_check.interval.calm", s.interval.calm)?;
        positive("skill_check.interval.frantic", s.interval.frantic)?;
        non_negative("skill_check.jitter", s.jitter)?;
        probability("skill_check.cancel_noise", s.cancel_noise)?;
        probability("skill_check.fail_noise", s.fail_noise)?;
        Ok(())
    }
}
