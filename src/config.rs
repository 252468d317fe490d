use crate::cli::Args;
use std::time::Duration;

/// Timing knobs for playback
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Time from one turn's start to the next while playing
    pub turn_duration: Duration,
    /// Length of one ant's movement animation
    pub move_duration: Duration,
    /// Sampling period of running animations
    pub frame_interval: Duration,
    /// Pause on the last turn before playback loops
    pub complete_dwell: Duration,
    /// Pause after the loop reset before turn 1 replays
    pub restart_delay: Duration,
    /// Restart from turn 0 after the last turn while playing
    pub loop_playback: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            turn_duration: Duration::from_millis(2000),
            move_duration: Duration::from_millis(1500),
            frame_interval: Duration::from_millis(16),
            complete_dwell: Duration::from_millis(2000),
            restart_delay: Duration::from_millis(1000),
            loop_playback: true,
        }
    }
}

impl SimulationConfig {
    /// Idle gap between a settled turn and the next one
    #[inline]
    pub fn inter_turn_delay(&self) -> Duration {
        self.turn_duration.saturating_sub(self.move_duration)
    }
}

impl From<&Args> for SimulationConfig {
    fn from(args: &Args) -> Self {
        Self {
            turn_duration: Duration::from_millis(args.turn_ms),
            move_duration: Duration::from_millis(args.move_ms),
            frame_interval: Duration::from_micros(1_000_000 / u64::from(args.fps.max(1))),
            loop_playback: args.loop_playback,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_delay() {
        let config = SimulationConfig::default();
        assert_eq!(config.inter_turn_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_delay_never_negative() {
        let config = SimulationConfig {
            turn_duration: Duration::from_millis(100),
            move_duration: Duration::from_millis(400),
            ..SimulationConfig::default()
        };
        assert_eq!(config.inter_turn_delay(), Duration::ZERO);
    }

    #[test]
    fn test_from_args() {
        let args = Args::parse_from([
            "ant_farm", "--map", "farm.txt", "--turn-ms", "300", "--move-ms", "200", "--fps", "50",
        ]);
        let config = SimulationConfig::from(&args);

        assert_eq!(config.turn_duration, Duration::from_millis(300));
        assert_eq!(config.move_duration, Duration::from_millis(200));
        assert_eq!(config.frame_interval, Duration::from_millis(20));
        assert!(!config.loop_playback);
    }
}
