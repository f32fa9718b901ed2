//! Frame Orchestration
//!
//! One `tick()` call per rendered frame, invoked by the external
//! clock/driver. The phase order is fixed: player movement, then queued
//! fire spawns, then projectile advance — projectiles advance after the
//! player within the same tick so both streams stay frame-aligned for
//! deterministic replays.

use crate::game::events::GameEvent;
use crate::game::input::{InputRecording, IntentFrame};
use crate::game::map::MapConfigError;
use crate::game::movement;
use crate::game::projectile;
use crate::game::state::{SimConfig, WorldSnapshot, WorldState};

/// Result of a tick.
#[derive(Clone, Debug)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Read-only world view for the renderer
    pub snapshot: WorldSnapshot,
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The world state (will be mutated)
/// * `input` - Movement intents for this tick
///
/// Fire events that arrived since the previous tick (via
/// [`WorldState::queue_fire`]) are applied atomically at the start of the
/// projectile phase; a freshly spawned projectile advances once within the
/// same tick, so a shot fired at speed 0.5 is 0.5 units out when this
/// tick's snapshot is taken.
///
/// # Determinism
///
/// No step may be skipped or reordered. The function performs no I/O,
/// consumes no randomness and completes synchronously.
pub fn tick(state: &mut WorldState, input: &IntentFrame) -> TickResult {
    // 0. Advance tick counter
    state.tick += 1;

    // 1. Resolve player movement (axis-separated slide)
    let delta = movement::intent_delta(input, state.move_speed);
    state.player.position = movement::resolve_slide(&state.map, state.player.position, delta);

    // 2. Apply queued fire commands in arrival order.
    //    Contract violations (non-unit directions) are a silent no-op.
    for command in state.take_fire_commands() {
        let _ = projectile::spawn(state, command.direction);
    }

    // 3. Advance projectiles and evaluate removal
    projectile::advance(state);

    TickResult {
        events: state.take_events(),
        snapshot: state.snapshot(),
    }
}

/// Replay a session from a recording.
///
/// Rebuilds the world from the recording's seed, feeds the recorded frame
/// and fire commands into every tick and returns the final state with the
/// full event stream. Given the recording of a live session, the final
/// state hash must match the live one.
pub fn run_recording(
    config: &SimConfig,
    recording: &InputRecording,
    tick_count: u32,
) -> Result<(WorldState, Vec<GameEvent>), MapConfigError> {
    let mut state = WorldState::new(config, recording.rng_seed())?;
    let mut all_events = Vec::new();

    for t in 0..tick_count {
        for command in recording.fires_at(t) {
            state.queue_fire(command.direction);
        }
        let frame = recording.frame_at(t);

        let result = tick(&mut state, &frame);
        all_events.extend(result.events);
    }

    Ok((state, all_events))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FIXED_ONE, MOVE_SPEED};
    use crate::core::vec2::FixedVec2;
    use crate::game::events::GameEventData;
    use crate::game::input::FireCommand;
    use crate::game::map::MapConfig;

    fn open_config() -> SimConfig {
        SimConfig {
            map: MapConfig {
                obstacle_chance: 0,
                ..MapConfig::default()
            },
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_tick_advances_counter_and_moves_player() {
        let mut state = WorldState::new(&open_config(), 1).unwrap();
        let frame = IntentFrame::from_intents(false, false, false, true);

        let result = tick(&mut state, &frame);

        assert_eq!(state.tick, 1);
        assert_eq!(result.snapshot.tick, 1);
        assert_eq!(state.player.position, FixedVec2::new(MOVE_SPEED, 0));
    }

    #[test]
    fn test_eastward_shot_lifecycle() {
        // 20x20 map, tile 2, zero obstacles, fire east at speed 0.5:
        // one tick later the projectile is at (0.5, 0); it disappears on
        // the tick its |x| first exceeds the bounds extent of 20.
        let mut state = WorldState::new(&open_config(), 1).unwrap();

        state.queue_fire(FixedVec2::new(FIXED_ONE, 0));
        let result = tick(&mut state, &IntentFrame::new());

        assert_eq!(result.snapshot.projectiles.len(), 1);
        assert_eq!(
            result.snapshot.projectiles[0].position,
            FixedVec2::new(to_fixed(0.5), 0)
        );

        // 39 more ticks: at x = 20.0, still alive
        for _ in 0..39 {
            tick(&mut state, &IntentFrame::new());
        }
        assert_eq!(state.projectiles.len(), 1);

        // One more: removed, and gone from the snapshot
        let result = tick(&mut state, &IntentFrame::new());
        assert!(result.snapshot.projectiles.is_empty());
        assert_eq!(
            result
                .events
                .iter()
                .filter(|e| matches!(e.data, GameEventData::ProjectileRemoved { .. }))
                .count(),
            1
        );

        // Stays gone in subsequent snapshots
        let result = tick(&mut state, &IntentFrame::new());
        assert!(result.snapshot.projectiles.is_empty());
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_fire_applies_before_advance_within_one_tick() {
        let mut state = WorldState::new(&open_config(), 1).unwrap();
        state.queue_fire(FixedVec2::new(0, FIXED_ONE));

        let result = tick(&mut state, &IntentFrame::new());

        // Spawned AND advanced in the same tick
        let spawned = result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::ProjectileSpawned { .. }));
        assert!(spawned);
        assert_eq!(
            state.projectiles.get(&0).unwrap().position,
            FixedVec2::new(0, to_fixed(0.5))
        );
    }

    #[test]
    fn test_fire_queue_empties_after_tick() {
        let mut state = WorldState::new(&open_config(), 1).unwrap();
        state.queue_fire(FixedVec2::new(FIXED_ONE, 0));

        tick(&mut state, &IntentFrame::new());
        assert_eq!(state.projectiles.len(), 1);

        // The command was consumed; the next tick spawns nothing new
        tick(&mut state, &IntentFrame::new());
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_invalid_queued_fire_is_noop() {
        let mut state = WorldState::new(&open_config(), 1).unwrap();
        state.queue_fire(FixedVec2::ZERO);
        state.queue_fire(FixedVec2::new(to_fixed(3.0), 0));

        let result = tick(&mut state, &IntentFrame::new());

        assert!(state.projectiles.is_empty());
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_recording_replay_matches_live_session() {
        let config = SimConfig::default();
        let seed = 424242;

        // Live session with movement and a couple of shots
        let mut live = WorldState::new(&config, seed).unwrap();
        let mut recording = InputRecording::new(seed);

        for t in 0..200u32 {
            // Cycle through intent patterns
            let frame = match (t / 25) % 4 {
                0 => IntentFrame::from_intents(true, false, false, false),
                1 => IntentFrame::from_intents(false, false, false, true),
                2 => IntentFrame::from_intents(true, false, true, false),
                _ => IntentFrame::new(),
            };
            recording.record(t, frame);

            if t % 60 == 10 {
                let command = FireCommand {
                    direction: FixedVec2::new(FIXED_ONE, 0),
                };
                live.queue_fire(command.direction);
                recording.record_fire(t, command);
            }

            tick(&mut live, &frame);
        }

        // Replay from the recording
        let (replayed, _) = run_recording(&config, &recording, 200).unwrap();

        assert_eq!(live.tick, replayed.tick);
        assert_eq!(live.player.position, replayed.player.position);
        assert_eq!(live.compute_hash(), replayed.compute_hash());
    }

    #[test]
    fn test_recording_survives_byte_roundtrip() {
        let config = open_config();
        let mut recording = InputRecording::new(7);
        recording.record(0, IntentFrame::from_intents(false, true, false, false));
        recording.record_fire(
            5,
            FireCommand {
                direction: FixedVec2::new(0, to_fixed(-1.0)),
            },
        );

        let bytes = recording.to_bytes().unwrap();
        let decoded = InputRecording::from_bytes(&bytes).unwrap();

        let (a, _) = run_recording(&config, &recording, 50).unwrap();
        let (b, _) = run_recording(&config, &decoded, 50).unwrap();

        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_tick_determinism_with_obstacles() {
        let config = SimConfig::default();

        let mut state1 = WorldState::new(&config, 12345).unwrap();
        let mut state2 = WorldState::new(&config, 12345).unwrap();

        let frame = IntentFrame::from_intents(true, false, false, true);
        for t in 0..300u32 {
            if t % 45 == 0 {
                state1.queue_fire(FixedVec2::new(0, -FIXED_ONE));
                state2.queue_fire(FixedVec2::new(0, -FIXED_ONE));
            }
            tick(&mut state1, &frame);
            tick(&mut state2, &frame);
        }

        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }
}
