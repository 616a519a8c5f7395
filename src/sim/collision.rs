//! Collision detection and outcome resolution
//!
//! Everything here is circle-vs-circle: the diver, treasures, and enemies
//! are all round. Treasures are resolved before enemies so that collecting
//! the final treasure wins the run even if an enemy overlaps on the same
//! tick.

use glam::Vec2;

use super::state::{GameState, LossReason};
use super::tick::pickup_burst;
use crate::consts::*;

/// True when two circles overlap (center distance below the radius sum)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Resolve all player contacts for this tick and apply the resulting
/// session transitions. No-op unless the session is Running.
pub fn resolve(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    resolve_treasures(state);
    resolve_enemies(state);
}

/// Treasure pickup: mark collected, bump the counter, pulse the screen,
/// announce, burst bubbles, and win once everything is collected.
fn resolve_treasures(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    for i in 0..state.treasures.len() {
        let treasure = &state.treasures[i];
        if treasure.collected
            || !circles_overlap(player_pos, player_radius, treasure.pos, treasure.radius)
        {
            continue;
        }

        let pos = treasure.pos;
        state.treasures[i].collected = true;
        state.collected += 1;
        state.screen_shake = PICKUP_SHAKE;
        state.show_message(format!(
            "Treasure collected! ({}/{})",
            state.collected, TREASURE_COUNT
        ));
        pickup_burst(state, pos);

        if state.collected as usize == TREASURE_COUNT {
            state.win();
        }
    }
}

/// Enemy contact loses the run. `game_over` is idempotent, so overlapping
/// several enemies at once (or an enemy after a same-tick win) is safe.
fn resolve_enemies(state: &mut GameState) {
    let hit = state.enemies.iter().any(|enemy| {
        circles_overlap(
            state.player.pos,
            state.player.radius,
            enemy.pos,
            enemy.radius,
        )
    });
    if hit {
        state.game_over(LossReason::Enemy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SessionPhase;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(circles_overlap(a, 6.0, b, 6.0));
        assert!(!circles_overlap(a, 4.0, b, 5.0));
        // Exactly touching is not an overlap
        assert!(!circles_overlap(a, 5.0, b, 5.0));
    }

    #[test]
    fn test_treasure_pickup() {
        let mut state = running_state(1);
        let bubbles_before = state.bubbles.len();

        state.player.pos = state.treasures[2].pos;
        resolve(&mut state);

        assert!(state.treasures[2].collected);
        assert_eq!(state.collected, 1);
        assert_eq!(state.screen_shake, PICKUP_SHAKE);
        assert_eq!(state.message.text, "Treasure collected! (1/8)");
        assert!(state.message.timer > 0);
        assert_eq!(state.bubbles.len(), bubbles_before + PICKUP_BURST_BUBBLES);
        assert_eq!(state.phase, SessionPhase::Running);
    }

    #[test]
    fn test_treasure_collected_exactly_once() {
        let mut state = running_state(1);
        state.player.pos = state.treasures[0].pos;

        resolve(&mut state);
        assert_eq!(state.collected, 1);

        // Still overlapping on the next tick; nothing more happens
        resolve(&mut state);
        assert_eq!(state.collected, 1);

        let marked = state.treasures.iter().filter(|t| t.collected).count();
        assert_eq!(marked, state.collected as usize);
    }

    #[test]
    fn test_collecting_all_wins_same_tick() {
        let mut state = running_state(1);
        for treasure in state.treasures.iter_mut().skip(1) {
            treasure.collected = true;
        }
        state.collected = (TREASURE_COUNT - 1) as u32;

        state.player.pos = state.treasures[0].pos;
        resolve(&mut state);

        assert_eq!(state.collected as usize, TREASURE_COUNT);
        assert_eq!(state.phase, SessionPhase::Won);
        assert_eq!(state.fade_direction, 1.0);
    }

    #[test]
    fn test_win_beats_simultaneous_enemy_contact() {
        let mut state = running_state(1);
        for treasure in state.treasures.iter_mut().skip(1) {
            treasure.collected = true;
        }
        state.collected = (TREASURE_COUNT - 1) as u32;

        // Player on the last treasure AND inside an enemy, same tick
        state.player.pos = state.treasures[0].pos;
        state.enemies[0].pos = state.player.pos;
        resolve(&mut state);

        assert_eq!(state.phase, SessionPhase::Won);
    }

    #[test]
    fn test_enemy_contact_loses() {
        let mut state = running_state(1);
        state.enemies[0].pos = state.player.pos;

        resolve(&mut state);

        assert_eq!(state.phase, SessionPhase::Lost(LossReason::Enemy));
        assert_eq!(state.screen_shake, DEATH_SHAKE);
    }

    #[test]
    fn test_resolve_noop_when_not_running() {
        let mut state = GameState::new(1);
        state.player.pos = state.treasures[0].pos;
        state.enemies[0].pos = state.player.pos;

        resolve(&mut state);

        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.collected, 0);
        assert!(!state.treasures[0].collected);
    }
}
