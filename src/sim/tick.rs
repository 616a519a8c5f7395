//! Per-frame simulation step
//!
//! `tick` advances the whole simulation by one fixed step: cosmetic
//! animation first (runs in every phase so the start and outcome screens
//! stay alive), then the gameplay updates, which are no-ops unless the
//! session is Running.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::spawn;
use super::state::{GameState, SessionPhase};
use crate::consts::*;
use crate::{angle_to, clamp_point};

/// Held directional input for a single tick. The host debounces
/// key-down/key-up events into this set; the simulation never sees
/// raw events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Net movement direction. Perpendicular pairs are scaled so diagonal
    /// movement is not faster than axis-aligned movement.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= DIAGONAL_SCALE;
        }
        dir
    }
}

/// Advance the game state by one tick.
///
/// `dt` is the real elapsed time this step represents; the oxygen clock and
/// the elapsed-time display depend on it, so depletion stays wall-clock
/// accurate under a variable frame rate.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    advance_visuals(state, dt);

    if state.phase != SessionPhase::Running {
        return;
    }

    state.elapsed_secs += dt;

    update_player(state, input);
    update_enemies(state);
    update_bubbles(state);
    update_oxygen(state, dt);
    collision::resolve(state);
}

/// Purely-cosmetic animation: shake decay and jitter, fade overlay,
/// message countdown, treasure glow/spin, outcome-reveal timer. Kept in
/// the tick (not the render pass) so the renderer stays a pure function.
fn advance_visuals(state: &mut GameState, dt: f32) {
    state.anim_time += dt;

    // Shake decays geometrically; the jitter applied to the scene is drawn
    // from the seeded RNG so replays stay deterministic.
    state.screen_shake *= SHAKE_DECAY;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
        state.shake_offset = Vec2::ZERO;
    } else {
        let shake = state.screen_shake;
        state.shake_offset = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * shake,
            (state.rng.random::<f32>() - 0.5) * shake,
        );
    }

    state.fade_alpha = (state.fade_alpha + state.fade_direction * FADE_RATE).clamp(0.0, 1.0);

    state.message.timer = state.message.timer.saturating_sub(1);

    for treasure in &mut state.treasures {
        if !treasure.collected {
            treasure.glow_phase += 0.05;
            treasure.rotation += 0.02;
        }
    }

    if state.is_terminal() {
        state.outcome_timer += dt;
    }
}

/// Player physics: accelerate along input, apply friction, zero tiny
/// velocity components, integrate, clamp to the arena.
fn update_player(state: &mut GameState, input: &TickInput) {
    let dir = input.direction();
    let player = &mut state.player;

    player.vel += dir * PLAYER_ACCEL;
    player.vel *= PLAYER_FRICTION;
    if player.vel.x.abs() < VELOCITY_EPSILON {
        player.vel.x = 0.0;
    }
    if player.vel.y.abs() < VELOCITY_EPSILON {
        player.vel.y = 0.0;
    }

    player.swimming = dir != Vec2::ZERO;
    if player.swimming {
        player.frame = (player.frame + 0.1) % std::f32::consts::TAU;
        player.light_angle += 0.02;
    }

    let min = Vec2::splat(player.radius + PLAYER_BOUND_INSET);
    let max = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT) - min;
    player.pos = clamp_point(player.pos + player.vel, min, max);
}

/// Patrol AI: steer toward the current target, retarget on arrival,
/// cap speed, keep inside the arena.
fn update_enemies(state: &mut GameState) {
    let GameState { enemies, rng, .. } = state;

    for enemy in enemies.iter_mut() {
        let target = enemy.patrol_target;
        let dist = enemy.pos.distance(target);

        if dist < ENEMY_ARRIVE_DIST {
            enemy.patrol_target = Vec2::new(
                rng.random_range(PATROL_MARGIN..ARENA_WIDTH - PATROL_MARGIN),
                rng.random_range(PATROL_MARGIN..ARENA_HEIGHT - PATROL_MARGIN),
            );
        }

        // Steering uses the pre-retarget target, so a freshly retargeted
        // enemy drifts one more tick toward its old point.
        if dist > ENEMY_MIN_STEER_DIST {
            let angle = angle_to(enemy.pos, target);
            enemy.vel += Vec2::from_angle(angle) * ENEMY_STEER_ACCEL;
        }

        let speed = enemy.vel.length();
        if speed > ENEMY_MAX_SPEED {
            enemy.vel *= ENEMY_MAX_SPEED / speed;
        }

        let min = Vec2::splat(ENEMY_BOUND_MARGIN);
        let max = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT) - min;
        enemy.pos = clamp_point(enemy.pos + enemy.vel, min, max);

        enemy.phase += 0.02;
    }
}

/// Ambient bubbles: rise, sway with phase, recycle to the bottom at a new
/// random horizontal offset once off the top of the arena.
fn update_bubbles(state: &mut GameState) {
    let GameState { bubbles, rng, .. } = state;

    for bubble in bubbles.iter_mut() {
        bubble.pos.y -= bubble.rise_speed;
        bubble.pos.x += bubble.phase.sin() * 0.5;
        bubble.phase += 0.01;

        if bubble.pos.y < -BUBBLE_RECYCLE_MARGIN {
            bubble.pos.y = ARENA_HEIGHT + BUBBLE_RECYCLE_MARGIN;
            bubble.pos.x = rng.random_range(0.0..ARENA_WIDTH);
        }
    }
}

/// Oxygen: deplete by accumulated wall-clock time in batches, warn below
/// the low threshold, end the run at zero.
fn update_oxygen(state: &mut GameState, dt: f32) {
    state.oxygen_acc += dt;
    if state.oxygen_acc < OXYGEN_BATCH_SECS {
        return;
    }

    state.oxygen -= OXYGEN_RATE * state.oxygen_acc;
    state.oxygen_acc = 0.0;

    if state.oxygen_fraction() < LOW_OXYGEN_FRACTION
        && state.rng.random::<f32>() < LOW_OXYGEN_WARN_CHANCE
    {
        state.show_message("Oxygen low!");
    }

    if state.oxygen <= 0.0 {
        state.oxygen = 0.0;
        state.game_over(super::state::LossReason::Oxygen);
    }
}

/// Spawn the treasure-pickup bubble burst. Lives here with the other
/// spawn-driven tick logic so the collision resolver stays allocation-lean.
pub(super) fn pickup_burst(state: &mut GameState, pos: Vec2) {
    for _ in 0..PICKUP_BURST_BUBBLES {
        let bubble = spawn::burst_bubble(&mut state.rng, pos);
        state.bubbles.push(bubble);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::LossReason;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_not_started_is_inert() {
        let mut state = GameState::new(1);
        let before_player = state.player.pos;
        let before_enemy = state.enemies[0].pos;
        let before_oxygen = state.oxygen;

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input, SIM_DT);
        }

        assert_eq!(state.player.pos, before_player);
        assert_eq!(state.enemies[0].pos, before_enemy);
        assert_eq!(state.oxygen, before_oxygen);
        assert_eq!(state.elapsed_secs, 0.0);
    }

    #[test]
    fn test_hold_right_increases_then_plateaus() {
        let mut state = running_state(1);
        // No obstacles, per the scenario
        state.enemies.clear();
        let input = TickInput {
            right: true,
            ..Default::default()
        };

        let right_limit = ARENA_WIDTH - PLAYER_RADIUS - PLAYER_BOUND_INSET;
        let mut last_x = state.player.pos.x;
        let mut reached_limit = false;

        for _ in 0..2000 {
            tick(&mut state, &input, SIM_DT);
            if state.player.pos.x >= right_limit {
                reached_limit = true;
                assert_eq!(state.player.pos.x, right_limit);
            } else {
                assert!(state.player.pos.x > last_x, "x must increase until the wall");
            }
            last_x = state.player.pos.x;
        }
        assert!(reached_limit, "player never reached the right boundary");
    }

    #[test]
    fn test_walking_flag_and_animation() {
        let mut state = running_state(1);
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.swimming);
        assert!(state.player.frame > 0.0);

        let frame = state.player.frame;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.player.swimming);
        assert_eq!(state.player.frame, frame);
    }

    #[test]
    fn test_diagonal_input_is_scaled() {
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        let dir = input.direction();
        assert!((dir.length() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_enemy_retargets_on_arrival() {
        let mut state = running_state(1);
        let old_target = state.enemies[0].patrol_target;
        state.enemies[0].pos = old_target;

        tick(&mut state, &TickInput::default(), SIM_DT);

        let new_target = state.enemies[0].patrol_target;
        assert_ne!(new_target, old_target);
        assert!((PATROL_MARGIN..=ARENA_WIDTH - PATROL_MARGIN).contains(&new_target.x));
        assert!((PATROL_MARGIN..=ARENA_HEIGHT - PATROL_MARGIN).contains(&new_target.y));
    }

    #[test]
    fn test_bubble_recycles_at_top() {
        let mut state = running_state(1);
        state.bubbles[0].pos.y = -BUBBLE_RECYCLE_MARGIN - 1.0;

        tick(&mut state, &TickInput::default(), SIM_DT);

        let b = &state.bubbles[0];
        assert_eq!(b.pos.y, ARENA_HEIGHT + BUBBLE_RECYCLE_MARGIN);
        assert!((0.0..ARENA_WIDTH).contains(&b.pos.x));
    }

    #[test]
    fn test_oxygen_depletes_over_time() {
        let mut state = running_state(1);
        state.enemies.clear();
        // 10 seconds of sim time at the fixed step
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let expected = OXYGEN_MAX - OXYGEN_RATE * 10.0;
        assert!((state.oxygen - expected).abs() < OXYGEN_RATE * OXYGEN_BATCH_SECS * 2.0);
    }

    #[test]
    fn test_oxygen_depletion_ends_run() {
        let mut state = running_state(1);
        state.oxygen = 0.05;

        // One tick with enough elapsed time to overshoot the remaining oxygen
        tick(&mut state, &TickInput::default(), 0.2);

        assert_eq!(state.phase, SessionPhase::Lost(LossReason::Oxygen));
        assert_eq!(state.oxygen, 0.0);
    }

    #[test]
    fn test_elapsed_clock_stops_on_terminal() {
        let mut state = running_state(1);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let elapsed = state.elapsed_secs;
        assert!(elapsed > 0.9);

        state.game_over(LossReason::Enemy);
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.elapsed_secs, elapsed);
        assert!(state.outcome_ready());
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(99999);
        let mut b = running_state(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.oxygen, b.oxygen);
        for (ea, eb) in a.enemies.iter().zip(b.enemies.iter()) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.patrol_target, eb.patrol_target);
        }
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in 0u64..1000,
            inputs in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                1..200,
            ),
        ) {
            let mut state = running_state(seed);
            let min = PLAYER_RADIUS + PLAYER_BOUND_INSET;
            for (up, down, left, right) in inputs {
                let input = TickInput { up, down, left, right };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.player.pos.x >= min);
                prop_assert!(state.player.pos.x <= ARENA_WIDTH - min);
                prop_assert!(state.player.pos.y >= min);
                prop_assert!(state.player.pos.y <= ARENA_HEIGHT - min);
            }
        }

        #[test]
        fn prop_enemy_speed_capped(seed in 0u64..1000, ticks in 1usize..400) {
            let mut state = running_state(seed);
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default(), SIM_DT);
                for enemy in &state.enemies {
                    prop_assert!(enemy.vel.length() <= ENEMY_MAX_SPEED + 1e-4);
                }
            }
        }

        #[test]
        fn prop_oxygen_monotone_while_running(
            seed in 0u64..1000,
            dts in proptest::collection::vec(0.0f32..0.3, 1..100),
        ) {
            let mut state = running_state(seed);
            let mut last = state.oxygen;
            for dt in dts {
                if !state.is_running() {
                    break;
                }
                tick(&mut state, &TickInput::default(), dt);
                prop_assert!(state.oxygen <= last);
                prop_assert!(state.oxygen >= 0.0);
                last = state.oxygen;
            }
        }
    }
}
