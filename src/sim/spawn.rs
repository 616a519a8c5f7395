//! Entity factories
//!
//! Pure construction: given the injected RNG, produce the full populations
//! for a session. Re-invoked in full on every (re)start.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Bubble, Enemy, EnemyKind, Treasure, TreasureKind};
use crate::consts::*;

/// Fixed treasure layout, spread across the visible area
pub const TREASURE_LAYOUT: [(f32, f32); TREASURE_COUNT] = [
    (200.0, 200.0),
    (400.0, 150.0),
    (600.0, 300.0),
    (800.0, 200.0),
    (300.0, 500.0),
    (500.0, 600.0),
    (700.0, 550.0),
    (900.0, 450.0),
];

/// Fixed enemy spawn points, away from the player start
pub const ENEMY_LAYOUT: [(f32, f32); ENEMY_COUNT] = [
    (700.0, 100.0),
    (200.0, 400.0),
    (900.0, 300.0),
    (400.0, 650.0),
    (1000.0, 550.0),
];

/// Build the treasure population: fixed positions, uniform-random kinds
pub fn treasures<R: Rng>(rng: &mut R) -> Vec<Treasure> {
    TREASURE_LAYOUT
        .iter()
        .map(|&(x, y)| Treasure {
            pos: Vec2::new(x, y),
            radius: TREASURE_RADIUS,
            kind: TreasureKind::ALL[rng.random_range(0..TreasureKind::ALL.len())],
            collected: false,
            glow_phase: rng.random_range(0.0..TAU),
            rotation: rng.random_range(0.0..TAU),
        })
        .collect()
}

/// Build the enemy population: fixed positions, random kind and drift,
/// first patrol target offset diagonally from the spawn point
pub fn enemies<R: Rng>(rng: &mut R) -> Vec<Enemy> {
    ENEMY_LAYOUT
        .iter()
        .map(|&(x, y)| Enemy {
            pos: Vec2::new(x, y),
            vel: Vec2::new(
                rng.random_range(-0.75..0.75),
                rng.random_range(-0.75..0.75),
            ),
            radius: ENEMY_RADIUS,
            kind: EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())],
            phase: rng.random_range(0.0..TAU),
            patrol_target: Vec2::new(x + 100.0, y + 100.0),
        })
        .collect()
}

/// Build the ambient bubble pool, scattered uniformly over the arena
pub fn bubbles<R: Rng>(rng: &mut R) -> Vec<Bubble> {
    (0..BUBBLE_COUNT)
        .map(|_| Bubble {
            pos: Vec2::new(
                rng.random_range(0.0..ARENA_WIDTH),
                rng.random_range(0.0..ARENA_HEIGHT),
            ),
            radius: rng.random_range(2.0..8.0),
            rise_speed: rng.random_range(0.5..2.0),
            phase: rng.random_range(0.0..TAU),
        })
        .collect()
}

/// One bubble of the pickup burst, spawned at the treasure's position.
/// Slightly larger and faster than ambient bubbles, recycled the same way.
pub fn burst_bubble<R: Rng>(rng: &mut R, pos: Vec2) -> Bubble {
    Bubble {
        pos,
        radius: rng.random_range(3.0..8.0),
        rise_speed: rng.random_range(1.0..3.0),
        phase: rng.random_range(0.0..TAU),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_treasures_fixed_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let treasures = treasures(&mut rng);
        assert_eq!(treasures.len(), TREASURE_COUNT);
        for (t, &(x, y)) in treasures.iter().zip(TREASURE_LAYOUT.iter()) {
            assert_eq!(t.pos, Vec2::new(x, y));
            assert!(!t.collected);
            assert_eq!(t.radius, TREASURE_RADIUS);
        }
    }

    #[test]
    fn test_enemies_initial_attributes() {
        let mut rng = Pcg32::seed_from_u64(1);
        let enemies = enemies(&mut rng);
        assert_eq!(enemies.len(), ENEMY_COUNT);
        for (e, &(x, y)) in enemies.iter().zip(ENEMY_LAYOUT.iter()) {
            assert_eq!(e.pos, Vec2::new(x, y));
            assert_eq!(e.patrol_target, Vec2::new(x + 100.0, y + 100.0));
            assert!(e.vel.x.abs() <= 0.75 && e.vel.y.abs() <= 0.75);
        }
    }

    #[test]
    fn test_bubbles_within_arena() {
        let mut rng = Pcg32::seed_from_u64(1);
        for b in bubbles(&mut rng) {
            assert!((0.0..ARENA_WIDTH).contains(&b.pos.x));
            assert!((0.0..ARENA_HEIGHT).contains(&b.pos.y));
            assert!((2.0..8.0).contains(&b.radius));
            assert!((0.5..2.0).contains(&b.rise_speed));
        }
    }

    #[test]
    fn test_factories_deterministic() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        let ta = treasures(&mut a);
        let tb = treasures(&mut b);
        for (x, y) in ta.iter().zip(tb.iter()) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.rotation, y.rotation);
        }
        let ea = enemies(&mut a);
        let eb = enemies(&mut b);
        for (x, y) in ea.iter().zip(eb.iter()) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.vel, y.vel);
        }
    }
}
