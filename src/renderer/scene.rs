//! Scene assembly: game state in, vertex list out
//!
//! A pure function of the current state; no simulation-relevant mutation
//! happens here. Draw order is background, bubbles, treasures, enemies,
//! player, then the unshaken vignette and fade overlays on top.

use glam::Vec2;

use super::shapes::{
    circle, ellipse, gradient_quad, quad, radial_gradient, rect, ring_gradient, triangle,
};
use super::vertex::{Vertex, colors};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::settings::Settings;
use crate::sim::state::{Enemy, EnemyKind, GameState, Treasure, TreasureKind};

const W: f32 = ARENA_WIDTH;
const H: f32 = ARENA_HEIGHT;

fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

/// Local-space helper: rotate (x, y) around the origin entity and translate
fn rotated(origin: Vec2, rotation: f32) -> impl Fn(f32, f32) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    move |x: f32, y: f32| origin + Vec2::new(x * cos - y * sin, x * sin + y * cos)
}

/// Build the full frame for the current state
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);

    push_background(&mut out, state.anim_time, settings);
    push_bubbles(&mut out, state, settings);
    for treasure in &state.treasures {
        if !treasure.collected {
            push_treasure(&mut out, treasure, settings);
        }
    }
    for enemy in &state.enemies {
        push_enemy(&mut out, enemy);
    }
    push_player(&mut out, state, settings);

    // Camera shake translates the whole scene; overlays stay fixed
    let shake = if settings.effective_screen_shake() {
        state.shake_offset
    } else {
        Vec2::ZERO
    };
    if shake != Vec2::ZERO {
        for v in &mut out {
            v.position[0] += shake.x;
            v.position[1] += shake.y;
        }
    }

    if settings.vignette {
        push_vignette(&mut out);
    }
    push_fade(&mut out, state.fade_alpha);

    out
}

/// Water gradient, light rays, seabed, swaying plants, rocks
fn push_background(out: &mut Vec<Vertex>, anim_time: f32, settings: &Settings) {
    // Three-stop vertical gradient as two stacked quads
    gradient_quad(
        out,
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(W, 0.0),
            Vec2::new(W, H / 2.0),
            Vec2::new(0.0, H / 2.0),
        ],
        [
            colors::WATER_TOP,
            colors::WATER_TOP,
            colors::WATER_MID,
            colors::WATER_MID,
        ],
    );
    gradient_quad(
        out,
        [
            Vec2::new(0.0, H / 2.0),
            Vec2::new(W, H / 2.0),
            Vec2::new(W, H),
            Vec2::new(0.0, H),
        ],
        [
            colors::WATER_MID,
            colors::WATER_MID,
            colors::WATER_BOTTOM,
            colors::WATER_BOTTOM,
        ],
    );

    if settings.quality.light_rays_enabled() {
        let ray = [1.0, 1.0, 1.0, 0.1];
        for i in 0..5 {
            let x = i as f32 * 300.0;
            triangle(
                out,
                Vec2::new(x, 0.0),
                Vec2::new(x + 200.0, H),
                Vec2::new(x - 200.0, H),
                ray,
            );
        }
    }

    rect(
        out,
        Vec2::new(W / 2.0, H - 25.0),
        Vec2::new(W / 2.0, 25.0),
        0.0,
        colors::SEABED,
    );

    for i in 0..20 {
        let x = i as f32 * 70.0 + (anim_time + i as f32).sin() * 10.0;
        triangle(
            out,
            Vec2::new(x, H - 50.0),
            Vec2::new(x - 15.0, H - 100.0),
            Vec2::new(x + 15.0, H - 120.0),
            colors::PLANT,
        );
    }

    for i in 0..5 {
        ellipse(
            out,
            Vec2::new(100.0 + i as f32 * 250.0, H - 30.0),
            40.0,
            20.0,
            0.0,
            colors::ROCK,
            16,
        );
    }
}

/// Ambient bubbles shimmer with their phase; a small highlight sells the sphere
fn push_bubbles(out: &mut Vec<Vertex>, state: &GameState, settings: &Settings) {
    let drawn = (state.bubbles.len() as f32 * settings.quality.bubble_fraction()) as usize;
    for bubble in state.bubbles.iter().take(drawn) {
        let alpha = 0.3 + bubble.phase.sin() * 0.2;
        circle(out, bubble.pos, bubble.radius, [1.0, 1.0, 1.0, alpha], 12);
        circle(
            out,
            bubble.pos + Vec2::new(-2.0, -2.0),
            bubble.radius * 0.3,
            [1.0, 1.0, 1.0, 0.9],
            8,
        );
    }
}

fn push_treasure(out: &mut Vec<Vertex>, treasure: &Treasure, settings: &Settings) {
    let pos = treasure.pos;

    if settings.quality.glow_enabled() {
        let halo = 20.0 + treasure.glow_phase.sin() * 10.0;
        radial_gradient(
            out,
            pos,
            halo + 8.0,
            [1.0, 0.843, 0.0, 0.35],
            [1.0, 0.843, 0.0, 0.0],
            24,
        );
    }

    let xf = rotated(pos, treasure.rotation);

    match treasure.kind {
        TreasureKind::Pearl => {
            ellipse(out, pos, 10.0, 12.0, treasure.rotation, colors::PEARL, 20);
            ellipse(
                out,
                xf(-2.0, -2.0),
                4.0,
                5.0,
                treasure.rotation,
                colors::PEARL_SHINE,
                12,
            );
        }
        TreasureKind::Chest => {
            rect(out, pos, Vec2::new(10.0, 8.0), treasure.rotation, colors::CHEST_WOOD);
            rect(out, pos, Vec2::new(3.0, 4.0), treasure.rotation, colors::GOLD);
            rect(
                out,
                xf(0.0, -8.0),
                Vec2::new(12.0, 2.0),
                treasure.rotation,
                colors::CHEST_TRIM,
            );
        }
        TreasureKind::Crown => {
            quad(
                out,
                xf(-12.0, -8.0),
                xf(12.0, -8.0),
                xf(8.0, 0.0),
                xf(-8.0, 0.0),
                colors::GOLD,
            );
            triangle(out, xf(-12.0, -8.0), xf(-4.0, -15.0), xf(0.0, -8.0), colors::GOLD);
            triangle(out, xf(0.0, -8.0), xf(4.0, -15.0), xf(12.0, -8.0), colors::GOLD);
        }
        TreasureKind::Ring => {
            circle(out, pos, 12.0, colors::SILVER, 20);
            circle(out, pos, 8.0, colors::GOLD, 20);
            circle(out, xf(4.0, -4.0), 3.0, colors::GEM, 10);
        }
    }
}

/// Enemies pulse their body alpha with the animation phase
fn push_enemy(out: &mut Vec<Vertex>, enemy: &Enemy) {
    let pos = enemy.pos;
    let pulse = enemy.phase.sin() * 0.2 + 0.8;
    let local = rotated(pos, 0.0);

    match enemy.kind {
        EnemyKind::Jellyfish => {
            ellipse(out, pos, 15.0, 20.0, 0.0, with_alpha(colors::JELLYFISH, pulse), 20);

            for i in -2i32..=2 {
                let i = i as f32;
                triangle(
                    out,
                    local(i * 5.0, 5.0),
                    local(i * 7.0, 30.0),
                    local(i * 3.0, 30.0),
                    colors::TENTACLE,
                );
            }

            circle(out, local(-5.0, -5.0), 3.0, colors::MASK, 10);
            circle(out, local(5.0, -5.0), 3.0, colors::MASK, 10);
            circle(out, local(-6.0, -6.0), 1.0, [1.0; 4], 6);
            circle(out, local(4.0, -6.0), 1.0, [1.0; 4], 6);
        }
        EnemyKind::Predator => {
            ellipse(out, pos, 20.0, 12.0, 0.0, with_alpha(colors::PREDATOR, pulse), 20);

            for i in -2i32..=2 {
                rect(
                    out,
                    local(16.0 + i as f32 * 3.0, 0.0),
                    Vec2::new(1.0, 3.0),
                    0.0,
                    [1.0; 4],
                );
            }

            circle(out, local(-8.0, -4.0), 3.0, colors::MASK, 10);
            circle(out, local(-9.0, -5.0), 1.0, [1.0; 4], 6);

            // Tail and dorsal fins
            triangle(
                out,
                local(-15.0, -10.0),
                local(-25.0, 0.0),
                local(-15.0, 10.0),
                colors::PREDATOR_FIN,
            );
            triangle(
                out,
                local(-5.0, -15.0),
                local(0.0, -25.0),
                local(5.0, -15.0),
                colors::PREDATOR_FIN,
            );
        }
    }
}

fn push_player(out: &mut Vec<Vertex>, state: &GameState, settings: &Settings) {
    let player = &state.player;
    let pos = player.pos;
    let local = rotated(pos, 0.0);

    // Dive-light halo: bright core falling off to nothing at 200px
    if settings.quality.glow_enabled() {
        radial_gradient(
            out,
            pos,
            100.0,
            [0.78, 0.94, 1.0, 0.3],
            [0.39, 0.78, 1.0, 0.1],
            32,
        );
        ring_gradient(
            out,
            pos,
            100.0,
            200.0,
            [0.39, 0.78, 1.0, 0.1],
            [0.0, 0.39, 0.78, 0.0],
            32,
        );
    }

    ellipse(out, pos, player.radius, player.radius * 1.2, 0.0, colors::DIVER_BODY, 24);

    // Scuba tank
    rect(out, local(16.0, 0.0), Vec2::new(4.0, 15.0), 0.0, colors::TANK);
    rect(out, local(16.0, -15.0), Vec2::new(6.0, 3.0), 0.0, colors::TANK);

    // Flippers; they kick while swimming
    if player.swimming {
        let kick = (player.frame * 2.0).sin() * 5.0;
        triangle(
            out,
            local(-15.0, 10.0),
            local(-25.0, 15.0 + kick),
            local(-15.0, 20.0),
            colors::DIVER_FIN,
        );
        triangle(
            out,
            local(15.0, 10.0),
            local(25.0, 15.0 - kick),
            local(15.0, 20.0),
            colors::DIVER_FIN,
        );
    } else {
        triangle(
            out,
            local(-15.0, 10.0),
            local(-22.0, 15.0),
            local(-15.0, 20.0),
            colors::DIVER_FIN,
        );
        triangle(
            out,
            local(15.0, 10.0),
            local(22.0, 15.0),
            local(15.0, 20.0),
            colors::DIVER_FIN,
        );
    }

    // Face mask and lenses
    rect(out, local(0.0, -5.0), Vec2::new(8.0, 3.0), 0.0, colors::MASK);
    rect(out, local(-4.0, -8.0), Vec2::new(2.0, 2.0), 0.0, colors::MASK_GLASS);
    rect(out, local(4.0, -8.0), Vec2::new(2.0, 2.0), 0.0, colors::MASK_GLASS);

    // Regulator exhaust: a short column of rising bubbles
    for i in 0..3 {
        let offset = (state.anim_time * 10.0 + i as f32 * 10.0) % 30.0;
        circle(
            out,
            local(5.0, -20.0 - offset),
            3.0 - i as f32 * 0.5,
            [1.0, 1.0, 1.0, 0.8],
            8,
        );
    }
}

/// Darkened corners; the outer band is solid so the rectangle's corners
/// (further than the gradient radius) stay covered
fn push_vignette(out: &mut Vec<Vertex>) {
    let center = Vec2::new(W / 2.0, H / 2.0);
    let transparent = [colors::VIGNETTE[0], colors::VIGNETTE[1], colors::VIGNETTE[2], 0.0];
    ring_gradient(out, center, 300.0, 700.0, transparent, colors::VIGNETTE, 48);
    ring_gradient(out, center, 700.0, 760.0, colors::VIGNETTE, colors::VIGNETTE, 48);
}

/// Full-screen fade used by the reveal at start and the terminal transitions
fn push_fade(out: &mut Vec<Vertex>, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    rect(
        out,
        Vec2::new(W / 2.0, H / 2.0),
        Vec2::new(W / 2.0, H / 2.0),
        0.0,
        with_alpha(colors::FADE, alpha),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_produces_triangles() {
        let state = GameState::new(3);
        let settings = Settings::default();
        let verts = build(&state, &settings);
        assert!(!verts.is_empty());
        assert_eq!(verts.len() % 3, 0);
    }

    #[test]
    fn test_collected_treasures_not_drawn() {
        let mut state = GameState::new(3);
        let settings = Settings::default();
        let before = build(&state, &settings).len();

        for treasure in &mut state.treasures {
            treasure.collected = true;
        }
        let after = build(&state, &settings).len();
        assert!(after < before);
    }

    #[test]
    fn test_fade_skipped_when_clear() {
        let mut state = GameState::new(3);
        state.fade_alpha = 1.0;
        let settings = Settings::default();
        let faded = build(&state, &settings).len();

        state.fade_alpha = 0.0;
        let clear = build(&state, &settings).len();
        assert_eq!(faded, clear + 6);
    }
}
