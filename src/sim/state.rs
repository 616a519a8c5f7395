//! Game state and core simulation types
//!
//! Everything the per-tick simulation reads or writes lives here; there are
//! no ambient globals, so a state value plus an input sequence fully
//! determines a run.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn;
use crate::consts::*;

/// Coarse session phase; transitions are one-way until an explicit restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting on the start screen; the scene renders but nothing moves
    NotStarted,
    /// Active gameplay
    Running,
    /// All treasures collected
    Won,
    /// Run ended
    Lost(LossReason),
}

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// Touched an enemy
    Enemy,
    /// Oxygen reached zero
    Oxygen,
}

/// Treasure variants; each has its own vector shape in the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasureKind {
    Pearl,
    Chest,
    Crown,
    Ring,
}

impl TreasureKind {
    pub const ALL: [TreasureKind; 4] = [
        TreasureKind::Pearl,
        TreasureKind::Chest,
        TreasureKind::Crown,
        TreasureKind::Ring,
    ];
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Jellyfish,
    Predator,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Jellyfish, EnemyKind::Predator];
}

/// The player's diver
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Net directional input was non-zero this tick
    pub swimming: bool,
    /// Swim-kick animation phase, advances only while swimming
    pub frame: f32,
    /// Head-lamp sweep angle, advances only while swimming
    pub light_angle: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            swimming: false,
            frame: 0.0,
            light_angle: 0.0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A collectible treasure
#[derive(Debug, Clone)]
pub struct Treasure {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: TreasureKind,
    /// Flips false -> true exactly once, via the collision resolver
    pub collected: bool,
    /// Cosmetic glow pulse phase
    pub glow_phase: f32,
    /// Cosmetic spin
    pub rotation: f32,
}

/// A patrolling enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: EnemyKind,
    /// Animation pulse phase
    pub phase: f32,
    /// Current movement target; replaced on arrival
    pub patrol_target: Vec2,
}

/// An ambient bubble; recycled from top to bottom, never destroyed
#[derive(Debug, Clone)]
pub struct Bubble {
    pub pos: Vec2,
    pub radius: f32,
    /// Upward speed in pixels per tick
    pub rise_speed: f32,
    /// Drives the horizontal sway and the alpha shimmer
    pub phase: f32,
}

/// Transient status banner
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub text: String,
    /// Ticks until the banner hides; zero means hidden
    pub timer: u32,
}

/// Complete game state, deterministic given seed + input sequence
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only source of randomness in the simulation
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub player: Player,
    pub treasures: Vec<Treasure>,
    pub enemies: Vec<Enemy>,
    pub bubbles: Vec<Bubble>,
    /// Count of collected treasures; always equals the number of
    /// treasures with `collected == true`
    pub collected: u32,
    pub oxygen: f32,
    /// Elapsed-time accumulator for batched oxygen depletion
    pub oxygen_acc: f32,
    /// Gameplay clock; accumulates only while Running
    pub elapsed_secs: f32,
    /// Cosmetic clock; accumulates in every phase
    pub anim_time: f32,
    /// Placeholder for a scrolling world; stays at zero for the fixed arena
    pub camera: Vec2,
    /// Screen shake magnitude, decays geometrically each tick
    pub screen_shake: f32,
    /// This tick's shake jitter, applied to the whole scene by the renderer
    pub shake_offset: Vec2,
    /// Full-screen fade overlay alpha in [0, 1]
    pub fade_alpha: f32,
    /// -1.0 fades in (reveal), +1.0 fades out (terminal transitions)
    pub fade_direction: f32,
    pub message: Message,
    /// Seconds since a terminal transition; gates the outcome screen reveal
    pub outcome_timer: f32,
}

impl GameState {
    /// Create a fresh session in NotStarted with full entity populations,
    /// so the start screen shows a live scene behind it.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let treasures = spawn::treasures(&mut rng);
        let enemies = spawn::enemies(&mut rng);
        let bubbles = spawn::bubbles(&mut rng);
        Self {
            seed,
            rng,
            phase: SessionPhase::NotStarted,
            player: Player::new(),
            treasures,
            enemies,
            bubbles,
            collected: 0,
            oxygen: OXYGEN_MAX,
            oxygen_acc: 0.0,
            elapsed_secs: 0.0,
            anim_time: 0.0,
            camera: Vec2::ZERO,
            screen_shake: 0.0,
            shake_offset: Vec2::ZERO,
            fade_alpha: 1.0,
            fade_direction: -1.0,
            message: Message::default(),
            outcome_timer: 0.0,
        }
    }

    /// Begin a run: rebuild every entity population from the factories and
    /// switch to Running. Used for both the first start and restarts.
    pub fn start(&mut self) {
        self.reset_world();
        self.phase = SessionPhase::Running;
    }

    /// Return to the start screen from any phase, with a fully reset world.
    pub fn restart(&mut self) {
        self.reset_world();
        self.phase = SessionPhase::NotStarted;
    }

    /// Full state re-init; factories are re-invoked in full, no partial reuse.
    fn reset_world(&mut self) {
        self.treasures = spawn::treasures(&mut self.rng);
        self.enemies = spawn::enemies(&mut self.rng);
        self.bubbles = spawn::bubbles(&mut self.rng);
        self.player = Player::new();
        self.collected = 0;
        self.oxygen = OXYGEN_MAX;
        self.oxygen_acc = 0.0;
        self.elapsed_secs = 0.0;
        self.camera = Vec2::ZERO;
        self.screen_shake = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.fade_alpha = 1.0;
        self.fade_direction = -1.0;
        self.message = Message::default();
        self.outcome_timer = 0.0;
    }

    /// Transition Running -> Won. No-op in any other phase.
    pub fn win(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Won;
        self.fade_direction = 1.0;
        self.outcome_timer = 0.0;
    }

    /// Transition Running -> Lost. Idempotent: the resolver may detect
    /// several loss conditions in one tick, and a win in the same tick
    /// takes precedence.
    pub fn game_over(&mut self, reason: LossReason) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Lost(reason);
        self.fade_direction = 1.0;
        self.outcome_timer = 0.0;
        if reason == LossReason::Enemy {
            self.screen_shake = DEATH_SHAKE;
        }
    }

    /// Show a status banner for the standard duration
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.message = Message {
            text: text.into(),
            timer: MESSAGE_TICKS,
        };
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, SessionPhase::Won | SessionPhase::Lost(_))
    }

    /// Oxygen remaining as a fraction of the maximum, in [0, 1]
    pub fn oxygen_fraction(&self) -> f32 {
        (self.oxygen / OXYGEN_MAX).clamp(0.0, 1.0)
    }

    /// True once the post-transition fade has had time to land and the
    /// host should reveal the outcome screen.
    pub fn outcome_ready(&self) -> bool {
        self.is_terminal() && self.outcome_timer >= OUTCOME_DELAY_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_populations() {
        let state = GameState::new(7);
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.treasures.len(), TREASURE_COUNT);
        assert_eq!(state.enemies.len(), ENEMY_COUNT);
        assert_eq!(state.bubbles.len(), BUBBLE_COUNT);
        assert_eq!(state.collected, 0);
        assert_eq!(state.oxygen, OXYGEN_MAX);
    }

    #[test]
    fn test_win_only_from_running() {
        let mut state = GameState::new(7);
        state.win();
        assert_eq!(state.phase, SessionPhase::NotStarted);

        state.start();
        state.win();
        assert_eq!(state.phase, SessionPhase::Won);
    }

    #[test]
    fn test_game_over_idempotent() {
        let mut state = GameState::new(7);
        state.start();
        state.game_over(LossReason::Enemy);
        assert_eq!(state.phase, SessionPhase::Lost(LossReason::Enemy));

        // A second loss condition in the same tick must not change the reason
        state.game_over(LossReason::Oxygen);
        assert_eq!(state.phase, SessionPhase::Lost(LossReason::Enemy));
    }

    #[test]
    fn test_game_over_never_downgrades_win() {
        let mut state = GameState::new(7);
        state.start();
        state.win();
        state.game_over(LossReason::Enemy);
        assert_eq!(state.phase, SessionPhase::Won);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(7);
        state.start();
        state.oxygen = 12.5;
        state.collected = 3;
        state.treasures[0].collected = true;
        state.player.pos = Vec2::new(50.0, 50.0);
        state.game_over(LossReason::Oxygen);

        state.restart();
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.oxygen, OXYGEN_MAX);
        assert_eq!(state.collected, 0);
        assert_eq!(state.elapsed_secs, 0.0);
        assert!(state.treasures.iter().all(|t| !t.collected));
        assert_eq!(state.player.pos, Player::new().pos);
        assert_eq!(state.treasures.len(), TREASURE_COUNT);
        assert_eq!(state.enemies.len(), ENEMY_COUNT);
        assert_eq!(state.bubbles.len(), BUBBLE_COUNT);
    }
}
