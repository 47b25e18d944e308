use std::collections::HashSet;

use rand::rngs::StdRng;

use crate::clock::Clock;
use crate::config::{Config, Glyphs, KeyBindings, KeyId};
use crate::grid::{Bounds, Grid, GridError, RenderSink};
use crate::scenes::welcome::Welcome;
use crate::scenes::{Scene, SceneKind, SceneStack, Transition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    pub lives: i32,
}

impl GameState {
    pub fn new(initial_lives: i32) -> Self {
        Self {
            score: 0,
            level: 1,
            lives: initial_lives,
        }
    }
}

/// Everything a scene may read or mutate while it runs.
pub struct Context {
    pub config: Config,
    pub glyphs: Glyphs,
    pub keys: KeyBindings,
    pub state: GameState,
    pub grid: Grid,
    pub rng: StdRng,
    pressed: HashSet<KeyId>,
    clock: Box<dyn Clock>,
}

impl Context {
    pub fn new(config: Config, bounds: Bounds, clock: Box<dyn Clock>, rng: StdRng) -> Self {
        Self {
            state: GameState::new(config.initial_lives),
            config,
            glyphs: Glyphs::default(),
            keys: KeyBindings::default(),
            grid: Grid::new(bounds),
            rng,
            pressed: HashSet::new(),
            clock,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    pub fn is_pressed(&self, key: KeyId) -> bool {
        self.pressed.contains(&key)
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub(crate) fn press(&mut self, key: KeyId) {
        self.pressed.insert(key);
    }

    pub(crate) fn release(&mut self, key: KeyId) {
        self.pressed.remove(&key);
    }
}

pub struct Game {
    ctx: Context,
    states: SceneStack,
    last_frame: Option<f64>,
}

impl Game {
    pub fn new(config: Config, bounds: Bounds, clock: Box<dyn Clock>, rng: StdRng) -> Self {
        let mut game = Self {
            ctx: Context::new(config, bounds, clock, rng),
            states: SceneStack::new(),
            last_frame: None,
        };
        game.reset();
        game
    }

    pub fn with_keys(mut self, keys: KeyBindings) -> Self {
        self.ctx.keys = keys;
        self
    }

    pub fn reset(&mut self) {
        self.ctx.state = GameState::new(self.ctx.config.initial_lives);
        self.states.move_to(Box::new(Welcome), &mut self.ctx);
        log::info!("game reset");
    }

    pub fn key_down(&mut self, key: KeyId) {
        self.ctx.press(key);
        let transition = match self.states.current_mut() {
            Some(scene) => scene.key_down(&mut self.ctx, key),
            None => return,
        };
        self.apply(transition);
    }

    pub fn key_up(&mut self, key: KeyId) {
        self.ctx.release(key);
        let transition = match self.states.current_mut() {
            Some(scene) => scene.key_up(&mut self.ctx, key),
            None => return,
        };
        self.apply(transition);
    }

    /// Runs one frame: update the current scene, draw it and flush the grid.
    /// `timestamp_ms` comes from the host's frame clock. Returns whether the
    /// sink was written; `Ok(false)` once no scene is left.
    pub fn frame(&mut self, timestamp_ms: f64, sink: &mut dyn RenderSink) -> Result<bool, GridError> {
        // The first frame has no previous timestamp to measure against.
        let delta = match self.last_frame {
            Some(previous) => ((timestamp_ms - previous) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_frame = Some(timestamp_ms);

        let transition = match self.states.current_mut() {
            Some(scene) => scene.update(&mut self.ctx, delta),
            None => return Ok(false),
        };
        self.apply(transition);

        match self.states.current() {
            Some(scene) => scene.draw(&mut self.ctx)?,
            None => return Ok(false),
        }
        Ok(self.ctx.grid.flush(sink))
    }

    pub fn push_state(&mut self, scene: Box<dyn Scene>) {
        self.states.push(scene, &mut self.ctx);
    }

    pub fn pop_state(&mut self) {
        self.states.pop(&mut self.ctx);
    }

    pub fn move_to_state(&mut self, scene: Box<dyn Scene>) {
        self.states.move_to(scene, &mut self.ctx);
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Push(scene) => self.push_state(scene),
            Transition::Pop => self.pop_state(),
            Transition::Switch(scene) => self.move_to_state(scene),
            Transition::Reset => self.reset(),
        }
    }

    pub fn current_scene(&self) -> Option<SceneKind> {
        self.states.current().map(|scene| scene.kind())
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self) -> GameState {
        self.ctx.state
    }

    pub fn keys(&self) -> KeyBindings {
        self.ctx.keys
    }

    pub fn grid(&self) -> &Grid {
        &self.ctx.grid
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }
}
