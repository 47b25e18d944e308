pub mod game_over;
pub mod level_intro;
pub mod paused;
pub mod play;
pub mod welcome;

use crate::config::KeyId;
use crate::game::Context;
use crate::grid::GridError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    Welcome,
    LevelIntro,
    Play,
    Paused,
    GameOver,
}

/// What the controller should do with the scene stack after a callback.
pub enum Transition {
    None,
    Push(Box<dyn Scene>),
    Pop,
    Switch(Box<dyn Scene>),
    Reset,
}

/// One state of the game. Every callback is optional.
pub trait Scene {
    fn kind(&self) -> SceneKind;

    fn enter(&mut self, _ctx: &mut Context) {}

    fn leave(&mut self, _ctx: &mut Context) {}

    fn update(&mut self, _ctx: &mut Context, _delta: f64) -> Transition {
        Transition::None
    }

    fn draw(&self, _ctx: &mut Context) -> Result<(), GridError> {
        Ok(())
    }

    fn key_down(&mut self, _ctx: &mut Context, _key: KeyId) -> Transition {
        Transition::None
    }

    fn key_up(&mut self, _ctx: &mut Context, _key: KeyId) -> Transition {
        Transition::None
    }
}

#[derive(Default)]
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
}

impl SceneStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut scene: Box<dyn Scene>, ctx: &mut Context) {
        log::debug!("enter {:?}", scene.kind());
        scene.enter(ctx);
        self.scenes.push(scene);
    }

    pub fn pop(&mut self, ctx: &mut Context) -> Option<Box<dyn Scene>> {
        let mut scene = self.scenes.pop()?;
        log::debug!("leave {:?}", scene.kind());
        scene.leave(ctx);
        Some(scene)
    }

    /// Replaces the top of the stack.
    pub fn move_to(&mut self, scene: Box<dyn Scene>, ctx: &mut Context) {
        self.pop(ctx);
        self.push(scene, ctx);
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.scenes.last().map(|scene| &**scene)
    }

    pub fn current_mut(&mut self) -> Option<&mut Box<dyn Scene>> {
        self.scenes.last_mut()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// Clears the grid and writes `lines` as a block centred on the middle row.
pub(crate) fn draw_banner(ctx: &mut Context, lines: &[&str]) -> Result<(), GridError> {
    ctx.grid.clear();
    let Some((first, rest)) = lines.split_first() else {
        return Ok(());
    };
    ctx.grid.draw_center(first)?;
    let (_, y) = ctx.grid.center_origin(first);
    let bottom = ctx.bounds().bottom;
    for (i, line) in rest.iter().enumerate() {
        let row = y + 1 + i as i32;
        if row > bottom {
            break;
        }
        let (x, _) = ctx.grid.center_origin(line);
        ctx.grid.draw(x, row, line)?;
    }
    Ok(())
}
