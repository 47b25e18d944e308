use crate::config::KeyId;
use crate::game::Context;
use crate::grid::GridError;
use crate::scenes::level_intro::LevelIntro;
use crate::scenes::{draw_banner, Scene, SceneKind, Transition};

pub struct Welcome;

impl Scene for Welcome {
    fn kind(&self) -> SceneKind {
        SceneKind::Welcome
    }

    fn draw(&self, ctx: &mut Context) -> Result<(), GridError> {
        draw_banner(ctx, &["GLYPH INVADERS", "", "Press SPACE to start"])
    }

    fn key_up(&mut self, ctx: &mut Context, key: KeyId) -> Transition {
        if key == ctx.keys.start() {
            Transition::Switch(Box::new(LevelIntro::new()))
        } else {
            Transition::None
        }
    }
}
