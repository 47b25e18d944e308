use crate::config::KeyId;
use crate::game::Context;
use crate::grid::GridError;
use crate::scenes::{draw_banner, Scene, SceneKind, Transition};

/// Sits on top of Play; Play gets no updates until this is popped.
pub struct Paused;

impl Scene for Paused {
    fn kind(&self) -> SceneKind {
        SceneKind::Paused
    }

    fn draw(&self, ctx: &mut Context) -> Result<(), GridError> {
        draw_banner(ctx, &["PAUSED", "", "Press P to resume"])
    }

    fn key_down(&mut self, ctx: &mut Context, key: KeyId) -> Transition {
        if key == ctx.keys.pause {
            Transition::Pop
        } else {
            Transition::None
        }
    }
}
