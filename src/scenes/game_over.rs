use crate::config::KeyId;
use crate::game::Context;
use crate::grid::GridError;
use crate::scenes::{draw_banner, Scene, SceneKind, Transition};

pub struct GameOver;

impl Scene for GameOver {
    fn kind(&self) -> SceneKind {
        SceneKind::GameOver
    }

    fn enter(&mut self, ctx: &mut Context) {
        log::info!(
            "game over at level {} with score {}",
            ctx.state.level,
            ctx.state.score
        );
    }

    fn draw(&self, ctx: &mut Context) -> Result<(), GridError> {
        let score = format!("Final score: {}", ctx.state.score);
        draw_banner(ctx, &["GAME OVER", "", &score, "", "Press R to restart"])
    }

    fn key_up(&mut self, ctx: &mut Context, key: KeyId) -> Transition {
        if key == ctx.keys.restart {
            Transition::Reset
        } else {
            Transition::None
        }
    }
}
