use crate::game::Context;
use crate::grid::GridError;
use crate::scenes::play::Play;
use crate::scenes::{draw_banner, Scene, SceneKind, Transition};

const COUNTDOWN: f64 = 3.0;

pub struct LevelIntro {
    countdown: f64,
}

impl LevelIntro {
    pub fn new() -> Self {
        Self { countdown: COUNTDOWN }
    }

    /// Whole number shown to the player: 3, 2 or 1.
    pub fn seconds_left(&self) -> u32 {
        self.countdown.ceil().clamp(1.0, COUNTDOWN) as u32
    }
}

impl Default for LevelIntro {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LevelIntro {
    fn kind(&self) -> SceneKind {
        SceneKind::LevelIntro
    }

    fn enter(&mut self, ctx: &mut Context) {
        log::info!("level {} starting", ctx.state.level);
    }

    fn update(&mut self, _ctx: &mut Context, delta: f64) -> Transition {
        self.countdown -= delta;
        if self.countdown <= 0.0 {
            Transition::Switch(Box::new(Play::new()))
        } else {
            Transition::None
        }
    }

    fn draw(&self, ctx: &mut Context) -> Result<(), GridError> {
        let title = format!("Level {}", ctx.state.level);
        let message = format!("Starting in {}...", self.seconds_left());
        draw_banner(ctx, &[&title, "", &message])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_follows_countdown_thresholds() {
        let mut intro = LevelIntro::new();
        assert_eq!(intro.seconds_left(), 3);
        intro.countdown = 2.0;
        assert_eq!(intro.seconds_left(), 2);
        intro.countdown = 1.5;
        assert_eq!(intro.seconds_left(), 2);
        intro.countdown = 0.2;
        assert_eq!(intro.seconds_left(), 1);
        intro.countdown = -0.5;
        assert_eq!(intro.seconds_left(), 1);
    }
}
