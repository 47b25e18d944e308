use rand::Rng;

use crate::config::KeyId;
use crate::entity::Entity;
use crate::game::Context;
use crate::grid::{Bounds, GridError};
use crate::scenes::game_over::GameOver;
use crate::scenes::level_intro::LevelIntro;
use crate::scenes::paused::Paused;
use crate::scenes::{Scene, SceneKind, Transition};

const LEVEL_BONUS: u32 = 50;

pub struct Play {
    ship: Entity,
    rockets: Vec<Entity>,
    invaders: Vec<Entity>,
    bombs: Vec<Entity>,
}

impl Play {
    pub fn new() -> Self {
        Self {
            ship: Entity::ship(0.0, 0.0, 0.0),
            rockets: Vec::new(),
            invaders: Vec::new(),
            bombs: Vec::new(),
        }
    }

    fn max_x(bounds: Bounds, entity: &Entity) -> f64 {
        (bounds.right - (entity.width as i32 - 1)) as f64
    }

    // ── 1. Ship movement ───────────────────────────────────────────────

    fn move_ship(&mut self, ctx: &Context, delta: f64) {
        let step = self.ship.vx * delta;
        if ctx.is_pressed(ctx.keys.left) {
            self.ship.x -= step;
        }
        if ctx.is_pressed(ctx.keys.right) {
            self.ship.x += step;
        }
        let bounds = ctx.bounds();
        let max_x = Self::max_x(bounds, &self.ship).max(bounds.left as f64);
        self.ship.x = self.ship.x.clamp(bounds.left as f64, max_x);
    }

    // ── 2. Bombs hitting the ship ──────────────────────────────────────

    fn bomb_ship(&mut self, ctx: &mut Context) {
        if let Some(idx) = self.bombs.iter().position(|b| b.hit(&self.ship)) {
            self.bombs.remove(idx);
            ctx.state.lives -= 1;
            log::debug!("ship hit, {} lives left", ctx.state.lives);
        }
    }

    // ── 3. Firing ──────────────────────────────────────────────────────

    fn fire(&mut self, ctx: &Context) {
        if !ctx.is_pressed(ctx.keys.fire) {
            return;
        }
        let now = ctx.now_ms();
        let cooled_down = self
            .rockets
            .last()
            .and_then(Entity::fired_at)
            .map(|fired_at| now - fired_at >= ctx.config.rocket_cooldown_ms())
            .unwrap_or(true);
        if cooled_down {
            self.rockets.push(Entity::rocket(
                self.ship.center(),
                self.ship.y,
                ctx.config.rocket_velocity,
                now,
            ));
        }
    }

    // ── 4. Rockets ─────────────────────────────────────────────────────

    fn move_rockets(&mut self, ctx: &Context, delta: f64) {
        let top = ctx.bounds().top as f64;
        for rocket in &mut self.rockets {
            rocket.advance(delta);
        }
        self.rockets.retain(|r| r.y >= top);
    }

    // ── 5. Invaders ────────────────────────────────────────────────────

    fn move_invaders(&mut self, ctx: &mut Context, delta: f64) {
        let bounds = ctx.bounds();
        let config = &ctx.config;
        let state = &mut ctx.state;
        let rng = &mut ctx.rng;
        let rockets = &self.rockets;
        let bombs = &mut self.bombs;

        self.invaders.retain_mut(|invader| {
            invader.advance(delta);
            let max_x = Self::max_x(bounds, invader);
            let bounced = if invader.x < bounds.left as f64 {
                invader.x = bounds.left as f64;
                true
            } else if invader.x > max_x {
                invader.x = max_x;
                true
            } else {
                false
            };
            if bounced {
                invader.y += 1.0;
                invader.vx = -invader.vx;
            }
            if invader.y > bounds.bottom as f64 {
                state.lives = 0;
            }

            if rng.gen::<f64>() < config.bomb_rate * delta {
                let velocity = rng.gen_range(config.bomb_min_velocity..=config.bomb_max_velocity);
                bombs.push(Entity::bomb(invader.x, invader.y, velocity));
            }

            if rockets.iter().any(|rocket| rocket.hit(invader)) {
                state.score += config.invader_points;
                false
            } else {
                true
            }
        });
    }

    // ── 6. Bombs ───────────────────────────────────────────────────────

    fn move_bombs(&mut self, ctx: &Context, delta: f64) {
        let limit = (ctx.bounds().bottom + 1) as f64;
        for bomb in &mut self.bombs {
            bomb.advance(delta);
        }
        self.bombs.retain(|b| b.y < limit);
    }
}

impl Default for Play {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for Play {
    fn kind(&self) -> SceneKind {
        SceneKind::Play
    }

    fn enter(&mut self, ctx: &mut Context) {
        let bounds = ctx.bounds();
        let config = &ctx.config;
        self.ship = Entity::ship(
            ((bounds.left + bounds.right) / 2) as f64,
            bounds.bottom as f64,
            config.ship_speed,
        );
        self.rockets.clear();
        self.bombs.clear();

        let velocity = config.invader_velocity_for(ctx.state.level);
        self.invaders = (0..config.invader_rows)
            .flat_map(|row| (0..config.invader_columns).map(move |column| (column, row)))
            .map(|(column, row)| Entity::invader(column, row, velocity))
            .collect();
    }

    fn update(&mut self, ctx: &mut Context, delta: f64) -> Transition {
        self.move_ship(ctx, delta);
        self.bomb_ship(ctx);
        self.fire(ctx);
        self.move_rockets(ctx, delta);
        self.move_invaders(ctx, delta);
        self.move_bombs(ctx, delta);

        let cleared = self.invaders.is_empty();
        if cleared {
            ctx.state.score += ctx.state.level * LEVEL_BONUS;
            log::info!("level {} cleared, score {}", ctx.state.level, ctx.state.score);
            ctx.state.level += 1;
        }

        if ctx.state.lives <= 0 {
            Transition::Switch(Box::new(GameOver))
        } else if cleared {
            Transition::Switch(Box::new(LevelIntro::new()))
        } else {
            Transition::None
        }
    }

    fn draw(&self, ctx: &mut Context) -> Result<(), GridError> {
        let bounds = ctx.bounds();
        let status = format!(
            "Level {} - Lives {} - Score {}",
            ctx.state.level, ctx.state.lives, ctx.state.score
        );
        ctx.grid.clear();
        ctx.grid.draw(bounds.left, bounds.top, &status)?;

        self.ship.draw(&mut ctx.grid, &ctx.glyphs)?;
        for entity in self.rockets.iter().chain(&self.invaders).chain(&self.bombs) {
            entity.draw(&mut ctx.grid, &ctx.glyphs)?;
        }
        Ok(())
    }

    fn key_down(&mut self, ctx: &mut Context, key: KeyId) -> Transition {
        if key == ctx.keys.pause {
            Transition::Push(Box::new(Paused))
        } else {
            Transition::None
        }
    }
}
