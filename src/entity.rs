use std::borrow::Cow;
use std::cell::OnceCell;

use crate::config::Glyphs;
use crate::grid::{Grid, GridError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    Ship,
    /// `fired_at` is the real-time clock reading (ms) when the rocket spawned.
    Rocket { fired_at: f64 },
    /// Grid slot the invader was created in.
    Invader { column: u32, row: u32 },
    Bomb,
}

impl EntityKind {
    fn glyph(&self, glyphs: &Glyphs) -> char {
        match self {
            EntityKind::Ship => glyphs.ship,
            EntityKind::Rocket { .. } => glyphs.rocket,
            EntityKind::Invader { .. } => glyphs.invader,
            EntityKind::Bomb => glyphs.bomb,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub vx: f64,
    pub vy: f64,
    sprite: OnceCell<String>,
}

impl Entity {
    pub fn new(kind: EntityKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width: 1,
            height: 1,
            vx: 0.0,
            vy: 0.0,
            sprite: OnceCell::new(),
        }
    }

    /// The ship keeps its horizontal speed in `vx`; direction comes from input.
    pub fn ship(x: f64, y: f64, speed: f64) -> Self {
        Self {
            vx: speed,
            ..Self::new(EntityKind::Ship, x, y)
        }
    }

    /// Rockets travel up, so `vy` is negative.
    pub fn rocket(x: f64, y: f64, velocity: f64, fired_at: f64) -> Self {
        Self {
            vy: -velocity,
            ..Self::new(EntityKind::Rocket { fired_at }, x, y)
        }
    }

    pub fn invader(column: u32, row: u32, velocity: f64) -> Self {
        Self {
            vx: velocity,
            ..Self::new(
                EntityKind::Invader { column, row },
                column as f64 * 5.0,
                2.0 + row as f64 * 2.0,
            )
        }
    }

    pub fn bomb(x: f64, y: f64, velocity: f64) -> Self {
        Self {
            vy: velocity,
            ..Self::new(EntityKind::Bomb, x, y)
        }
    }

    pub fn advance(&mut self, delta: f64) {
        self.x += self.vx * delta;
        self.y += self.vy * delta;
    }

    /// True when this entity's origin lies inside `other`'s box, both edges inclusive.
    pub fn hit(&self, other: &Entity) -> bool {
        self.x >= other.x
            && self.x <= other.x + other.width as f64
            && self.y >= other.y
            && self.y <= other.y + other.height as f64
    }

    pub fn center(&self) -> f64 {
        if self.width > 1 {
            self.x + self.width as f64 / 2.0
        } else {
            self.x
        }
    }

    pub fn fired_at(&self) -> Option<f64> {
        match self.kind {
            EntityKind::Rocket { fired_at } => Some(fired_at),
            _ => None,
        }
    }

    /// `width` copies of this entity's glyph. The first call fills the cache;
    /// a later call with another glyph or a changed width builds a fresh string.
    pub fn sprite(&self, glyphs: &Glyphs) -> Cow<'_, str> {
        let glyph = self.kind.glyph(glyphs);
        let build = || -> String { std::iter::repeat(glyph).take(self.width as usize).collect() };
        let cached = self.sprite.get_or_init(&build);
        let matches = cached.chars().count() == self.width as usize
            && cached.chars().all(|c| c == glyph);
        if matches {
            Cow::Borrowed(cached.as_str())
        } else {
            Cow::Owned(build())
        }
    }

    pub fn draw(&self, grid: &mut Grid, glyphs: &Glyphs) -> Result<(), GridError> {
        let sprite = self.sprite(glyphs);
        for row in 0..self.height {
            grid.draw(self.x as i32, (self.y + row as f64) as i32, &sprite)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Bounds;

    #[test]
    fn hit_is_inclusive_at_origin() {
        let attacker = Entity::new(EntityKind::Bomb, 5.0, 5.0);
        let victim = Entity::new(EntityKind::Ship, 5.0, 5.0);
        assert!(attacker.hit(&victim));
    }

    #[test]
    fn hit_includes_far_edge() {
        let attacker = Entity::new(EntityKind::Bomb, 6.0, 6.0);
        let victim = Entity::new(EntityKind::Ship, 5.0, 5.0);
        assert!(attacker.hit(&victim));
    }

    #[test]
    fn hit_misses_when_victim_is_past_origin() {
        let attacker = Entity::new(EntityKind::Bomb, 5.0, 5.0);
        let victim = Entity::new(EntityKind::Ship, 6.0, 6.0);
        assert!(!attacker.hit(&victim));
    }

    #[test]
    fn center_uses_half_width_for_wide_entities() {
        let mut ship = Entity::ship(10.0, 0.0, 1.0);
        assert_eq!(ship.center(), 10.0);
        ship.width = 3;
        assert_eq!(ship.center(), 11.5);
    }

    #[test]
    fn sprite_repeats_glyph_per_width() {
        let glyphs = Glyphs::default();
        let mut invader = Entity::invader(0, 0, 1.0);
        invader.width = 3;
        assert_eq!(invader.sprite(&glyphs), "WWW");
    }

    #[test]
    fn sprite_follows_glyph_table_and_width_changes() {
        let mut bomb = Entity::bomb(0.0, 0.0, 1.0);
        assert_eq!(bomb.sprite(&Glyphs::default()), "*");

        let glyphs = Glyphs {
            bomb: 'o',
            ..Glyphs::default()
        };
        assert_eq!(bomb.sprite(&glyphs), "o");

        bomb.width = 2;
        assert_eq!(bomb.sprite(&Glyphs::default()), "**");
    }

    #[test]
    fn draw_truncates_position_and_covers_height() {
        let glyphs = Glyphs::default();
        let mut grid = Grid::new(Bounds::from_cells(10, 10));
        let mut bomb = Entity::bomb(3.7, 2.9, 1.0);
        bomb.height = 2;
        bomb.draw(&mut grid, &glyphs).unwrap();
        assert_eq!(grid.char_at(3, 2), Some('*'));
        assert_eq!(grid.char_at(3, 3), Some('*'));
        assert_eq!(grid.char_at(4, 2), Some(' '));
    }

    #[test]
    fn invader_slot_position() {
        let invader = Entity::invader(3, 2, 4.0);
        assert_eq!((invader.x, invader.y), (15.0, 6.0));
        assert_eq!(invader.vx, 4.0);
        assert_eq!(invader.kind, EntityKind::Invader { column: 3, row: 2 });
    }
}
