use crate::entity::Entity;
use crate::grid::Bounds;

const INITIAL_LIVES: i32 = 3;
const DIFFICULTY_MULTIPLIER: f64 = 0.2;
const SHIP_SPEED: f64 = 20.0; // cells per second
const ROCKET_VELOCITY: f64 = 16.0;
const ROCKET_MAX_FIRE_RATE: f64 = 3.0; // rockets per second
const INVADER_VELOCITY: f64 = 4.0;
const INVADER_COLUMNS: u32 = 10;
const INVADER_ROWS: u32 = 4;
const INVADER_POINTS: u32 = 5;
const BOMB_RATE: f64 = 0.05; // chance per invader per second
const BOMB_MIN_VELOCITY: f64 = 4.0;
const BOMB_MAX_VELOCITY: f64 = 8.0;

pub type KeyId = u32;

/// Gameplay tunables, fixed for the lifetime of a [`crate::game::Game`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub initial_lives: i32,
    pub difficulty_multiplier: f64,
    pub ship_speed: f64,
    pub rocket_velocity: f64,
    pub rocket_max_fire_rate: f64,
    pub invader_velocity: f64,
    pub invader_columns: u32,
    pub invader_rows: u32,
    pub invader_points: u32,
    pub bomb_rate: f64,
    pub bomb_min_velocity: f64,
    pub bomb_max_velocity: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            difficulty_multiplier: DIFFICULTY_MULTIPLIER,
            ship_speed: SHIP_SPEED,
            rocket_velocity: ROCKET_VELOCITY,
            rocket_max_fire_rate: ROCKET_MAX_FIRE_RATE,
            invader_velocity: INVADER_VELOCITY,
            invader_columns: INVADER_COLUMNS,
            invader_rows: INVADER_ROWS,
            invader_points: INVADER_POINTS,
            bomb_rate: BOMB_RATE,
            bomb_min_velocity: BOMB_MIN_VELOCITY,
            bomb_max_velocity: BOMB_MAX_VELOCITY,
        }
    }
}

impl Config {
    /// Minimum real time between two rockets, in milliseconds.
    pub fn rocket_cooldown_ms(&self) -> f64 {
        1000.0 / self.rocket_max_fire_rate
    }

    /// Invader speed for a level: base + (level * multiplier * base).
    pub fn invader_velocity_for(&self, level: u32) -> f64 {
        let difficulty = level as f64 * self.difficulty_multiplier;
        self.invader_velocity + difficulty * self.invader_velocity
    }

    /// Whether the opening invader formation fits inside `bounds` and stays
    /// above the ship's row. When it does not, the first Play frame fails to draw.
    pub fn formation_fits(&self, bounds: Bounds) -> bool {
        if self.invader_columns == 0 || self.invader_rows == 0 {
            return true;
        }
        let last = Entity::invader(self.invader_columns - 1, self.invader_rows - 1, 0.0);
        let max_x = (bounds.right - (last.width as i32 - 1)) as f64;
        last.x <= max_x && last.y < bounds.bottom as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub ship: char,
    pub rocket: char,
    pub invader: char,
    pub bomb: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            ship: 'A',
            rocket: '|',
            invader: 'W',
            bomb: '*',
        }
    }
}

/// Numeric key identifiers the core reacts to. Fire and start share a code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub fire: KeyId,
    pub left: KeyId,
    pub right: KeyId,
    pub restart: KeyId,
    pub pause: KeyId,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fire: 32,
            left: 37,
            right: 39,
            restart: 82,
            pause: 80,
        }
    }
}

impl KeyBindings {
    pub fn start(&self) -> KeyId {
        self.fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invader_velocity_scales_with_level() {
        let config = Config {
            invader_velocity: 10.0,
            difficulty_multiplier: 0.5,
            ..Config::default()
        };
        assert_eq!(config.invader_velocity_for(1), 15.0);
        assert_eq!(config.invader_velocity_for(2), 20.0);
    }

    #[test]
    fn cooldown_is_inverse_of_fire_rate() {
        let config = Config {
            rocket_max_fire_rate: 4.0,
            ..Config::default()
        };
        assert_eq!(config.rocket_cooldown_ms(), 250.0);
    }

    #[test]
    fn default_formation_needs_46_by_10_cells() {
        let config = Config::default();
        assert!(config.formation_fits(Bounds::from_cells(46, 10)));
        assert!(!config.formation_fits(Bounds::from_cells(45, 10)));
        assert!(!config.formation_fits(Bounds::from_cells(46, 9)));
    }

    #[test]
    fn empty_formation_always_fits() {
        let config = Config {
            invader_columns: 0,
            ..Config::default()
        };
        assert!(config.formation_fits(Bounds::from_cells(1, 1)));
    }
}
