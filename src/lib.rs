//! Core of a text-grid invaders game: a fixed character grid, the entity
//! simulation, a stack of scenes and the controller that drives frames.
//! Hosts supply frame timestamps, key codes and a [`grid::RenderSink`].

pub mod clock;
pub mod config;
pub mod entity;
pub mod game;
pub mod grid;
pub mod scenes;
