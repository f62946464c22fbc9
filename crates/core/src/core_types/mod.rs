//! Core types and utilities

pub mod cell;
pub mod position;

pub use cell::{Cell, Liquid, Surface};
pub use position::GridPos;
