//! Cell, surface and liquid types
//!
//! A cell carries a static surface tag painted by the level and at most one
//! unit of liquid. The surface never restricts manual placement; it only
//! changes how liquid flows through the cell and how the win rules read it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::GridPos;

/// Surface painted onto a grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Open air - liquid falls through
    #[default]
    Empty,
    /// Absorbs liquid from above, no further flow
    Floor,
    /// Must end next to water
    Grass,
    /// Must end next to magma
    Fire,
    /// Must end with no liquid next to it
    Gray,
    /// Endpoint of a teleporter pair
    Teleporter,
}

impl Surface {
    /// Surfaces that stop a fall but let liquid spread sideways above them
    pub fn is_wettable(&self) -> bool {
        matches!(self, Surface::Grass | Surface::Fire)
    }

    /// Surfaces that lateral spread may enter
    pub fn accepts_spread(&self) -> bool {
        matches!(self, Surface::Empty | Surface::Grass | Surface::Fire)
    }

    /// Lowercase name as used in level files
    pub fn name(&self) -> &'static str {
        match self {
            Surface::Empty => "empty",
            Surface::Floor => "floor",
            Surface::Grass => "grass",
            Surface::Fire => "fire",
            Surface::Gray => "gray",
            Surface::Teleporter => "teleporter",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Liquid type held by a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquid {
    Water,
    Magma,
}

impl Liquid {
    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Liquid::Water => "water",
            Liquid::Magma => "magma",
        }
    }
}

impl fmt::Display for Liquid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) pos: GridPos,
    pub(crate) surface: Surface,
    pub(crate) liquid: Option<Liquid>,
}

impl Cell {
    /// Create a dry cell with the given surface
    pub fn new(pos: GridPos, surface: Surface) -> Self {
        Self {
            pos,
            surface,
            liquid: None,
        }
    }

    /// Position of this cell
    pub fn pos(&self) -> GridPos {
        self.pos
    }

    /// Painted surface
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Liquid currently held, if any
    pub fn liquid(&self) -> Option<Liquid> {
        self.liquid
    }

    /// Whether the cell holds any liquid
    pub fn is_wet(&self) -> bool {
        self.liquid.is_some()
    }
}
