//! Built-in level catalog
//!
//! Five levels on a 12x12 grid. Levels 3 to 5 were laid out for a much larger
//! board; most of their coordinates fall outside the grid and are skipped
//! when the grid is built.

use super::config::{LevelConfig, LevelError};
use crate::core_types::Surface;
use crate::grid::Supply;

/// Number of built-in levels; the last one ends the campaign
pub const LEVEL_COUNT: u32 = 5;

/// Built-in level `number` (1-based)
///
/// # Errors
/// Returns [`LevelError::UnknownLevel`] outside `1..=LEVEL_COUNT`
pub fn builtin_level(number: u32) -> Result<LevelConfig, LevelError> {
    match number {
        1 => Ok(first_buckets()),
        2 => Ok(more_platforms()),
        3 => Ok(not_on_my_turf()),
        4 => Ok(turf_wars()),
        5 => Ok(teleporters()),
        _ => Err(LevelError::UnknownLevel(number)),
    }
}

/// All built-in levels in play order
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![
        first_buckets(),
        more_platforms(),
        not_on_my_turf(),
        turf_wars(),
        teleporters(),
    ]
}

fn first_buckets() -> LevelConfig {
    LevelConfig::new(1, "First buckets - Learn to place", Supply::new(2, 0))
        .paint_row(8, 3..=5, Surface::Grass)
        .paint_row(8, 7..=9, Surface::Grass)
}

fn more_platforms() -> LevelConfig {
    LevelConfig::new(
        2,
        "More platforms - Understand liquid physics",
        Supply::new(3, 0),
    )
    .paint_row(5, 2..=9, Surface::Grass)
    .paint_col(7..=10, 8, Surface::Grass)
    .paint_row(7, 9..=11, Surface::Grass)
    .paint_row(9, 9..=11, Surface::Grass)
    .paint_row(11, 2..=9, Surface::Grass)
}

fn not_on_my_turf() -> LevelConfig {
    LevelConfig::new(3, "Not on my turf - Introduce gray blocks", Supply::new(4, 0))
        .paint(30, 20, Surface::Grass)
        .paint(35, 25, Surface::Grass)
        .paint(40, 30, Surface::Grass)
        .paint(45, 35, Surface::Grass)
        .paint(50, 40, Surface::Grass)
        .paint(55, 45, Surface::Grass)
        .paint(15, 10, Surface::Gray)
        .paint(20, 15, Surface::Gray)
        .paint(25, 20, Surface::Gray)
        .paint(30, 25, Surface::Gray)
        .paint(35, 30, Surface::Gray)
        .paint(40, 35, Surface::Gray)
        .paint(45, 40, Surface::Gray)
        .paint(50, 45, Surface::Gray)
}

fn turf_wars() -> LevelConfig {
    LevelConfig::new(
        4,
        "Turf Wars - Introducing fire blocks and magma",
        Supply::new(3, 3),
    )
    .paint(35, 25, Surface::Grass)
    .paint(40, 30, Surface::Grass)
    .paint(45, 35, Surface::Grass)
    .paint(50, 40, Surface::Grass)
    .paint(55, 45, Surface::Grass)
    .paint(35, 45, Surface::Fire)
    .paint(40, 50, Surface::Fire)
    .paint(45, 55, Surface::Fire)
    .paint(50, 60, Surface::Fire)
    .paint(55, 65, Surface::Fire)
    .paint(20, 15, Surface::Gray)
    .paint(25, 20, Surface::Gray)
    .paint(30, 25, Surface::Gray)
    .paint(35, 30, Surface::Gray)
    .paint(40, 35, Surface::Gray)
    .paint(45, 40, Surface::Gray)
}

fn teleporters() -> LevelConfig {
    LevelConfig::new(
        5,
        "Now you're thinking with Teleporters! - Introduce teleporters",
        Supply::new(4, 4),
    )
    .paint(40, 20, Surface::Grass)
    .paint(45, 25, Surface::Grass)
    .paint(50, 30, Surface::Grass)
    .paint(55, 35, Surface::Grass)
    .paint(60, 40, Surface::Grass)
    .paint(65, 45, Surface::Grass)
    .paint(40, 45, Surface::Fire)
    .paint(45, 50, Surface::Fire)
    .paint(50, 55, Surface::Fire)
    .paint(55, 60, Surface::Fire)
    .paint(60, 65, Surface::Fire)
    .paint(65, 70, Surface::Fire)
    .paint(15, 10, Surface::Gray)
    .paint(20, 15, Surface::Gray)
    .paint(25, 20, Surface::Gray)
    .paint(30, 25, Surface::Gray)
    .paint(35, 30, Surface::Gray)
    .paint(40, 35, Surface::Gray)
    .paint(45, 40, Surface::Gray)
    .paint(50, 45, Surface::Gray)
    .paint(55, 50, Surface::Gray)
    .paint(60, 55, Surface::Gray)
    .teleporter((15, 20), (50, 20))
    .teleporter((25, 40), (45, 40))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::GridPos;
    use crate::evaluation::SurfaceRule;

    #[test]
    fn test_catalog_numbers() {
        for number in 1..=LEVEL_COUNT {
            assert_eq!(builtin_level(number).unwrap().number, number);
        }
        assert_eq!(builtin_level(0), Err(LevelError::UnknownLevel(0)));
        assert_eq!(builtin_level(6), Err(LevelError::UnknownLevel(6)));
        assert_eq!(builtin_levels().len(), LEVEL_COUNT as usize);
    }

    #[test]
    fn test_supplies() {
        let supplies: Vec<_> = builtin_levels().iter().map(|l| l.supply).collect();
        assert_eq!(
            supplies,
            vec![
                Supply::new(2, 0),
                Supply::new(3, 0),
                Supply::new(4, 0),
                Supply::new(3, 3),
                Supply::new(4, 4),
            ]
        );
    }

    #[test]
    fn test_level_two_paints_over_floor() {
        let grid = builtin_level(2).unwrap().build_grid();
        assert_eq!(grid.surface(GridPos::new(11, 2)), Some(Surface::Grass));
        assert_eq!(grid.surface(GridPos::new(11, 10)), Some(Surface::Floor));
        assert_eq!(grid.surface(GridPos::new(8, 8)), Some(Surface::Grass));
    }

    #[test]
    fn test_oversized_levels_have_no_ruled_cells() {
        for number in 3..=LEVEL_COUNT {
            let grid = builtin_level(number).unwrap().build_grid();
            assert!(grid
                .cells()
                .iter()
                .all(|cell| SurfaceRule::for_surface(cell.surface()).is_none()));
            assert!(grid.teleporters().is_empty());
        }
    }
}
