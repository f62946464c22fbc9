//! Flow and evaluation behaviour on hand-built grids

use flow_lawn_core::{
    FlowSimulator, GridPos, Liquid, LiquidGrid, Supply, Surface, WinEvaluator, MAX_FLOW_PASSES,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn wet_set(grid: &LiquidGrid) -> Vec<(GridPos, Liquid)> {
    let mut wet: Vec<_> = grid.wet_cells().collect();
    wet.sort();
    wet
}

#[test]
fn test_three_by_three_grass_scenario() {
    let mut grid = LiquidGrid::new(3, Supply::new(1, 0));
    grid.set_surface(2, 1, Surface::Grass);
    assert!(grid.place_liquid(0, 1, Liquid::Water));

    let settled = FlowSimulator::default().settle(&grid);

    let mut expected = vec![
        (GridPos::new(0, 1), Liquid::Water),
        (GridPos::new(1, 1), Liquid::Water),
        (GridPos::new(1, 0), Liquid::Water),
        (GridPos::new(1, 2), Liquid::Water),
    ];
    expected.sort();
    assert_eq!(wet_set(&settled.grid), expected);
    assert!(settled.converged);
    assert!(WinEvaluator::is_win(&settled.grid));
}

#[test]
fn test_each_column_falls_to_the_floor() {
    for col in 0..12 {
        let mut grid = LiquidGrid::new(12, Supply::new(1, 0));
        grid.place_liquid(0, col, Liquid::Water);

        let settled = FlowSimulator::default().settle(&grid);

        for row in 0..11 {
            assert_eq!(
                settled.grid.liquid(GridPos::new(row, col)),
                Some(Liquid::Water),
                "column {col} row {row}"
            );
        }
        assert_eq!(settled.grid.wet_cells().count(), 11);
        assert!(settled.passes <= MAX_FLOW_PASSES);
    }
}

#[test]
fn test_fall_halts_above_first_blocking_surface() {
    for blocker in [Surface::Floor, Surface::Grass, Surface::Fire] {
        let mut grid = LiquidGrid::new(12, Supply::new(0, 1));
        grid.set_surface(6, 5, blocker);
        grid.place_liquid(0, 5, Liquid::Magma);

        let settled = FlowSimulator::default().settle(&grid);

        assert_eq!(settled.grid.liquid(GridPos::new(5, 5)), Some(Liquid::Magma));
        assert_eq!(settled.grid.liquid(GridPos::new(6, 5)), None, "{blocker}");
        for row in 7..12 {
            assert_eq!(settled.grid.liquid(GridPos::new(row, 5)), None);
        }

        // Only grass and fire push the liquid sideways
        let spread = settled.grid.liquid(GridPos::new(5, 4)).is_some();
        assert_eq!(spread, blocker.is_wettable(), "{blocker}");
    }
}

#[test]
fn test_entry_row_never_spreads() {
    let mut grid = LiquidGrid::new(5, Supply::new(5, 0));
    for col in 0..5 {
        grid.set_surface(1, col, Surface::Grass);
    }
    grid.place_liquid(0, 0, Liquid::Water);
    grid.place_liquid(0, 2, Liquid::Water);

    let settled = FlowSimulator::default().settle(&grid);
    assert_eq!(
        wet_set(&settled.grid),
        vec![
            (GridPos::new(0, 0), Liquid::Water),
            (GridPos::new(0, 2), Liquid::Water),
        ]
    );
}

#[test]
fn test_gray_cells() {
    let mut grid = LiquidGrid::new(6, Supply::new(2, 0));
    // A wet gray cell in the entry row feeds nothing
    grid.set_surface(0, 0, Surface::Gray);
    grid.place_liquid(0, 0, Liquid::Water);
    // Spread along row 1 stops at a dry gray cell
    grid.set_surface(2, 3, Surface::Grass);
    grid.set_surface(1, 4, Surface::Gray);
    grid.place_liquid(0, 3, Liquid::Water);

    let settled = FlowSimulator::default().settle(&grid);

    assert_eq!(settled.grid.liquid(GridPos::new(1, 0)), None);
    assert_eq!(settled.grid.liquid(GridPos::new(1, 2)), Some(Liquid::Water));
    assert_eq!(settled.grid.liquid(GridPos::new(1, 4)), None);
    assert_eq!(settled.grid.liquid(GridPos::new(1, 5)), None);

    // The gray cell at (1, 4) touches water at (1, 3)
    let evaluation = WinEvaluator::evaluate(&settled.grid);
    let failed: Vec<_> = evaluation.violations().iter().map(|v| v.pos).collect();
    assert_eq!(failed, vec![GridPos::new(1, 4)]);
}

#[test]
fn test_teleporter_forwards_liquid() {
    let mut grid = LiquidGrid::new(12, Supply::new(1, 0));
    grid.add_teleporter(GridPos::new(0, 2), GridPos::new(6, 8));
    grid.place_liquid(0, 2, Liquid::Water);

    let settled = FlowSimulator::default().settle(&grid);

    assert_eq!(settled.grid.liquid(GridPos::new(6, 8)), Some(Liquid::Water));
    for row in 7..11 {
        assert_eq!(settled.grid.liquid(GridPos::new(row, 8)), Some(Liquid::Water));
    }
    // Nothing falls into the output from above
    assert_eq!(settled.grid.liquid(GridPos::new(5, 8)), None);
}

#[test]
fn test_teleporter_is_one_directional() {
    let mut grid = LiquidGrid::new(12, Supply::new(1, 0));
    let input = GridPos::new(5, 5);
    let output = GridPos::new(0, 3);
    grid.add_teleporter(input, output);
    grid.place_liquid(output.row, output.col, Liquid::Water);

    let settled = FlowSimulator::default().settle(&grid);

    assert_eq!(settled.grid.liquid(input), None);
    assert_eq!(settled.grid.liquid(GridPos::new(10, 3)), Some(Liquid::Water));
}

#[test]
fn test_teleported_liquid_feeds_next_pass() {
    let mut grid = LiquidGrid::new(6, Supply::new(0, 1));
    grid.add_teleporter(GridPos::new(0, 0), GridPos::new(2, 4));
    grid.set_surface(4, 4, Surface::Fire);
    grid.place_liquid(0, 0, Liquid::Magma);

    let settled = FlowSimulator::default().settle(&grid);

    // Output falls to (3, 4), then fire below spreads it sideways
    assert_eq!(settled.grid.liquid(GridPos::new(3, 4)), Some(Liquid::Magma));
    assert_eq!(settled.grid.liquid(GridPos::new(3, 3)), Some(Liquid::Magma));
    assert_eq!(settled.grid.liquid(GridPos::new(3, 5)), Some(Liquid::Magma));
    assert!(WinEvaluator::is_win(&settled.grid));
}

#[test]
fn test_all_empty_grid_always_passes() {
    let mut grid = LiquidGrid::new(12, Supply::new(12, 0));
    for col in 0..12 {
        grid.set_surface(11, col, Surface::Empty);
    }
    assert!(WinEvaluator::is_win(&grid));

    for col in (0..12).step_by(3) {
        grid.place_liquid(0, col, Liquid::Water);
    }
    let settled = FlowSimulator::default().settle(&grid);
    assert!(WinEvaluator::is_win(&settled.grid));
}

#[test]
fn test_supply_exhaustion() {
    let mut grid = LiquidGrid::new(12, Supply::new(1, 0));

    assert!(grid.place_liquid(0, 2, Liquid::Water));
    assert!(!grid.place_liquid(0, 7, Liquid::Water));

    assert_eq!(grid.supply().water, 0);
    assert_eq!(grid.liquid(GridPos::new(0, 7)), None);
}

#[test]
fn test_pass_stream_matches_settle() {
    let mut grid = LiquidGrid::new(12, Supply::new(2, 1));
    grid.set_surface(8, 3, Surface::Grass);
    grid.set_surface(6, 9, Surface::Fire);
    grid.add_teleporter(GridPos::new(0, 11), GridPos::new(4, 0));
    grid.place_liquid(0, 3, Liquid::Water);
    grid.place_liquid(0, 11, Liquid::Water);
    grid.place_liquid(0, 9, Liquid::Magma);

    let simulator = FlowSimulator::default();
    let settled = simulator.settle(&grid);

    let mut passes = simulator.passes(&grid);
    let mut streamed = wet_set(&grid);
    while let Some(report) = passes.next() {
        for (pos, liquid) in report.wetted {
            assert!(
                streamed.iter().all(|(seen, _)| *seen != pos),
                "{pos} wetted twice"
            );
            assert_eq!(passes.snapshot().liquid(pos), Some(liquid));
            streamed.push((pos, liquid));
        }
    }
    streamed.sort();

    assert_eq!(passes.snapshot(), &settled.grid);
    assert_eq!(streamed, wet_set(&settled.grid));
    assert_eq!(passes.completed(), settled.passes);
}
