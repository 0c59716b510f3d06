use ifm_core::RngHandle;
use ifm_grid::{Board, TargetGrid, MAX_DIM, MIN_DIM};
use proptest::prelude::*;

#[test]
fn rejects_dim_outside_bounds() {
    assert!(Board::new(MIN_DIM - 1).is_err());
    assert!(Board::new(MAX_DIM + 1).is_err());
    assert!(Board::new(MIN_DIM).is_ok());
    assert!(Board::new(MAX_DIM).is_ok());
}

#[test]
fn rejects_target_count_outside_bounds() {
    let board = Board::new(4).unwrap();
    let mut rng = RngHandle::from_seed(11);
    assert!(TargetGrid::place(board, 0, &mut rng).is_err());
    assert!(TargetGrid::place(board, 17, &mut rng).is_err());
}

#[test]
fn full_board_placement_is_exact() {
    let board = Board::new(3).unwrap();
    let mut rng = RngHandle::from_seed(5);
    let grid = TargetGrid::place(board, 9, &mut rng).unwrap();
    assert!(grid.cells().iter().all(|&cell| cell));
}

#[test]
fn placement_is_deterministic_for_a_seed() {
    let board = Board::new(6).unwrap();
    let grid_a = TargetGrid::place(board, 7, &mut RngHandle::from_seed(99)).unwrap();
    let grid_b = TargetGrid::place(board, 7, &mut RngHandle::from_seed(99)).unwrap();
    assert_eq!(grid_a, grid_b);
}

proptest! {
    #[test]
    fn placement_sets_exactly_the_requested_cells(
        seed in any::<u64>(),
        dim in MIN_DIM..=MAX_DIM,
        fill in 0.0f64..=1.0,
    ) {
        let board = Board::new(dim).unwrap();
        let cell_count = board.cell_count();
        let target_count = ((cell_count as f64 * fill) as usize).clamp(1, cell_count);
        let mut rng = RngHandle::from_seed(seed);
        let grid = TargetGrid::place(board, target_count, &mut rng).unwrap();
        let set = grid.cells().iter().filter(|&&cell| cell).count();
        prop_assert_eq!(set, target_count);
        prop_assert_eq!(grid.cells().len() - set, cell_count - target_count);
        prop_assert_eq!(grid.target_count(), target_count);
    }
}
