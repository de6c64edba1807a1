//! Search engine tests

use super::*;
use crate::board::{GridSize, Piece};
use crate::cache::{CacheRecord, MemoryCache};
use crate::movegen::legal_moves;

fn board(cells: &[(usize, usize)]) -> Board {
    let pieces = cells.iter().map(|&(r, c)| Piece::new(r, c)).collect();
    Board::new(GridSize::default(), pieces).unwrap()
}

fn mv(a: (usize, usize), b: (usize, usize)) -> Move {
    Move::new(Piece::new(a.0, a.1), Piece::new(b.0, b.1))
}

#[test]
fn test_two_pieces_one_fling() {
    let (outcome, stats) = Solver::new().search(&board(&[(0, 0), (0, 5)])).unwrap();

    let solution = outcome.solution().expect("solvable");
    assert_eq!(solution.path(), &[mv((0, 0), (0, 5))]);
    assert_eq!(solution.history(), &[board(&[(0, 4)])]);
    assert_eq!(
        stats,
        Stats {
            edges_discovered: 2,
            edges_searched: 1,
            solution_depth: 1,
            backtrack_depth: 0,
        }
    );
}

#[test]
fn test_unaligned_pieces_fail_immediately() {
    let (outcome, stats) = Solver::new().search(&board(&[(0, 0), (3, 4)])).unwrap();
    assert_eq!(outcome, Outcome::Exhausted);
    assert_eq!(stats, Stats::default());
}

#[test]
fn test_single_piece_is_already_solved() {
    let start = board(&[(4, 4)]);
    let (outcome, stats) = Solver::new().search(&start).unwrap();
    let solution = outcome.solution().unwrap();
    assert!(solution.is_empty());
    assert_eq!(solution.last_board(), &start);
    assert_eq!(stats, Stats::default());
    solution.verify().unwrap();
}

#[test]
fn test_empty_board_is_unsolvable() {
    let start = Board::new(GridSize::default(), Vec::new()).unwrap();
    let (outcome, _) = Solver::new().search(&start).unwrap();
    assert_eq!(outcome, Outcome::Exhausted);
}

#[test]
fn test_backtracks_out_of_dead_end() {
    // Flinging (0,4) first strands (0,1) away from (2,3)
    let start = board(&[(0, 4), (0, 0), (2, 3)]);
    let (outcome, stats) = Solver::new().search(&start).unwrap();

    let solution = outcome.solution().unwrap();
    assert_eq!(solution.path(), &[mv((0, 0), (0, 4)), mv((0, 3), (2, 3))]);
    assert_eq!(
        solution.history(),
        &[board(&[(0, 3), (2, 3)]), board(&[(1, 3)])]
    );
    assert_eq!(
        stats,
        Stats {
            edges_discovered: 4,
            edges_searched: 3,
            solution_depth: 2,
            backtrack_depth: 1,
        }
    );
}

#[test]
fn test_chain_collision_in_solution() {
    let start = board(&[(0, 0), (0, 2), (0, 6)]);
    let (outcome, stats) = Solver::new().search(&start).unwrap();

    let solution = outcome.solution().unwrap();
    assert_eq!(solution.path(), &[mv((0, 0), (0, 2)), mv((0, 1), (0, 5))]);
    assert_eq!(solution.history()[0].pieces(), &[Piece::new(0, 1), Piece::new(0, 5)]);
    assert_eq!(stats.edges_discovered, 6);
    assert_eq!(stats.solution_depth, 2);
    assert_eq!(stats.backtrack_depth, 0);
}

#[test]
fn test_square_solves_in_three() {
    let start = board(&[(0, 0), (0, 3), (3, 0), (3, 3)]);
    let (outcome, stats) = Solver::new().search(&start).unwrap();

    let solution = outcome.solution().unwrap();
    assert_eq!(
        solution.path(),
        &[mv((0, 0), (0, 3)), mv((3, 0), (3, 3)), mv((0, 2), (3, 2))]
    );
    assert_eq!(solution.last_board(), &board(&[(2, 2)]));
    assert_eq!(stats.edges_discovered, 12);
    assert_eq!(stats.edges_searched, 3);
    assert_eq!(stats.solution_depth, 3);
}

#[test]
fn test_exhaustion_counts_every_attempt_as_backtrack() {
    let start = board(&[(0, 0), (0, 3), (3, 3)]);
    let (outcome, stats) = Solver::new().search(&start).unwrap();

    assert_eq!(outcome, Outcome::Exhausted);
    assert_eq!(stats.edges_discovered, 4);
    assert_eq!(stats.edges_searched, 4);
    assert_eq!(stats.backtrack_depth, stats.edges_searched);
    assert_eq!(stats.solution_depth, 0);
}

#[test]
fn test_two_separate_pairs_unsolvable() {
    let start = board(&[(0, 0), (0, 3), (4, 6), (7, 6)]);
    let (outcome, stats) = Solver::new().search(&start).unwrap();
    assert_eq!(outcome, Outcome::Exhausted);
    assert_eq!(stats.backtrack_depth, stats.edges_searched);
}

#[test]
fn test_solutions_replay() {
    let layouts: &[&[(usize, usize)]] = &[
        &[(0, 0), (0, 5)],
        &[(0, 4), (0, 0), (2, 3)],
        &[(0, 0), (0, 3), (3, 0), (3, 3)],
        &[(0, 0), (0, 2), (0, 6)],
        &[(1, 0), (1, 3), (1, 6), (5, 3), (7, 3)],
    ];

    for layout in layouts {
        let start = board(layout);
        let (outcome, stats) = Solver::new().search(&start).unwrap();
        let Some(solution) = outcome.solution() else {
            continue;
        };

        solution.verify().unwrap();
        assert_eq!(solution.len(), start.len() - 1);
        assert_eq!(stats.solution_depth, solution.len() as u64);

        let mut expected = start.len();
        for (mv, after) in solution.steps() {
            expected -= 1;
            assert_eq!(after.len(), expected, "after {mv}");
        }
        assert_eq!(solution.last_board().len(), 1);
    }
}

#[test]
fn test_search_is_deterministic() {
    let start = board(&[(1, 0), (1, 3), (1, 6), (5, 3), (7, 3)]);
    let first = Solver::new().search(&start).unwrap();
    let second = Solver::new().search(&start).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_solve_stores_and_reuses_outcome() {
    let cache = MemoryCache::new();
    let solver = Solver::new();
    let start = board(&[(0, 4), (0, 0), (2, 3)]);

    let fresh = solver.solve(&start, Some(&cache)).unwrap();
    assert!(!fresh.cached);
    assert!(fresh.outcome.is_solved());
    assert_eq!(cache.count(), 1);

    let again = solver.solve(&start, Some(&cache)).unwrap();
    assert!(again.cached);
    assert_eq!(again.stats, Stats::default());
    assert_eq!(again.outcome, fresh.outcome);
}

#[test]
fn test_cached_unsolvable_skips_search() {
    let cache = MemoryCache::new();
    // A solvable board marked unsolvable proves the search never ran
    let start = board(&[(0, 0), (0, 5)]);
    cache.put(CacheRecord::unsolvable(&start).unwrap()).unwrap();

    let report = Solver::new().solve(&start, Some(&cache)).unwrap();
    assert!(report.cached);
    assert_eq!(report.outcome, Outcome::Exhausted);
    assert_eq!(report.stats.edges_discovered, 0);
}

#[test]
fn test_unavailable_cache_degrades_to_search() {
    let cache = MemoryCache::new();
    cache.set_available(false);

    let report = Solver::new()
        .solve(&board(&[(0, 0), (0, 5)]), Some(&cache))
        .unwrap();
    assert!(!report.cached);
    assert!(report.outcome.is_solved());
    assert_eq!(report.stats.solution_depth, 1);
}

#[test]
fn test_corrupt_cache_record_degrades_to_search() {
    let cache = MemoryCache::new();
    let start = board(&[(0, 0), (0, 5)]);
    let mut record = CacheRecord::unsolvable(&start).unwrap();
    record.status = crate::cache::CacheStatus::Solved;
    record.path = vec![mv((0, 0), (0, 5))];
    cache.put(record).unwrap();

    let report = Solver::new().solve(&start, Some(&cache)).unwrap();
    assert!(!report.cached);
    assert!(report.outcome.is_solved());
}

#[test]
fn test_no_cache() {
    let report = Solver::new().solve(&board(&[(0, 0), (3, 4)]), None).unwrap();
    assert!(!report.cached);
    assert_eq!(report.outcome, Outcome::Exhausted);
}

#[test]
fn test_verify_rejects_bad_solutions() {
    let start = board(&[(0, 0), (0, 5)]);

    let short = Solution::new(start.clone(), vec![], vec![mv((0, 0), (0, 5))]);
    assert_eq!(
        short.verify().unwrap_err(),
        SolveError::TrailInconsistency { history: 0, path: 1 }
    );

    let wrong_board = Solution::new(start.clone(), vec![board(&[(0, 3)])], vec![mv((0, 0), (0, 5))]);
    assert!(matches!(
        wrong_board.verify(),
        Err(SolveError::InvalidSolution { step: 0, .. })
    ));

    let unfinished = Solution::new(start, vec![], vec![]);
    assert!(matches!(
        unfinished.verify(),
        Err(SolveError::InvalidSolution { step: 0, .. })
    ));
}

#[test]
fn test_every_generated_move_applies() {
    let start = board(&[(1, 0), (1, 3), (1, 6), (5, 3), (7, 3)]);
    for m in legal_moves(&start) {
        let next = apply(&m, &start).unwrap();
        assert_eq!(next.len(), start.len() - 1);
    }
}

#[test]
fn test_stats_display() {
    let stats = Stats {
        edges_discovered: 12,
        edges_searched: 3,
        solution_depth: 3,
        backtrack_depth: 0,
    };
    assert_eq!(
        stats.to_string(),
        "Edges discovered : 12\nEdges searched   : 3\nSolution depth   : 3\nBacktrack depth  : 0"
    );
}
