//! Tests for weighted cell collapse and random selection

#[cfg(test)]
mod tests {
    use wavetile::AlgorithmError;
    use wavetile::algorithm::bitset::CandidateSet;
    use wavetile::algorithm::collapse::{RandomSelector, collapse_cell};
    use wavetile::analysis::adjacency::{AdjacencyModel, Direction};
    use wavetile::io::configuration::COLLAPSED_ENTROPY;
    use wavetile::spatial::Grid;

    const A: [u8; 3] = [10, 0, 0];
    const B: [u8; 3] = [0, 10, 0];

    // A appears once, B nine times
    fn skewed_model() -> AdjacencyModel {
        let mut model = AdjacencyModel::new();
        model.record(A, B, Direction::Right);
        for _ in 0..9 {
            model.record(B, A, Direction::Left);
        }
        model
    }

    // Tests collapse leaves the cell resolved with no candidates
    // Verified by skipping the candidate clear
    #[test]
    fn test_collapse_resolves_cell() {
        let model = skewed_model();
        let mut grid = Grid::new(2, 2, &model);
        let mut selector = RandomSelector::new(7);

        let color = collapse_cell(&mut grid, &model, [1, 0], &mut selector).expect("collapse");
        let cell = grid.get([1, 0]).expect("cell");

        assert!(color == A || color == B);
        assert!(cell.is_collapsed());
        assert_eq!(cell.color(), Some(color));
        assert!(cell.candidates().is_empty());
        assert!((cell.entropy() - COLLAPSED_ENTROPY).abs() < f64::EPSILON);
        assert_eq!(grid.collapsed_count(), 1);
    }

    // Tests draws follow occurrence weights rather than entry counts
    // Verified by choosing a uniform index among candidates
    #[test]
    fn test_collapse_weighted_by_occurrences() {
        let model = skewed_model();
        let mut selector = RandomSelector::new(42);
        let trials = 2000;
        let mut b_count = 0;

        for _ in 0..trials {
            let mut grid = Grid::new(1, 1, &model);
            if collapse_cell(&mut grid, &model, [0, 0], &mut selector).expect("collapse") == B {
                b_count += 1;
            }
        }

        let ratio = f64::from(b_count) / f64::from(trials);
        assert!(ratio > 0.85 && ratio < 0.95, "B ratio {ratio}");
    }

    // Tests a single candidate always wins
    // Verified by drawing from the full model instead of the cell's set
    #[test]
    fn test_collapse_single_candidate() {
        let model = skewed_model();
        let mut grid = Grid::new(1, 1, &model);
        let mut only_a = CandidateSet::new(model.len());
        only_a.insert(0);
        if let Some(cell) = grid.get_mut([0, 0]) {
            cell.narrow(only_a, &model);
        }

        let mut selector = RandomSelector::new(3);
        let color = collapse_cell(&mut grid, &model, [0, 0], &mut selector).expect("collapse");
        assert_eq!(color, A);
    }

    // Tests contract violations fail explicitly
    // Verified by returning the existing color for collapsed cells
    #[test]
    fn test_collapse_contract_violations() {
        let model = skewed_model();
        let mut grid = Grid::new(2, 1, &model);
        let mut selector = RandomSelector::new(1);

        collapse_cell(&mut grid, &model, [0, 0], &mut selector).expect("first collapse");
        assert!(matches!(
            collapse_cell(&mut grid, &model, [0, 0], &mut selector),
            Err(AlgorithmError::InvalidOperation { .. })
        ));

        assert!(matches!(
            collapse_cell(&mut grid, &model, [5, 5], &mut selector),
            Err(AlgorithmError::InvalidOperation { .. })
        ));

        if let Some(cell) = grid.get_mut([0, 1]) {
            cell.narrow(CandidateSet::new(model.len()), &model);
        }
        assert!(matches!(
            collapse_cell(&mut grid, &model, [0, 1], &mut selector),
            Err(AlgorithmError::InvalidOperation { .. })
        ));
        let stuck = grid.get([0, 1]).expect("cell");
        assert!(!stuck.is_collapsed());
    }

    // Tests weighted choice edge cases
    // Verified by returning index 0 for empty weights
    #[test]
    fn test_weighted_choice() {
        let mut selector = RandomSelector::new(9);
        assert_eq!(selector.weighted_choice(&[]), None);
        assert_eq!(selector.weighted_choice(&[0.0, 0.0]), None);
        for _ in 0..50 {
            assert_eq!(selector.weighted_choice(&[0.0, 2.0, 0.0]), Some(1));
        }
    }

    // Tests uniform index stays in range
    // Verified by using an inclusive range
    #[test]
    fn test_index_in_range() {
        let mut selector = RandomSelector::new(11);
        assert_eq!(selector.index(0), None);
        for _ in 0..100 {
            assert!(selector.index(3).is_some_and(|i| i < 3));
        }
    }

    // Tests seeded selectors repeat their choices
    // Verified by seeding from entropy
    #[test]
    fn test_selector_reproducible() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let mut first = RandomSelector::new(5);
        let mut second = RandomSelector::new(5);
        for _ in 0..20 {
            assert_eq!(
                first.weighted_choice(&weights),
                second.weighted_choice(&weights)
            );
        }
    }
}
