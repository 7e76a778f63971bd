use brush_snap::snap::nearest_index;

#[test]
fn target_below_table_clamps_to_first_index() {
    assert_eq!(nearest_index(&[10.0, 20.0, 30.0], 5.0), 0);
}

#[test]
fn target_above_table_clamps_to_last_index() {
    assert_eq!(nearest_index(&[10.0, 20.0, 30.0], 35.0), 2);
}

#[test]
fn interior_target_picks_closest_entry() {
    assert_eq!(nearest_index(&[10.0, 20.0, 30.0], 24.0), 1);
    assert_eq!(nearest_index(&[10.0, 20.0, 30.0], 26.0), 2);
}

#[test]
fn exact_tie_resolves_to_lower_index() {
    assert_eq!(nearest_index(&[10.0, 20.0], 15.0), 0);
    assert_eq!(nearest_index(&[0.0, 100.0, 200.0, 300.0], 250.0), 2);
}

#[test]
fn exact_matches_return_their_index() {
    let table: Vec<f64> = (0..=10).map(|i| f64::from(i) * 100.0).collect();
    for (index, value) in table.iter().enumerate() {
        assert_eq!(nearest_index(&table, *value), index);
    }
}

#[test]
fn two_entry_table_splits_at_midpoint() {
    let table = [0.0, 10.0];
    assert_eq!(nearest_index(&table, 4.9), 0);
    assert_eq!(nearest_index(&table, 5.1), 1);
}

#[test]
fn uneven_spacing_is_handled() {
    let table = [0.0, 1.0, 2.0, 50.0, 51.0, 400.0];
    assert_eq!(nearest_index(&table, 20.0), 2);
    assert_eq!(nearest_index(&table, 30.0), 3);
    assert_eq!(nearest_index(&table, 300.0), 5);
}
