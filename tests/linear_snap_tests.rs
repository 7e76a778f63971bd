use approx::assert_relative_eq;
use brush_snap::core::LinearScale;
use brush_snap::snap::{LinearSnapper, SnappingResult, generate_linear_snapping_function};

fn identity_scale() -> LinearScale {
    LinearScale::new((0.0, 100.0), (0.0, 100.0)).expect("valid scale")
}

#[test]
fn edges_round_to_nearest_threshold_multiple() {
    let snap = generate_linear_snapping_function(identity_scale(), 10.0, 0.0, 100.0, true)
        .expect("snapping function");
    let result = snap([12.0, 67.0]);
    assert_eq!(result, SnappingResult::new([10.0, 70.0], [10.0, 70.0]));
}

#[test]
fn collapsed_selection_pushes_upper_edge_forward() {
    let snap = generate_linear_snapping_function(identity_scale(), 10.0, 0.0, 100.0, true)
        .expect("snapping function");
    let result = snap([45.0, 46.0]);
    assert_eq!(result.values, [50.0, 60.0]);
}

#[test]
fn collapsed_selection_at_range_end_pulls_lower_edge_back() {
    let snap = generate_linear_snapping_function(identity_scale(), 10.0, 0.0, 100.0, true)
        .expect("snapping function");
    let result = snap([97.0, 99.0]);
    assert_eq!(result.values, [90.0, 100.0]);
    assert_eq!(result.pixels, [90.0, 100.0]);
}

#[test]
fn collapsed_selection_allowed_when_not_required() {
    let snap = generate_linear_snapping_function(identity_scale(), 10.0, 0.0, 100.0, false)
        .expect("snapping function");
    assert_eq!(snap([45.0, 46.0]).values, [50.0, 50.0]);
}

#[test]
fn range_narrower_than_threshold_degrades_to_zero_width() {
    let snapper = LinearSnapper::new(identity_scale(), 10.0, 0.0, 5.0).expect("snapper");
    assert_eq!(snapper.snap([1.0, 2.0]).values, [0.0, 0.0]);
}

#[test]
fn pixels_are_forward_projected_through_scale() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).expect("valid scale");
    let snapper = LinearSnapper::new(scale, 10.0, 0.0, 100.0).expect("snapper");
    let result = snapper.snap([61.0, 242.0]);
    assert_eq!(result.values, [10.0, 50.0]);
    assert_relative_eq!(result.pixels[0], 50.0);
    assert_relative_eq!(result.pixels[1], 250.0);
}

#[test]
fn fractional_threshold_snaps_without_integer_rounding() {
    let snapper = LinearSnapper::new(identity_scale(), 0.25, 0.0, 100.0).expect("snapper");
    let result = snapper.snap([10.1, 20.4]);
    assert_relative_eq!(result.values[0], 10.0);
    assert_relative_eq!(result.values[1], 20.5);
}

#[test]
fn snapper_is_reusable_across_calls() {
    let snapper = LinearSnapper::new(identity_scale(), 10.0, 0.0, 100.0).expect("snapper");
    let first = snapper.snap([12.0, 67.0]);
    let _ = snapper.snap([45.0, 46.0]);
    assert_eq!(snapper.snap([12.0, 67.0]), first);
}

#[test]
fn invalid_threshold_or_range_is_rejected() {
    assert!(LinearSnapper::new(identity_scale(), 0.0, 0.0, 100.0).is_err());
    assert!(LinearSnapper::new(identity_scale(), f64::NAN, 0.0, 100.0).is_err());
    assert!(LinearSnapper::new(identity_scale(), 10.0, 100.0, 0.0).is_err());
}
