// Unit conversion: fine-grained and coarse schemes

use snapshot_report::units::*;

#[test]
fn test_one_gibibyte_fine_and_coarse() {
    assert_eq!(human_bytes(1_073_741_824.0), Quantity::new(1.0, "GB"));
    assert_eq!(
        UnitScheme::Coarse.bytes(Some(1_073_741_824.0)),
        Some(Quantity::new(0.0, "TB"))
    );
    assert_eq!(
        UnitScheme::Coarse
            .bytes(Some(1_073_741_824.0))
            .unwrap()
            .to_string(),
        "0.0 TB"
    );
}

#[test]
fn test_byte_units_step_by_1024() {
    assert_eq!(human_bytes(512.0), Quantity::new(512.0, "B"));
    assert_eq!(human_bytes(1023.0), Quantity::new(1023.0, "B"));
    assert_eq!(human_bytes(1024.0), Quantity::new(1.0, "KB"));
    assert_eq!(human_bytes(1536.0), Quantity::new(1.5, "KB"));
    assert_eq!(human_bytes(2_147_483_648.0), Quantity::new(2.0, "GB"));
    assert_eq!(human_bytes(1024f64.powi(4)), Quantity::new(1.0, "TB"));
}

#[test]
fn test_bytes_stop_at_petabytes() {
    assert_eq!(human_bytes(1024f64.powi(6)), Quantity::new(1024.0, "PB"));
}

#[test]
fn test_bytes_rounded_to_two_decimals() {
    // 1.2345 KB
    assert_eq!(human_bytes(1264.128), Quantity::new(1.23, "KB"));
}

#[test]
fn test_byte_conversion_is_monotonic() {
    let samples = [1.0, 1000.0, 1024.0, 50_000.0, 1_048_576.0, 3e9, 5e12];
    let scaled: Vec<f64> = samples
        .iter()
        .map(|b| {
            let q = human_bytes(*b);
            let power = ["B", "KB", "MB", "GB", "TB", "PB"]
                .iter()
                .position(|u| *u == q.unit)
                .unwrap();
            q.value * 1024f64.powi(power as i32)
        })
        .collect();
    for pair in scaled.windows(2) {
        assert!(pair[0] <= pair[1], "{:?}", pair);
    }
}

#[test]
fn test_duration_boundaries() {
    assert_eq!(human_duration(59.0), Quantity::new(59.0, "seconds"));
    assert_eq!(human_duration(60.0), Quantity::new(1.0, "minutes"));
    assert_eq!(human_duration(120.0), Quantity::new(2.0, "minutes"));
    assert_eq!(human_duration(3599.0), Quantity::new(60.0, "minutes"));
    assert_eq!(human_duration(3600.0), Quantity::new(1.0, "hours"));
    assert_eq!(human_duration(5400.0), Quantity::new(1.5, "hours"));
}

#[test]
fn test_duration_display() {
    assert_eq!(human_duration(120.0).to_string(), "2.0 minutes");
    assert_eq!(human_duration(60.0).to_string(), "1.0 minutes");
    assert_eq!(human_duration(12.34).to_string(), "12.3 seconds");
}

#[test]
fn test_zero_and_absent_are_none() {
    for scheme in [UnitScheme::Fine, UnitScheme::Coarse] {
        assert_eq!(scheme.duration(None), None);
        assert_eq!(scheme.duration(Some(0.0)), None);
        assert_eq!(scheme.bytes(None), None);
        assert_eq!(scheme.bytes(Some(0.0)), None);
    }
}

#[test]
fn test_coarse_duration_is_hours_only() {
    assert_eq!(
        UnitScheme::Coarse.duration(Some(120.0)),
        Some(Quantity::new(0.0, "hours"))
    );
    assert_eq!(
        UnitScheme::Coarse.duration(Some(5400.0)),
        Some(Quantity::new(1.5, "hours"))
    );
}

#[test]
fn test_coarse_basis_is_rounded() {
    assert_eq!(UnitScheme::Coarse.duration_basis(5470.0), 1.5);
    assert_eq!(UnitScheme::Fine.duration_basis(5470.0), 5470.0);
    assert_eq!(UnitScheme::Coarse.bytes_basis(1_099_511_627_776.0 * 1.234), 1.23);
}
