use approx::relative_eq;
use geocap::{csv_report, CapacityEstimator, InvalidInput, PercentileEstimate};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/*
 * End-to-end checks of the public API, including the file round trips the command-line front
 * end relies on.
 */
fn temp_dir() -> TempDir {
    tempdir().unwrap()
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = csv_report::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn default_prospect_median() {
    let curve = geocap::estimate(1., 10., 10., 24.).unwrap();
    let area = geocap::fit(&PercentileEstimate::new(1., 10.)).unwrap();
    let power_density = geocap::fit(&PercentileEstimate::new(10., 24.)).unwrap();

    assert!(relative_eq!(area.median(), 3.162, max_relative = 1e-3));
    assert!(relative_eq!(power_density.median(), 15.49, max_relative = 1e-3));
    assert!(relative_eq!(curve.at_confidence(50).unwrap(), 49., max_relative = 1e-3));
}

#[test]
fn batch_of_one_matches_single_estimate() {
    let batch = geocap::estimate_scenarios(&[2.], &[7.5], &[4.], &[12.]).unwrap();
    let single = geocap::estimate(2., 7.5, 4., 12.).unwrap();

    assert_eq!(batch.iter().next().unwrap().curve, single);
}

#[test]
fn batch_length_mismatch_fails_fast() {
    let e = geocap::estimate_scenarios(&[1., 2.], &[5.], &[1., 2.], &[1., 2.]).unwrap_err();

    match e.invalid_input() {
        Some(InvalidInput::LengthMismatch { area_p10: 1, .. }) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn batch_symmetric_inputs() {
    // Every one of the four inputs must reach its own slot in the scenario
    let batch = geocap::estimate_scenarios(&[1.], &[10.], &[10.], &[24.]).unwrap();
    let scenario = batch.iter().next().unwrap();

    assert_eq!(scenario.area, PercentileEstimate::new(1., 10.));
    assert_eq!(scenario.power_density, PercentileEstimate::new(10., 24.));
}

#[test]
fn scenario_file_round_trip() {
    let dir = temp_dir();
    let input = write_file(
        dir.path(),
        "scenarios.csv",
        "area_p90,area_p10,pd_p90,pd_p10\n1,10,10,24\n2,20,5,15\n0.5,4,2,30\n",
    );

    let inputs = csv_report::read_scenarios(csv_report::open(&input).unwrap()).unwrap();
    let batch = CapacityEstimator::default()
        .estimate_scenarios(
            &inputs.area_p90s,
            &inputs.area_p10s,
            &inputs.power_density_p90s,
            &inputs.power_density_p10s,
        )
        .unwrap();

    let output = dir.path().join("batch.csv");
    csv_report::write_batch(csv_report::create(&output).unwrap(), &batch).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header.split(',').count(), 6);
    assert!(header.ends_with("Expected development size (MWe) [0.5_4_2_30]"));
    assert_eq!(text.lines().count(), 101);
}

#[test]
fn bad_scenario_in_file_is_reported_by_index() {
    let dir = temp_dir();
    let input = write_file(
        dir.path(),
        "scenarios.csv",
        "area_p90,area_p10,pd_p90,pd_p10\n1,10,10,24\n1,10,10,24\n10,1,10,24\n",
    );

    let inputs = csv_report::read_scenarios(csv_report::open(&input).unwrap()).unwrap();
    let e = CapacityEstimator::default()
        .parallel(false)
        .estimate_scenarios(
            &inputs.area_p90s,
            &inputs.area_p10s,
            &inputs.power_density_p90s,
            &inputs.power_density_p10s,
        )
        .unwrap_err();

    match e.invalid_input() {
        Some(InvalidInput::Scenario { index: 2, key, .. }) => assert_eq!(key, "10_1_10_24"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn curve_json() {
    let curve = geocap::estimate(1., 10., 10., 24.).unwrap();
    let json = serde_json::to_value(&curve).unwrap();
    let points = json.as_array().unwrap();

    assert_eq!(points.len(), 100);
    assert_eq!(points[0]["confidence"], 100);
    assert_eq!(points[0]["capacity"], 0.0);
}

#[test]
fn missing_file() {
    let dir = temp_dir();
    let e = csv_report::open(&dir.path().join("nope.csv")).unwrap_err();

    assert!(!e.is_invalid_input());
    assert!(e.to_string().contains("nope.csv"));
}

#[test]
fn huge_prospect_is_rejected_instead_of_infinite() {
    let e = geocap::estimate(1e200, 1e250, 1e200, 1e250).unwrap_err();

    match e.invalid_input() {
        Some(InvalidInput::Overflow { .. }) => {}
        other => panic!("unexpected {:?}", other),
    }

    let e = geocap::estimate_scenarios(&[1., 1e200], &[10., 1e250], &[10., 1e200], &[24., 1e250])
        .unwrap_err();
    match e.invalid_input() {
        Some(InvalidInput::Scenario { index: 1, reason, .. }) => match **reason {
            InvalidInput::Overflow { .. } => {}
            ref other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    }
}
