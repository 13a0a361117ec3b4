//! Scenario file loading.
use std::io::Write;

use runtime::{RuntimeError, Scenario, Simulation};

const VALID: &str = r#"
    Scenario(
        name: "from_disk",
        map: ["...", "..."],
        cell_size: 100.0,
        awareness_step: 0.2,
        sample_extent: 400.0,
        actors: [
            ActorPlacement(
                id: 0,
                cell: (0, 0),
                role: Observer(vision: (angle_deg: 90.0, range: 8000.0)),
            ),
            ActorPlacement(
                id: 1,
                cell: (2, 1),
                role: Target(target: 1),
            ),
        ],
    )
"#;

#[test]
fn loads_and_builds_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VALID.as_bytes()).unwrap();

    let scenario = Scenario::load(file.path()).unwrap();
    assert_eq!(scenario.name, "from_disk");
    assert_eq!(scenario.awareness_step, 0.2);
    assert_eq!(scenario.sample_extent, 400.0);

    let mut simulation = Simulation::from_scenario(&scenario).unwrap();
    simulation.tick().unwrap();
}

#[test]
fn missing_file_reports_the_path() {
    let error = Scenario::load("/nonexistent/scenario.ron").unwrap_err();
    match error {
        RuntimeError::ScenarioRead { path, .. } => {
            assert_eq!(path.to_str(), Some("/nonexistent/scenario.ron"));
        }
        other => panic!("expected a read error, got {other}"),
    }
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Scenario(name: 42)").unwrap();

    let error = Scenario::load(file.path()).unwrap_err();
    assert!(matches!(error, RuntimeError::ScenarioParse { .. }));
}
