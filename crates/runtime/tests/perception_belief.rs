//! End-to-end perception and belief behavior driven through scenarios.
use glam::Vec3;
use runtime::{Scenario, Simulation};
use tactics_core::{ActorId, CellRef, TargetId, TargetState, TerrainOracle};

/// Routes the simulation's tracing output through the test harness, filtered
/// by `RUST_LOG`. Safe to call from every test; only the first call wins.
fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn watch_scenario(map: &[&str], observer_cell: (i32, i32), target_cell: (i32, i32)) -> Scenario {
    let rows = map
        .iter()
        .map(|row| format!("        {row:?},"))
        .collect::<Vec<_>>()
        .join("\n");
    let text = format!(
        r#"
        Scenario(
            name: "watch",
            map: [
{rows}
            ],
            cell_size: 100.0,
            actors: [
                ActorPlacement(
                    id: 0,
                    cell: {observer_cell:?},
                    role: Observer(vision: (angle_deg: 90.0, range: 8000.0)),
                ),
                ActorPlacement(
                    id: 1,
                    cell: {target_cell:?},
                    role: Target(target: 1),
                ),
            ],
        )
        "#
    );
    Scenario::from_ron(&text).unwrap()
}

#[test]
fn awareness_grows_by_one_step_and_saturates() {
    init_logs();
    let scenario = watch_scenario(&["....", "...."], (0, 0), (2, 0));
    let mut simulation = Simulation::from_scenario(&scenario).unwrap();

    simulation.tick().unwrap();
    let awareness = simulation
        .scene()
        .observer(ActorId(0))
        .unwrap()
        .target_data(TargetId(1))
        .unwrap()
        .awareness;
    assert!((awareness - 0.1).abs() < 1e-6);
    assert_eq!(
        simulation.scene().target_state(TargetId(1)),
        Ok(TargetState::Unknown),
        "partial awareness is not knowledge yet"
    );

    for _ in 0..20 {
        simulation.tick().unwrap();
    }
    let data = simulation
        .scene()
        .observer(ActorId(0))
        .unwrap()
        .target_data(TargetId(1))
        .unwrap();
    assert_eq!(data.awareness, 1.0);
    assert_eq!(
        simulation.scene().target_state(TargetId(1)),
        Ok(TargetState::Immediate)
    );
}

#[test]
fn wall_keeps_target_unknown() {
    init_logs();
    let scenario = watch_scenario(&["..#..", "..#.."], (0, 0), (4, 0));
    let mut simulation = Simulation::from_scenario(&scenario).unwrap();

    for _ in 0..10 {
        simulation.tick().unwrap();
    }
    assert_eq!(
        simulation.scene().target_state(TargetId(1)),
        Ok(TargetState::Unknown)
    );
    let data = simulation
        .scene()
        .observer(ActorId(0))
        .unwrap()
        .target_data(TargetId(1))
        .unwrap();
    assert!(!data.clear_los);
    assert_eq!(data.awareness, 0.0);
}

#[test]
fn lost_target_goes_hidden_and_mass_stays_normalized() {
    init_logs();
    // Narrow cone: the observer only sees the cells near its forward axis,
    // so belief mass can survive off-axis once the target slips away.
    let text = r#"
        Scenario(
            name: "narrow",
            map: [
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
            ],
            cell_size: 100.0,
            actors: [
                ActorPlacement(
                    id: 0,
                    cell: (0, 2),
                    role: Observer(vision: (angle_deg: 20.0, range: 8000.0)),
                ),
                ActorPlacement(
                    id: 1,
                    cell: (2, 2),
                    role: Target(target: 1),
                ),
            ],
        )
    "#;
    let scenario = Scenario::from_ron(text).unwrap();
    let mut simulation = Simulation::from_scenario(&scenario).unwrap();

    for _ in 0..10 {
        simulation.tick().unwrap();
    }
    assert_eq!(
        simulation.scene().target_state(TargetId(1)),
        Ok(TargetState::Immediate)
    );

    // Step the target well off the vision axis.
    let hideout = simulation.terrain().cell_position(CellRef::new(2, 0));
    simulation.actors_mut().set_position(ActorId(1), hideout);

    for _ in 0..4 {
        simulation.tick().unwrap();
    }
    let tracker = simulation.scene().target(TargetId(1)).unwrap();
    assert_eq!(tracker.state(), TargetState::Hidden);
    assert!(
        (tracker.total_mass() - 1.0).abs() < 1e-3,
        "belief mass drifted to {}",
        tracker.total_mass()
    );

    // Some mass escaped the cone; the estimate is a real position.
    let off_axis: f32 = tracker
        .belief()
        .iter()
        .filter(|(cell, _)| cell.y != 2)
        .map(|(_, mass)| mass)
        .sum();
    assert!(off_axis > 0.0);
    assert!(simulation.terrain().cell_at(tracker.cache().position).is_some());
}

#[test]
fn reacquired_target_snaps_back_to_ground_truth() {
    init_logs();
    let scenario = watch_scenario(&["......", "......"], (0, 0), (2, 0));
    let mut simulation = Simulation::from_scenario(&scenario).unwrap();

    for _ in 0..10 {
        simulation.tick().unwrap();
    }
    assert_eq!(
        simulation.scene().target_state(TargetId(1)),
        Ok(TargetState::Immediate)
    );

    // Out of range of nothing, but behind the observer's cone edge: move the
    // observer to face away, wait, then turn back.
    simulation.actors_mut().set_forward(ActorId(0), -Vec3::X);
    for _ in 0..3 {
        simulation.tick().unwrap();
    }
    assert_eq!(
        simulation.scene().target_state(TargetId(1)),
        Ok(TargetState::Hidden)
    );

    simulation.actors_mut().set_forward(ActorId(0), Vec3::X);
    for _ in 0..10 {
        simulation.tick().unwrap();
    }
    let tracker = simulation.scene().target(TargetId(1)).unwrap();
    assert_eq!(tracker.state(), TargetState::Immediate);
    let truth = simulation.terrain().cell_position(CellRef::new(2, 0));
    assert_eq!(tracker.cache().position, truth);
}
