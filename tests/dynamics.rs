use approx::assert_relative_eq;
use tmd::{constants::NM, prelude::*};

fn germanium(cells: usize, timestep: f64, seed: u64) -> Simulation<Tersoff> {
    let mut settings = Settings::default();
    settings.timestep = timestep;
    Simulation::from_lattice(
        &Diamond,
        cells,
        &Composition::pure(Species::Ge),
        Tersoff::new(&[Species::Ge]),
        settings,
        seed,
    )
    .unwrap()
}

#[test]
fn total_energy_is_conserved() {
    let mut sim = germanium(2, 1e-15, 17);
    sim.init_calculation().unwrap();
    sim.init_velocity_normalization(300.0).unwrap();
    let e0 = sim.total_energy();
    for _ in 0..1000 {
        sim.verlet_step().unwrap();
    }
    let drift = (sim.total_energy() - e0).abs() / e0.abs();
    assert!(drift < 0.01, "relative drift {}", drift);
}

#[test]
fn temperature_stays_physical() {
    let mut sim = germanium(2, 1e-15, 4);
    sim.displace_atoms(0.01);
    sim.init_calculation().unwrap();
    for _ in 0..100 {
        sim.verlet_step().unwrap();
        let t = sim.temperature();
        assert!(t.is_finite() && t >= 0.0, "temperature {}", t);
    }
    assert!(sim.temperature() > 0.0);
    assert_eq!(sim.step(), 101);
}

#[test]
fn unwrapped_positions_track_wrapped_ones() {
    let mut sim = germanium(2, 1e-15, 8);
    sim.init_calculation().unwrap();
    sim.init_velocity_normalization(600.0).unwrap();
    for _ in 0..50 {
        sim.verlet_step().unwrap();
    }
    let l = sim.container().length();
    for (p, u) in sim
        .atoms
        .positions()
        .iter()
        .zip(sim.atoms.unwrapped_positions())
    {
        for i in 0..3 {
            assert!(p[i] >= 0.0 && p[i] < l);
            let images = (u[i] - p[i]) / l;
            assert!((images - images.round()).abs() < 1e-6);
        }
    }
}

#[test]
fn thermalization() {
    let mut sim = germanium(2, 1e-15, 2);
    sim.init_calculation().unwrap();
    sim.init_velocity_normalization(500.0).unwrap();
    assert!(sim.atoms.velocity_sum().norm() < 1e-5);

    sim.velocity_normalization(300.0).unwrap();
    assert!(sim.atoms.velocity_sum().norm() < 1e-5);
    assert_relative_eq!(sim.temperature(), 300.0, max_relative = 1e-6);
}

#[test]
fn rescaling_a_system_at_rest_fails() {
    let mut sim = germanium(2, 1e-15, 2);
    sim.init_calculation().unwrap();
    assert_eq!(sim.velocity_normalization(300.0), Err(Error::DegenerateState));
}

#[test]
fn stepping_requires_initialization() {
    let mut sim = germanium(1, 1e-15, 2);
    assert_eq!(sim.verlet_step(), Err(Error::NotInitialized));
    assert_eq!(sim.run(10, |_| false), Err(Error::NotInitialized));
}

#[test]
fn run_applies_intervals() {
    let mut settings = Settings::default();
    settings.timestep = 1e-15;
    settings.msd_interval = 10;
    settings.thermostat = Some(Thermostat::new(300.0, 5));
    let mut sim = Simulation::from_lattice(
        &Diamond,
        2,
        &Composition::binary(Species::Ge, 0.75, Species::Sn, 0.25).unwrap(),
        Tersoff::new(&[Species::Ge, Species::Sn]),
        settings,
        21,
    )
    .unwrap();
    sim.set_output(8, vec!["step", "temp", "pe", "press", "press_flux"])
        .unwrap();
    sim.init_calculation().unwrap();
    sim.init_velocity_normalization(300.0).unwrap();

    let summary = sim.run(20, |_| false).unwrap();
    assert_eq!(summary.steps, 20);
    assert!(!summary.stopped_early);
    assert!(summary.mean_temperature > 0.0);
    // the thermostat fired on the last step; zeroing the velocity sum of a
    // mixed-mass system takes a little kinetic energy with it
    assert!(sim.atoms.velocity_sum().norm() < 1e-5);
    assert_relative_eq!(sim.temperature(), 300.0, max_relative = 1e-3);

    // rows at 8, 16 and the last step
    let steps: Vec<f64> = sim.output().rows().iter().map(|r| r[0].as_f64()).collect();
    assert_eq!(steps, vec![8.0, 16.0, 20.0]);
    assert_eq!(sim.output().header(), "step temp pe press press_flux");

    let times: Vec<f64> = sim.msd_points().iter().map(|p| p.0).collect();
    assert_eq!(times.len(), 2);
    assert_relative_eq!(times[1], 20.0 * 1e-15);
}

#[test]
fn run_stops_when_asked() {
    let mut sim = germanium(2, 1e-15, 3);
    sim.init_calculation().unwrap();
    sim.init_velocity_normalization(300.0).unwrap();
    let summary = sim.run(50, |s| s.step() > 10).unwrap();
    assert_eq!(summary.steps, 10);
    assert!(summary.stopped_early);
}

#[test]
fn unknown_output_key() {
    let mut sim = germanium(1, 1e-15, 2);
    assert_eq!(
        sim.set_output(10, vec!["step", "enthalpy"]),
        Err(Error::UnknownCompute {
            key: "enthalpy".to_string()
        })
    );
}

fn dimer() -> Simulation<Tersoff> {
    let mut atoms = Atoms::new(vec![Species::Ge]);
    atoms.add_atoms(
        0,
        vec![Vec3::splat(NM), Vec3::new(1.245 * NM, NM, NM)],
    );
    Simulation::new(
        atoms,
        Tersoff::new(&[Species::Ge]),
        Container::cubic(2.0 * NM),
        Species::Ge.lattice_constant(),
        Settings::default(),
        1,
    )
    .unwrap()
}

#[test]
fn coincident_atoms_abort_initialization() {
    let mut sim = dimer();
    sim.atoms.positions[1] = sim.atoms.positions[0];
    assert!(matches!(
        sim.init_calculation(),
        Err(Error::NumericSingularity { .. })
    ));
    assert!(!sim.is_initialized());
}

#[test]
fn failed_step_is_rolled_back() {
    let mut sim = dimer();
    sim.init_calculation().unwrap();

    // freeze the atoms on top of each other
    sim.atoms.positions[1] = sim.atoms.positions[0];
    sim.atoms.unwrapped[1] = sim.atoms.unwrapped[0];
    sim.atoms.accelerations = vec![Vec3::default(); 2];
    sim.atoms.velocities = vec![Vec3::default(); 2];
    let positions = sim.atoms.positions.clone();

    assert!(matches!(
        sim.verlet_step(),
        Err(Error::NumericSingularity { .. })
    ));
    assert_eq!(sim.atoms.positions, positions);
    assert_eq!(sim.step(), 1);
    assert_eq!(sim.accumulators().flux_steps, 0);
}
