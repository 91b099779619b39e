use approx::assert_relative_eq;
use tmd::prelude::*;

#[test]
fn cohesive_energy_of_ideal_germanium() {
    let mut sim = Simulation::new_system(4, Composition::pure(Species::Ge), 1).unwrap();
    assert_eq!(sim.atoms.num_atoms(), 512);
    sim.init_calculation().unwrap();

    // four bonds of -1.92531 eV per atom, shared by two atoms
    assert_relative_eq!(sim.potential_energy(), -1971.51992, max_relative = 1e-6);
    assert_relative_eq!(sim.potential_energy() / 512.0, -3.8506248, max_relative = 1e-6);
    assert_eq!(sim.kinetic_energy(), 0.0);
    assert_eq!(sim.temperature(), 0.0);
    assert_eq!(sim.total_energy(), sim.potential_energy());

    assert_eq!(sim.neighbor_list().num_pairs(), 1024);
    assert!(sim
        .neighbor_list()
        .neighbors()
        .iter()
        .all(|n| n.len() == 4));
}

#[test]
fn ideal_lattice_is_in_equilibrium() {
    let mut sim = Simulation::new_system(2, Composition::pure(Species::Ge), 1).unwrap();
    sim.init_calculation().unwrap();
    let max_force = (0..sim.atoms.num_atoms())
        .map(|i| (sim.atoms.accelerations()[i] * sim.atoms.mass(i)).norm())
        .fold(0.0, f64::max);
    // one eV per angstrom is 1.6e-9 N
    assert!(max_force < 1e-13, "max force {} N", max_force);
}

#[test]
fn displaced_atom_is_pulled_back() {
    let mut sim = Simulation::new_system(2, Composition::pure(Species::Si), 1).unwrap();
    let shift = 0.02 * sim.lattice_constant();
    let start = sim.atoms.positions[0];
    sim.atoms.positions[0] = sim.container().wrap(start + Vec3::new(shift, 0.0, 0.0));
    sim.init_calculation().unwrap();
    assert!(sim.atoms.accelerations()[0].x < 0.0);
    let mut ideal = Simulation::new_system(2, Composition::pure(Species::Si), 1).unwrap();
    ideal.init_calculation().unwrap();
    assert!(sim.potential_energy() > ideal.potential_energy());
}

#[test]
fn forces_match_energy_differences() {
    let mut sim = Simulation::new_system(2, Composition::pure(Species::Ge), 3).unwrap();
    sim.displace_atoms(0.03);
    sim.init_calculation().unwrap();
    let pe0 = sim.accumulators().potential_energy;
    let force = sim.atoms.accelerations()[5] * sim.atoms.mass(5);

    // moving one atom along its force lowers the energy by about F.dx
    let step = 1e-4 * sim.lattice_constant();
    let dx = force / force.norm() * step;
    let moved = sim.container().wrap(sim.atoms.positions[5] + dx);
    sim.atoms.positions[5] = moved;
    sim.init_calculation().unwrap();
    let pe1 = sim.accumulators().potential_energy;
    assert_relative_eq!(pe0 - pe1, force.norm() * step, max_relative = 1e-2);
}

#[test]
fn alloy_gets_exact_secondary_count() {
    let composition = Composition::binary(Species::Ge, 0.5, Species::Sn, 0.5).unwrap();
    let sim = Simulation::new_system(4, composition, 42).unwrap();
    let items = sim.atom_items();
    let sn = items.iter().filter(|a| a.species == Species::Sn).count();
    assert_eq!(sn, 256);
    assert_eq!(items.len() - sn, 256);
}

#[test]
fn alloy_lattice_constant_follows_vegard() {
    let composition = Composition::binary(Species::Ge, 0.8, Species::Sn, 0.2).unwrap();
    let a = 0.8 * Species::Ge.lattice_constant() + 0.2 * Species::Sn.lattice_constant();
    let sim = Simulation::new_system(3, composition, 9).unwrap();
    assert_relative_eq!(sim.lattice_constant(), a);
    assert_relative_eq!(sim.container().length(), 3.0 * a);
    assert_relative_eq!(sim.volume(), 27.0 * a * a * a, max_relative = 1e-12);
    // 216 * 0.2 = 43.2
    let sn = sim
        .atom_items()
        .iter()
        .filter(|a| a.species == Species::Sn)
        .count();
    assert_eq!(sn, 43);
}

#[test]
fn same_seed_same_alloy() {
    let composition = Composition::binary(Species::Ge, 0.7, Species::Sn, 0.3).unwrap();
    let a = Simulation::new_system(2, composition.clone(), 5).unwrap();
    let b = Simulation::new_system(2, composition, 5).unwrap();
    assert_eq!(a.atom_items(), b.atom_items());
}

#[test]
fn configuration_errors() {
    assert_eq!(
        Simulation::new_system(0, Composition::pure(Species::Ge), 1).err(),
        Some(Error::EmptyLattice)
    );
    assert!(matches!(
        Composition::binary(Species::Ge, 0.6, Species::Sn, 0.6),
        Err(Error::FractionSum { .. })
    ));
    assert!(matches!(
        "Pb".parse::<Species>(),
        Err(Error::UnknownSpecies { .. })
    ));
    let mut settings = Settings::default();
    settings.timestep = -1.0;
    let result = Simulation::from_lattice(
        &Diamond,
        1,
        &Composition::pure(Species::Si),
        Tersoff::new(&[Species::Si]),
        settings,
        1,
    );
    assert!(result.err().map_or(false, |e| e.is_configuration()));
}

#[test]
fn potential_must_cover_every_atom_type() {
    let composition = Composition::binary(Species::Ge, 0.5, Species::Sn, 0.5).unwrap();
    let result = Simulation::from_lattice(
        &Diamond,
        2,
        &composition,
        Tersoff::new(&[Species::Ge]),
        Settings::default(),
        1,
    );
    assert!(matches!(
        result.err(),
        Some(Error::InvalidSetting {
            name: "atomic_potential",
            ..
        })
    ));

    // a type-agnostic potential fits any composition
    let free = Simulation::from_lattice(
        &Diamond,
        2,
        &composition,
        None_::new(),
        Settings::default(),
        1,
    );
    assert!(free.is_ok());
}
