use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{
    atomic::{AtomicPotential, ForceContext, Interactions, Tersoff},
    atoms::Atoms,
    compute::{self, Compute},
    container::Container,
    diagnostics::{self, Autocorrelation, DiffusionEstimate, VelocityHistory},
    error::{Error, Result},
    integrators::{thermostat, Integrator, Verlet},
    lattice::{self, Diamond, Lattice},
    neighbor::{DistanceCache, NeighborList},
    output::{Output, OutputSpec, Value},
    settings::{Settings, Thermostat},
    species::{Composition, Species},
    utils::{Axis, Vec3},
};

/// Finite-difference step as a fraction of the lattice constant
const DISPLACEMENT_FRACTION: f64 = 1e-3;
/// Neighbor skin in units of the finite-difference step
const SKIN_FACTOR: f64 = 1.2;
/// RDF bin width as a fraction of the lattice constant
const RDF_BIN_FRACTION: f64 = 0.05 * 0.726;

/// Running sums of the last evaluation (SI units)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Accumulators {
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    /// `sum_i r_i . F_i`
    pub virial: f64,
    /// Momentum carried through the box faces since the last reset
    pub flux: Vec3,
    /// Steps since the last flux reset
    pub flux_steps: usize,
}

/// What a call to [`Simulation::run`] did
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    /// Mean temperature over the steps taken (K)
    pub mean_temperature: f64,
    /// Mean virial pressure over the steps taken (Pa)
    pub mean_pressure: f64,
    pub stopped_early: bool,
}

/// Species and wrapped position of one atom
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomItem {
    pub species: Species,
    pub position: Vec3,
}

/// A periodic system of atoms advanced in time under an atomic potential
pub struct Simulation<A: AtomicPotential> {
    pub atoms: Atoms,
    pub(crate) container: Container,
    atomic_potential: A,
    neighbor_list: NeighborList,
    pub(crate) distances: DistanceCache,
    settings: Settings,
    output: Output,
    lattice_constant: f64,
    pool: ThreadPool,
    rng: StdRng,
    pub(crate) accumulators: Accumulators,
    step: usize,
    elapsed_steps: usize,
    initialized: bool,
    msd_baseline: Vec<Vec3>,
    msd_points: Vec<(f64, f64)>,
    velocity_history: VelocityHistory,
}

impl Simulation<Tersoff> {
    /// Diamond lattice of `cells`³ unit cells with the Tersoff potential and
    /// default settings
    pub fn new_system(cells: usize, composition: Composition, seed: u64) -> Result<Self> {
        let potential = Tersoff::new(&composition.species());
        Self::from_lattice(
            &Diamond,
            cells,
            &composition,
            potential,
            Settings::default(),
            seed,
        )
    }
}

impl<A: AtomicPotential> Simulation<A> {
    /// Build the atoms on a lattice and relabel the secondary species with
    /// the run's generator
    pub fn from_lattice<L: Lattice>(
        lattice: &L,
        cells: usize,
        composition: &Composition,
        atomic_potential: A,
        settings: Settings,
        seed: u64,
    ) -> Result<Self> {
        settings.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let (atoms, container) = lattice::build(lattice, cells, composition, &mut rng)?;
        Self::with_rng(
            atoms,
            atomic_potential,
            container,
            composition.lattice_constant(),
            settings,
            rng,
        )
    }

    /// Create a new simulation from prepared atoms
    pub fn new(
        atoms: Atoms,
        atomic_potential: A,
        container: Container,
        lattice_constant: f64,
        settings: Settings,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(
            atoms,
            atomic_potential,
            container,
            lattice_constant,
            settings,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        atoms: Atoms,
        atomic_potential: A,
        container: Container,
        lattice_constant: f64,
        settings: Settings,
        rng: StdRng,
    ) -> Result<Self> {
        settings.validate()?;
        if !(lattice_constant > 0.0 && lattice_constant.is_finite()) {
            return Err(Error::InvalidSetting {
                name: "lattice_constant",
                reason: format!("should be positive, found {}", lattice_constant),
            });
        }
        if let Some(num_types) = atomic_potential.num_types() {
            if num_types != atoms.num_types() {
                return Err(Error::InvalidSetting {
                    name: "atomic_potential",
                    reason: format!(
                        "has coefficients for {} atom types, the atoms have {}",
                        num_types,
                        atoms.num_types()
                    ),
                });
            }
        }
        let mut builder = ThreadPoolBuilder::new();
        if let Some(threads) = settings.num_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;

        let search_radius = atomic_potential.cutoff_distance()
            + SKIN_FACTOR * DISPLACEMENT_FRACTION * lattice_constant;
        let neighbor_list = NeighborList::new(atoms.num_atoms(), search_radius);
        let velocity_history = VelocityHistory::new(
            settings.acf_sample_count,
            settings.acf_repeat_count,
            settings.acf_stride,
        );
        info!(
            "Simulation of {} atoms, box {:.4e} m, lattice constant {:.4e} m, {} threads",
            atoms.num_atoms(),
            container.length(),
            lattice_constant,
            pool.current_num_threads()
        );
        Ok(Self {
            atoms,
            container,
            atomic_potential,
            neighbor_list,
            distances: DistanceCache::new(),
            settings,
            output: Output::new(),
            lattice_constant,
            pool,
            rng,
            accumulators: Accumulators::default(),
            step: 1,
            elapsed_steps: 0,
            initialized: false,
            msd_baseline: Vec::new(),
            msd_points: Vec::new(),
            velocity_history,
        })
    }

    // Getters
    pub fn container(&self) -> &Container {
        &self.container
    }
    pub fn atomic_potential(&self) -> &A {
        &self.atomic_potential
    }
    pub fn neighbor_list(&self) -> &NeighborList {
        &self.neighbor_list
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn output(&self) -> &Output {
        &self.output
    }
    pub fn accumulators(&self) -> &Accumulators {
        &self.accumulators
    }
    pub fn timestep(&self) -> f64 {
        self.settings.timestep
    }
    pub fn lattice_constant(&self) -> f64 {
        self.lattice_constant
    }
    /// Finite-difference step of the force evaluation (m)
    pub fn displacement(&self) -> f64 {
        DISPLACEMENT_FRACTION * self.lattice_constant
    }
    /// Current step of the run, starting at 1
    pub fn step(&self) -> usize {
        self.step
    }
    /// Steps taken since the initial calculation
    pub fn elapsed_steps(&self) -> usize {
        self.elapsed_steps
    }
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
    pub fn velocity_history(&self) -> &VelocityHistory {
        &self.velocity_history
    }

    // Setters
    pub fn set_output(&mut self, every: usize, output_keys: Vec<&str>) -> Result<()> {
        if every == 0 {
            return Err(Error::InvalidSetting {
                name: "output.every",
                reason: "should be at least 1".to_string(),
            });
        }
        let values = output_keys
            .iter()
            .map(|&key| {
                if key == "step" {
                    Ok(OutputSpec::Step)
                } else {
                    key.parse::<Compute>().map(OutputSpec::Compute)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        self.output = Output::with_values(every, values);
        Ok(())
    }
    pub fn set_thermostat(&mut self, thermostat: Option<Thermostat>) -> Result<()> {
        let mut settings = self.settings.clone();
        settings.thermostat = thermostat;
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Build the neighbor lists and evaluate forces, energies and the
    /// virial of the starting configuration. Must run before stepping.
    pub fn init_calculation(&mut self) -> Result<()> {
        self.accumulators = Accumulators::default();
        self.update_forces()?;
        self.refresh_kinetic_energy();
        self.msd_baseline = self.atoms.unwrapped_positions().clone();
        self.msd_points.clear();
        self.velocity_history.clear();
        self.velocity_history.record(self.atoms.velocities());
        self.step = 1;
        self.elapsed_steps = 0;
        self.initialized = true;
        info!(
            "Initial state: pe = {:.6} eV, ke = {:.6} eV, {} neighbor pairs",
            self.potential_energy(),
            self.kinetic_energy(),
            self.neighbor_list.num_pairs()
        );
        Ok(())
    }

    /// Displace every coordinate by a uniform amount in `[-k a, k a)`
    pub fn displace_atoms(&mut self, k: f64) {
        let amplitude = k * self.lattice_constant;
        for i in 0..self.atoms.num_atoms() {
            let mut shift = Vec3::default();
            for axis in Axis::ALL {
                shift[axis.index()] = (2.0 * self.rng.gen::<f64>() - 1.0) * amplitude;
            }
            self.atoms.positions[i] = self.container.wrap(self.atoms.positions[i] + shift);
            self.atoms.unwrapped[i] += shift;
        }
        self.distances.invalidate();
    }

    /// Random velocities matching `temperature`, with the net momentum removed
    pub fn init_velocity_normalization(&mut self, temperature: f64) -> Result<()> {
        thermostat::random_velocities(&mut self.atoms, temperature, &mut self.rng);
        self.pulse_zeroing()
    }

    /// Rescale the velocities to `temperature`, then remove the net momentum
    pub fn velocity_normalization(&mut self, temperature: f64) -> Result<()> {
        thermostat::rescale_velocities(&mut self.atoms, temperature)?;
        self.pulse_zeroing()
    }

    /// Remove the net momentum of the system
    pub fn pulse_zeroing(&mut self) -> Result<()> {
        thermostat::zero_momentum(
            &mut self.atoms,
            self.settings.momentum_tolerance,
            self.settings.momentum_max_iterations,
        )?;
        self.refresh_kinetic_energy();
        Ok(())
    }

    /// Advance the system by one timestep.
    ///
    /// On a failed force evaluation the positions, velocities and flux are
    /// restored and the error is returned.
    pub fn verlet_step(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let positions = self.atoms.positions.clone();
        let unwrapped = self.atoms.unwrapped.clone();
        let velocities = self.atoms.velocities.clone();
        let (flux, flux_steps) = (self.accumulators.flux, self.accumulators.flux_steps);

        Verlet::pre_force(self);
        if let Err(e) = self.update_forces() {
            warn!("Step {} aborted: {}", self.step, e);
            self.atoms.positions = positions;
            self.atoms.unwrapped = unwrapped;
            self.atoms.velocities = velocities;
            self.accumulators.flux = flux;
            self.accumulators.flux_steps = flux_steps;
            self.distances.invalidate();
            return Err(e);
        }
        Verlet::post_force(self);
        self.refresh_kinetic_energy();

        if self.step == 1 {
            self.velocity_history.clear();
        }
        self.velocity_history.record(self.atoms.velocities());

        debug!(
            "Step {}: {} neighbor pairs, pe = {:.6} eV, ke = {:.6} eV",
            self.step,
            self.neighbor_list.num_pairs(),
            self.potential_energy(),
            self.kinetic_energy()
        );
        self.step += 1;
        self.elapsed_steps += 1;
        Ok(())
    }

    /// Run `num_steps` steps as a fresh run.
    ///
    /// Applies the thermostat, records MSD points and output rows at their
    /// intervals and at the last step. `should_stop` is checked before every
    /// step.
    pub fn run<F>(&mut self, num_steps: usize, mut should_stop: F) -> Result<RunSummary>
    where
        F: FnMut(&Self) -> bool,
    {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.step = 1;
        self.reset_flux();

        let mut summary = RunSummary::default();
        let mut temperature_sum = 0.0;
        let mut pressure_sum = 0.0;
        for n in 1..=num_steps {
            if should_stop(&*self) {
                summary.stopped_early = true;
                break;
            }
            self.verlet_step()?;
            if let Some(thermostat) = self.settings.thermostat {
                if thermostat.should_rescale(n) {
                    self.velocity_normalization(thermostat.temperature)?;
                }
            }
            temperature_sum += self.temperature();
            pressure_sum += self.virial_pressure();
            summary.steps = n;

            let last = n == num_steps;
            if n % self.settings.msd_interval == 0 || last {
                self.record_msd_point();
            }
            if self.output.should_output(n) || last {
                self.write_output(n);
                self.reset_flux();
            }
        }
        if summary.steps > 0 {
            summary.mean_temperature = temperature_sum / summary.steps as f64;
            summary.mean_pressure = pressure_sum / summary.steps as f64;
        }
        info!(
            "Run finished after {} steps: <T> = {:.3} K, <P> = {:.4e} Pa",
            summary.steps, summary.mean_temperature, summary.mean_pressure
        );
        Ok(summary)
    }

    /// Start a new averaging window for the flux pressure
    pub fn reset_flux(&mut self) {
        self.accumulators.flux = Vec3::default();
        self.accumulators.flux_steps = 0;
    }

    // Observables
    /// Kinetic energy (eV)
    pub fn kinetic_energy(&self) -> f64 {
        compute::kinetic_energy::compute(self)
    }
    /// Potential energy (eV)
    pub fn potential_energy(&self) -> f64 {
        compute::potential_energy::compute(self)
    }
    /// Total energy (eV)
    pub fn total_energy(&self) -> f64 {
        compute::total_energy::compute(self)
    }
    /// Instantaneous temperature (K)
    pub fn temperature(&self) -> f64 {
        compute::temperature::compute(self)
    }
    /// Pressure from the per-atom virial, `(KE + sum r.F / N) / 3V` (Pa)
    pub fn virial_pressure(&self) -> f64 {
        compute::pressure::virial(self)
    }
    /// Pressure from the Clausius virial theorem, `(2 KE + sum r.F) / 3V` (Pa)
    pub fn clausius_pressure(&self) -> f64 {
        compute::pressure::clausius(self)
    }
    /// Pressure from the momentum flux through the box faces (Pa)
    pub fn flux_pressure(&self) -> f64 {
        compute::pressure::flux(self)
    }
    /// Box volume (m³)
    pub fn volume(&self) -> f64 {
        self.container.volume()
    }
    pub fn compute(&self, compute: Compute) -> f64 {
        compute.compute(self)
    }

    /// `(r, g(r))` of the current configuration
    pub fn radial_distribution(&self) -> Vec<(f64, f64)> {
        let bin_width = RDF_BIN_FRACTION * self.lattice_constant;
        self.pool.install(|| {
            diagnostics::radial_distribution(self.atoms.positions(), &self.container, bin_width)
        })
    }

    /// Mean square displacement since the initial calculation (m²)
    pub fn msd(&self) -> Result<f64> {
        self.msd_where(|_| true)
    }
    /// Mean square displacement of the atoms of one species (m²)
    pub fn msd_of(&self, species: Species) -> Result<f64> {
        let atoms = &self.atoms;
        self.msd_where(|i| atoms.species(i) == species)
    }
    fn msd_where(&self, include: impl Fn(usize) -> bool) -> Result<f64> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        Ok(diagnostics::mean_square_displacement(
            self.atoms.unwrapped_positions(),
            &self.msd_baseline,
            include,
        ))
    }
    /// Recorded `(t, MSD)` points (s, m²)
    pub fn msd_points(&self) -> &Vec<(f64, f64)> {
        &self.msd_points
    }
    /// Record the current MSD at the elapsed time
    pub fn record_msd_point(&mut self) {
        if let Ok(msd) = self.msd() {
            let time = self.elapsed_steps as f64 * self.timestep();
            self.msd_points.push((time, msd));
        }
    }
    /// Least-squares diffusion coefficient from the MSD points (m²/s)
    pub fn diffusion_least_squares(&self) -> Result<DiffusionEstimate> {
        diagnostics::diffusion_least_squares(&self.msd_points)
    }
    /// Two-point diffusion coefficient from the MSD points (m²/s)
    pub fn diffusion_two_point(&self) -> Result<f64> {
        diagnostics::diffusion_two_point(&self.msd_points)
    }

    pub fn velocity_autocorrelation(&self) -> Result<Autocorrelation> {
        self.velocity_history.autocorrelation()
    }
    /// Green-Kubo diffusion coefficient (m²/s)
    pub fn diffusion_green_kubo(&self) -> Result<f64> {
        Ok(self
            .velocity_autocorrelation()?
            .diffusion_coefficient(self.timestep()))
    }

    /// Species and wrapped position of every atom
    pub fn atom_items(&self) -> Vec<AtomItem> {
        (0..self.atoms.num_atoms())
            .map(|i| AtomItem {
                species: self.atoms.species(i),
                position: self.atoms.positions[i],
            })
            .collect()
    }

    // Private functions
    fn refresh_kinetic_energy(&mut self) {
        self.accumulators.kinetic_energy = compute::kinetic_energy::from_velocities(&self.atoms);
    }

    /// Rebuild the neighbor lists and store accelerations, potential energy
    /// and virial. Accelerations are left untouched on failure.
    fn update_forces(&mut self) -> Result<()> {
        let displacement = self.displacement();
        let atoms = &self.atoms;
        let container = &self.container;
        let atomic_potential = &self.atomic_potential;
        let neighbor_list = &mut self.neighbor_list;
        let distances = &mut self.distances;
        let interactions: Interactions = self.pool.install(|| {
            neighbor_list.update(atoms.positions(), container, distances);
            let ctx = ForceContext {
                atoms,
                neighbor_list,
                distances,
                container,
                displacement,
            };
            atomic_potential.compute_forces(&ctx)
        })?;

        for (i, force) in interactions.forces.iter().enumerate() {
            self.atoms.accelerations[i] = *force / self.atoms.mass(i);
        }
        self.accumulators.potential_energy = interactions.potential_energy;
        self.accumulators.virial = interactions.virial;
        Ok(())
    }

    fn write_output(&mut self, step: usize) {
        let row: Vec<Value> = self
            .output
            .values
            .iter()
            .map(|v| match v {
                OutputSpec::Step => Value::Usize(step),
                OutputSpec::Compute(c) => Value::Float(c.compute(self)),
            })
            .collect();
        info!("{}", Output::format_row(&row));
        self.output.push_row(row);
    }
}
