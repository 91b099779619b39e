use crate::{species::Species, utils::Vec3};

/// Atom properties during simulation.
///
/// Per-atom data is stored as parallel vectors indexed by the atom index.
/// `types` holds an index into `atom_types`.
#[derive(Clone, Debug)]
pub struct Atoms {
    pub ids: Vec<usize>,
    pub types: Vec<usize>,
    pub positions: Vec<Vec3>,
    /// Positions never folded back into the box
    pub unwrapped: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub accelerations: Vec<Vec3>,
    atom_types: Vec<Species>,
}
impl Atoms {
    pub fn new(atom_types: Vec<Species>) -> Self {
        Atoms {
            ids: Vec::new(),
            types: Vec::new(),
            positions: Vec::new(),
            unwrapped: Vec::new(),
            velocities: Vec::new(),
            accelerations: Vec::new(),
            atom_types,
        }
    }
    pub fn num_atoms(&self) -> usize {
        self.ids.len()
    }
    pub fn ids(&self) -> &Vec<usize> {
        &self.ids
    }
    pub fn types(&self) -> &Vec<usize> {
        &self.types
    }
    pub fn positions(&self) -> &Vec<Vec3> {
        &self.positions
    }
    pub fn unwrapped_positions(&self) -> &Vec<Vec3> {
        &self.unwrapped
    }
    pub fn velocities(&self) -> &Vec<Vec3> {
        &self.velocities
    }
    pub fn accelerations(&self) -> &Vec<Vec3> {
        &self.accelerations
    }
    pub fn atom_types(&self) -> &Vec<Species> {
        &self.atom_types
    }
    pub fn num_types(&self) -> usize {
        self.atom_types.len()
    }
    pub fn species(&self, idx: usize) -> Species {
        self.atom_types[self.types[idx]]
    }
    pub fn mass(&self, idx: usize) -> f64 {
        self.species(idx).mass()
    }
    pub fn momentum(&self, idx: usize) -> Vec3 {
        self.velocities[idx] * self.mass(idx)
    }
    pub fn count_of_type(&self, atom_type: usize) -> usize {
        self.types.iter().filter(|&&t| t == atom_type).count()
    }

    /// Sum of `m v^2` over all atoms, twice the kinetic energy
    pub fn mass_weighted_vsq(&self) -> f64 {
        (0..self.num_atoms())
            .map(|i| self.mass(i) * self.velocities[i].norm_squared())
            .sum()
    }
    pub fn velocity_sum(&self) -> Vec3 {
        self.velocities.iter().sum()
    }

    pub fn increment_velocity(&mut self, i: usize, increment: Vec3) {
        self.velocities[i] += increment;
    }
    pub fn set_velocity(&mut self, i: usize, new_vel: Vec3) {
        self.velocities[i] = new_vel;
    }
    pub fn set_type(&mut self, i: usize, atom_type: usize) {
        assert!(
            atom_type < self.num_types(),
            "Atom type {} out of range, only {} types defined",
            atom_type,
            self.num_types()
        );
        self.types[i] = atom_type;
    }

    /// Append atoms of one type at rest at the given coordinates
    pub fn add_atoms(&mut self, atom_type: usize, coords: Vec<Vec3>) {
        assert!(
            atom_type < self.num_types(),
            "Atom type {} out of range, only {} types defined",
            atom_type,
            self.num_types()
        );
        let num_atoms = coords.len();
        let atom_id = match self.ids().iter().max() {
            Some(j) => j + 1,
            None => 0,
        };
        self.ids.extend(atom_id..atom_id + num_atoms);
        self.types.reserve(num_atoms);
        self.velocities.reserve(num_atoms);
        self.accelerations.reserve(num_atoms);

        for coord in coords {
            self.types.push(atom_type);
            self.velocities.push(Vec3::default());
            self.accelerations.push(Vec3::default());
            self.positions.push(coord);
            self.unwrapped.push(coord);
        }
    }
}
