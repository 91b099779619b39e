/// Electron-volt in joules
pub const EV: f64 = 1.602176634e-19;
/// Boltzmann constant (J/K)
pub const KB: f64 = 1.380649e-23;
/// Unified atomic mass unit in kilograms
pub const AMU: f64 = 1.66053906660e-27;
/// Nanometre in metres
pub const NM: f64 = 1e-9;
