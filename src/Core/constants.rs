//! Physical constants and numerical floors shared by all closure models.
//! SI units unless the name says otherwise.

/// standard atmosphere, Pa
pub const ATM: f64 = 1.01325e5;
/// Boltzmann constant, J/K
pub const K_B: f64 = 1.380649e-23;
/// Avogadro number, 1/mol
pub const N_A: f64 = 6.02214076e23;
/// universal gas constant, J/(mol K)
pub const R_U: f64 = 8.314462618;
/// floor used by the regime guards of the correction terms
pub const SMALL: f64 = 1e-15;
/// value used where a quantity must stay strictly positive
pub const VSMALL: f64 = 1e-300;
/// offset of the Millikan-White exponential
pub const MW_OFFSET: f64 = 18.42;
/// cm^2 -> m^2
pub const CM2_TO_M2: f64 = 1.0e-4;
/// angstrom^2 -> m^2
pub const A2_TO_M2: f64 = 1.0e-20;
