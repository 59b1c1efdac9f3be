//! # Relaxation Time Model
//!
//! ## Aim
//! Turns the pairwise V-T relaxation times of `VTModel` into what the vibrational energy
//! equations consume: one mixture relaxation time and one Landau-Teller source per vibrating species.
//!
//! ## Mathematical Correlations
//! - **Mixing rule** (Lee): tau_i = sum_j X_j / sum_j (X_j / tau_ij), X_j the mole fraction of partner j
//! - **Landau-Teller source**: QVT_i = rho_i (ev_i(Tt) - ev_i(Tv_i)) / tau_i [W/m^3], with the
//!   harmonic oscillator vibrational energy ev_i of species i [J/kg]
//!
//! ## Usage
//! ```rust, ignore
//! let mut relax = RelaxationTimeModel::new(&dict2T, &thermo, &solved, &species)?;
//! relax.update(&state)?;
//! let QVT_N2 = relax.QVT(0)?;
//! ```
use super::VTModel::VTModel;
use crate::Core::closure_error::{
    ClosureError, DomainViolation, validate_finite, validate_temperature,
};
use crate::Core::constants::VSMALL;
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::{FieldState, ScalarField};
use crate::Core::thermo_properties::SpeciesProperties;
use log::info;

#[derive(Debug)]
pub struct RelaxationTimeModel {
    vt: VTModel,
    /// thermophysical entries of the vibrating species
    vib_properties: Vec<SpeciesProperties>,
    /// global species index of each vibrating species
    vib_species_index: Vec<usize>,
    tau_mixture: Vec<ScalarField>,
    QVT: Vec<ScalarField>,
    computed: bool,
}

impl RelaxationTimeModel {
    pub fn new(
        dict2T: &Dictionary,
        dict_thermo_phy: &Dictionary,
        solved_vib_species: &[String],
        species: &[String],
    ) -> Result<Self, ClosureError> {
        let vt = VTModel::new(dict2T, dict_thermo_phy, solved_vib_species, species)?;
        let vib_properties = solved_vib_species
            .iter()
            .map(|name| SpeciesProperties::from_dictionary(dict_thermo_phy, name))
            .collect::<Result<Vec<_>, _>>()?;
        let vib_species_index = solved_vib_species
            .iter()
            .filter_map(|name| species.iter().position(|s| s == name))
            .collect();
        let tau_mixture = solved_vib_species
            .iter()
            .map(|name| ScalarField::empty(&format!("tauVT_{}", name)))
            .collect();
        let QVT = solved_vib_species
            .iter()
            .map(|name| ScalarField::empty(&format!("QVT_{}", name)))
            .collect();
        Ok(Self {
            vt,
            vib_properties,
            vib_species_index,
            tau_mixture,
            QVT,
            computed: false,
        })
    }

    pub fn vt_model(&self) -> &VTModel {
        &self.vt
    }

    /// Refreshes the pairwise times, then the mixture times and the sources
    pub fn update(&mut self, state: &FieldState) -> Result<(), ClosureError> {
        self.computed = false;
        let n_vib = self.vt.solved_vib_species().len();
        let n_species = self.vt.species().len();
        if state.Tv.len() < n_vib {
            return Err(ClosureError::FieldMismatch {
                field: "Tv (number of vibrational temperatures)".to_owned(),
                expected: n_vib,
                found: state.Tv.len(),
            });
        }
        if state.nD.len() != n_species {
            return Err(ClosureError::FieldMismatch {
                field: "nD (number of species)".to_owned(),
                expected: n_species,
                found: state.nD.len(),
            });
        }
        self.vt.update_parallel(state)?;

        for i in 0..n_vib {
            let taus = (0..n_species)
                .map(|j| self.vt.tau_vt(i, j))
                .collect::<Result<Vec<_>, _>>()?;
            let species = &self.vib_properties[i];
            let m_i = species.particle_mass();
            let n_i = &state.nD[self.vib_species_index[i]];
            let Tv_i = &state.Tv[i];
            let pair = self.vt.solved_vib_species()[i].clone();

            let tau_out = &mut self.tau_mixture[i];
            let q_out = &mut self.QVT[i];
            tau_out.reshape_like(state.Tt);
            q_out.reshape_like(state.Tt);
            for location in state.Tt.locations() {
                let tau_ij: Vec<f64> = taus.iter().map(|f| f.at(location)).collect();
                let n_j: Vec<f64> = state.nD.iter().map(|f| f.at(location)).collect();
                let tau = mixture_relaxation_time(&tau_ij, &n_j)
                    .map_err(|v| v.at(&pair, location))?;
                validate_temperature(Tv_i.at(location)).map_err(|v| v.at(&pair, location))?;
                let rho_i = n_i.at(location) * m_i;
                let de = species.vibrational_energy(state.Tt.at(location))
                    - species.vibrational_energy(Tv_i.at(location));
                let q = validate_finite("V-T energy source", rho_i * de / tau)
                    .map_err(|v| v.at(&pair, location))?;
                tau_out.set(location, tau);
                q_out.set(location, q);
            }
        }
        self.computed = true;
        info!("relaxation times and V-T sources updated for {} species", n_vib);
        Ok(())
    }

    fn checked<'a>(&self, fields: &'a [ScalarField], i: usize) -> Result<&'a ScalarField, ClosureError> {
        let field = fields.get(i).ok_or(ClosureError::IndexOutOfRange {
            i,
            j: 0,
            rows: fields.len(),
            cols: 1,
        })?;
        if !self.computed {
            return Err(ClosureError::NotYetComputed {
                what: field.name().to_owned(),
            });
        }
        Ok(field)
    }

    /// mixture V-T relaxation time of vibrating species i, s
    pub fn tau_mixture(&self, i: usize) -> Result<&ScalarField, ClosureError> {
        self.checked(&self.tau_mixture, i)
    }

    /// Landau-Teller V-T energy source of vibrating species i, W/m^3
    pub fn QVT(&self, i: usize) -> Result<&ScalarField, ClosureError> {
        self.checked(&self.QVT, i)
    }
}

/// mole-fraction weighted harmonic mean of the pairwise times; `n` are the partner number densities
pub fn mixture_relaxation_time(tau: &[f64], n: &[f64]) -> Result<f64, DomainViolation> {
    let total: f64 = n.iter().sum();
    if total <= VSMALL || !total.is_finite() {
        return Err(DomainViolation::new("total number density", total));
    }
    let (sum_x, sum_x_over_tau) = tau
        .iter()
        .zip(n)
        .fold((0.0, 0.0), |(sx, sxt), (t, nj)| {
            let x = nj / total;
            (sx + x, sxt + x / t)
        });
    validate_finite("mixture relaxation time", sum_x / sum_x_over_tau)
}
