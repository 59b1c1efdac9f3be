//! # VTModel
//!
//! ## Aim
//! Owns the V-T relaxation closure of every (vibrating species, collision partner) pair and the
//! relaxation time field each of them computes, and serves those fields to the solver by index.
//!
//! ## Main Data Structures and Logic
//! - rows: species with a solved vibrational equation (`solved_vib_species`), columns: all species.
//!   Pair (i, j) lives at the linear index `i * N_species + j` of two `PairMatrix` arenas, one for
//!   the models and one for the result fields; `PairMatrix::index` is the only place that computes it.
//! - an update rejects a state whose number density list is neither empty nor one per species,
//!   so a short list cannot silently drop the collision partner from Park's term.
//! - `computed` is cleared at the start of every update and set again only when all pairs succeeded,
//!   so a failed update leaves no readable result.
//! - the model is not `Clone`: it owns its pair models and fields exclusively.
//!
//! ## Key Methods
//! - `new()`: builds one closure per pair through `create_vt_relaxation_model()`.
//! - `update()` / `update_parallel()`: recompute every field from a `FieldState`; pairs are
//!   independent, the parallel version spreads them over the rayon pool.
//! - `tau_vt(i, j)`: read-only access to the field of pair (i, j).
//! - `tau_vt_patch(i, j, patchi, patch)`: boundary evaluation of one pair on explicit patch values.
//!
//! ## Usage
//! ```rust, ignore
//! let mut vt = VTModel::new(&dict2T, &thermo, &solved, &species)?;
//! vt.update(&FieldState::new(&p, &Tt, &Tv, &nD)?)?;
//! let tau_N2_O = vt.tau_vt(0, 3)?;
//! ```
use super::VTRelaxation_api::{
    VTRelaxationEnum, VTRelaxationModel, VTRelaxationSettings, create_vt_relaxation_model,
};
use crate::Core::closure_error::ClosureError;
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::{FieldState, PatchState, ScalarField};
use crate::Core::species::{PairMatrix, SpeciesPair};
use log::{error, info};
use nalgebra::DVector;
use prettytable::{Table, row};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Debug)]
pub struct VTModel {
    solved_vib_species: Vec<String>,
    species: Vec<String>,
    models: PairMatrix<VTRelaxationEnum>,
    tau: PairMatrix<ScalarField>,
    computed: bool,
}

impl VTModel {
    pub fn new(
        dict2T: &Dictionary,
        dict_thermo_phy: &Dictionary,
        solved_vib_species: &[String],
        species: &[String],
    ) -> Result<Self, ClosureError> {
        let settings = VTRelaxationSettings::from_dictionary(dict2T)?;
        // global index of each vibrating species
        let rows = solved_vib_species
            .iter()
            .map(|name| {
                species.iter().position(|s| s == name).ok_or_else(|| {
                    ClosureError::configuration(
                        dict2T.name(),
                        format!("species '{}' has a vibrational equation but is not in the species list", name),
                    )
                })
            })
            .collect::<Result<Vec<usize>, _>>()?;

        let models = PairMatrix::from_fn(solved_vib_species.len(), species.len(), |i, j| {
            let pair = SpeciesPair::new(&solved_vib_species[i], &species[j], rows[i], j);
            create_vt_relaxation_model(pair, i, &settings, dict_thermo_phy)
        })?;
        let tau = PairMatrix::from_fn(solved_vib_species.len(), species.len(), |i, j| {
            Ok::<_, ClosureError>(ScalarField::empty(&format!(
                "tauVT_{}_{}",
                solved_vib_species[i], species[j]
            )))
        })?;
        info!(
            "VTModel: {} x {} relaxation time closures constructed",
            models.rows(),
            models.cols()
        );
        Ok(Self {
            solved_vib_species: solved_vib_species.to_vec(),
            species: species.to_vec(),
            models,
            tau,
            computed: false,
        })
    }

    pub fn solved_vib_species(&self) -> &[String] {
        &self.solved_vib_species
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }

    pub fn model(&self, i: usize, j: usize) -> Result<&VTRelaxationEnum, ClosureError> {
        self.models.get(i, j)
    }

    /// The state carries either no number densities (no Park term anywhere) or one per
    /// species, and either no vibrational temperatures or one per vibrating species.
    fn check_state(&self, state: &FieldState) -> Result<(), ClosureError> {
        let n_species = self.species.len();
        if !state.nD.is_empty() && state.nD.len() != n_species {
            return Err(ClosureError::FieldMismatch {
                field: "nD (number of species)".to_owned(),
                expected: n_species,
                found: state.nD.len(),
            });
        }
        let n_vib = self.solved_vib_species.len();
        if !state.Tv.is_empty() && state.Tv.len() < n_vib {
            return Err(ClosureError::FieldMismatch {
                field: "Tv (number of vibrational temperatures)".to_owned(),
                expected: n_vib,
                found: state.Tv.len(),
            });
        }
        Ok(())
    }

    /// Recomputes every pair field, one pair after the other
    pub fn update(&mut self, state: &FieldState) -> Result<(), ClosureError> {
        self.computed = false;
        self.check_state(state)
            .inspect_err(|e| error!("VTModel update failed: {}", e))?;
        let start = Instant::now();
        for (model, out) in self.models.items().iter().zip(self.tau.items_mut()) {
            model.tau_vt_into(state, out).inspect_err(|e| {
                error!("VTModel update failed: {}", e);
            })?;
        }
        self.computed = true;
        info!("VTModel updated in {:?}", start.elapsed());
        Ok(())
    }

    /// Same result as `update`, with the pairs spread over the rayon thread pool
    pub fn update_parallel(&mut self, state: &FieldState) -> Result<(), ClosureError> {
        self.computed = false;
        self.check_state(state)
            .inspect_err(|e| error!("VTModel parallel update failed: {}", e))?;
        let start = Instant::now();
        self.models
            .items()
            .par_iter()
            .zip(self.tau.items_mut().par_iter_mut())
            .try_for_each(|(model, out)| model.tau_vt_into(state, out))
            .inspect_err(|e| error!("VTModel parallel update failed: {}", e))?;
        self.computed = true;
        info!("VTModel updated in parallel in {:?}", start.elapsed());
        Ok(())
    }

    /// V-T relaxation time field of pair (i, j), s
    pub fn tau_vt(&self, i: usize, j: usize) -> Result<&ScalarField, ClosureError> {
        let field = self.tau.get(i, j)?;
        if !self.computed {
            return Err(ClosureError::NotYetComputed {
                what: field.name().to_owned(),
            });
        }
        Ok(field)
    }

    /// V-T relaxation time of pair (i, j) on one patch, from explicit boundary values
    pub fn tau_vt_patch(
        &self,
        i: usize,
        j: usize,
        patchi: usize,
        patch: &PatchState,
    ) -> Result<DVector<f64>, ClosureError> {
        self.models.get(i, j)?.tau_vt_patch(patchi, patch)
    }

    pub fn pretty_print(&self) -> Result<(), ClosureError> {
        let mut table = Table::new();
        table.add_row(row!["Pair", "Model", "min tau, s", "max tau, s"]);
        for ((i, j), model) in self.models.iter() {
            let field = self.tau_vt(i, j)?;
            table.add_row(row![
                model.pair().key(),
                model.kind().name(),
                format!("{:.4e}", field.min()),
                format!("{:.4e}", field.max())
            ]);
        }
        table.printstd();
        Ok(())
    }
}
