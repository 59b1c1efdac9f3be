//! # Diffusivity Model
//!
//! ## Aim
//! Owns the binary diffusivity closure of every species pair and its result field, and derives
//! the mixture-averaged diffusion coefficient of each species from them.
//!
//! ## Main Data Structures and Logic
//! - an N_species x N_species `PairMatrix` of closures and one of result fields, pair (i, j)
//!   at `i * N_species + j`.
//! - `computed` guards every accessor: results are readable only after a successful update.
//!
//! ## Key Methods
//! - `new()`: resolves the configured model type once, then builds all pairs.
//! - `update()` / `update_parallel()`: recompute every D_ij field.
//! - `D(i, j)`, `D_patch(i, j, patchi, patch)`: binary diffusivities.
//! - `mixture_averaged(i, state)`: D_im = (1 - X_i) / sum_{j != i} X_j / D_ij.
//!
//! ## Usage
//! ```rust, ignore
//! let mut diffusion = DiffusivityModel::new(&thermo, &transport, &species)?;
//! diffusion.update(&state)?;
//! let D_N2_O = diffusion.D(0, 4)?;
//! let D_N2_mix = diffusion.mixture_averaged(0, &state)?;
//! ```
use super::binaryDiffusivity_api::{
    BinaryDiffusivityEnum, BinaryDiffusivityModel, BinaryDiffusivityType,
    create_binary_diffusivity_model,
};
use crate::Core::closure_error::{ClosureError, DomainViolation, validate_finite};
use crate::Core::constants::VSMALL;
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::{FieldState, PatchState, ScalarField, check_shape};
use crate::Core::species::{PairMatrix, SpeciesPair};
use log::{error, info};
use nalgebra::DVector;
use prettytable::{Table, row};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Debug)]
pub struct DiffusivityModel {
    species: Vec<String>,
    kind: BinaryDiffusivityType,
    models: PairMatrix<BinaryDiffusivityEnum>,
    D: PairMatrix<ScalarField>,
    computed: bool,
}

impl DiffusivityModel {
    pub fn new(
        dict_thermo_phy: &Dictionary,
        dict_transport: &Dictionary,
        species: &[String],
    ) -> Result<Self, ClosureError> {
        let kind = BinaryDiffusivityType::from_dictionary(dict_transport)?;
        let n = species.len();
        let models = PairMatrix::from_fn(n, n, |i, j| {
            let pair = SpeciesPair::new(&species[i], &species[j], i, j);
            create_binary_diffusivity_model(pair, kind, dict_thermo_phy, dict_transport)
        })?;
        let D = PairMatrix::from_fn(n, n, |i, j| {
            Ok::<_, ClosureError>(ScalarField::empty(&format!("D_{}_{}", species[i], species[j])))
        })?;
        info!(
            "DiffusivityModel: {} binary diffusivities, model {}",
            models.len(),
            kind.name()
        );
        Ok(Self {
            species: species.to_vec(),
            kind,
            models,
            D,
            computed: false,
        })
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn kind(&self) -> BinaryDiffusivityType {
        self.kind
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }

    pub fn model(&self, i: usize, j: usize) -> Result<&BinaryDiffusivityEnum, ClosureError> {
        self.models.get(i, j)
    }

    pub fn update(&mut self, state: &FieldState) -> Result<(), ClosureError> {
        self.computed = false;
        let start = Instant::now();
        for (model, out) in self.models.items().iter().zip(self.D.items_mut()) {
            model
                .D_into(state, out)
                .inspect_err(|e| error!("DiffusivityModel update failed: {}", e))?;
        }
        self.computed = true;
        info!("DiffusivityModel updated in {:?}", start.elapsed());
        Ok(())
    }

    pub fn update_parallel(&mut self, state: &FieldState) -> Result<(), ClosureError> {
        self.computed = false;
        let start = Instant::now();
        self.models
            .items()
            .par_iter()
            .zip(self.D.items_mut().par_iter_mut())
            .try_for_each(|(model, out)| model.D_into(state, out))
            .inspect_err(|e| error!("DiffusivityModel parallel update failed: {}", e))?;
        self.computed = true;
        info!("DiffusivityModel updated in parallel in {:?}", start.elapsed());
        Ok(())
    }

    /// binary diffusivity field of pair (i, j), m^2/s
    pub fn D(&self, i: usize, j: usize) -> Result<&ScalarField, ClosureError> {
        let field = self.D.get(i, j)?;
        if !self.computed {
            return Err(ClosureError::NotYetComputed {
                what: field.name().to_owned(),
            });
        }
        Ok(field)
    }

    pub fn D_patch(
        &self,
        i: usize,
        j: usize,
        patchi: usize,
        patch: &PatchState,
    ) -> Result<DVector<f64>, ClosureError> {
        self.models.get(i, j)?.D_patch(patchi, patch)
    }

    /// Mixture-averaged diffusion coefficient of species i, mole fractions from the number densities
    pub fn mixture_averaged(&self, i: usize, state: &FieldState) -> Result<ScalarField, ClosureError> {
        let n = self.species.len();
        if state.nD.len() != n {
            return Err(ClosureError::FieldMismatch {
                field: "nD (number of species)".to_owned(),
                expected: n,
                found: state.nD.len(),
            });
        }
        let row = (0..n)
            .map(|j| self.D(i, j))
            .collect::<Result<Vec<_>, _>>()?;
        // the stored D_ij keep the layout of the last update
        check_shape(self.D(i, i)?, state.Tt)?;
        let mut out = ScalarField::empty(&format!("Dmix_{}", self.species[i]));
        out.reshape_like(state.Tt);
        for location in state.Tt.locations() {
            let D_ij: Vec<f64> = row.iter().map(|f| f.at(location)).collect();
            let n_j: Vec<f64> = state.nD.iter().map(|f| f.at(location)).collect();
            let value = mixture_averaged_diffusivity(i, &D_ij, &n_j)
                .map_err(|v| v.at(&self.species[i], location))?;
            out.set(location, value);
        }
        Ok(out)
    }

    pub fn pretty_print(&self) -> Result<(), ClosureError> {
        let mut table = Table::new();
        table.add_row(row!["Pair", "Model", "min D, m2/s", "max D, m2/s"]);
        for ((i, j), model) in self.models.iter() {
            let field = self.D(i, j)?;
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

/// D_im = (1 - X_i) / sum_{j != i} X_j / D_ij. A species alone in the mixture gets its self-diffusivity.
pub fn mixture_averaged_diffusivity(i: usize, D: &[f64], n: &[f64]) -> Result<f64, DomainViolation> {
    let total: f64 = n.iter().sum();
    if total <= VSMALL || !total.is_finite() {
        return Err(DomainViolation::new("total number density", total));
    }
    let x_i = n[i] / total;
    let sum: f64 = D
        .iter()
        .zip(n)
        .enumerate()
        .filter(|(j, _)| *j != i)
        .map(|(_, (d, nj))| nj / total / d)
        .sum();
    if sum <= VSMALL {
        return validate_finite("self diffusivity", D[i]);
    }
    validate_finite("mixture-averaged diffusivity", (1.0 - x_i) / sum)
}
