//! # Fields Module
//!
//! ## Aim
//! Minimal stand-in for the solver's cell fields: one scalar per control volume plus one
//! scalar per face of every boundary patch. The closure models only read these fields
//! (through `FieldState`) and write their own results (a `ScalarField` they own).
//!
//! ## Main Data Structures and Logic
//! - `ScalarField`: internal values (`DVector<f64>`) and one `DVector<f64>` per boundary patch.
//! - `FieldState`: borrowed, read-only view of the gas state needed by the closures:
//!   pressure, translational temperature, vibrational temperatures (one per species with a
//!   solved vibrational equation), number densities (one per species) and optionally the
//!   electron pressure.
//! - `PatchState`: the same inputs restricted to one boundary patch, given as plain slices.
//! - `LocalState`: the inputs of one closure formula at one cell or face.
//!
//! ## Key Methods
//! - `evaluate_field_into()`: applies a point formula to every cell and every patch face.
//! - `evaluate_patch()`: applies the same point formula to the faces of a single patch.
//!   The field loop calls it for its own boundary so the two paths cannot drift apart.
use super::closure_error::{ClosureError, DomainViolation, Location};
use nalgebra::DVector;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    name: String,
    internal: DVector<f64>,
    boundary: Vec<DVector<f64>>,
}

impl ScalarField {
    pub fn new(name: &str, internal: DVector<f64>, boundary: Vec<DVector<f64>>) -> Self {
        Self {
            name: name.to_owned(),
            internal,
            boundary,
        }
    }

    pub fn from_values(name: &str, internal: Vec<f64>, boundary: Vec<Vec<f64>>) -> Self {
        Self::new(
            name,
            DVector::from_vec(internal),
            boundary.into_iter().map(DVector::from_vec).collect(),
        )
    }

    pub fn uniform(name: &str, n_cells: usize, patch_sizes: &[usize], value: f64) -> Self {
        Self::new(
            name,
            DVector::from_element(n_cells, value),
            patch_sizes
                .iter()
                .map(|&n| DVector::from_element(n, value))
                .collect(),
        )
    }

    /// empty field, sized on first use by `reshape_like`
    pub fn empty(name: &str) -> Self {
        Self::new(name, DVector::zeros(0), Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn internal(&self) -> &DVector<f64> {
        &self.internal
    }

    pub fn internal_mut(&mut self) -> &mut DVector<f64> {
        &mut self.internal
    }

    pub fn boundary(&self) -> &[DVector<f64>] {
        &self.boundary
    }

    pub fn patch(&self, patchi: usize) -> Result<&DVector<f64>, ClosureError> {
        self.boundary
            .get(patchi)
            .ok_or_else(|| ClosureError::FieldMismatch {
                field: format!("{} (patch {})", self.name, patchi),
                expected: patchi + 1,
                found: self.boundary.len(),
            })
    }

    pub fn patch_mut(&mut self, patchi: usize) -> Option<&mut DVector<f64>> {
        self.boundary.get_mut(patchi)
    }

    pub fn n_cells(&self) -> usize {
        self.internal.len()
    }

    pub fn n_patches(&self) -> usize {
        self.boundary.len()
    }

    pub fn patch_sizes(&self) -> Vec<usize> {
        self.boundary.iter().map(|b| b.len()).collect()
    }

    pub fn same_shape(&self, other: &ScalarField) -> bool {
        self.n_cells() == other.n_cells() && self.patch_sizes() == other.patch_sizes()
    }

    /// Resizes to the layout of `other`. A field that already has that layout keeps its storage.
    pub fn reshape_like(&mut self, other: &ScalarField) {
        if self.same_shape(other) {
            return;
        }
        self.internal = DVector::zeros(other.n_cells());
        self.boundary = other
            .boundary
            .iter()
            .map(|b| DVector::zeros(b.len()))
            .collect();
    }

    /// all values, cells first then patch faces
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.internal
            .iter()
            .chain(self.boundary.iter().flat_map(|b| b.iter()))
            .copied()
    }

    /// every cell, then every face of every patch
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.n_cells()).map(Location::Cell).chain(
            self.boundary.iter().enumerate().flat_map(|(patch, b)| {
                (0..b.len()).map(move |face| Location::Face { patch, face })
            }),
        )
    }

    /// value at a location of this field's own layout
    pub fn at(&self, location: Location) -> f64 {
        match location {
            Location::Cell(celli) => self.internal[celli],
            Location::Face { patch, face } => self.boundary[patch][face],
        }
    }

    pub fn set(&mut self, location: Location, value: f64) {
        match location {
            Location::Cell(celli) => self.internal[celli] = value,
            Location::Face { patch, face } => self.boundary[patch][face] = value,
        }
    }

    pub fn min(&self) -> f64 {
        self.values().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// `FieldMismatch` unless `field` has the cell/patch layout of `reference`
pub fn check_shape(reference: &ScalarField, field: &ScalarField) -> Result<(), ClosureError> {
    if field.n_cells() != reference.n_cells() {
        return Err(ClosureError::FieldMismatch {
            field: field.name().to_owned(),
            expected: reference.n_cells(),
            found: field.n_cells(),
        });
    }
    if field.n_patches() != reference.n_patches() {
        return Err(ClosureError::FieldMismatch {
            field: format!("{} (number of patches)", field.name()),
            expected: reference.n_patches(),
            found: field.n_patches(),
        });
    }
    for (patchi, (b, r)) in field.boundary().iter().zip(reference.boundary()).enumerate() {
        if b.len() != r.len() {
            return Err(ClosureError::FieldMismatch {
                field: format!("{} (patch {})", field.name(), patchi),
                expected: r.len(),
                found: b.len(),
            });
        }
    }
    Ok(())
}

/// Which entries of the state a species pair reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairInputs {
    /// index into the vibrational temperature list (species with a solved vibrational equation)
    pub vib: Option<usize>,
    /// indices into the number density list
    pub species1: usize,
    pub species2: usize,
}

/// Inputs of a closure formula at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalState {
    /// pressure, Pa
    pub p: f64,
    /// translational temperature, K
    pub Tt: f64,
    /// vibrational temperature of the first species, K
    pub Tv: Option<f64>,
    /// number densities of both species, 1/m^3
    pub n1: Option<f64>,
    pub n2: Option<f64>,
    /// electron pressure, Pa (0 when no electrons are tracked)
    pub pe: f64,
}

impl LocalState {
    pub fn new(p: f64, Tt: f64) -> Self {
        Self {
            p,
            Tt,
            Tv: None,
            n1: None,
            n2: None,
            pe: 0.0,
        }
    }
}

/// Read-only view of the gas state consumed by the closures
#[derive(Debug, Clone, Copy)]
pub struct FieldState<'a> {
    pub p: &'a ScalarField,
    pub Tt: &'a ScalarField,
    pub Tv: &'a [ScalarField],
    pub nD: &'a [ScalarField],
    pub pe: Option<&'a ScalarField>,
}

impl<'a> FieldState<'a> {
    /// Checks that every field has the cell/patch layout of `Tt`
    pub fn new(
        p: &'a ScalarField,
        Tt: &'a ScalarField,
        Tv: &'a [ScalarField],
        nD: &'a [ScalarField],
    ) -> Result<Self, ClosureError> {
        check_shape(Tt, p)?;
        for field in Tv.iter().chain(nD.iter()) {
            check_shape(Tt, field)?;
        }
        Ok(Self {
            p,
            Tt,
            Tv,
            nD,
            pe: None,
        })
    }

    pub fn with_electron_pressure(mut self, pe: &'a ScalarField) -> Result<Self, ClosureError> {
        check_shape(self.Tt, pe)?;
        self.pe = Some(pe);
        Ok(self)
    }

    pub fn n_cells(&self) -> usize {
        self.Tt.n_cells()
    }

    pub fn n_patches(&self) -> usize {
        self.Tt.n_patches()
    }

    pub fn local_cell(&self, celli: usize, inputs: &PairInputs) -> LocalState {
        LocalState {
            p: self.p.internal()[celli],
            Tt: self.Tt.internal()[celli],
            Tv: inputs
                .vib
                .and_then(|k| self.Tv.get(k))
                .map(|f| f.internal()[celli]),
            n1: self.nD.get(inputs.species1).map(|f| f.internal()[celli]),
            n2: self.nD.get(inputs.species2).map(|f| f.internal()[celli]),
            pe: self.pe.map_or(0.0, |f| f.internal()[celli]),
        }
    }

    /// The boundary values of one patch as a `PatchState`
    pub fn patch(&self, patchi: usize) -> Result<PatchState<'a>, ClosureError> {
        let slice = |f: &'a ScalarField| -> Result<&'a [f64], ClosureError> {
            Ok(f.patch(patchi)?.as_slice())
        };
        Ok(PatchState {
            p: slice(self.p)?,
            Tt: slice(self.Tt)?,
            Tv: self.Tv.iter().map(slice).collect::<Result<_, _>>()?,
            nD: self.nD.iter().map(slice).collect::<Result<_, _>>()?,
            pe: self.pe.map(slice).transpose()?,
        })
    }
}

/// Boundary values of a single patch, supplied explicitly
#[derive(Debug, Clone)]
pub struct PatchState<'a> {
    pub p: &'a [f64],
    pub Tt: &'a [f64],
    pub Tv: Vec<&'a [f64]>,
    pub nD: Vec<&'a [f64]>,
    pub pe: Option<&'a [f64]>,
}

impl<'a> PatchState<'a> {
    pub fn new(p: &'a [f64], Tt: &'a [f64]) -> Self {
        Self {
            p,
            Tt,
            Tv: Vec::new(),
            nD: Vec::new(),
            pe: None,
        }
    }

    pub fn with_vibrational_temperatures(mut self, Tv: Vec<&'a [f64]>) -> Self {
        self.Tv = Tv;
        self
    }

    pub fn with_number_densities(mut self, nD: Vec<&'a [f64]>) -> Self {
        self.nD = nD;
        self
    }

    pub fn with_electron_pressure(mut self, pe: &'a [f64]) -> Self {
        self.pe = Some(pe);
        self
    }

    pub fn n_faces(&self) -> usize {
        self.Tt.len()
    }

    fn check(&self, patchi: usize) -> Result<(), ClosureError> {
        let n = self.n_faces();
        let named = [("p", Some(self.p)), ("pe", self.pe)];
        let lists = self
            .Tv
            .iter()
            .map(|s| ("Tv", Some(*s)))
            .chain(self.nD.iter().map(|s| ("nD", Some(*s))));
        for (name, values) in named.into_iter().chain(lists) {
            if let Some(values) = values {
                if values.len() != n {
                    return Err(ClosureError::FieldMismatch {
                        field: format!("{} (patch {})", name, patchi),
                        expected: n,
                        found: values.len(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn local_face(&self, facei: usize, inputs: &PairInputs) -> LocalState {
        LocalState {
            p: self.p[facei],
            Tt: self.Tt[facei],
            Tv: inputs.vib.and_then(|k| self.Tv.get(k)).map(|s| s[facei]),
            n1: self.nD.get(inputs.species1).map(|s| s[facei]),
            n2: self.nD.get(inputs.species2).map(|s| s[facei]),
            pe: self.pe.map_or(0.0, |s| s[facei]),
        }
    }
}

/// Point formula evaluated over the faces of one patch
pub fn evaluate_patch<F>(
    patch: &PatchState,
    patchi: usize,
    inputs: &PairInputs,
    pair: &str,
    f: F,
) -> Result<DVector<f64>, ClosureError>
where
    F: Fn(&LocalState) -> Result<f64, DomainViolation>,
{
    patch.check(patchi)?;
    let mut out = DVector::zeros(patch.n_faces());
    for facei in 0..patch.n_faces() {
        let local = patch.local_face(facei, inputs);
        out[facei] = f(&local).map_err(|v| {
            v.at(
                pair,
                Location::Face {
                    patch: patchi,
                    face: facei,
                },
            )
        })?;
    }
    Ok(out)
}

/// Point formula evaluated over every cell and every patch face, written into `out`
pub fn evaluate_field_into<F>(
    state: &FieldState,
    inputs: &PairInputs,
    pair: &str,
    out: &mut ScalarField,
    f: F,
) -> Result<(), ClosureError>
where
    F: Fn(&LocalState) -> Result<f64, DomainViolation>,
{
    out.reshape_like(state.Tt);
    for celli in 0..state.n_cells() {
        let local = state.local_cell(celli, inputs);
        out.internal_mut()[celli] = f(&local).map_err(|v| v.at(pair, Location::Cell(celli)))?;
    }
    for patchi in 0..state.n_patches() {
        let patch = state.patch(patchi)?;
        let values = evaluate_patch(&patch, patchi, inputs, pair, &f)?;
        if let Some(b) = out.patch_mut(patchi) {
            b.copy_from(&values);
        }
    }
    Ok(())
}
