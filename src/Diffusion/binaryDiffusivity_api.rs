//! # Binary Diffusivity Models API
//!
//! ## Aim
//! Common contract of the binary diffusion coefficient closures and the factory that selects
//! one from the transport dictionary.
//!
//! ## Main Data Structures and Logic
//! - `BinaryDiffusivityModel`: a variant implements `D_local`, the point formula in m^2/s;
//!   field and patch evaluation are shared.
//! - `BinaryDiffusivityEnum`: variants dispatched with `enum_dispatch`.
//! - `BinaryDiffusivityType`: registered model names. The configured name is
//!   `transportModels/binaryDiffusivityModel`, completed for "collisionData" with the last
//!   letter of `diffusiveFluxesParameters/collisionDataModel` ("GuptaD" -> "collisionDataD").
//! - `collision_data_coefficients()`: the four fit coefficients of a pair in
//!   `collisionData/neutralNeutralInteractions/<collisionDataModel>/<table>`. Fits are symmetric,
//!   so "sp2_sp1" is searched when "sp1_sp2" is absent.
use super::ChapmanEnskog::ChapmanEnskog;
use super::collisionDataD::CollisionDataD;
use super::collisionDataO::CollisionDataO;
use crate::Core::closure_error::{ClosureError, DomainViolation};
use crate::Core::dictionary::{Dictionary, fixed_list};
use crate::Core::fields::{
    FieldState, LocalState, PairInputs, PatchState, ScalarField, evaluate_field_into,
    evaluate_patch,
};
use crate::Core::species::SpeciesPair;
use enum_dispatch::enum_dispatch;
use log::debug;
use nalgebra::DVector;

#[enum_dispatch]
pub trait BinaryDiffusivityModel {
    fn pair(&self) -> &SpeciesPair;
    fn kind(&self) -> BinaryDiffusivityType;
    /// binary diffusion coefficient at one point, m^2/s
    fn D_local(&self, local: &LocalState) -> Result<f64, DomainViolation>;

    fn inputs(&self) -> PairInputs {
        PairInputs {
            vib: None,
            species1: self.pair().index1(),
            species2: self.pair().index2(),
        }
    }

    fn D_into(&self, state: &FieldState, out: &mut ScalarField) -> Result<(), ClosureError> {
        evaluate_field_into(state, &self.inputs(), &self.pair().key(), out, |local| {
            self.D_local(local)
        })
    }

    /// binary diffusion coefficient over all cells and patch faces [m^2/s]
    fn D(&self, state: &FieldState) -> Result<ScalarField, ClosureError> {
        let mut out = ScalarField::empty(&format!("D_{}", self.pair().key()));
        self.D_into(state, &mut out)?;
        Ok(out)
    }

    /// binary diffusion coefficient for patch [m^2/s]
    fn D_patch(&self, patchi: usize, patch: &PatchState) -> Result<DVector<f64>, ClosureError> {
        evaluate_patch(patch, patchi, &self.inputs(), &self.pair().key(), |local| {
            self.D_local(local)
        })
    }
}

/////////////////////////////////////////////////////////////////////////////////////////
#[derive(Debug, Clone)]
#[enum_dispatch(BinaryDiffusivityModel)]
pub enum BinaryDiffusivityEnum {
    CollisionDataD(CollisionDataD),
    CollisionDataO(CollisionDataO),
    ChapmanEnskog(ChapmanEnskog),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryDiffusivityType {
    CollisionDataD,
    CollisionDataO,
    ChapmanEnskog,
}

impl BinaryDiffusivityType {
    pub const ALL: [BinaryDiffusivityType; 3] = [
        BinaryDiffusivityType::CollisionDataD,
        BinaryDiffusivityType::CollisionDataO,
        BinaryDiffusivityType::ChapmanEnskog,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BinaryDiffusivityType::CollisionDataD => "collisionDataD",
            BinaryDiffusivityType::CollisionDataO => "collisionDataO",
            BinaryDiffusivityType::ChapmanEnskog => "ChapmanEnskog",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ClosureError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ClosureError::UnknownModelKind {
                kind: name.to_owned(),
                valid: Self::ALL.iter().map(|k| k.name().to_owned()).collect(),
            })
    }

    /// model type named by the transport dictionary
    pub fn from_dictionary(dict_transport: &Dictionary) -> Result<Self, ClosureError> {
        let models = dict_transport.sub_dict("transportModels")?;
        let mut name = models.lookup_word("binaryDiffusivityModel")?;
        if name == "collisionData" {
            let data_model = collision_data_model(dict_transport)?;
            if let Some(last) = data_model.chars().last() {
                name.push(last);
            }
        }
        Self::from_name(&name)
    }
}

/// `transportModels/diffusiveFluxesParameters/collisionDataModel`
pub fn collision_data_model(dict_transport: &Dictionary) -> Result<String, ClosureError> {
    dict_transport
        .sub_dict("transportModels")?
        .sub_dict("diffusiveFluxesParameters")?
        .lookup_word("collisionDataModel")
}

/// Four coefficients of `table` ("Dbar", "Omega11") for `pair`, "sp1_sp2" first then "sp2_sp1"
pub fn collision_data_coefficients(
    dict_transport: &Dictionary,
    table: &str,
    pair: &SpeciesPair,
) -> Result<[f64; 4], ClosureError> {
    let data_model = collision_data_model(dict_transport)?;
    let coefficients = dict_transport
        .sub_dict("collisionData")?
        .sub_dict("neutralNeutralInteractions")?
        .sub_dict(&data_model)?
        .sub_dict(table)?;
    let key = [pair.key(), pair.reversed_key()]
        .into_iter()
        .find(|k| coefficients.found(k))
        .ok_or_else(|| {
            ClosureError::configuration(
                coefficients.name(),
                format!(
                    "collision data missing for species couple ({}, {})",
                    pair.name1(),
                    pair.name2()
                ),
            )
        })?;
    let list: Vec<f64> = coefficients.lookup(&key)?;
    fixed_list::<4>(&format!("{}/{}", coefficients.name(), key), &list)
}

pub fn create_binary_diffusivity_model(
    pair: SpeciesPair,
    kind: BinaryDiffusivityType,
    dict_thermo_phy: &Dictionary,
    dict_transport: &Dictionary,
) -> Result<BinaryDiffusivityEnum, ClosureError> {
    debug!("binary diffusivity model for {}: {}", pair.key(), kind.name());
    let model = match kind {
        BinaryDiffusivityType::CollisionDataD => {
            BinaryDiffusivityEnum::CollisionDataD(CollisionDataD::new(pair, dict_transport)?)
        }
        BinaryDiffusivityType::CollisionDataO => BinaryDiffusivityEnum::CollisionDataO(
            CollisionDataO::new(pair, dict_thermo_phy, dict_transport)?,
        ),
        BinaryDiffusivityType::ChapmanEnskog => {
            BinaryDiffusivityEnum::ChapmanEnskog(ChapmanEnskog::new(pair, dict_thermo_phy)?)
        }
    };
    Ok(model)
}

/// Resolves the configured model type and builds the closure of `pair`
pub fn create_binary_diffusivity_model_by_name(
    pair: SpeciesPair,
    dict_thermo_phy: &Dictionary,
    dict_transport: &Dictionary,
) -> Result<BinaryDiffusivityEnum, ClosureError> {
    let kind = BinaryDiffusivityType::from_dictionary(dict_transport)?;
    create_binary_diffusivity_model(pair, kind, dict_thermo_phy, dict_transport)
}
