//! # V-T Relaxation Models API
//!
//! ## Aim
//! Common contract of every vibrational-translational relaxation time closure and the factory
//! that picks the closure of a species pair from the two-temperature dictionary.
//!
//! ## Main Data Structures and Logic
//! - `VTRelaxationModel`: the evaluation contract. A variant only implements the point formula
//!   `tau_vt_local`; whole-field and single-patch evaluation are provided on top of it.
//! - `VTRelaxationEnum`: closed set of variants dispatched with `enum_dispatch`.
//! - `VTRelaxationType`: registered model names.
//! - `VTRelaxationSettings`: the `VTRelaxationModels` sub-dictionary, parsed once.
//! - `create_vt_relaxation_model()`: resolves the kind and coefficients of one pair.
//!
//! ## Dictionary layout
//! ```json
//! "VTRelaxationModels": {
//!     "VTRelaxationModel": "MillikanWhitePark",
//!     "ParkCorrection": true,
//!     "ParkTemperatureThreshold": 0.0,
//!     "generalCorrelation": false,
//!     "VTRelaxationCoefficients": {
//!         "N2_N2": [221.0, 0.029, 18.42],
//!         "N2_O": { "model": "MillikanWhite", "coefficients": [72.4, 0.015, 18.42] },
//!         "O2_e-": { "model": "constant", "coefficients": [1.0e-7] }
//!     },
//!     "ParkCoefficients": { "default": [3.0e-21, 50000.0] }
//! }
//! ```
use super::MillikanWhitePark::MillikanWhitePark;
use super::constantTau::ConstantTau;
use crate::Core::closure_error::{ClosureError, DomainViolation};
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::{
    FieldState, LocalState, PairInputs, PatchState, ScalarField, evaluate_field_into,
    evaluate_patch,
};
use crate::Core::species::SpeciesPair;
use enum_dispatch::enum_dispatch;
use log::debug;
use nalgebra::DVector;
use serde_json::Value;

#[enum_dispatch]
pub trait VTRelaxationModel {
    fn pair(&self) -> &SpeciesPair;
    /// index of the vibrating species among the species with a solved vibrational equation
    fn vib_index(&self) -> usize;
    fn kind(&self) -> VTRelaxationType;
    /// V-T relaxation time at one point, s
    fn tau_vt_local(&self, local: &LocalState) -> Result<f64, DomainViolation>;

    fn inputs(&self) -> PairInputs {
        PairInputs {
            vib: Some(self.vib_index()),
            species1: self.pair().index1(),
            species2: self.pair().index2(),
        }
    }

    /// V-T relaxation time over all cells and patch faces, written into `out`
    fn tau_vt_into(&self, state: &FieldState, out: &mut ScalarField) -> Result<(), ClosureError> {
        evaluate_field_into(state, &self.inputs(), &self.pair().key(), out, |local| {
            self.tau_vt_local(local)
        })
    }

    /// V-T relaxation time over all cells and patch faces [s]
    fn tau_vt(&self, state: &FieldState) -> Result<ScalarField, ClosureError> {
        let mut out = ScalarField::empty(&format!("tauVT_{}", self.pair().key()));
        self.tau_vt_into(state, &mut out)?;
        Ok(out)
    }

    /// V-T relaxation time for patch [s]
    fn tau_vt_patch(
        &self,
        patchi: usize,
        patch: &PatchState,
    ) -> Result<DVector<f64>, ClosureError> {
        evaluate_patch(patch, patchi, &self.inputs(), &self.pair().key(), |local| {
            self.tau_vt_local(local)
        })
    }
}

/////////////////////////////////////////////////////////////////////////////////////////
// FACTORY METHODS  ////////////////////////////////////////////////////////////////////
#[derive(Debug, Clone)]
#[enum_dispatch(VTRelaxationModel)]
pub enum VTRelaxationEnum {
    MillikanWhitePark(MillikanWhitePark),
    Constant(ConstantTau),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VTRelaxationType {
    MillikanWhitePark,
    MillikanWhite,
    Constant,
}

impl VTRelaxationType {
    pub const ALL: [VTRelaxationType; 3] = [
        VTRelaxationType::MillikanWhitePark,
        VTRelaxationType::MillikanWhite,
        VTRelaxationType::Constant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VTRelaxationType::MillikanWhitePark => "MillikanWhitePark",
            VTRelaxationType::MillikanWhite => "MillikanWhite",
            VTRelaxationType::Constant => "constant",
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
}

/// Park's limiting cross section and its reference temperature
pub const PARK_DEFAULT_COEFFICIENTS: [f64; 2] = [3.0e-21, 50000.0];

/// Parsed `VTRelaxationModels` sub-dictionary
#[derive(Debug, Clone)]
pub struct VTRelaxationSettings {
    pub default_kind: String,
    pub park_correction: bool,
    pub park_temperature_threshold: f64,
    pub general_correlation: bool,
    coefficients: Option<Dictionary>,
    park_coefficients: Option<Dictionary>,
}

/// Kind and coefficient list configured for one pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairEntry {
    pub kind: VTRelaxationType,
    pub coefficients: Option<Vec<f64>>,
    pub context: String,
}

impl VTRelaxationSettings {
    pub fn from_dictionary(dict2T: &Dictionary) -> Result<Self, ClosureError> {
        let vt = dict2T.sub_dict("VTRelaxationModels")?;
        let default_kind = vt.lookup_word("VTRelaxationModel")?;
        // fail early on a misspelt global kind
        VTRelaxationType::from_name(&default_kind)?;
        let park_temperature_threshold = vt.lookup_or_default("ParkTemperatureThreshold", 0.0)?;
        if park_temperature_threshold < 0.0 {
            return Err(ClosureError::configuration(
                vt.name(),
                "ParkTemperatureThreshold must not be negative",
            ));
        }
        Ok(Self {
            default_kind,
            park_correction: vt.lookup_or_default("ParkCorrection", true)?,
            park_temperature_threshold,
            general_correlation: vt.lookup_or_default("generalCorrelation", false)?,
            coefficients: if vt.found("VTRelaxationCoefficients") {
                Some(vt.sub_dict("VTRelaxationCoefficients")?)
            } else {
                None
            },
            park_coefficients: if vt.found("ParkCoefficients") {
                Some(vt.sub_dict("ParkCoefficients")?)
            } else {
                None
            },
        })
    }

    /// Kind and coefficients of `pair`. V-T fits are ordered: only the "sp1_sp2" key is searched.
    pub fn pair_entry(&self, pair: &SpeciesPair) -> Result<PairEntry, ClosureError> {
        let default_kind = VTRelaxationType::from_name(&self.default_kind)?;
        let key = pair.key();
        let Some(coeffs) = self.coefficients.as_ref().filter(|c| c.found(&key)) else {
            return Ok(PairEntry {
                kind: default_kind,
                coefficients: None,
                context: format!("VTRelaxationCoefficients/{}", key),
            });
        };
        let context = format!("{}/{}", coeffs.name(), key);
        match coeffs.raw(&key) {
            Some(Value::Object(_)) => {
                let entry = coeffs.sub_dict(&key)?;
                let kind = if entry.found("model") {
                    VTRelaxationType::from_name(&entry.lookup_word("model")?)?
                } else {
                    default_kind
                };
                Ok(PairEntry {
                    kind,
                    coefficients: Some(entry.lookup("coefficients")?),
                    context,
                })
            }
            _ => Ok(PairEntry {
                kind: default_kind,
                coefficients: Some(coeffs.lookup(&key)?),
                context,
            }),
        }
    }

    /// [sigma1, sigma2] for the vibrating species: its own entry, then "default", then Park's values
    pub fn park_coefficients(&self, species: &str) -> Result<[f64; 2], ClosureError> {
        let coefficients = match &self.park_coefficients {
            Some(dict) if dict.found(species) => dict.lookup_fixed_list::<2>(species)?,
            Some(dict) if dict.found("default") => dict.lookup_fixed_list::<2>("default")?,
            _ => PARK_DEFAULT_COEFFICIENTS,
        };
        if coefficients.iter().any(|c| *c <= 0.0) {
            return Err(ClosureError::configuration(
                format!("ParkCoefficients/{}", species),
                "Park coefficients must be positive",
            ));
        }
        Ok(coefficients)
    }
}

/// Builds the V-T closure of `pair`; `vib_index` locates the first species among the
/// species with a solved vibrational equation.
pub fn create_vt_relaxation_model(
    pair: SpeciesPair,
    vib_index: usize,
    settings: &VTRelaxationSettings,
    dict_thermo_phy: &Dictionary,
) -> Result<VTRelaxationEnum, ClosureError> {
    let entry = settings.pair_entry(&pair)?;
    debug!(
        "V-T relaxation model for {}: {}",
        pair.key(),
        entry.kind.name()
    );
    let model = match entry.kind {
        VTRelaxationType::MillikanWhitePark | VTRelaxationType::MillikanWhite => {
            VTRelaxationEnum::MillikanWhitePark(MillikanWhitePark::new(
                pair,
                vib_index,
                &entry,
                settings,
                dict_thermo_phy,
            )?)
        }
        VTRelaxationType::Constant => {
            VTRelaxationEnum::Constant(ConstantTau::new(pair, vib_index, &entry)?)
        }
    };
    Ok(model)
}
