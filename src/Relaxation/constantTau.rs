//! Fixed V-T relaxation time, coefficient list `[tau]` in seconds
use super::VTRelaxation_api::{PairEntry, VTRelaxationModel, VTRelaxationType};
use crate::Core::closure_error::{ClosureError, DomainViolation, validate_temperature};
use crate::Core::dictionary::fixed_list;
use crate::Core::fields::LocalState;
use crate::Core::species::SpeciesPair;

#[derive(Debug, Clone)]
pub struct ConstantTau {
    pair: SpeciesPair,
    vib_index: usize,
    tau: f64,
}

impl ConstantTau {
    pub fn new(pair: SpeciesPair, vib_index: usize, entry: &PairEntry) -> Result<Self, ClosureError> {
        let list = entry.coefficients.as_deref().ok_or_else(|| {
            ClosureError::configuration(&entry.context, "a constant relaxation time must be given")
        })?;
        let [tau] = fixed_list::<1>(&entry.context, list)?;
        if !(tau > 0.0 && tau.is_finite()) {
            return Err(ClosureError::configuration(
                &entry.context,
                format!("relaxation time must be positive, found {}", tau),
            ));
        }
        Ok(Self {
            pair,
            vib_index,
            tau,
        })
    }
}

impl VTRelaxationModel for ConstantTau {
    fn pair(&self) -> &SpeciesPair {
        &self.pair
    }

    fn vib_index(&self) -> usize {
        self.vib_index
    }

    fn kind(&self) -> VTRelaxationType {
        VTRelaxationType::Constant
    }

    fn tau_vt_local(&self, local: &LocalState) -> Result<f64, DomainViolation> {
        // same domain as the fitted models
        validate_temperature(local.Tt)?;
        Ok(self.tau)
    }
}
