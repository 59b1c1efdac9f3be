//! # Millikan-White / Park V-T Relaxation Time
//!
//! ## Mathematical Correlations
//! - **Millikan-White**: tau_MW = (1 atm / p) exp(A (Tt^(-1/3) - B) - offset) [s], p in Pa
//! - **General correlation**: A = 1.16e-3 mu^0.5 thetaV^(4/3), B = 0.015 mu^0.25,
//!   mu the reduced molecular weight [g/mol], thetaV the first vibrational mode of the vibrating species
//! - **Park correction**: tau = tau_MW + 1 / (sigma_v cbar n), see `ParkCorrection`
//!
//! The coefficient list of a pair is `[A, B, offset]`.
use super::VTRelaxation_api::{PairEntry, VTRelaxationModel, VTRelaxationSettings, VTRelaxationType};
use crate::Core::closure_error::{
    ClosureError, DomainViolation, validate_finite, validate_pressure, validate_temperature,
};
use crate::Core::constants::{ATM, MW_OFFSET};
use crate::Core::corrections::{CorrectionTerm, ParkCorrection};
use crate::Core::dictionary::{Dictionary, fixed_list};
use crate::Core::fields::LocalState;
use crate::Core::species::SpeciesPair;
use crate::Core::thermo_properties::{SpeciesProperties, reduced_molecular_weight};
use log::info;

#[derive(Debug, Clone)]
pub struct MillikanWhitePark {
    pair: SpeciesPair,
    vib_index: usize,
    A12: f64,
    B12: f64,
    offset: f64,
    /// molecular weight of the vibrating species, g/mol
    W1: f64,
    park: Option<ParkCorrection>,
}

impl MillikanWhitePark {
    pub fn new(
        pair: SpeciesPair,
        vib_index: usize,
        entry: &PairEntry,
        settings: &VTRelaxationSettings,
        dict_thermo_phy: &Dictionary,
    ) -> Result<Self, ClosureError> {
        let sp1 = SpeciesProperties::from_dictionary(dict_thermo_phy, pair.name1())?;
        let sp2 = SpeciesProperties::from_dictionary(dict_thermo_phy, pair.name2())?;
        let W1 = sp1.molecular_weight();

        let [A12, B12, offset] = match &entry.coefficients {
            Some(list) => fixed_list::<3>(&entry.context, list)?,
            None if settings.general_correlation => {
                let theta_v = sp1.first_theta_v().ok_or_else(|| {
                    ClosureError::configuration(
                        format!("{}/{}", dict_thermo_phy.name(), pair.name1()),
                        "the general correlation needs a vibrational mode of the first species",
                    )
                })?;
                let mu = reduced_molecular_weight(W1, sp2.molecular_weight());
                info!(
                    "{}: no V-T coefficients given, Millikan-White general correlation used",
                    pair.key()
                );
                general_correlation(mu, theta_v)
            }
            None => {
                return Err(ClosureError::configuration(
                    &entry.context,
                    "V-T relaxation coefficients are missing and generalCorrelation is off",
                ));
            }
        };

        let park = if entry.kind == VTRelaxationType::MillikanWhitePark && settings.park_correction
        {
            let [sigma1, sigma2] = settings.park_coefficients(pair.name1())?;
            Some(ParkCorrection {
                sigma1,
                sigma2,
                W1,
                temperature_threshold: settings.park_temperature_threshold,
                diagonal: pair.is_diagonal(),
            })
        } else {
            None
        };

        Ok(Self {
            pair,
            vib_index,
            A12,
            B12,
            offset,
            W1,
            park,
        })
    }

    pub fn coefficients(&self) -> [f64; 3] {
        [self.A12, self.B12, self.offset]
    }

    pub fn molecular_weight(&self) -> f64 {
        self.W1
    }

    pub fn park(&self) -> Option<&ParkCorrection> {
        self.park.as_ref()
    }

    /// Millikan-White relaxation time without the Park term
    pub fn tau_millikan_white(&self, p: f64, Tt: f64) -> Result<f64, DomainViolation> {
        validate_temperature(Tt)?;
        validate_pressure(p)?;
        let tau = (ATM / p) * (self.A12 * (Tt.powf(-1.0 / 3.0) - self.B12) - self.offset).exp();
        validate_finite("Millikan-White relaxation time", tau)
    }
}

/// [A, B, offset] of the Millikan-White general correlation
pub fn general_correlation(mu: f64, theta_v: f64) -> [f64; 3] {
    [
        1.16e-3 * mu.sqrt() * theta_v.powf(4.0 / 3.0),
        0.015 * mu.powf(0.25),
        MW_OFFSET,
    ]
}

impl VTRelaxationModel for MillikanWhitePark {
    fn pair(&self) -> &SpeciesPair {
        &self.pair
    }

    fn vib_index(&self) -> usize {
        self.vib_index
    }

    fn kind(&self) -> VTRelaxationType {
        if self.park.is_some() {
            VTRelaxationType::MillikanWhitePark
        } else {
            VTRelaxationType::MillikanWhite
        }
    }

    fn tau_vt_local(&self, local: &LocalState) -> Result<f64, DomainViolation> {
        let tau = self.tau_millikan_white(local.p, local.Tt)?;
        match &self.park {
            Some(park) => park.apply(tau, local),
            None => Ok(tau),
        }
    }
}
