//! # Chapman-Enskog Binary Diffusivity from Lennard-Jones Parameters
//!
//! D = 3/16 sqrt(2 pi (k T)^3 / mu) / (p pi sigma^2 Omega(1,1)*) [m^2/s]
//!
//! sigma = (sigma_1 + sigma_2) / 2, eps/k = sqrt(eps_1/k eps_2/k), both from the `transport`
//! entries of the thermophysical dictionary; Omega(1,1)* from Hirschfelder's fit in T* = T k / eps.
use super::binaryDiffusivity_api::{BinaryDiffusivityModel, BinaryDiffusivityType};
use crate::Core::closure_error::{
    ClosureError, DomainViolation, validate_finite, validate_pressure, validate_temperature,
};
use crate::Core::constants::{A2_TO_M2, K_B, N_A};
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::LocalState;
use crate::Core::species::SpeciesPair;
use crate::Core::thermo_properties::{SpeciesProperties, reduced_molecular_weight};
use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct ChapmanEnskog {
    pair: SpeciesPair,
    /// collision diameter, m
    sigma: f64,
    /// well depth, K
    e_k: f64,
    /// reduced mass, kg
    mu: f64,
}

impl ChapmanEnskog {
    pub fn new(pair: SpeciesPair, dict_thermo_phy: &Dictionary) -> Result<Self, ClosureError> {
        let sp1 = SpeciesProperties::from_dictionary(dict_thermo_phy, pair.name1())?;
        let sp2 = SpeciesProperties::from_dictionary(dict_thermo_phy, pair.name2())?;
        let lj1 = sp1.lennard_jones(&format!("{}/{}", dict_thermo_phy.name(), pair.name1()))?;
        let lj2 = sp2.lennard_jones(&format!("{}/{}", dict_thermo_phy.name(), pair.name2()))?;
        if lj1.diam <= 0.0 || lj2.diam <= 0.0 || lj1.well_depth <= 0.0 || lj2.well_depth <= 0.0 {
            return Err(ClosureError::configuration(
                dict_thermo_phy.name(),
                format!("Lennard-Jones parameters of {} must be positive", pair.key()),
            ));
        }
        // sigma^2 in m^2, hence the diameter in m
        let sigma = 0.5 * (lj1.diam + lj2.diam) * A2_TO_M2.sqrt();
        let e_k = (lj1.well_depth * lj2.well_depth).sqrt();
        let mu = reduced_molecular_weight(sp1.molecular_weight(), sp2.molecular_weight()) * 1e-3 / N_A;
        Ok(Self {
            pair,
            sigma,
            e_k,
            mu,
        })
    }
}

/// reduced collision integral Omega(1,1)* for non-polar molecules (Hirschfelder)
pub fn omega_11(T_star: f64) -> f64 {
    let a = 1.06036;
    let b = 0.15610;
    let c = 0.19300;
    let d = 0.47635;
    let e = 1.03587;
    let f = 1.52996;
    let g = 1.76474;
    let h = 3.89411;
    a / T_star.powf(b) + c / (d * T_star).exp() + e / (f * T_star).exp() + g / (h * T_star).exp()
}

impl BinaryDiffusivityModel for ChapmanEnskog {
    fn pair(&self) -> &SpeciesPair {
        &self.pair
    }

    fn kind(&self) -> BinaryDiffusivityType {
        BinaryDiffusivityType::ChapmanEnskog
    }

    fn D_local(&self, local: &LocalState) -> Result<f64, DomainViolation> {
        validate_temperature(local.Tt)?;
        validate_pressure(local.p)?;
        let kT = K_B * local.Tt;
        let omega = omega_11(local.Tt / self.e_k);
        let D = 3.0 / 16.0 * (2.0 * PI * kT.powi(3) / self.mu).sqrt()
            / (local.p * PI * self.sigma.powi(2) * omega);
        validate_finite("binary diffusivity", D)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Core::constants::ATM;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn thermo() -> Dictionary {
        Dictionary::new(
            "thermoDEM",
            json!({
                "N2": { "specie": { "molWeight": 28.0134 }, "transport": { "diam": 3.621, "well_depth": 97.53 } },
                "O2": { "specie": { "molWeight": 31.9988 }, "transport": { "diam": 3.458, "well_depth": 107.4 } },
                "O": { "specie": { "molWeight": 15.9994 } }
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_omega_11_fit() {
        // tabulated values of Omega(1,1)*
        assert_relative_eq!(omega_11(1.0), 1.440, max_relative = 2e-3);
        assert_relative_eq!(omega_11(10.0), 0.7424, max_relative = 2e-3);
    }

    #[test]
    fn test_n2_o2_at_room_temperature() {
        let model = ChapmanEnskog::new(SpeciesPair::new("N2", "O2", 0, 1), &thermo()).unwrap();
        let D = model.D_local(&LocalState::new(ATM, 300.0)).unwrap();
        // measured value about 0.2 cm^2/s
        assert_relative_eq!(D, 2.0e-5, max_relative = 0.15);
        let symmetric = ChapmanEnskog::new(SpeciesPair::new("O2", "N2", 1, 0), &thermo()).unwrap();
        assert_relative_eq!(
            symmetric.D_local(&LocalState::new(ATM, 300.0)).unwrap(),
            D,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_missing_lennard_jones_entry() {
        let err = ChapmanEnskog::new(SpeciesPair::new("N2", "O", 0, 2), &thermo()).unwrap_err();
        assert!(matches!(err, ClosureError::Configuration { .. }));
    }
}
