//! # Gupta-Yos Collision Integral Binary Diffusivity
//!
//! ## Mathematical Correlations
//! - **Fit**: pi Omega(1,1) = exp(D) T^(A ln^2 T + B ln T + C) [Angstrom^2], coefficients `[A, B, C, D]`
//! - **Modified collision integral**: Delta1 = 8/3 sqrt(2 mu / (pi k T)) pi Omega(1,1), mu the reduced mass [kg]
//! - **First-order Chapman-Enskog**: D = k T / (p Delta1) [m^2/s]
//! - **Charged pairs**: multiplied by the non-nominal electron pressure correction
use super::binaryDiffusivity_api::{
    BinaryDiffusivityModel, BinaryDiffusivityType, collision_data_coefficients,
};
use crate::Core::closure_error::{
    ClosureError, DomainViolation, validate_finite, validate_pressure, validate_temperature,
};
use crate::Core::constants::{A2_TO_M2, K_B, N_A};
use crate::Core::corrections::{CorrectionTerm, NonNominalPeCorrection};
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::LocalState;
use crate::Core::species::SpeciesPair;
use crate::Core::thermo_properties::{SpeciesProperties, reduced_molecular_weight};
use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct CollisionDataO {
    pair: SpeciesPair,
    /// [A, B, C, D] of pi Omega(1,1) in Angstrom^2
    Omega11: [f64; 4],
    /// reduced mass, kg
    mu: f64,
    pe_correction: NonNominalPeCorrection,
}

impl CollisionDataO {
    pub fn new(
        pair: SpeciesPair,
        dict_thermo_phy: &Dictionary,
        dict_transport: &Dictionary,
    ) -> Result<Self, ClosureError> {
        let Omega11 = collision_data_coefficients(dict_transport, "Omega11", &pair)?;
        let W1 = SpeciesProperties::from_dictionary(dict_thermo_phy, pair.name1())?.molecular_weight();
        let W2 = SpeciesProperties::from_dictionary(dict_thermo_phy, pair.name2())?.molecular_weight();
        let mu = reduced_molecular_weight(W1, W2) * 1e-3 / N_A;
        let pe_correction = NonNominalPeCorrection {
            collision_type: pair.collision_type(),
        };
        Ok(Self {
            pair,
            Omega11,
            mu,
            pe_correction,
        })
    }

    /// pi Omega(1,1), m^2
    pub fn pi_omega11(&self, T: f64) -> f64 {
        let [A, B, C, D] = self.Omega11;
        let lnT = T.ln();
        A2_TO_M2 * D.exp() * T.powf(A * lnT * lnT + B * lnT + C)
    }

    /// modified collision integral Delta(1), m s
    pub fn delta1(&self, T: f64) -> f64 {
        8.0 / 3.0 * (2.0 * self.mu / (PI * K_B * T)).sqrt() * self.pi_omega11(T)
    }
}

impl BinaryDiffusivityModel for CollisionDataO {
    fn pair(&self) -> &SpeciesPair {
        &self.pair
    }

    fn kind(&self) -> BinaryDiffusivityType {
        BinaryDiffusivityType::CollisionDataO
    }

    fn D_local(&self, local: &LocalState) -> Result<f64, DomainViolation> {
        validate_temperature(local.Tt)?;
        validate_pressure(local.p)?;
        let D = validate_finite(
            "binary diffusivity",
            K_B * local.Tt / (local.p * self.delta1(local.Tt)),
        )?;
        self.pe_correction.apply(D, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Core::constants::ATM;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn dicts() -> (Dictionary, Dictionary) {
        let thermo = Dictionary::new(
            "thermoDEM",
            json!({
                "N2": { "specie": { "molWeight": 28.0134 } },
                "O": { "specie": { "molWeight": 15.9994 } }
            }),
        )
        .unwrap();
        let transport = Dictionary::new(
            "transportProperties",
            json!({
                "transportModels": {
                    "binaryDiffusivityModel": "collisionData",
                    "diffusiveFluxesParameters": { "collisionDataModel": "GuptaO" }
                },
                "collisionData": {
                    "neutralNeutralInteractions": {
                        "GuptaO": { "Omega11": {
                            "O_N2": [0.0, -0.0179, 0.0, 3.0]
                        } }
                    }
                }
            }),
        )
        .unwrap();
        (thermo, transport)
    }

    #[test]
    fn test_chapman_enskog_relation() {
        let (thermo, transport) = dicts();
        let model =
            CollisionDataO::new(SpeciesPair::new("N2", "O", 0, 1), &thermo, &transport).unwrap();
        let T: f64 = 4000.0;
        let lnT = T.ln();
        let sigma = 1e-20 * 3.0f64.exp() * T.powf(-0.0179 * lnT);
        let mu = 28.0134 * 15.9994 / (28.0134 + 15.9994) * 1e-3 / N_A;
        let delta = 8.0 / 3.0 * (2.0 * mu / (PI * K_B * T)).sqrt() * sigma;
        let expected = K_B * T / (ATM * delta);
        let D = model.D_local(&LocalState::new(ATM, T)).unwrap();
        assert_relative_eq!(D, expected, max_relative = 1e-10);
        // order of magnitude of a neutral pair at 1 atm, 4000 K
        assert!(D > 1e-3 && D < 1e-1, "D = {}", D);
        assert_eq!(model.kind(), BinaryDiffusivityType::CollisionDataO);
    }

    #[test]
    fn test_missing_species_entry() {
        let (_, transport) = dicts();
        let thermo = Dictionary::new("thermoDEM", json!({ "N2": { "specie": { "molWeight": 28.0 } } })).unwrap();
        assert!(matches!(
            CollisionDataO::new(SpeciesPair::new("N2", "O", 0, 1), &thermo, &transport),
            Err(ClosureError::Configuration { .. })
        ));
    }
}
