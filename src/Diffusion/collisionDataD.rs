//! # Gupta-Yos D-bar Binary Diffusivity
//!
//! ## Mathematical Correlations
//! - **Fit**: D_bar = exp(d) T^(a ln^2 T + b ln T + c) [cm^2 atm / s], coefficients `[a, b, c, d]`
//! - **SI**: the prefactor is converted once, d' = 1.01325e5 exp(d) / 1e4, so that
//!   D = d' T^(a ln^2 T + b ln T + c) / p [m^2/s] with p in Pa
//! - **Charged pairs**: multiplied by the non-nominal electron pressure correction, see
//!   `NonNominalPeCorrection`
use super::binaryDiffusivity_api::{
    BinaryDiffusivityModel, BinaryDiffusivityType, collision_data_coefficients,
};
use crate::Core::closure_error::{
    ClosureError, DomainViolation, validate_finite, validate_pressure, validate_temperature,
};
use crate::Core::constants::{ATM, CM2_TO_M2};
use crate::Core::corrections::{CorrectionTerm, NonNominalPeCorrection};
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::LocalState;
use crate::Core::species::SpeciesPair;

#[derive(Debug, Clone)]
pub struct CollisionDataD {
    pair: SpeciesPair,
    /// [a, b, c, d'] with d' already in Pa m^2/s
    Dbar: [f64; 4],
    pe_correction: NonNominalPeCorrection,
}

impl CollisionDataD {
    pub fn new(pair: SpeciesPair, dict_transport: &Dictionary) -> Result<Self, ClosureError> {
        let mut Dbar = collision_data_coefficients(dict_transport, "Dbar", &pair)?;
        Dbar[3] = ATM * Dbar[3].exp() * CM2_TO_M2;
        let pe_correction = NonNominalPeCorrection {
            collision_type: pair.collision_type(),
        };
        Ok(Self {
            pair,
            Dbar,
            pe_correction,
        })
    }

    /// p D, Pa m^2/s
    pub fn Dij_bar(&self, T: f64) -> f64 {
        let [a, b, c, d] = self.Dbar;
        let lnT = T.ln();
        d * T.powf(a * lnT * lnT + b * lnT + c)
    }
}

impl BinaryDiffusivityModel for CollisionDataD {
    fn pair(&self) -> &SpeciesPair {
        &self.pair
    }

    fn kind(&self) -> BinaryDiffusivityType {
        BinaryDiffusivityType::CollisionDataD
    }

    fn D_local(&self, local: &LocalState) -> Result<f64, DomainViolation> {
        validate_temperature(local.Tt)?;
        validate_pressure(local.p)?;
        let D = validate_finite("binary diffusivity", self.Dij_bar(local.Tt) / local.p)?;
        self.pe_correction.apply(D, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Core::fields::{FieldState, PatchState, ScalarField};
    use approx::assert_relative_eq;
    use serde_json::json;

    fn transport() -> Dictionary {
        Dictionary::new(
            "transportProperties",
            json!({
                "transportModels": {
                    "binaryDiffusivityModel": "collisionData",
                    "diffusiveFluxesParameters": { "collisionDataModel": "GuptaD" }
                },
                "collisionData": {
                    "neutralNeutralInteractions": {
                        "GuptaD": { "Dbar": {
                            "N2_O": [0.0115, -0.2057, 3.1566, -11.6063],
                            "N+_e-": [0.0, -0.0152, 2.4817, -8.9054]
                        } }
                    }
                }
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_si_conversion_at_one_atmosphere() {
        let model = CollisionDataD::new(SpeciesPair::new("N2", "O", 0, 1), &transport()).unwrap();
        for T in [300.0f64, 2000.0, 8000.0] {
            let lnT = T.ln();
            // hand conversion: cm^2/s at 1 atm -> m^2/s
            let expected = (-11.6063f64).exp()
                * T.powf(0.0115 * lnT * lnT - 0.2057 * lnT + 3.1566)
                * 1e-4;
            let D = model.D_local(&LocalState::new(ATM, T)).unwrap();
            assert_relative_eq!(D, expected, max_relative = 1e-6);
        }
        // inversely proportional to pressure
        let D1 = model.D_local(&LocalState::new(ATM, 5000.0)).unwrap();
        let D10 = model.D_local(&LocalState::new(10.0 * ATM, 5000.0)).unwrap();
        assert_relative_eq!(D1, 10.0 * D10, max_relative = 1e-12);
    }

    #[test]
    fn test_reversed_key_and_domain() {
        let model = CollisionDataD::new(SpeciesPair::new("O", "N2", 1, 0), &transport()).unwrap();
        assert_eq!(model.kind(), BinaryDiffusivityType::CollisionDataD);
        assert!(model.D_local(&LocalState::new(ATM, 0.0)).is_err());
        assert!(model.D_local(&LocalState::new(0.0, 1000.0)).is_err());
    }

    #[test]
    fn test_electron_pressure_correction() {
        let dict = transport();
        let charged = CollisionDataD::new(SpeciesPair::new("N+", "e-", 2, 3), &dict).unwrap();
        let neutral = CollisionDataD::new(SpeciesPair::new("N2", "O", 0, 1), &dict).unwrap();
        let mut local = LocalState::new(ATM, 10000.0);
        let base = charged.D_local(&local).unwrap();
        // no electron pressure: uncorrected
        assert_eq!(base, charged.Dij_bar(10000.0) / ATM);
        local.pe = 0.01 * ATM;
        let corrected = charged.D_local(&local).unwrap();
        assert_relative_eq!(
            corrected,
            base * NonNominalPeCorrection::factor(10000.0, 0.01),
            max_relative = 1e-12
        );
        assert!(corrected != base);
        // neutral pairs ignore the electron pressure
        let n0 = neutral.D_local(&LocalState::new(ATM, 10000.0)).unwrap();
        assert_eq!(neutral.D_local(&local).unwrap(), n0);
    }

    #[test]
    fn test_field_and_patch_with_electron_pressure() {
        let model =
            CollisionDataD::new(SpeciesPair::new("N+", "e-", 2, 3), &transport()).unwrap();
        let p = ScalarField::from_values("p", vec![1e4, 2e4], vec![vec![3e3, 4e3]]);
        let T = ScalarField::from_values("Tt", vec![9000.0, 12000.0], vec![vec![15000.0, 7000.0]]);
        let pe = ScalarField::from_values("pe", vec![10.0, 0.0], vec![vec![50.0, 1.0]]);
        let state = FieldState::new(&p, &T, &[], &[])
            .unwrap()
            .with_electron_pressure(&pe)
            .unwrap();
        let D = model.D(&state).unwrap();
        assert_eq!(D.name(), "D_N+_e-");
        let patch = PatchState::new(p.patch(0).unwrap().as_slice(), T.patch(0).unwrap().as_slice())
            .with_electron_pressure(pe.patch(0).unwrap().as_slice());
        assert_eq!(D.patch(0).unwrap(), &model.D_patch(0, &patch).unwrap());
        let mut local = LocalState::new(1e4, 9000.0);
        local.pe = 10.0;
        assert_eq!(D.internal()[0], model.D_local(&local).unwrap());
    }
}
