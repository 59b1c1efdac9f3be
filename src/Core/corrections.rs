//! Correction terms applied on top of a base closure fit when the local state leaves the
//! fit's reference regime. Each correction decides for itself whether it is active; an
//! inactive correction returns the base value untouched.
use super::closure_error::{DomainViolation, validate_finite, validate_temperature};
use super::constants::{ATM, R_U, SMALL};
use super::fields::LocalState;
use super::species::CollisionType;
use std::f64::consts::PI;

pub trait CorrectionTerm {
    /// regime-detection predicate
    fn is_active(&self, local: &LocalState) -> bool;
    /// adjusted value, only called when `is_active` holds
    fn correct(&self, base: f64, local: &LocalState) -> Result<f64, DomainViolation>;
    /// rejects inputs the regime predicate cannot classify
    fn check_inputs(&self, _local: &LocalState) -> Result<(), DomainViolation> {
        Ok(())
    }

    fn apply(&self, base: f64, local: &LocalState) -> Result<f64, DomainViolation> {
        self.check_inputs(local)?;
        if self.is_active(local) {
            self.correct(base, local)
        } else {
            Ok(base)
        }
    }
}

/// Park's high-temperature correction of the Millikan-White relaxation time:
/// tau_P = 1 / (sigma_v cbar n), sigma_v = sigma1 (sigma2 / Tt)^2, cbar = sqrt(8 R Tt / (pi W1))
#[derive(Debug, Clone, PartialEq)]
pub struct ParkCorrection {
    /// limiting cross section, m^2
    pub sigma1: f64,
    /// reference temperature of the cross section, K
    pub sigma2: f64,
    /// molecular weight of the vibrating species, g/mol
    pub W1: f64,
    /// the correction is applied for Tt >= this value, K
    pub temperature_threshold: f64,
    /// species-with-itself pair: the partner density is counted once
    pub diagonal: bool,
}

impl ParkCorrection {
    pub fn partner_density(&self, local: &LocalState) -> f64 {
        let n1 = local.n1.unwrap_or(0.0);
        if self.diagonal {
            n1
        } else {
            n1 + local.n2.unwrap_or(0.0)
        }
    }

    /// mean molecular speed of the vibrating species, m/s
    pub fn mean_speed(&self, Tt: f64) -> f64 {
        (8.0 * R_U * Tt / (PI * self.W1 * 1e-3)).sqrt()
    }

    pub fn tau_park(&self, local: &LocalState) -> Result<f64, DomainViolation> {
        validate_temperature(local.Tt)?;
        let sigma_v = self.sigma1 * (self.sigma2 / local.Tt).powi(2);
        let tau = 1.0 / (sigma_v * self.mean_speed(local.Tt) * self.partner_density(local));
        validate_finite("Park relaxation time", tau)
    }
}

impl CorrectionTerm for ParkCorrection {
    fn is_active(&self, local: &LocalState) -> bool {
        local.Tt >= self.temperature_threshold && self.partner_density(local) > SMALL
    }

    fn correct(&self, base: f64, local: &LocalState) -> Result<f64, DomainViolation> {
        Ok(base + self.tau_park(local)?)
    }
}

/// Rescaling of a charged-pair collision fit for an electron pressure other than the
/// fit's reference one (Gupta-Yos 1989, eq. 40b). Active only for `collision type > 1`
/// and an electron pressure above SMALL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonNominalPeCorrection {
    pub collision_type: CollisionType,
}

impl NonNominalPeCorrection {
    /// ratio of the Coulomb logarithms, `pe` in atm
    pub fn factor(T: f64, pe: f64) -> f64 {
        let nominal = 2.09e-14 * T.powi(4) + 1.52 * (T / 1000.0).powf(8.0 / 3.0);
        let actual = 2.09e-14 * (T / pe).powi(4) + 1.52 * (T / (1000.0 * pe)).powf(8.0 / 3.0);
        nominal.ln() / actual.ln()
    }
}

impl CorrectionTerm for NonNominalPeCorrection {
    // a NaN electron pressure would otherwise fail `pe > SMALL` and switch the correction off
    fn check_inputs(&self, local: &LocalState) -> Result<(), DomainViolation> {
        validate_finite("electron pressure", local.pe).map(|_| ())
    }

    fn is_active(&self, local: &LocalState) -> bool {
        self.collision_type.code() > 1 && local.pe > SMALL
    }

    fn correct(&self, base: f64, local: &LocalState) -> Result<f64, DomainViolation> {
        validate_temperature(local.Tt)?;
        let factor = validate_finite(
            "electron pressure correction",
            Self::factor(local.Tt, local.pe / ATM),
        )?;
        Ok(base * factor)
    }
}
