use std::fmt;
use thiserror::Error;

/// Where in the field a domain violation happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Cell(usize),
    Face { patch: usize, face: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell(celli) => write!(f, "cell {}", celli),
            Location::Face { patch, face } => write!(f, "patch {} face {}", patch, face),
        }
    }
}

/// Common error type for closure construction and evaluation
#[derive(Debug, Error)]
pub enum ClosureError {
    #[error("Configuration error in {context}: {reason}")]
    Configuration { context: String, reason: String },
    #[error("Unknown model kind '{kind}'. Valid kinds are: {}", valid.join(", "))]
    UnknownModelKind { kind: String, valid: Vec<String> },
    #[error("Invalid {quantity} = {value} for species pair {pair} at {location}")]
    Domain {
        pair: String,
        quantity: &'static str,
        value: f64,
        location: Location,
    },
    #[error("{what} requested before a successful update")]
    NotYetComputed { what: String },
    #[error("Pair index ({i}, {j}) outside a {rows} x {cols} matrix")]
    IndexOutOfRange {
        i: usize,
        j: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Field {field}: expected size {expected}, found {found}")]
    FieldMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClosureError {
    pub fn configuration(context: impl Into<String>, reason: impl Into<String>) -> Self {
        ClosureError::Configuration {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

/// Point-level failure of a closure formula. Field loops attach the pair
/// and the location and turn it into `ClosureError::Domain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainViolation {
    pub quantity: &'static str,
    pub value: f64,
}

impl DomainViolation {
    pub fn new(quantity: &'static str, value: f64) -> Self {
        Self { quantity, value }
    }

    pub fn at(self, pair: &str, location: Location) -> ClosureError {
        ClosureError::Domain {
            pair: pair.to_owned(),
            quantity: self.quantity,
            value: self.value,
            location,
        }
    }
}

// Helper functions for validation
pub fn validate_temperature(t: f64) -> Result<(), DomainViolation> {
    if t > 0.0 && t.is_finite() {
        Ok(())
    } else {
        Err(DomainViolation::new("temperature", t))
    }
}

pub fn validate_pressure(p: f64) -> Result<(), DomainViolation> {
    if p > 0.0 && p.is_finite() {
        Ok(())
    } else {
        Err(DomainViolation::new("pressure", p))
    }
}

pub fn validate_molar_mass(context: &str, m: f64) -> Result<(), ClosureError> {
    if m > 0.0 && m.is_finite() {
        Ok(())
    } else {
        Err(ClosureError::configuration(
            context,
            format!("invalid molecular weight {}", m),
        ))
    }
}

/// Non-finite results of a formula (log of a degenerate ratio, overflow)
pub fn validate_finite(quantity: &'static str, value: f64) -> Result<f64, DomainViolation> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainViolation::new(quantity, value))
    }
}
