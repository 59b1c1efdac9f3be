use super::closure_error::{ClosureError, validate_molar_mass};
use super::constants::{N_A, R_U};
use super::dictionary::Dictionary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpecieInput {
    /// molecular weight, g/mol
    pub molWeight: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ThermodynamicsInput {
    /// pairs (degeneracy, characteristic vibrational temperature in K)
    #[serde(default)]
    pub vibrationalList: Vec<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LennardJonesInput {
    ///  Lennard-Jones collision diameter in angstroms
    pub diam: f64,
    /// Lennard-Jones well depth in Kelvin
    pub well_depth: f64,
}

/// One species entry of the thermophysical dictionary
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpeciesProperties {
    pub specie: SpecieInput,
    #[serde(default)]
    pub thermodynamics: ThermodynamicsInput,
    #[serde(default)]
    pub transport: Option<LennardJonesInput>,
}

impl SpeciesProperties {
    pub fn from_dictionary(dict: &Dictionary, name: &str) -> Result<Self, ClosureError> {
        let props: SpeciesProperties = dict.lookup(name)?;
        let context = format!("{}/{}", dict.name(), name);
        validate_molar_mass(&context, props.specie.molWeight)?;
        let list = &props.thermodynamics.vibrationalList;
        if list.len() % 2 != 0 {
            return Err(ClosureError::configuration(
                context,
                "vibrationalList must hold (degeneracy, thetaV) pairs",
            ));
        }
        if list.chunks(2).any(|m| m[1] <= 0.0) {
            return Err(ClosureError::configuration(
                context,
                "characteristic vibrational temperatures must be positive",
            ));
        }
        Ok(props)
    }

    /// g/mol
    pub fn molecular_weight(&self) -> f64 {
        self.specie.molWeight
    }

    /// kg per particle
    pub fn particle_mass(&self) -> f64 {
        self.specie.molWeight * 1e-3 / N_A
    }

    pub fn vibrational_modes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.thermodynamics
            .vibrationalList
            .chunks(2)
            .map(|m| (m[0], m[1]))
    }

    pub fn first_theta_v(&self) -> Option<f64> {
        self.vibrational_modes().next().map(|(_, theta)| theta)
    }

    /// harmonic oscillator vibrational energy, J/kg
    pub fn vibrational_energy(&self, T: f64) -> f64 {
        let R = R_U / (self.specie.molWeight * 1e-3);
        self.vibrational_modes()
            .map(|(g, theta)| g * R * theta / ((theta / T).exp() - 1.0))
            .sum()
    }

    pub fn lennard_jones(&self, context: &str) -> Result<&LennardJonesInput, ClosureError> {
        self.transport.as_ref().ok_or_else(|| {
            ClosureError::configuration(context, "Lennard-Jones 'transport' entry is missing")
        })
    }
}

/// reduced molecular weight, same units as the inputs
pub fn reduced_molecular_weight(w1: f64, w2: f64) -> f64 {
    w1 * w2 / (w1 + w2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn thermo() -> Dictionary {
        Dictionary::new(
            "thermoDEM",
            json!({
                "N2": {
                    "specie": { "molWeight": 28.0134 },
                    "thermodynamics": { "vibrationalList": [1, 3371] },
                    "transport": { "diam": 3.621, "well_depth": 97.53 }
                },
                "N": { "specie": { "molWeight": 14.0067 } },
                "X": { "specie": { "molWeight": -1.0 } },
                "Y": { "specie": { "molWeight": 10.0 }, "thermodynamics": { "vibrationalList": [1] } }
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_species_entry() {
        let dict = thermo();
        let n2 = SpeciesProperties::from_dictionary(&dict, "N2").unwrap();
        assert_eq!(n2.molecular_weight(), 28.0134);
        assert_eq!(n2.first_theta_v(), Some(3371.0));
        assert_relative_eq!(n2.lennard_jones("N2").unwrap().diam, 3.621);
        let n = SpeciesProperties::from_dictionary(&dict, "N").unwrap();
        assert!(n.first_theta_v().is_none());
        assert_eq!(n.vibrational_energy(5000.0), 0.0);
        assert!(n.lennard_jones("N").is_err());
    }

    #[test]
    fn test_bad_entries() {
        let dict = thermo();
        assert!(SpeciesProperties::from_dictionary(&dict, "X").is_err());
        assert!(SpeciesProperties::from_dictionary(&dict, "Y").is_err());
        assert!(SpeciesProperties::from_dictionary(&dict, "O2").is_err());
    }

    #[test]
    fn test_vibrational_energy_limits() {
        let n2 = SpeciesProperties::from_dictionary(&thermo(), "N2").unwrap();
        let R = R_U / 28.0134e-3;
        // classical limit: ev -> R (T - theta/2) for T >> theta
        let T = 1.0e6;
        assert_relative_eq!(n2.vibrational_energy(T), R * (T - 3371.0 / 2.0), max_relative = 1e-5);
        assert!(n2.vibrational_energy(100.0) < 1e-6 * n2.vibrational_energy(5000.0));
    }

    #[test]
    fn test_reduced_weight() {
        assert_relative_eq!(reduced_molecular_weight(28.0, 28.0), 14.0);
        assert_relative_eq!(reduced_molecular_weight(28.0, 16.0), 28.0 * 16.0 / 44.0);
    }
}
