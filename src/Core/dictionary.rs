//! # Dictionary Module
//!
//! ## Aim
//! Read-only access to the configuration dictionaries (thermophysical, two-temperature and
//! transport) that feed the closure models. A dictionary is a JSON object; nested objects
//! play the role of sub-dictionaries.
//!
//! ## Main Data Structures and Logic
//! - `Dictionary`: wraps a `serde_json::Value` together with its path ("dict2T/VTRelaxationModels")
//!   so that every lookup failure names exactly which entry is missing or malformed.
//!
//! ## Usage
//! ```rust, ignore
//! let dict2T = Dictionary::from_file("twoTemperatureDictionary.json")?;
//! let vt = dict2T.sub_dict("VTRelaxationModels")?;
//! let kind = vt.lookup_word("VTRelaxationModel")?;
//! let coeffs: [f64; 3] = vt.sub_dict("VTRelaxationCoefficients")?.lookup_fixed_list("N2_N2")?;
//! ```
use super::closure_error::ClosureError;
use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    name: String,
    value: Value,
}

impl Dictionary {
    pub fn new(name: &str, value: Value) -> Result<Self, ClosureError> {
        if !value.is_object() {
            return Err(ClosureError::configuration(
                name,
                "a dictionary must be a JSON object",
            ));
        }
        Ok(Self {
            name: name.to_owned(),
            value,
        })
    }

    /// Reads a dictionary from a JSON file; its name is the file stem
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClosureError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!("dictionary '{}' read from {}", name, path.display());
        Self::new(&name, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn found(&self, key: &str) -> bool {
        self.value.get(key).is_some()
    }

    /// keys of this dictionary, sorted
    pub fn toc(&self) -> Vec<String> {
        match &self.value {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn entry(&self, key: &str) -> Result<&Value, ClosureError> {
        self.value.get(key).ok_or_else(|| {
            ClosureError::configuration(&self.name, format!("entry '{}' is missing", key))
        })
    }

    pub fn sub_dict(&self, key: &str) -> Result<Dictionary, ClosureError> {
        let value = self.entry(key)?;
        Dictionary::new(&format!("{}/{}", self.name, key), value.clone())
    }

    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<T, ClosureError> {
        let value = self.entry(key)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            ClosureError::configuration(
                &self.name,
                format!("entry '{}' is malformed: {}", key, e),
            )
        })
    }

    pub fn lookup_or_default<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, ClosureError> {
        if self.found(key) {
            self.lookup(key)
        } else {
            Ok(default)
        }
    }

    pub fn lookup_word(&self, key: &str) -> Result<String, ClosureError> {
        self.lookup::<String>(key)
    }

    pub fn lookup_scalar(&self, key: &str) -> Result<f64, ClosureError> {
        self.lookup::<f64>(key)
    }

    /// A list with exactly `N` scalars. Shorter and longer lists are both rejected.
    pub fn lookup_fixed_list<const N: usize>(&self, key: &str) -> Result<[f64; N], ClosureError> {
        let list: Vec<f64> = self.lookup(key)?;
        fixed_list(&format!("{}/{}", self.name, key), &list)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }
}

/// Converts a coefficient list into a fixed-size tuple, rejecting any other length
pub fn fixed_list<const N: usize>(context: &str, list: &[f64]) -> Result<[f64; N], ClosureError> {
    list.try_into().map_err(|_| {
        ClosureError::configuration(
            context,
            format!("needs {} coefficients, found {}", N, list.len()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> Dictionary {
        Dictionary::new(
            "dict2T",
            json!({
                "VTRelaxationModels": {
                    "VTRelaxationModel": "MillikanWhitePark",
                    "ParkCorrection": true,
                    "VTRelaxationCoefficients": {
                        "N2_N2": [221.0, 0.029, 18.42],
                        "N2_O": [72.4, 0.015]
                    }
                }
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let dict = sample();
        let vt = dict.sub_dict("VTRelaxationModels").unwrap();
        assert_eq!(vt.name(), "dict2T/VTRelaxationModels");
        assert_eq!(vt.lookup_word("VTRelaxationModel").unwrap(), "MillikanWhitePark");
        assert!(vt.lookup::<bool>("ParkCorrection").unwrap());
        assert_eq!(vt.lookup_or_default("ParkTemperatureThreshold", 0.0).unwrap(), 0.0);
        let coeffs = vt.sub_dict("VTRelaxationCoefficients").unwrap();
        let c: [f64; 3] = coeffs.lookup_fixed_list("N2_N2").unwrap();
        assert_eq!(c, [221.0, 0.029, 18.42]);
    }

    #[test]
    fn test_short_list_is_configuration_error() {
        let coeffs = sample()
            .sub_dict("VTRelaxationModels")
            .unwrap()
            .sub_dict("VTRelaxationCoefficients")
            .unwrap();
        let err = coeffs.lookup_fixed_list::<3>("N2_O").unwrap_err();
        match err {
            ClosureError::Configuration { context, reason } => {
                assert_eq!(
                    context,
                    "dict2T/VTRelaxationModels/VTRelaxationCoefficients/N2_O"
                );
                assert!(reason.contains("needs 3 coefficients, found 2"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_entry() {
        let dict = sample();
        assert!(!dict.found("transportModels"));
        assert!(matches!(
            dict.sub_dict("transportModels"),
            Err(ClosureError::Configuration { .. })
        ));
        assert!(Dictionary::new("bad", json!([1, 2])).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"N2": {{"specie": {{"molWeight": 28.0134}}}}}}"#).unwrap();
        let dict = Dictionary::from_file(file.path()).unwrap();
        let w = dict.sub_dict("N2").unwrap().sub_dict("specie").unwrap();
        assert_eq!(w.lookup_scalar("molWeight").unwrap(), 28.0134);
    }
}
