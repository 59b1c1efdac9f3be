/// error type shared by all closures, validation helpers
pub mod closure_error;
/// physical constants
pub mod constants;
/// correction terms (Park, non-nominal electron pressure)
pub mod corrections;
/// configuration dictionaries backed by JSON
pub mod dictionary;
/// cell/boundary scalar fields and the read-only gas state
pub mod fields;
/// species pairs, collision types and the pair matrix
pub mod species;
/// per-species entries of the thermophysical dictionary
pub mod thermo_properties;
