/// common trait, enum dispatch and factory of the binary diffusivity closures
pub mod binaryDiffusivity_api;
/// Gupta-Yos D-bar fits
pub mod collisionDataD;
/// Gupta-Yos pi Omega(1,1) fits
pub mod collisionDataO;
/// Lennard-Jones Chapman-Enskog diffusivity
pub mod ChapmanEnskog;
/// matrix of binary diffusivities and mixture-averaged diffusivities
pub mod diffusivityModel;
mod diffusivityModel_tests;
