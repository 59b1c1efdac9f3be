/// common trait, enum dispatch and factory of the V-T relaxation time closures
pub mod VTRelaxation_api;
/// Millikan-White fit with Park's high temperature correction
pub mod MillikanWhitePark;
/// fixed relaxation time per pair
pub mod constantTau;
/// matrix of pairwise V-T relaxation times over all vibrating species and partners
pub mod VTModel;
/// mixture relaxation times and Landau-Teller V-T energy sources
pub mod relaxationTimeModel;
