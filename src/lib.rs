#[allow(non_snake_case)]
pub mod Core;
#[allow(non_snake_case)]
pub mod Diffusion;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Relaxation;
