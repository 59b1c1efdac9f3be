use crate::Core::closure_error::{ClosureError, Location};
use crate::Core::constants::K_B;
use crate::Core::dictionary::Dictionary;
use crate::Core::fields::{FieldState, LocalState, ScalarField};
use crate::Core::species::SpeciesPair;
use crate::Diffusion::diffusivityModel::DiffusivityModel;
use crate::Relaxation::VTModel::VTModel;
use crate::Relaxation::VTRelaxation_api::{
    VTRelaxationModel, VTRelaxationSettings, create_vt_relaxation_model,
};
use crate::Relaxation::relaxationTimeModel::RelaxationTimeModel;
use log::info;
use prettytable::{Table, row};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Uniform gas state of a small test domain, read from `state.json`
#[derive(Debug, Deserialize)]
pub struct UniformState {
    pub species: Vec<String>,
    pub solvedVibEqSpecies: Vec<String>,
    pub nCells: usize,
    pub patchSizes: Vec<usize>,
    /// Pa
    pub p: f64,
    /// K
    pub Tt: f64,
    /// vibrational temperature of each species in `solvedVibEqSpecies`, K
    pub Tv: HashMap<String, f64>,
    /// mole fractions
    pub X: HashMap<String, f64>,
}

/// Owned fields built from a `UniformState`; `state()` lends them out as a `FieldState`
pub struct StateFields {
    pub p: ScalarField,
    pub Tt: ScalarField,
    pub Tv: Vec<ScalarField>,
    pub nD: Vec<ScalarField>,
    pub pe: ScalarField,
}

impl UniformState {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClosureError> {
        let file = File::open(path.as_ref())?;
        let state: UniformState = serde_json::from_reader(BufReader::new(file))?;
        Ok(state)
    }

    pub fn fields(&self) -> Result<StateFields, ClosureError> {
        let uniform = |name: &str, value: f64| {
            ScalarField::uniform(name, self.nCells, &self.patchSizes, value)
        };
        let n_total = self.p / (K_B * self.Tt);
        let Tv = self
            .solvedVibEqSpecies
            .iter()
            .map(|name| {
                let T = self.Tv.get(name).ok_or_else(|| {
                    ClosureError::configuration("state/Tv", format!("missing entry '{}'", name))
                })?;
                Ok(uniform(&format!("Tv_{}", name), *T))
            })
            .collect::<Result<Vec<_>, ClosureError>>()?;
        let nD: Vec<ScalarField> = self
            .species
            .iter()
            .map(|name| {
                let x = self.X.get(name).copied().unwrap_or(0.0);
                uniform(&format!("nD_{}", name), x * n_total)
            })
            .collect();
        let x_e = self.X.get("e-").copied().unwrap_or(0.0);
        Ok(StateFields {
            p: uniform("p", self.p),
            Tt: uniform("Tt", self.Tt),
            Tv,
            nD,
            pe: uniform("pe", x_e * self.p),
        })
    }
}

impl StateFields {
    pub fn state(&self) -> Result<FieldState<'_>, ClosureError> {
        FieldState::new(&self.p, &self.Tt, &self.Tv, &self.nD)?.with_electron_pressure(&self.pe)
    }
}

fn data_file(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(name)
}

pub fn closures_examples(task: usize, data_dir: &Path) -> Result<(), ClosureError> {
    let thermo = Dictionary::from_file(data_file(data_dir, "thermoDEM.json"))?;
    let setup = UniformState::from_file(data_file(data_dir, "state.json"))?;
    let fields = setup.fields()?;
    let state = fields.state()?;
    match task {
        0 => {
            // V-T relaxation times of every vibrating species with every partner
            let dict2T = Dictionary::from_file(data_file(data_dir, "twoTemperatureDictionary.json"))?;
            let mut vt = VTModel::new(&dict2T, &thermo, &setup.solvedVibEqSpecies, &setup.species)?;
            vt.update_parallel(&state)?;
            vt.pretty_print()?;
        }
        1 => {
            // binary and mixture-averaged diffusivities from Gupta-Yos D-bar fits
            let transport = Dictionary::from_file(data_file(data_dir, "transportProperties.json"))?;
            let mut diffusion = DiffusivityModel::new(&thermo, &transport, &setup.species)?;
            diffusion.update(&state)?;
            diffusion.pretty_print()?;
            let mut table = Table::new();
            table.add_row(row!["Species", "D_mix, m2/s"]);
            for (i, name) in setup.species.iter().enumerate() {
                let mix = diffusion.mixture_averaged(i, &state)?;
                table.add_row(row![name, format!("{:.4e}", mix.max())]);
            }
            table.printstd();
        }
        2 => {
            // mixture relaxation times and Landau-Teller sources
            let dict2T = Dictionary::from_file(data_file(data_dir, "twoTemperatureDictionary.json"))?;
            let mut relax =
                RelaxationTimeModel::new(&dict2T, &thermo, &setup.solvedVibEqSpecies, &setup.species)?;
            relax.update(&state)?;
            let mut table = Table::new();
            table.add_row(row!["Species", "tau_VT, s", "QVT, W/m3"]);
            for (i, name) in setup.solvedVibEqSpecies.iter().enumerate() {
                table.add_row(row![
                    name,
                    format!("{:.4e}", relax.tau_mixture(i)?.max()),
                    format!("{:.4e}", relax.QVT(i)?.max())
                ]);
            }
            table.printstd();
        }
        3 => {
            // Chapman-Enskog diffusivities of the neutral species
            let transport = Dictionary::from_file(data_file(data_dir, "transportPropertiesCE.json"))?;
            let neutrals: Vec<String> = setup
                .species
                .iter()
                .filter(|s| !s.ends_with('-') && !s.ends_with('+'))
                .cloned()
                .collect();
            let nD: Vec<ScalarField> = setup
                .species
                .iter()
                .zip(&fields.nD)
                .filter(|(s, _)| neutrals.contains(s))
                .map(|(_, n)| n.clone())
                .collect();
            let neutral_state = FieldState::new(&fields.p, &fields.Tt, &fields.Tv, &nD)?;
            let mut diffusion = DiffusivityModel::new(&thermo, &transport, &neutrals)?;
            diffusion.update(&neutral_state)?;
            diffusion.pretty_print()?;
        }
        4 => {
            // one Millikan-White closure evaluated pointwise over a temperature sweep
            let dict2T = Dictionary::from_file(data_file(data_dir, "twoTemperatureDictionary.json"))?;
            let settings = VTRelaxationSettings::from_dictionary(&dict2T)?;
            let model =
                create_vt_relaxation_model(SpeciesPair::new("N2", "N2", 0, 0), 0, &settings, &thermo)?;
            let mut table = Table::new();
            table.add_row(row!["Tt, K", "p tau, atm s"]);
            for T in [1000.0, 2000.0, 5000.0, 10000.0, 20000.0] {
                let tau = model
                    .tau_vt_local(&LocalState::new(101325.0, T))
                    .map_err(|v| v.at(&model.pair().key(), Location::Cell(0)))?;
                table.add_row(row![format!("{}", T), format!("{:.4e}", tau)]);
            }
            table.printstd();
        }
        _ => {
            info!("no example with number {}", task);
        }
    }
    Ok(())
}
