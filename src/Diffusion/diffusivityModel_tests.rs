#[cfg(test)]
mod tests {
    use crate::Core::closure_error::ClosureError;
    use crate::Core::constants::ATM;
    use crate::Core::dictionary::Dictionary;
    use crate::Core::fields::{FieldState, ScalarField};
    use crate::Diffusion::binaryDiffusivity_api::{BinaryDiffusivityModel, BinaryDiffusivityType};
    use crate::Diffusion::diffusivityModel::{DiffusivityModel, mixture_averaged_diffusivity};
    use approx::assert_relative_eq;
    use serde_json::json;

    fn species() -> Vec<String> {
        ["N2", "O", "N+", "e-"].iter().map(|s| s.to_string()).collect()
    }

    fn thermo() -> Dictionary {
        Dictionary::new(
            "thermoDEM",
            json!({
                "N2": { "specie": { "molWeight": 28.0134 } },
                "O": { "specie": { "molWeight": 15.9994 } },
                "N+": { "specie": { "molWeight": 14.0062 } },
                "e-": { "specie": { "molWeight": 5.48579909e-4 } }
            }),
        )
        .unwrap()
    }

    fn transport(with_all_pairs: bool) -> Dictionary {
        let mut dbar = json!({
            "N2_N2": [0.0, 0.0, 1.7, -11.0],
            "N2_O": [0.0115, -0.2057, 3.1566, -11.6063],
            "N2_N+": [0.0, 0.0, 1.6, -10.5],
            "e-_N2": [0.0, 0.0, 1.4, -7.0],
            "O_O": [0.0, 0.0, 1.7, -10.8],
            "O_N+": [0.0, 0.0, 1.6, -10.4],
            "O_e-": [0.0, 0.0, 1.4, -6.9],
            "N+_N+": [0.0, -0.0152, 2.4817, -8.9054],
            "N+_e-": [0.0, -0.0152, 2.4817, -8.9054],
            "e-_e-": [0.0, -0.0152, 2.4817, -4.9054]
        });
        if !with_all_pairs {
            if let Some(map) = dbar.as_object_mut() {
                map.remove("O_N+");
            }
        }
        Dictionary::new(
            "transportProperties",
            json!({
                "transportModels": {
                    "binaryDiffusivityModel": "collisionData",
                    "diffusiveFluxesParameters": { "collisionDataModel": "GuptaD" }
                },
                "collisionData": {
                    "neutralNeutralInteractions": { "GuptaD": { "Dbar": dbar } }
                }
            }),
        )
        .unwrap()
    }

    struct Gas {
        p: ScalarField,
        Tt: ScalarField,
        nD: Vec<ScalarField>,
        pe: ScalarField,
    }

    impl Gas {
        fn new() -> Self {
            let shape = |name: &str, cells: Vec<f64>, face: Vec<f64>| {
                ScalarField::from_values(name, cells, vec![face])
            };
            Self {
                p: shape("p", vec![ATM, 1e4, 2e3], vec![5e3, 1e3]),
                Tt: shape("Tt", vec![300.0, 6000.0, 12000.0], vec![9000.0, 15000.0]),
                nD: vec![
                    shape("nD_N2", vec![2.4e25, 1e23, 1e21], vec![1e22, 1e20]),
                    shape("nD_O", vec![1e10, 2e22, 5e21], vec![1e21, 1e20]),
                    shape("nD_N+", vec![0.0, 1e18, 1e21], vec![1e19, 1e20]),
                    shape("nD_e-", vec![0.0, 1e18, 1e21], vec![1e19, 1e20]),
                ],
                pe: shape("pe", vec![0.0, 0.1, 200.0], vec![5.0, 20.0]),
            }
        }

        fn state(&self) -> FieldState<'_> {
            FieldState::new(&self.p, &self.Tt, &[], &self.nD)
                .unwrap()
                .with_electron_pressure(&self.pe)
                .unwrap()
        }
    }

    #[test]
    fn test_missing_pair_fails_construction() {
        let err = DiffusivityModel::new(&thermo(), &transport(false), &species()).unwrap_err();
        match err {
            ClosureError::Configuration { reason, .. } => assert!(reason.contains("(O, N+)")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_matrix_layout_and_guard() {
        let mut model = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        assert_eq!(model.kind(), BinaryDiffusivityType::CollisionDataD);
        assert!(matches!(model.D(0, 1), Err(ClosureError::NotYetComputed { .. })));
        let gas = Gas::new();
        model.update(&gas.state()).unwrap();
        for (i, a) in species().iter().enumerate() {
            for (j, b) in species().iter().enumerate() {
                assert_eq!(model.D(i, j).unwrap().name(), format!("D_{}_{}", a, b));
                assert_eq!(model.model(i, j).unwrap().pair().key(), format!("{}_{}", a, b));
            }
        }
        assert!(matches!(model.D(4, 0), Err(ClosureError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_symmetric_fit_gives_symmetric_matrix() {
        let mut model = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        let gas = Gas::new();
        model.update(&gas.state()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let (a, b) = (model.D(i, j).unwrap(), model.D(j, i).unwrap());
                assert_eq!(a.internal(), b.internal());
                assert_eq!(a.boundary(), b.boundary());
            }
        }
    }

    #[test]
    fn test_parallel_update_and_idempotence() {
        let gas = Gas::new();
        let mut seq = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        let mut par = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        seq.update(&gas.state()).unwrap();
        let first = seq.D(2, 3).unwrap().clone();
        seq.update(&gas.state()).unwrap();
        assert_eq!(seq.D(2, 3).unwrap(), &first);
        par.update_parallel(&gas.state()).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(seq.D(i, j).unwrap(), par.D(i, j).unwrap());
            }
        }
    }

    #[test]
    fn test_boundary_path_and_failure() {
        let mut model = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        let mut gas = Gas::new();
        let state = gas.state();
        model.update(&state).unwrap();
        let patch = state.patch(0).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let on_patch = model.D_patch(i, j, 0, &patch).unwrap();
                assert_eq!(model.D(i, j).unwrap().patch(0).unwrap(), &on_patch);
            }
        }
        gas.p.patch_mut(0).unwrap()[1] = -1.0;
        let err = model.update(&gas.state()).unwrap_err();
        assert!(matches!(err, ClosureError::Domain { quantity: "pressure", .. }));
        assert!(!model.is_computed());
    }

    #[test]
    fn test_mixture_averaged() {
        // binary mixture: D_im reduces to D_ij
        let D = mixture_averaged_diffusivity(0, &[1.0, 3.0e-4], &[1.0, 3.0]).unwrap();
        assert_relative_eq!(D, 3.0e-4);
        // pure species: self-diffusivity
        let D = mixture_averaged_diffusivity(1, &[1.0, 2.0e-4], &[0.0, 3.0]).unwrap();
        assert_relative_eq!(D, 2.0e-4);
        let D = mixture_averaged_diffusivity(0, &[1.0, 1.0e-4, 2.0e-4], &[1.0, 1.0, 2.0]).unwrap();
        assert_relative_eq!(D, 0.75 / (0.25 / 1.0e-4 + 0.5 / 2.0e-4));

        let mut model = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        let gas = Gas::new();
        let state = gas.state();
        model.update(&state).unwrap();
        let mix = model.mixture_averaged(1, &state).unwrap();
        assert_eq!(mix.name(), "Dmix_O");
        assert!(mix.same_shape(&gas.Tt));
        assert!(mix.min() > 0.0);
        // cell 0 is nearly pure N2: D_O,mix tends to D_O,N2
        assert_relative_eq!(
            mix.internal()[0],
            model.D(1, 0).unwrap().internal()[0],
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_mixture_averaged_on_another_mesh_is_an_error() {
        let mut model = DiffusivityModel::new(&thermo(), &transport(true), &species()).unwrap();
        let gas = Gas::new();
        model.update(&gas.state()).unwrap();
        let uniform = |name: &str, value: f64| ScalarField::uniform(name, 5, &[2], value);
        let (p, Tt) = (uniform("p", 1e4), uniform("Tt", 6000.0));
        let nD: Vec<ScalarField> = (0..4).map(|k| uniform(&format!("nD_{}", k), 1e22)).collect();
        let larger = FieldState::new(&p, &Tt, &[], &nD).unwrap();
        let err = model.mixture_averaged(0, &larger).unwrap_err();
        assert!(matches!(
            err,
            ClosureError::FieldMismatch { expected: 3, found: 5, .. }
        ));
        // same cell count, different patch layout
        let (p, Tt) = (
            ScalarField::uniform("p", 3, &[3], 1e4),
            ScalarField::uniform("Tt", 3, &[3], 6000.0),
        );
        let nD: Vec<ScalarField> =
            (0..4).map(|k| ScalarField::uniform(&format!("nD_{}", k), 3, &[3], 1e22)).collect();
        let reshaped = FieldState::new(&p, &Tt, &[], &nD).unwrap();
        assert!(matches!(
            model.mixture_averaged(0, &reshaped),
            Err(ClosureError::FieldMismatch { .. })
        ));
    }
}
