//! Tests for loading potentials from configuration files.

use std::io::Write;

use qpot_potentials::{Potential, PotentialConfig, PotentialError, registered_potentials};

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_yaml_file() {
    let file = write_config(
        ".yaml",
        "name: harmonic\nnum_qubits: 2\nm: 1.0\nomega: 2.0\nx0: -1.0\ndelta: 0.5\n",
    );
    let potential = PotentialConfig::load(file.path()).unwrap().build().unwrap();
    assert_eq!(potential.name(), "harmonic");
    assert_eq!(potential.num_qubits(), 2);
    assert_eq!(potential.value(0), 2.0);
    assert_eq!(potential.evolution_time(), 1.0);
}

#[test]
fn load_json_file() {
    let file = write_config(
        ".json",
        r#"{"name": "harmonic", "num_qubits": 3, "mass": 1.0, "omega": 1.0,
            "x0": 0.0, "delta": 0.25, "evolution_time": 0.1}"#,
    );
    let potential = PotentialConfig::load(file.path()).unwrap().build().unwrap();
    assert_eq!(potential.num_qubits(), 3);
    assert_eq!(potential.evolution_time(), 0.1);
    assert_eq!(potential.matrix().unwrap().dim(), (8, 8));
}

#[test]
fn load_reports_missing_file() {
    let err = PotentialConfig::load("/nonexistent/qpot/potential.yaml").unwrap_err();
    assert!(matches!(err, PotentialError::Io(_)));
}

#[test]
fn load_reports_bad_values() {
    let file = write_config(
        ".yml",
        "name: harmonic\nnum_qubits: 2\nm: .nan\nomega: 1.0\nx0: 0.0\ndelta: 1.0\n",
    );
    let config = PotentialConfig::load(file.path()).unwrap();
    assert!(matches!(
        config.build(),
        Err(PotentialError::InvalidParameter { name: "m", .. })
    ));
}

#[test]
fn registry_lists_harmonic() {
    let names: Vec<_> = registered_potentials().iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["harmonic"]);
    assert!(registered_potentials()[0].parameters.contains(&"delta"));
}
