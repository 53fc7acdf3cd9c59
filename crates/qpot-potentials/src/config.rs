//! Serializable potential configuration and the potential registry.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PotentialError, PotentialResult};
use crate::harmonic::HarmonicPotential;
use crate::phase_polynomial::SynthesisStyle;
use crate::potential::Potential;

/// A potential described in a configuration file.
///
/// ```yaml
/// name: harmonic
/// num_qubits: 3
/// m: 1.0
/// omega: 1.0
/// x0: -2.0
/// delta: 0.5
/// evolution_time: 0.25
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum PotentialConfig {
    /// [`HarmonicPotential`].
    Harmonic(HarmonicConfig),
}

/// Parameters of a harmonic potential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConfig {
    /// Qubits on the position grid.
    pub num_qubits: u32,
    /// Mass.
    #[serde(alias = "mass")]
    pub m: f64,
    /// Angular frequency.
    pub omega: f64,
    /// Position of grid point 0.
    pub x0: f64,
    /// Grid spacing.
    pub delta: f64,
    /// Evolution time for circuit construction.
    #[serde(default = "default_evolution_time")]
    pub evolution_time: f64,
    /// Two-qubit gate style.
    #[serde(default)]
    pub synthesis: SynthesisStyle,
}

fn default_evolution_time() -> f64 {
    1.0
}

impl PotentialConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(source: &str) -> PotentialResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> PotentialResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> PotentialResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading potential configuration");
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    /// Registry name of the configured potential.
    pub fn name(&self) -> &'static str {
        match self {
            PotentialConfig::Harmonic(_) => "harmonic",
        }
    }

    /// Override the configured evolution time.
    #[must_use]
    pub fn with_evolution_time(mut self, time: f64) -> Self {
        match &mut self {
            PotentialConfig::Harmonic(c) => c.evolution_time = time,
        }
        self
    }

    /// Instantiate the configured potential.
    pub fn build(&self) -> PotentialResult<Box<dyn Potential>> {
        let potential: Box<dyn Potential> = match self {
            PotentialConfig::Harmonic(c) => Box::new(HarmonicPotential::try_from(c.clone())?),
        };
        info!(
            potential = potential.name(),
            num_qubits = potential.num_qubits(),
            "built potential"
        );
        Ok(potential)
    }
}

impl TryFrom<HarmonicConfig> for HarmonicPotential {
    type Error = PotentialError;

    fn try_from(c: HarmonicConfig) -> PotentialResult<Self> {
        Ok(
            HarmonicPotential::new(c.num_qubits, c.m, c.omega, c.x0, c.delta)?
                .with_evolution_time(c.evolution_time)?
                .with_synthesis(c.synthesis),
        )
    }
}

impl From<HarmonicPotential> for HarmonicConfig {
    fn from(h: HarmonicPotential) -> Self {
        Self::from(&h)
    }
}

impl From<&HarmonicPotential> for HarmonicConfig {
    fn from(h: &HarmonicPotential) -> Self {
        Self {
            num_qubits: h.num_qubits(),
            m: h.m(),
            omega: h.omega(),
            x0: h.x0(),
            delta: h.delta(),
            evolution_time: h.evolution_time(),
            synthesis: h.synthesis(),
        }
    }
}

/// Registry entry describing an available potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluggableInfo {
    /// Name used in configuration files.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Configuration keys, required ones first.
    pub parameters: &'static [&'static str],
}

const REGISTRY: &[PluggableInfo] = &[PluggableInfo {
    name: "harmonic",
    description: "Harmonic potential V(x) = 1/2 m omega^2 (x0 + delta j)^2",
    parameters: &[
        "num_qubits",
        "m",
        "omega",
        "x0",
        "delta",
        "evolution_time",
        "synthesis",
    ],
}];

/// All potentials that can be built from a [`PotentialConfig`].
pub fn registered_potentials() -> &'static [PluggableInfo] {
    REGISTRY
}

/// Look up a registry entry by name.
pub fn lookup(name: &str) -> PotentialResult<&'static PluggableInfo> {
    REGISTRY
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PotentialError::UnknownPotential(name.to_string()))
}
