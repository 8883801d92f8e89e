use serde::{Serialize, Deserialize};

use crate::package::Version;

/// Tunables for a resolution session.
///
/// Phase names are always stored lowercase, the scheduler compares them that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	max_passes: usize,
	phases: Vec<String>,
	fallback_phase: String,
	legacy_loader_version: Version,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			max_passes: 30,
			phases: ["splashmod", "init", "mainmod", "homemod", "gamemod", "tacticalmod", "geoscapemod"]
				.into_iter()
				.map(String::from)
				.collect(),
			fallback_phase: "gamemod".to_string(),
			legacy_loader_version: Version::from_parts(0, 3, 0, 0),
		}
	}
}

impl EngineConfig {
	/// Reads a config from JSON, missing fields take their default value.
	pub fn from_json(s: &str) -> crate::Result<Self> {
		let mut config: EngineConfig = serde_json::from_str(s)?;
		if config.max_passes == 0 {
			return Err(crate::Error::Validation("max_passes must be at least 1".to_string()));
		}
		let phases = std::mem::take(&mut config.phases);
		config.set_phases(phases);
		let fallback_phase = std::mem::take(&mut config.fallback_phase);
		config.set_fallback_phase(fallback_phase);
		Ok(config)
	}

	pub fn max_passes(&self) -> usize {
		self.max_passes
	}
	/// returns if the value is valid or not.
	pub fn set_max_passes(&mut self, max_passes: usize) -> bool {
		if max_passes > 0 {
			self.max_passes = max_passes;
			true
		} else {
			false
		}
	}

	/// Known phases in scheduling order.
	pub fn phases(&self) -> &[String] {
		&self.phases
	}
	pub fn set_phases(&mut self, phases: impl IntoIterator<Item = impl AsRef<str>>) {
		self.phases = Vec::new();
		for phase in phases {
			let phase = phase.as_ref().trim().to_lowercase();
			if !phase.is_empty() && !self.phases.contains(&phase) {
				self.phases.push(phase);
			}
		}
	}

	/// Phase assumed for actions that don't name one.
	pub fn fallback_phase(&self) -> &str {
		&self.fallback_phase
	}
	pub fn set_fallback_phase(&mut self, phase: impl AsRef<str>) {
		self.fallback_phase = phase.as_ref().trim().to_lowercase();
	}

	pub fn legacy_loader_version(&self) -> Version {
		self.legacy_loader_version
	}
	pub fn set_legacy_loader_version(&mut self, version: Version) {
		self.legacy_loader_version = version;
	}
}
