use super::*;
use crate::EngineConfig;

/// Known phases a package asks to run in, split by where the request came from.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct PhaseRequest {
	pub entry_points: Vec<String>,
	/// Only honored when something is installed to run actions.
	pub actions: Vec<String>,
}

impl PhaseRequest {
	fn is_empty(&self) -> bool {
		self.entry_points.is_empty() && self.actions.is_empty()
	}
}

/// Matches a package's entry points and merged actions against the configured phases.
///
/// `package.actions` should already have defaults merged.
pub(super) fn requested_phases(package: &PackageDescriptor, config: &EngineConfig) -> PhaseRequest {
	let mut request = PhaseRequest::default();
	for phase in config.phases() {
		if package.entry_points.iter().any(|e| &e.phase == phase) {
			request.entry_points.push(phase.clone());
		}
		if package.actions.iter().any(|a| a.runs_in_phase(phase, config.fallback_phase())) {
			request.actions.push(phase.clone());
		}
	}
	request
}

impl ResolutionSession<'_> {
	/// Rebuilds the phase map from the enabled packages, merging action defaults on the way.
	///
	/// With `enforce` packages that end up in no phase are disabled, returns if any were.
	pub(super) fn assign_phases(&mut self, enforce: bool) -> bool {
		self.phases.clear();
		let action_handler = self.host.has_action_handler();
		let mut removed = false;

		for id in self.enabled.clone() {
			let package = &mut self.packages[id.index()];
			package.actions = merge_defaults(&package.actions);
			let request = requested_phases(package, &self.config);

			let phases = self.config.phases()
				.iter()
				.filter(|p| request.entry_points.contains(*p) || (action_handler && request.actions.contains(*p)))
				.cloned()
				.collect::<Vec<_>>();

			if phases.is_empty() {
				if enforce {
					let notice = if request.is_empty() { Notice::no_phase() } else { Notice::no_action_mod() };
					self.disable(id, notice);
					removed = true;
				}
				continue;
			}

			for phase in phases {
				let bucket = self.phases.entry(phase).or_default();
				if !bucket.contains(&id) {
					bucket.push(id);
				}
			}
		}

		removed
	}
}
