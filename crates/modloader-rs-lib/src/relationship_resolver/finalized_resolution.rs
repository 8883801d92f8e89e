use super::*;

/// Everything a finished [`ResolutionSession`] produced.
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
	packages: Vec<PackageDescriptor>,
	enabled: Vec<PackageId>,
	phases: PhaseMap,
	warnings: Vec<SessionWarning>,
	passes: usize,
	converged: bool,
}

impl ResolutionOutcome {
	pub(super) fn new(packages: Vec<PackageDescriptor>, enabled: Vec<PackageId>, phases: PhaseMap, warnings: Vec<SessionWarning>, passes: usize, converged: bool) -> Self {
		Self {
			packages,
			enabled,
			phases,
			warnings,
			passes,
			converged,
		}
	}

	/// All packages the session was given, enabled or not.
	pub fn packages(&self) -> &[PackageDescriptor] {
		&self.packages
	}

	pub fn package(&self, id: PackageId) -> &PackageDescriptor {
		&self.packages[id.index()]
	}

	/// Enabled packages in load order.
	pub fn enabled(&self) -> &[PackageId] {
		&self.enabled
	}

	pub fn enabled_packages(&self) -> impl Iterator<Item = &PackageDescriptor> + '_ {
		self.enabled.iter().map(|id| &self.packages[id.index()])
	}

	/// Disabled packages in the order they were given to the session.
	pub fn disabled_packages(&self) -> impl Iterator<Item = &PackageDescriptor> + '_ {
		self.packages.iter().filter(|p| p.is_disabled())
	}

	pub fn phases(&self) -> &PhaseMap {
		&self.phases
	}

	/// Packages to run in `phase`, empty when the phase is unknown or nobody uses it.
	pub fn phase(&self, phase: &str) -> Vec<&PackageDescriptor> {
		self.phases
			.get(&phase.to_lowercase())
			.map(|ids| ids.iter().map(|id| &self.packages[id.index()]).collect())
			.unwrap_or_default()
	}

	pub fn warnings(&self) -> &[SessionWarning] {
		&self.warnings
	}

	pub fn passes(&self) -> usize {
		self.passes
	}

	/// `false` when the pass limit was hit.
	pub fn is_converged(&self) -> bool {
		self.converged
	}

	/// Gives the packages back, notices included.
	pub fn into_packages(self) -> Vec<PackageDescriptor> {
		self.packages
	}
}
