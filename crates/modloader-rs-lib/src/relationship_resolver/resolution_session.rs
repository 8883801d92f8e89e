//!

use std::collections::{HashMap, HashSet};

use super::*;
use crate::host::HostInfo;
use crate::EngineConfig;

/// A single resolve over a fixed set of packages.
///
/// The set of packages never changes during the session, the enabled subset only shrinks.
///
/// # Usage
/// Build with a [`SessionBuilder`] then call [`resolve()`](ResolutionSession::resolve()).
pub struct ResolutionSession<'a> {
	pub(super) host: &'a dyn HostInfo,
	pub(super) config: EngineConfig,

	pub(super) packages: Vec<PackageDescriptor>,
	/// Kept in load order.
	pub(super) enabled: Vec<PackageId>,
	/// Only filled once duplicates are gone.
	keys: HashMap<PackageKey, PackageId>,
	pub(super) phases: PhaseMap,

	warnings: Vec<SessionWarning>,
	passes: usize,
}

impl<'a> ResolutionSession<'a> {
	pub(super) fn new(host: &'a dyn HostInfo, config: EngineConfig, packages: Vec<PackageDescriptor>) -> Self {
		let enabled = packages.iter()
			.enumerate()
			.filter(|(_, p)| !p.is_disabled())
			.map(|(i, _)| PackageId::new(i))
			.collect();

		ResolutionSession {
			host,
			config,
			packages,
			enabled,
			keys: Default::default(),
			phases: Default::default(),
			warnings: Default::default(),
			passes: 0,
		}
	}

	pub fn packages(&self) -> &[PackageDescriptor] {
		&self.packages
	}

	pub fn package(&self, id: PackageId) -> &PackageDescriptor {
		&self.packages[id.index()]
	}

	pub fn enabled(&self) -> &[PackageId] {
		&self.enabled
	}

	/// Run every step of the resolve until a pass removes nothing or the pass limit is hit.
	///
	/// Hitting the limit is not an error, the outcome holds whatever was still enabled along with a
	/// [`SessionWarning::NotConverged`].
	pub fn resolve(mut self) -> ResolutionOutcome {
		log::debug!("Resolving {} packages, {} enabled", self.packages.len(), self.enabled.len());

		self.sort_enabled();
		self.remove_duplicates();
		self.keys = self.enabled.iter().map(|id| (self.packages[id.index()].key().clone(), *id)).collect();

		let mut converged = false;
		while self.passes < self.config.max_passes() {
			self.passes += 1;
			log::debug!("Pass {} with {} enabled packages", self.passes, self.enabled.len());
			if !self.run_pass() {
				converged = true;
				break;
			}
		}

		if !converged {
			log::warn!("Packages were still being removed after {} passes, using the current set", self.passes);
			self.warnings.push(SessionWarning::NotConverged { passes: self.passes });
			self.assign_phases(false);
		}

		log::info!("{} of {} packages enabled after {} passes", self.enabled.len(), self.packages.len(), self.passes);
		ResolutionOutcome::new(self.packages, self.enabled, self.phases, self.warnings, self.passes, converged)
	}

	/// Runs one pass, returns if any package was removed.
	fn run_pass(&mut self) -> bool {
		let (mut removed, dependees) = self.check_requirements();
		removed |= self.prune_libraries(&dependees);
		if removed {
			return true;
		}

		self.check_avoids() || self.check_disables() || self.assign_phases(true)
	}

	/// Looks up the version of whatever `target` names.
	///
	/// `None` when the target isn't present. A present package without a version counts as [`Version::ZERO`].
	pub fn resolve_target(&self, target: &Target) -> Option<Version> {
		match target {
			Target::Loader => Some(self.host.loader_version()),
			Target::Host => self.host.host_version(),
			Target::LegacyLoader => Some(self.config.legacy_loader_version()),
			Target::Absent => None,
			Target::Package(key) => self.find_enabled(key).map(|id| self.packages[id.index()].version.unwrap_or(Version::ZERO)),
		}
	}

	fn find_enabled(&self, key: &PackageKey) -> Option<PackageId> {
		if self.keys.is_empty() {
			/* Before duplicates are removed keys aren't unique */
			self.enabled.iter().copied().find(|id| self.packages[id.index()].key() == key)
		} else {
			self.keys.get(key).copied().filter(|id| self.is_enabled(*id))
		}
	}

	pub(super) fn is_enabled(&self, id: PackageId) -> bool {
		!self.packages[id.index()].is_disabled()
	}

	pub(super) fn disable(&mut self, id: PackageId, notice: Notice) {
		let package = &mut self.packages[id.index()];
		log::info!("Disabling \"{}\" ({}): {}", package.id(), notice.reason, notice.message);
		package.disable(notice);
		self.enabled.retain(|e| *e != id);
	}

	fn warn_self_reference(&mut self, package: PackageKey, kind: ConstraintKind) {
		let warning = SessionWarning::SelfReference { package, kind };
		if !self.warnings.contains(&warning) {
			log::warn!("{}", warning);
			self.warnings.push(warning);
		}
	}

	/// Orders enabled packages by load index, key then preference.
	fn sort_enabled(&mut self) {
		let packages = &self.packages;
		self.enabled.sort_by(|a, b| {
			let (a, b) = (&packages[a.index()], &packages[b.index()]);
			a.load_index.cmp(&b.load_index)
				.then_with(|| a.key().cmp(b.key()))
				.then_with(|| a.cmp_preference(b))
				.then_with(|| a.id().cmp(b.id()))
		});
	}

	/// Disables packages with an unmet requirement.
	///
	/// Returns if anything was removed and the keys of packages that some enabled package requires.
	fn check_requirements(&mut self) -> (bool, HashSet<PackageKey>) {
		let mut removed = false;
		let mut dependees = HashSet::<PackageKey>::new();
		let mut self_references = Vec::<PackageKey>::new();

		for id in self.enabled.clone() {
			if !self.is_enabled(id) { continue; }

			let package = &self.packages[id.index()];
			let mut satisfied = Vec::<PackageKey>::new();
			let mut failure = None;

			for (target, group) in group_by_target(&package.requires) {
				if target.as_package() == Some(package.key()) {
					self_references.push(package.key().clone());
					continue;
				}

				let found = self.resolve_target(target);
				if group.iter().any(|c| c.is_satisfied_by(found)) {
					log::trace!("\"{}\" requirement on \"{}\" met by {:?}", package.id(), target, found);
					if let Some(key) = target.as_package() {
						satisfied.push(key.clone());
					}
				} else {
					failure = Some(Notice::require(target, found, &group));
					break;
				}
			}

			match failure {
				Some(notice) => {
					self.disable(id, notice);
					removed = true;
				},
				None => dependees.extend(satisfied),
			}
		}

		for key in self_references {
			self.warn_self_reference(key, ConstraintKind::Requires);
		}

		(removed, dependees)
	}

	/// Disables libraries no package requires.
	fn prune_libraries(&mut self, dependees: &HashSet<PackageKey>) -> bool {
		let unused = self.enabled.iter()
			.copied()
			.filter(|id| {
				let package = &self.packages[id.index()];
				package.is_library() && !dependees.contains(package.key())
			})
			.collect::<Vec<_>>();

		for id in &unused {
			self.disable(*id, Notice::no_dependent());
		}
		!unused.is_empty()
	}

	/// Disables packages that avoid something present.
	fn check_avoids(&mut self) -> bool {
		let mut removed = false;
		let mut self_references = Vec::<PackageKey>::new();

		for id in self.enabled.clone() {
			if !self.is_enabled(id) { continue; }

			let package = &self.packages[id.index()];
			let mut avoided = None;

			for constraint in &package.avoids {
				if constraint.target.as_package() == Some(package.key()) {
					self_references.push(package.key().clone());
					continue;
				}

				if let Some(found) = self.resolve_target(&constraint.target) {
					if constraint.bounds.is_version_within(&found) {
						avoided = Some(Notice::avoid(&constraint.target, found));
						break;
					}
				}
			}

			if let Some(notice) = avoided {
				self.disable(id, notice);
				removed = true;
			}
		}

		for key in self_references {
			self.warn_self_reference(key, ConstraintKind::Avoids);
		}

		removed
	}

	/// Disables packages other packages disable.
	///
	/// Unlike avoids the package declaring the rule stays enabled.
	fn check_disables(&mut self) -> bool {
		let mut removed = false;
		let mut self_references = Vec::<PackageKey>::new();

		for id in self.enabled.clone() {
			if !self.is_enabled(id) { continue; }

			let package = &self.packages[id.index()];
			let mut victims = Vec::<PackageId>::new();

			for constraint in &package.disables {
				let Some(key) = constraint.target.as_package() else {
					log::debug!("\"{}\" can't disable \"{}\", ignored", package.id(), constraint.target);
					continue;
				};
				if key == package.key() {
					self_references.push(package.key().clone());
					continue;
				}

				let Some(target) = self.find_enabled(key) else { continue };
				let version = self.packages[target.index()].version.unwrap_or(Version::ZERO);
				if constraint.bounds.is_version_within(&version) && !victims.contains(&target) {
					victims.push(target);
				}
			}

			for victim in victims {
				let notice = Notice::disable(id, &self.packages[id.index()]);
				self.disable(victim, notice);
				removed = true;
			}
		}

		for key in self_references {
			self.warn_self_reference(key, ConstraintKind::Disables);
		}

		removed
	}
}

impl std::fmt::Debug for ResolutionSession<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolutionSession")
			.field("config", &self.config)
			.field("packages", &self.packages)
			.field("enabled", &self.enabled)
			.field("phases", &self.phases)
			.field("warnings", &self.warnings)
			.field("passes", &self.passes)
			.finish()
	}
}
