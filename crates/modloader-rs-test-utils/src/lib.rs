//! Various helper functions for testing
//!
//! Fixtures panic on bad input, they are only ever fed literals from tests.

use modloader_rs::package::{Action, EntryPoint, VersionConstraint};
use modloader_rs::relationship_resolver::{ResolutionOutcome, SessionBuilder};
use modloader_rs::host::StaticHostInfo;
use modloader_rs::{EngineConfig, PackageDescriptor, SettingsStore, Version};

pub fn version(s: &str) -> Version {
	Version::new(s).expect("fixture version should parse")
}

/// A host at version `1.0` running loader `2.0`, with an action handler installed.
pub fn host() -> StaticHostInfo {
	StaticHostInfo::new(version("2.0"))
		.with_host_version(version("1.0"))
		.with_action_handler(true)
}

/// Builds a [`PackageDescriptor`] that runs in the `gamemod` phase unless told otherwise.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
	inner: PackageDescriptor,
	default_entry: bool,
}

pub fn package(id: &str) -> PackageBuilder {
	PackageBuilder {
		inner: PackageDescriptor::new(id).expect("fixture id should be valid"),
		default_entry: true,
	}
}

fn bounds(min: Option<&str>, max: Option<&str>) -> (Option<Version>, Option<Version>) {
	(min.map(version), max.map(version))
}

impl PackageBuilder {
	pub fn version(mut self, v: &str) -> Self {
		self.inner.version = Some(version(v));
		self
	}

	pub fn requires(mut self, target: &str, min: Option<&str>, max: Option<&str>) -> Self {
		let (min, max) = bounds(min, max);
		self.inner.requires.push(VersionConstraint::new(target, min, max).expect("fixture target should be valid"));
		self
	}

	pub fn avoids(mut self, target: &str, min: Option<&str>, max: Option<&str>) -> Self {
		let (min, max) = bounds(min, max);
		self.inner.avoids.push(VersionConstraint::new(target, min, max).expect("fixture target should be valid"));
		self
	}

	pub fn disables(mut self, target: &str, min: Option<&str>, max: Option<&str>) -> Self {
		let (min, max) = bounds(min, max);
		self.inner.disables.push(VersionConstraint::new(target, min, max).expect("fixture target should be valid"));
		self
	}

	pub fn library(mut self) -> Self {
		self.inner.add_flag("library");
		self
	}

	pub fn load_index(mut self, index: i64) -> Self {
		self.inner.load_index = index;
		self
	}

	pub fn source(mut self, timestamp_secs: Option<u64>, size: Option<u64>) -> Self {
		self.inner.source_timestamp = timestamp_secs.map(|s| std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(s));
		self.inner.source_size = size;
		self
	}

	pub fn entry(mut self, phase: &str) -> Self {
		self.inner.entry_points.push(EntryPoint::new(format!("{}.Main", self.inner.id()), phase));
		self
	}

	/// Adds an action from a JSON object literal.
	pub fn action(mut self, fields: serde_json::Value) -> Self {
		let fields = fields.as_object().expect("fixture action should be an object").clone();
		self.inner.actions.push(Action::new(fields));
		self
	}

	/// Skips the `gamemod` entry point added by default.
	pub fn no_default_entry(mut self) -> Self {
		self.default_entry = false;
		self
	}

	pub fn build(mut self) -> PackageDescriptor {
		if self.default_entry && self.inner.entry_points.is_empty() && self.inner.actions.is_empty() {
			self = self.entry("gamemod");
		}
		self.inner
	}
}

/// Resolves `packages` against [`host()`] with the default config.
pub fn resolve(packages: impl IntoIterator<Item = PackageDescriptor>) -> ResolutionOutcome {
	let host = host();
	SessionBuilder::new(&host).add_packages(packages).build().resolve()
}

pub fn resolve_with(packages: impl IntoIterator<Item = PackageDescriptor>, host: &StaticHostInfo, settings: Option<&dyn SettingsStore>, config: EngineConfig) -> ResolutionOutcome {
	let mut builder = SessionBuilder::new(host).add_packages(packages).config(config);
	if let Some(settings) = settings {
		builder = builder.settings(settings);
	}
	builder.build().resolve()
}

/// Ids of the enabled packages in load order.
pub fn enabled_ids(outcome: &ResolutionOutcome) -> Vec<String> {
	outcome.enabled_packages().map(|p| p.id().to_string()).collect()
}

/// Ids of the packages in `phase` in load order.
pub fn phase_ids(outcome: &ResolutionOutcome, phase: &str) -> Vec<String> {
	outcome.phase(phase).into_iter().map(|p| p.id().to_string()).collect()
}

/// Looks a package up by its declared id, the first one if several share it.
pub fn find<'a>(outcome: &'a ResolutionOutcome, id: &str) -> &'a PackageDescriptor {
	outcome.packages().iter().find(|p| p.id() == id).expect("fixture package should exist")
}
