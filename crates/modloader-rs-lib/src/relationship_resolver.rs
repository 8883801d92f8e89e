//! Deciding which packages run, in what order and in which phases.
//!
//! # Usage
//! 1. Create a [`SessionBuilder`] with the [`HostInfo`](crate::HostInfo) to resolve against.
//! 1. Use the builder to add packages, user settings and config.
//! 1. [`SessionBuilder::build()`] to get a [`ResolutionSession`], overrides are applied at this point.
//! 1. [`ResolutionSession::resolve()`] to run the session to completion and get a [`ResolutionOutcome`] to query.
//!
//! # Process
//! Enabled packages are sorted by load index, key and preference, then duplicates are removed.
//! After that passes run until one removes nothing, up to [`EngineConfig::max_passes()`](crate::EngineConfig::max_passes()).
//! Each pass checks, in order: requirements, libraries nothing requires, avoids, disables and finally phases.
//! Avoids, disables and phases are only checked when nothing was removed earlier in the same pass.
//! Packages are only ever removed, every removal leaves a [`Notice`](crate::package::Notice) on the package.

use std::collections::BTreeMap;

use crate::package::*;

mod session_builder;
pub use session_builder::SessionBuilder;
mod resolution_session;
pub use resolution_session::ResolutionSession;
mod duplicates;
mod phase_scheduler;
mod finalized_resolution;
pub use finalized_resolution::ResolutionOutcome;

/// Phase name to the packages that run in it, in load order.
pub type PhaseMap = BTreeMap<String, Vec<PackageId>>;

/// Which constraint list of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
	Requires,
	Avoids,
	Disables,
}

impl std::fmt::Display for ConstraintKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConstraintKind::Requires => f.write_str("requires"),
			ConstraintKind::Avoids => f.write_str("avoids"),
			ConstraintKind::Disables => f.write_str("disables"),
		}
	}
}

/// Problems with a session that don't disable anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionWarning {
	/// A package names itself in a constraint, the constraint is ignored.
	#[error("package \"{package}\" {kind} itself, constraint ignored")]
	SelfReference { package: PackageKey, kind: ConstraintKind },
	/// The pass limit was reached while packages were still being removed.
	#[error("resolution did not settle after {passes} passes")]
	NotConverged { passes: usize },
}
