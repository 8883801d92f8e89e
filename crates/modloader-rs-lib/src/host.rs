//! What the resolver needs to know about the environment it runs in.

use serde::{Serialize, Deserialize};

use crate::package::Version;

/// Supplies versions of the virtual targets and the installed capabilities.
pub trait HostInfo {
	/// `None` when the host application version couldn't be determined.
	fn host_version(&self) -> Option<Version>;
	fn loader_version(&self) -> Version;
	/// Whether any installed package runs declared actions.
	fn has_action_handler(&self) -> bool;
}

/// [`HostInfo`] from fixed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticHostInfo {
	pub host_version: Option<Version>,
	pub loader_version: Version,
	pub action_handler: bool,
}

impl StaticHostInfo {
	pub fn new(loader_version: Version) -> Self {
		Self {
			loader_version,
			..Default::default()
		}
	}

	pub fn with_host_version(mut self, version: Version) -> Self {
		self.host_version = Some(version);
		self
	}

	pub fn with_action_handler(mut self, action_handler: bool) -> Self {
		self.action_handler = action_handler;
		self
	}
}

impl HostInfo for StaticHostInfo {
	fn host_version(&self) -> Option<Version> {
		self.host_version
	}

	fn loader_version(&self) -> Version {
		self.loader_version
	}

	fn has_action_handler(&self) -> bool {
		self.action_handler
	}
}
