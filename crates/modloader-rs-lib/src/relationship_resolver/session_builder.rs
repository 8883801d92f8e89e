use super::ResolutionSession;
use crate::host::HostInfo;
use crate::settings::SettingsStore;
use crate::EngineConfig;
use crate::package::*;

pub struct SessionBuilder<'a> {
	host: &'a dyn HostInfo,
	settings: Option<&'a dyn SettingsStore>,
	config: EngineConfig,

	packages: Vec<PackageDescriptor>,
}

impl<'a> SessionBuilder<'a> {
	pub fn new(host: &'a dyn HostInfo) -> Self {
		Self {
			host,
			settings: None,
			config: Default::default(),
			packages: Default::default(),
		}
	}

	pub fn add_packages(mut self, packages: impl IntoIterator<Item = PackageDescriptor>) -> Self {
		for package in packages {
			self.packages.push(package);
		}
		self
	}

	pub fn settings(mut self, settings: &'a dyn SettingsStore) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn config(mut self, config: EngineConfig) -> Self {
		self.config = config;
		self
	}

	/// Applies user overrides and hands the packages to a new session.
	///
	/// Packages disabled by their override get a [`Reason::Manual`] notice and never enter the enabled set.
	pub fn build(mut self) -> ResolutionSession<'a> {
		if let Some(settings) = self.settings {
			for package in &mut self.packages {
				let Some(value) = settings.get(package.key()) else { continue };
				if let Some(load_index) = value.load_index {
					log::trace!("Load index of \"{}\" overridden to {}", package.id(), load_index);
					package.load_index = load_index;
				}
				if value.log_level.is_some() {
					package.log_level = value.log_level.clone();
				}
				if value.disabled == Some(true) && !package.is_disabled() {
					log::info!("Package \"{}\" disabled by user settings", package.id());
					package.disable(Notice::manual());
				}
			}
		}

		ResolutionSession::new(self.host, self.config, self.packages)
	}
}

impl std::fmt::Debug for SessionBuilder<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionBuilder")
			.field("config", &self.config)
			.field("packages", &self.packages.len())
			.field("has_settings", &self.settings.is_some())
			.finish()
	}
}
