use modloader_rs::host::StaticHostInfo;
use modloader_rs::package::import::manifests_from_str;
use modloader_rs::relationship_resolver::*;
use modloader_rs::settings::MemorySettings;
use modloader_rs::{EngineConfig, Version};

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",           "Show help");
		opts.optflag( "v", "verbose",        "Increased vebosity");
		opts.optopt(  "s", "settings",       "User settings file", "FILE");
		opts.optopt(  "c", "config",         "Engine config file", "FILE");
		opts.optopt(  "",  "host-version",   "Version of the host application", "VERSION");
		opts.optflag( "",  "action-handler", "Treat actions as runnable");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: modloader-rs-terminal <manifests.json> [options]"));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	if let Err(e) = run(&parsed_options) {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

fn run(options: &getopts::Matches) -> Result<(), Error> {
	let manifest_path = options.free.first().ok_or(Error::MissingArgument("manifest file"))?;
	let (packages, rejected) = manifests_from_str(&std::fs::read_to_string(manifest_path)?)?;
	log::debug!("Read {} manifests from {}", packages.len(), manifest_path);
	for e in &rejected {
		println!("Skipped manifest: {}", e);
	}

	let settings = match options.opt_str("s") {
		Some(path) => Some(MemorySettings::from_json(&std::fs::read_to_string(path)?)?),
		None => None,
	};

	let config = match options.opt_str("c") {
		Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?)?,
		None => EngineConfig::default(),
	};

	let mut host = StaticHostInfo::new(Version::new(env!("CARGO_PKG_VERSION"))?)
		.with_action_handler(options.opt_present("action-handler"));
	if let Some(v) = options.opt_str("host-version") {
		host = host.with_host_version(Version::new(&v)?);
	}

	let phases = config.phases().to_vec();
	let mut builder = SessionBuilder::new(&host).add_packages(packages).config(config);
	if let Some(settings) = &settings {
		builder = builder.settings(settings);
	}
	let outcome = builder.build().resolve();

	print_outcome(&outcome, &phases);
	Ok(())
}

fn print_outcome(outcome: &ResolutionOutcome, phases: &[String]) {
	println!("Enabled packages:");
	for package in outcome.enabled_packages() {
		println!("\t{}", package);
	}

	println!("Phases:");
	/* Scheduling order rather than the map's */
	for phase in phases {
		let packages = outcome.phase(phase);
		if packages.is_empty() { continue; }
		let names = packages.iter().map(|p| p.id()).collect::<Vec<_>>();
		println!("\t{}: {}", phase, names.join(", "));
	}

	let disabled = outcome.disabled_packages().collect::<Vec<_>>();
	if !disabled.is_empty() {
		println!("Disabled packages:");
		for package in disabled {
			for notice in package.notices() {
				println!("\t{} [{}] {}", package, notice.reason, notice.message);
			}
		}
	}

	for warning in outcome.warnings() {
		println!("Warning: {}", warning);
	}
	if !outcome.is_converged() {
		println!("Resolution stopped after {} passes, results may be incomplete.", outcome.passes());
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("modloader-rs error: {0}")]
	ModloaderRs(#[from] modloader_rs::Error),
	#[error("Missing argument: {0}")]
	MissingArgument(&'static str),
}
