use modloader_rs::relationship_resolver::*;
use modloader_rs::package::{merge_defaults, PackageKey, Reason};
use modloader_rs::settings::{MemorySettings, UserOverride};
use modloader_rs::{EngineConfig, SettingsStore};
use modloader_rs_test_utils::*;
use serde_json::json;

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn key(id: &str) -> PackageKey {
	PackageKey::new(id).unwrap()
}

#[test]
fn conflicts_resolve_in_load_order() {
	init();
	let outcome = resolve([
		package("A").version("1.0").disables("B", None, None).build(),
		package("B").version("1.0").build(),
		package("C").version("1.0").disables("D", None, Some("2.0")).build(),
		package("D").version("3.4").disables("A", None, None).disables("D", None, None).build(),
	]);

	assert!(outcome.is_converged());
	assert_eq!(enabled_ids(&outcome), ["C", "D"]);
	assert_eq!(phase_ids(&outcome, "gamemod"), ["C", "D"]);

	let b = find(&outcome, "B");
	assert_eq!(b.disabled_reason(), Some(Reason::Disable));
	assert_eq!(outcome.package(b.notices()[0].related.unwrap()).id(), "A");

	let a = find(&outcome, "A");
	assert_eq!(a.disabled_reason(), Some(Reason::Disable));
	assert_eq!(a.notices()[0].args, ["D"]);

	assert_eq!(outcome.warnings(), [SessionWarning::SelfReference { package: key("d"), kind: ConstraintKind::Disables }]);
}

#[test]
fn only_the_preferred_duplicate_survives() {
	init();
	let outcome = resolve([
		package("dup").version("1.2").build(),
		package("Dup").version("2.3").build(),
		package("dup").version("4.5").build(),
		package("DUP").version("3.4").build(),
	]);

	assert_eq!(outcome.enabled().len(), 1);
	let kept = outcome.enabled_packages().next().unwrap();
	assert_eq!(kept.version, Some(version("4.5")));

	let disabled = outcome.disabled_packages().collect::<Vec<_>>();
	assert_eq!(disabled.len(), 3);
	for p in disabled {
		assert_eq!(p.disabled_reason(), Some(Reason::Duplicate));
		let notice = &p.notices()[0];
		assert_eq!(notice.args, ["dup", "4.5.0.0"]);
		assert_eq!(outcome.package(notice.related.unwrap()).version, Some(version("4.5")));
	}
}

#[test]
fn duplicate_tie_breaks_on_source_file() {
	init();
	let outcome = resolve([
		package("a").version("1.0").source(Some(10), Some(500)).build(),
		package("a").version("1.0").source(Some(20), Some(100)).build(),
		package("a").version("1.0").source(Some(20), None).build(),
	]);
	let kept = outcome.enabled_packages().collect::<Vec<_>>();
	assert_eq!(kept.len(), 1);
	assert_eq!(kept[0].source_size, Some(100));
}

#[test]
fn requirements_on_one_target_are_alternatives() {
	init();
	let requirer = package("p").requires("x", Some("2.0"), None).requires("x", None, Some("1.0"));

	let outcome = resolve([requirer.clone().build(), package("x").version("0.5").build()]);
	assert_eq!(enabled_ids(&outcome), ["p", "x"]);

	let outcome = resolve([requirer.build(), package("x").version("1.5").build()]);
	assert_eq!(enabled_ids(&outcome), ["x"]);
	let notice = &find(&outcome, "p").notices()[0];
	assert_eq!(notice.reason, Reason::Require);
	assert_eq!(notice.args[0], "x");
	assert_eq!(notice.args[1], "1.5.0.0");
	assert!(notice.message.contains(" or "));
}

#[test]
fn requirements_on_different_targets_all_hold() {
	init();
	let outcome = resolve([
		package("p").requires("x", None, None).requires("y", None, None).build(),
		package("x").build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["x"]);
	let notice = &find(&outcome, "p").notices()[0];
	assert_eq!(notice.args[0], "y");
	assert_eq!(notice.args[1], "none");
}

#[test]
fn unversioned_package_counts_as_zero() {
	init();
	let outcome = resolve([
		package("p").requires("x", None, Some("0.0.0.0")).build(),
		package("q").requires("x", Some("0.1"), None).build(),
		package("x").build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["p", "x"]);
}

#[test]
fn avoiding_disables_the_avoider() {
	init();
	let outcome = resolve([
		package("a").avoids("b", None, None).build(),
		package("b").build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["b"]);
	assert_eq!(find(&outcome, "a").disabled_reason(), Some(Reason::Avoid));
}

#[test]
fn disabling_disables_the_target() {
	init();
	let outcome = resolve([
		package("a").disables("b", None, None).build(),
		package("b").build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["a"]);
	assert_eq!(find(&outcome, "b").disabled_reason(), Some(Reason::Disable));
}

#[test]
fn avoid_outside_range_is_ignored() {
	init();
	let outcome = resolve([
		package("a").avoids("b", None, Some("1.0")).build(),
		package("b").version("2.0").build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["a", "b"]);
}

#[test]
fn unused_library_is_pruned() {
	init();
	let outcome = resolve([package("lib").library().build()]);
	assert!(outcome.enabled().is_empty());
	assert_eq!(find(&outcome, "lib").disabled_reason(), Some(Reason::NoDependent));
}

#[test]
fn required_library_is_kept() {
	init();
	let outcome = resolve([
		package("lib").library().build(),
		package("user").requires("lib", None, None).build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["lib", "user"]);
}

#[test]
fn library_of_a_failed_package_is_pruned() {
	init();
	let outcome = resolve([
		package("lib").library().build(),
		package("user").requires("lib", None, None).requires("missing", None, None).build(),
	]);
	assert!(outcome.enabled().is_empty());
	assert_eq!(find(&outcome, "user").disabled_reason(), Some(Reason::Require));
	assert_eq!(find(&outcome, "lib").disabled_reason(), Some(Reason::NoDependent));
	assert_eq!(outcome.passes(), 2);
}

#[test]
fn library_chains_unwind_over_passes() {
	init();
	let outcome = resolve([
		package("base").library().build(),
		package("mid").library().requires("base", None, None).build(),
	]);
	assert!(outcome.enabled().is_empty());
	assert_eq!(find(&outcome, "mid").disabled_reason(), Some(Reason::NoDependent));
	assert_eq!(find(&outcome, "base").disabled_reason(), Some(Reason::NoDependent));
}

#[test]
fn virtual_targets_resolve_from_the_host() {
	init();
	let outcome = resolve([
		package("new-loader").requires("ModLoader", Some("3.0"), None).build(),
		package("game-ok").requires("Game", Some("1.0"), None).build(),
		package("lml-ok").requires("LML", None, Some("0.3")).build(),
		package("never").requires("none", None, None).build(),
		package("avoid-none").avoids("none", None, None).build(),
		package("avoid-host").avoids("host", None, None).build(),
		package("disable-host").disables("host", None, None).build(),
	]);
	assert_eq!(enabled_ids(&outcome), ["avoid-none", "disable-host", "game-ok", "lml-ok"]);

	let notice = &find(&outcome, "new-loader").notices()[0];
	assert_eq!(notice.args[..2], ["modloader", "2.0.0.0"]);
	assert_eq!(find(&outcome, "never").notices()[0].args[1], "none");
	assert_eq!(find(&outcome, "avoid-host").disabled_reason(), Some(Reason::Avoid));
}

#[test]
fn unknown_host_version_fails_host_requirements() {
	init();
	let mut host = host();
	host.host_version = None;
	let outcome = resolve_with([package("p").requires("game", None, None).build()], &host, None, EngineConfig::default());
	assert!(outcome.enabled().is_empty());
}

#[test]
fn self_requirement_warns_once() {
	init();
	let outcome = resolve([package("p").requires("P", None, None).requires("p", Some("9.0"), None).build()]);
	assert_eq!(enabled_ids(&outcome), ["p"]);
	assert_eq!(outcome.warnings(), [SessionWarning::SelfReference { package: key("p"), kind: ConstraintKind::Requires }]);
	assert!(find(&outcome, "p").notices().is_empty());
}

#[test]
fn user_can_disable_a_package() {
	init();
	let mut settings = MemorySettings::new();
	settings.set(key("b"), UserOverride { disabled: Some(true), ..Default::default() });

	let outcome = resolve_with([
		package("a").requires("b", None, None).build(),
		package("b").build(),
		package("c").build(),
	], &host(), Some(&settings as &dyn SettingsStore), EngineConfig::default());

	assert_eq!(enabled_ids(&outcome), ["c"]);
	assert_eq!(find(&outcome, "b").disabled_reason(), Some(Reason::Manual));
	assert_eq!(find(&outcome, "a").disabled_reason(), Some(Reason::Require));
}

#[test]
fn user_load_index_reorders() {
	init();
	let mut settings = MemorySettings::new();
	settings.set(key("b"), UserOverride { load_index: Some(-1), log_level: Some("debug".to_string()), ..Default::default() });

	let outcome = resolve_with([
		package("a").build(),
		package("b").build(),
		package("c").load_index(-5).build(),
	], &host(), Some(&settings as &dyn SettingsStore), EngineConfig::default());

	assert_eq!(enabled_ids(&outcome), ["c", "b", "a"]);
	assert_eq!(phase_ids(&outcome, "GameMod"), ["c", "b", "a"]);
	assert_eq!(find(&outcome, "b").log_level.as_deref(), Some("debug"));
}

#[test]
fn packages_join_every_phase_they_declare() {
	init();
	let outcome = resolve([
		package("both").entry("SplashMod").entry("gamemod").build(),
		package("early").load_index(-1).entry("splashmod").build(),
		package("unknown").entry("somewhenmod").build(),
	]);
	assert_eq!(phase_ids(&outcome, "splashmod"), ["early", "both"]);
	assert_eq!(phase_ids(&outcome, "gamemod"), ["both"]);
	assert_eq!(find(&outcome, "unknown").disabled_reason(), Some(Reason::NoPhase));
	assert!(outcome.phase("homemod").is_empty());
}

#[test]
fn package_without_phases_is_disabled() {
	init();
	let outcome = resolve([
		package("empty").no_default_entry().build(),
		package("defaults-only").action(json!({"action": "default", "phase": "homemod"})).build(),
	]);
	assert!(outcome.enabled().is_empty());
	assert_eq!(find(&outcome, "empty").disabled_reason(), Some(Reason::NoPhase));
	assert_eq!(find(&outcome, "defaults-only").disabled_reason(), Some(Reason::NoPhase));
}

#[test]
fn actions_are_merged_and_scheduled() {
	init();
	let outcome = resolve([package("acts")
		.action(json!({"Action": "Default", "Phase": "HomeMod", "OnError": "Continue"}))
		.action(json!({"action": "log", "text": "hello"}))
		.action(json!({"action": "log", "phase": "tacticalmod geoscapemod"}))
		.build()]);

	assert_eq!(enabled_ids(&outcome), ["acts"]);
	assert_eq!(phase_ids(&outcome, "homemod"), ["acts"]);
	assert_eq!(phase_ids(&outcome, "tacticalmod"), ["acts"]);
	assert_eq!(phase_ids(&outcome, "geoscapemod"), ["acts"]);
	assert!(phase_ids(&outcome, "gamemod").is_empty());

	let actions = &find(&outcome, "acts").actions;
	assert_eq!(actions.len(), 2);
	assert_eq!(actions[0].on_error().as_deref(), Some("continue"));
	assert_eq!(actions[1].on_error().as_deref(), Some("continue"));
	assert_eq!(&merge_defaults(actions), actions);
}

#[test]
fn actions_need_a_handler() {
	init();
	let host = host().with_action_handler(false);
	let outcome = resolve_with([
		package("acts").action(json!({"action": "log"})).build(),
		package("mixed").entry("splashmod").action(json!({"action": "log"})).build(),
	], &host, None, EngineConfig::default());

	assert_eq!(enabled_ids(&outcome), ["mixed"]);
	assert_eq!(find(&outcome, "acts").disabled_reason(), Some(Reason::NoActionMod));
	assert_eq!(phase_ids(&outcome, "splashmod"), ["mixed"]);
	assert!(phase_ids(&outcome, "gamemod").is_empty());
}

fn requirement_chain() -> Vec<modloader_rs::PackageDescriptor> {
	vec![
		package("a").requires("b", None, None).build(),
		package("b").requires("c", None, None).build(),
		package("c").requires("d", None, None).build(),
	]
}

#[test]
fn requirement_chain_unwinds_one_per_pass() {
	init();
	let outcome = resolve(requirement_chain());
	assert!(outcome.is_converged());
	assert!(outcome.enabled().is_empty());
	assert_eq!(outcome.passes(), 4);
	assert!(outcome.warnings().is_empty());
}

#[test]
fn pass_limit_keeps_the_current_set() {
	init();
	let mut config = EngineConfig::default();
	assert!(config.set_max_passes(2));

	let outcome = resolve_with(requirement_chain(), &host(), None, config);
	assert!(!outcome.is_converged());
	assert_eq!(outcome.passes(), 2);
	assert_eq!(enabled_ids(&outcome), ["a"]);
	assert_eq!(phase_ids(&outcome, "gamemod"), ["a"]);
	assert_eq!(outcome.warnings(), [SessionWarning::NotConverged { passes: 2 }]);
}

fn mixed_set() -> Vec<modloader_rs::PackageDescriptor> {
	vec![
		package("Dup").version("1.0").build(),
		package("dup").version("1.0").build(),
		package("lib").library().build(),
		package("user").requires("lib", None, None).requires("dup", Some("1.0"), None).build(),
		package("rival").avoids("user", None, None).build(),
		package("bully").disables("rival", None, None).entry("splashmod").build(),
		package("late").load_index(10).build(),
	]
}

#[test]
fn input_order_does_not_matter() {
	init();
	let forward = resolve(mixed_set());
	let backward = resolve(mixed_set().into_iter().rev());

	assert_eq!(enabled_ids(&forward), enabled_ids(&backward));
	let config = EngineConfig::default();
	for phase in config.phases() {
		assert_eq!(phase_ids(&forward, phase), phase_ids(&backward, phase));
	}
	assert_eq!(enabled_ids(&forward), ["bully", "Dup", "lib", "user", "late"]);
}

#[test]
fn every_disabled_package_says_why() {
	init();
	let outcome = resolve(mixed_set());
	for (i, p) in outcome.packages().iter().enumerate() {
		let enabled = outcome.enabled().iter().any(|id| id.index() == i);
		assert_eq!(enabled, !p.is_disabled());
		assert_eq!(p.is_disabled(), p.disabled_reason().is_some());
		if enabled {
			assert!(p.notices().is_empty());
		} else {
			assert_eq!(p.notices().len(), 1);
		}
	}
}
