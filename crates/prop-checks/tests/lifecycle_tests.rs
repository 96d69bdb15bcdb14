//! Scope lifecycle scenarios: narrowing, AND combination, setters and
//! nested class/method scopes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use prop_checks::{ChecksError, PropertyChecks, ScopeDeclarations, ScopeState};
use prop_core::{FIND_ON_CLASSPATH_KEY, MULTI_VALUE_ENABLED_KEY};
use prop_test_utils::*;

#[test]
fn test_multi_value_narrowed_then_restored() {
    init_test_tracing();
    let env = seeded_environment(&[(OS, "[macos,windows]")]);
    let checks = PropertyChecks::new(&env.shared());

    let outcome = checks
        .enter(&ScopeDeclarations::new().enabled_if(OS, ["windows", "linux"]))
        .unwrap();

    outcome.assert_enabled();
    env.assert_value(OS, "windows");
    assert_eq!(checks.pending_substitutions().len(), 1);

    drop(outcome);

    env.assert_value(OS, "[macos,windows]");
    assert!(checks.pending_substitutions().is_empty());
}

#[test]
fn test_conditions_combine_with_and() {
    init_test_tracing();
    let env = seeded_environment(&[(OS, "windows"), (BROWSER, "chrome")]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .enabled_if(OS, ["macos", "windows"])
        .enabled_if(BROWSER, ["opera"]);

    checks
        .enter(&decls)
        .unwrap()
        .assert_disabled()
        .assert_reason(
            "@EnabledIfProperty(name=os,value=[macos,windows]) <- windows\n\
             @EnabledIfProperty(name=browser,value=[opera]) <- chrome",
        );
}

#[test]
fn test_reason_includes_label_and_unset_marker() {
    let env = seeded_environment(&[]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .enabled_if(OS, ["mac os", "windows"])
        .label("LoginTest::opens_dashboard");

    checks.enter(&decls).unwrap().assert_disabled().assert_reason(
        "@EnabledIfProperty(name=os,value=[macos,windows]) <- null\nLoginTest::opens_dashboard",
    );
}

#[test]
fn test_setter_does_not_override_existing_value() {
    init_test_tracing();
    let env = seeded_environment(&[(BROWSER, "safari")]);
    let checks = PropertyChecks::new(&env.shared());

    let class = checks
        .enter(&ScopeDeclarations::new().set(BROWSER, "firefox"))
        .unwrap();
    env.assert_value(BROWSER, "safari");

    drop(class);
    env.assert_absent(BROWSER);
}

#[test]
fn test_disabled_scope_clears_its_setters() {
    let env = seeded_environment(&[(OS, "linux")]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .set(HEADLESS, "true")
        .enabled_if(OS, ["windows"]);

    checks.enter(&decls).unwrap().assert_disabled();
    env.assert_absent(HEADLESS).assert_value(OS, "linux");
}

#[test]
fn test_setters_feed_conditions_of_the_same_scope() {
    let env = seeded_environment(&[]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .set(BROWSER, "firefox")
        .enabled_if(BROWSER, ["firefox"]);

    let outcome = checks.enter(&decls).unwrap();
    outcome.assert_enabled();
    env.assert_value(BROWSER, "firefox");
}

#[test]
fn test_method_scope_layers_on_class_scope() {
    init_test_tracing();
    let env = seeded_environment(&[]);
    let checks = PropertyChecks::new(&env.shared());

    let class_decls = ScopeDeclarations::new().set(BROWSER, "chrome").label("Suite");
    let class = checks.enter(&class_decls).unwrap().into_guard().unwrap();
    env.assert_value(BROWSER, "chrome");

    // Inner setter for the same name loses to the value the class already set.
    let method_decls = ScopeDeclarations::new()
        .set(BROWSER, "firefox")
        .set(HEADLESS, "true")
        .enabled_if(BROWSER, ["chrome"]);
    let mut method = class.enter_nested(&method_decls).unwrap().into_guard().unwrap();

    assert_eq!(method.state(), ScopeState::Running);
    assert_eq!(method.declarations().setters.len(), 3);
    env.assert_value(BROWSER, "chrome").assert_value(HEADLESS, "true");

    method.exit();
    env.assert_absent(BROWSER).assert_absent(HEADLESS);

    drop(class);
    env.assert_absent(BROWSER);
}

#[test]
fn test_class_setter_survives_disabled_method() {
    let env = seeded_environment(&[(OS, "linux")]);
    let checks = PropertyChecks::new(&env.shared());

    let class = checks
        .enter(&ScopeDeclarations::new().set(HEADLESS, "true"))
        .unwrap()
        .into_guard()
        .unwrap();

    class
        .enter_nested(&ScopeDeclarations::new().enabled_if(OS, ["windows"]))
        .unwrap()
        .assert_disabled();

    env.assert_value(HEADLESS, "true");
    drop(class);
    env.assert_absent(HEADLESS);
}

#[test]
fn test_method_inherits_class_conditions() {
    let env = seeded_environment(&[(OS, "[macos,windows]"), (BROWSER, "chrome")]);
    let checks = PropertyChecks::new(&env.shared());

    let class = checks
        .enter(&ScopeDeclarations::new().enabled_if(OS, ["macos"]))
        .unwrap()
        .into_guard()
        .unwrap();
    env.assert_value(OS, "macos");

    let method = class
        .enter_nested(&ScopeDeclarations::new().enabled_if(BROWSER, ["chrome"]))
        .unwrap();
    method.assert_enabled().assert_reason(
        "@EnabledIfProperty(name=os,value=[macos]) <- macos\n\
         @EnabledIfProperty(name=browser,value=[chrome]) <- chrome",
    );

    drop(method);
    env.assert_value(OS, "[macos,windows]");
    drop(class);
    env.assert_value(OS, "[macos,windows]");
}

#[test]
fn test_multi_value_disabled_uses_whole_value() {
    let env = seeded_environment(&[(OS, "[macos,windows]"), (MULTI_VALUE_ENABLED_KEY, "false")]);
    let checks = PropertyChecks::new(&env.shared());

    checks
        .enter(&ScopeDeclarations::new().enabled_if(OS, ["windows"]))
        .unwrap()
        .assert_disabled();
    env.assert_value(OS, "[macos,windows]");
}

#[test]
fn test_multi_value_toggle_set_by_scope_setter() {
    let env = seeded_environment(&[(OS, "[macos,windows]")]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .set(MULTI_VALUE_ENABLED_KEY, "false")
        .enabled_if(OS, ["[macos,windows]"]);

    checks.enter(&decls).unwrap().assert_enabled();
    env.assert_absent(MULTI_VALUE_ENABLED_KEY);
}

#[test]
fn test_conversion_error_aborts_scope() {
    let env = seeded_environment(&[(OS, "[macos,windows]"), (MULTI_VALUE_ENABLED_KEY, "yes")]);
    let checks = PropertyChecks::new(&env.shared());

    let result = checks.enter(
        &ScopeDeclarations::new()
            .set(BROWSER, "firefox")
            .enabled_if(OS, ["windows"]),
    );

    assert!(matches!(result, Err(ChecksError::Conversion(_))));
    env.assert_absent(BROWSER).assert_value(OS, "[macos,windows]");
}

#[test]
fn test_run_reports_disabled_as_none() {
    let env = seeded_environment(&[(OS, "linux")]);
    let checks = PropertyChecks::new(&env.shared());

    let ran = checks
        .run(&ScopeDeclarations::new().enabled_if(OS, ["linux"]), |guard| {
            guard.reason().to_string()
        })
        .unwrap();
    assert_eq!(
        ran.as_deref(),
        Some("@EnabledIfProperty(name=os,value=[linux]) <- linux")
    );

    let skipped = checks
        .run(&ScopeDeclarations::new().enabled_if(OS, ["macos"]), |_| {
            unreachable!("disabled scope must not run")
        })
        .unwrap();
    assert!(skipped.is_none());
}

#[test]
fn test_environment_trait_object_is_shared() {
    let env = seeded_environment(&[]);
    let shared = env.shared();
    let checks = PropertyChecks::new(&shared);

    let _scope = checks
        .enter(&ScopeDeclarations::new().set(OS, "linux"))
        .unwrap();

    assert_eq!(checks.environment().get(OS).as_deref(), Some("linux"));
    assert_eq!(shared.get(OS).as_deref(), Some("linux"));
}

#[test]
fn test_bracket_list_survives_setter_on_same_name() {
    init_test_tracing();
    let env = seeded_environment(&[(OS, "[macos,windows]")]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .set(OS, "linux")
        .enabled_if(OS, ["windows"]);

    let outcome = checks.enter(&decls).unwrap();
    outcome.assert_enabled();
    env.assert_value(OS, "windows");

    drop(outcome);
    env.assert_value(OS, "[macos,windows]");
}

#[test]
fn test_bracket_list_survives_disabled_scope_with_setter_on_same_name() {
    let env = seeded_environment(&[(OS, "[macos,windows]"), (BROWSER, "chrome")]);
    let checks = PropertyChecks::new(&env.shared());

    let decls = ScopeDeclarations::new()
        .set(OS, "linux")
        .enabled_if(OS, ["windows"])
        .enabled_if(BROWSER, ["opera"]);

    checks.enter(&decls).unwrap().assert_disabled();
    env.assert_value(OS, "[macos,windows]");
}

#[test]
fn test_malformed_lookup_option_leaves_conditions_alone() {
    let env = seeded_environment(&[(OS, "linux"), (FIND_ON_CLASSPATH_KEY, "src/test")]);
    let checks = PropertyChecks::new(&env.shared());

    checks
        .enter(&ScopeDeclarations::new().enabled_if(OS, ["linux"]))
        .unwrap()
        .assert_enabled();
}

#[test]
fn test_unstorable_setter_name_is_rejected_up_front() {
    let env = seeded_environment(&[]);
    let checks = PropertyChecks::new(&env.shared());

    let result = checks.enter(
        &ScopeDeclarations::new()
            .set(BROWSER, "firefox")
            .set("grid=url", "http://localhost:4444"),
    );

    assert!(matches!(result, Err(ChecksError::Declaration(_))));
    env.assert_absent(BROWSER);
}
