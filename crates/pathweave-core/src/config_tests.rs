//! Tests for layered configuration.

use figment::Jail;

use crate::config::*;
use crate::descend::{Descent, FailsafePolicy, DEFAULT_CEILING, DEFAULT_INTERVAL};
use crate::error::Error;

fn jail_err(err: Error) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[test]
fn test_defaults() {
    let config = PathweaveConfig::default();
    assert_eq!(config.traversal.max_depth, None);
    assert_eq!(config.traversal.failsafe.ceiling, DEFAULT_CEILING);
    assert_eq!(config.traversal.failsafe.interval, DEFAULT_INTERVAL);
    assert_eq!(config.traversal.failsafe.policy, PolicyKind::AbandonBranch);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let config = PathweaveConfig::from_toml_str(
        r#"
        [traversal.failsafe]
        policy = "ignore"
        "#,
    )
    .unwrap();
    assert_eq!(config.traversal.failsafe.policy, PolicyKind::Ignore);
    assert_eq!(config.traversal.failsafe.ceiling, DEFAULT_CEILING);
    assert_eq!(config.traversal.max_depth, None);
}

#[test]
fn test_invalid_values_are_rejected() {
    let zero_interval = PathweaveConfig::from_toml_str(
        r"
        [traversal.failsafe]
        interval = 0
        ",
    );
    assert!(matches!(zero_interval, Err(Error::Config(_))));

    let zero_depth = PathweaveConfig::from_toml_str("[traversal]\nmax_depth = 0\n");
    assert!(matches!(zero_depth, Err(Error::Config(_))));

    let unknown_policy =
        PathweaveConfig::from_toml_str("[traversal.failsafe]\npolicy = \"sometimes\"\n");
    assert!(matches!(unknown_policy, Err(Error::Config(_))));
}

#[test]
fn test_file_then_env_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "pathweave.toml",
            r#"
            [traversal]
            max_depth = 8

            [traversal.failsafe]
            ceiling = 5000
            policy = "ignore"
            "#,
        )?;
        jail.set_env("PATHWEAVE_TRAVERSAL__FAILSAFE__CEILING", 700);

        let config = PathweaveConfig::load().map_err(jail_err)?;
        assert_eq!(config.traversal.max_depth, Some(8));
        assert_eq!(config.traversal.failsafe.ceiling, 700);
        assert_eq!(config.traversal.failsafe.interval, DEFAULT_INTERVAL);
        assert_eq!(config.traversal.failsafe.policy, PolicyKind::Ignore);
        Ok(())
    });
}

#[test]
fn test_missing_file_uses_defaults_and_env() {
    Jail::expect_with(|jail| {
        jail.set_env("PATHWEAVE_TRAVERSAL__MAX_DEPTH", 3);
        let config = PathweaveConfig::load_from("absent.toml").map_err(jail_err)?;
        assert_eq!(config.traversal.max_depth, Some(3));
        assert_eq!(config.traversal.failsafe.ceiling, DEFAULT_CEILING);
        Ok(())
    });
}

#[test]
fn test_env_override_is_validated() {
    Jail::expect_with(|jail| {
        jail.set_env("PATHWEAVE_TRAVERSAL__FAILSAFE__INTERVAL", 0);
        assert!(matches!(PathweaveConfig::load(), Err(Error::Config(_))));
        Ok(())
    });
}

#[test]
fn test_to_toml_reads_back() {
    let mut config = PathweaveConfig::default();
    config.traversal.max_depth = Some(12);
    config.traversal.failsafe.policy = PolicyKind::Ignore;

    let rendered = config.to_toml().unwrap();
    assert!(rendered.contains("policy = \"ignore\""));
    assert_eq!(PathweaveConfig::from_toml_str(&rendered).unwrap(), config);
}

#[test]
fn test_descent_config_carries_settings() {
    let config = PathweaveConfig::from_toml_str(
        r"
        [traversal]
        max_depth = 2

        [traversal.failsafe]
        ceiling = 40
        interval = 4
        ",
    )
    .unwrap();
    let descent = config.descent_config::<u32>().unwrap();
    assert_eq!(descent.max_depth(), Some(2));
    assert_eq!(descent.failsafe().ceiling(), 40);
    assert_eq!(descent.failsafe().interval(), 4);
    assert!(matches!(
        descent.failsafe().policy(),
        FailsafePolicy::AbandonBranch
    ));

    let chain = |_: &[u32], n: &u32| Some(n + 1);
    let visited: Vec<u32> = Descent::new(chain)
        .config(config.descent_config().unwrap())
        .descend([0])
        .collect();
    assert_eq!(visited, vec![0, 1, 2]);
}
