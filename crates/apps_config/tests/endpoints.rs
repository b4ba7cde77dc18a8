#![allow(clippy::unwrap_used, clippy::expect_used)]

use apps_config::{
    create_ws_endpoints, default_t, AppsConfig, EndpointSettings, LinkOption, TOptions,
    KUSAMA_GENESIS,
};
use serial_test::serial;
use std::io::Write;

fn settings(ws_url: Option<&str>, own: &[&str]) -> EndpointSettings {
    EndpointSettings {
        ws_url: ws_url.map(str::to_string),
        own: own.iter().map(|s| s.to_string()).collect(),
        links: Vec::new(),
    }
}

#[test]
fn custom_header_own_order() {
    let list = create_ws_endpoints(
        &settings(Some("ws://10.0.0.1:9944"), &["wss://one.example", "wss://two.example"]),
        &default_t,
    );
    let values: Vec<&str> = list.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            "",
            "ws://10.0.0.1:9944",
            "",
            "wss://one.example",
            "wss://two.example"
        ]
    );
    assert!(list[0].is_header && !list[0].is_development);
    assert_eq!(list[0].text, "Custom environment");
    assert_eq!(list[1].info.as_deref(), Some("WS_URL"));
    assert_eq!(list[1].text_by, "ws://10.0.0.1:9944");
    assert!(list[2].is_header && list[2].is_development && list[2].is_spaced);
    assert_eq!(list[3].info.as_deref(), Some("local"));
    assert_eq!(list[3].text, "Custom");
}

#[test]
fn translator_sees_keys_and_replacements() {
    let t = |key: &str, text: Option<&str>, opts: Option<&TOptions>| -> String {
        let ws = opts
            .and_then(|o| o.replace.get("WS_URL"))
            .cloned()
            .unwrap_or_default();
        format!("{key}|{}|{ws}", text.unwrap_or_default())
    };
    let list = create_ws_endpoints(&settings(Some("ws://host"), &[]), &t);
    assert_eq!(list[0].text, "rpc.dev.custom|Custom environment|");
    assert_eq!(list[1].text, "rpc.dev.custom.entry|Custom {{WS_URL}}|ws://host");
    assert_eq!(list[2].text, "rpc.header.dev|Development|");
}

#[test]
fn disabled_entries_are_dropped() {
    let mut s = settings(None, &["wss://own.example"]);
    s.links = vec![
        LinkOption {
            text: "Archive".into(),
            text_by: "archive".into(),
            value: "wss://archive.example".into(),
            is_disabled: true,
            ..LinkOption::default()
        },
        LinkOption {
            text: "Mirror".into(),
            text_by: "mirror".into(),
            value: "wss://mirror.example".into(),
            ..LinkOption::default()
        },
    ];
    let list = create_ws_endpoints(&s, &default_t);
    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|o| !o.is_disabled));
    assert_eq!(list[2].value, "wss://mirror.example");
}

#[test]
#[serial]
fn ws_url_env_adds_custom_entries() {
    std::env::set_var("WS_URL", "ws://env.example:9944");
    let s = EndpointSettings::from_env(Vec::new());
    std::env::remove_var("WS_URL");
    assert_eq!(s.ws_url.as_deref(), Some("ws://env.example:9944"));
    assert_eq!(create_ws_endpoints(&s, &default_t).len(), 3);
}

#[test]
#[serial]
fn blank_ws_url_is_ignored() {
    std::env::set_var("WS_URL", "  ");
    let s = EndpointSettings::from_env(Vec::new());
    std::env::remove_var("WS_URL");
    assert!(s.ws_url.is_none());
}

#[test]
#[serial]
fn config_file_feeds_registry_and_endpoints() {
    std::env::remove_var("WS_URL");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "endpoints": ["wss://stored.example"],
            "links": [{{"text": "Old", "textBy": "old", "value": "wss://old", "isDisabled": true}}],
            "networks": {{"{KUSAMA_GENESIS}": {{"auctionAdjust": 0, "auctionMax": 0,
                "falloff": 0.04, "maxInflation": 0.1, "minInflation": 0.025, "stakeTarget": 0.6}}}}
        }}"#
    )
    .unwrap();
    let cfg = AppsConfig::load_file(file.path()).unwrap();
    let registry = cfg.registry().unwrap();
    let kusama = registry.params_for(KUSAMA_GENESIS);
    assert_eq!(kusama.stake_target, 0.6);
    assert_eq!(kusama.falloff, 0.04);

    let list = create_ws_endpoints(&cfg.endpoint_settings(), &default_t);
    let values: Vec<&str> = list.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["", "wss://stored.example"]);
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppsConfig::load_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, apps_config::ConfigError::Io(_)));
}
