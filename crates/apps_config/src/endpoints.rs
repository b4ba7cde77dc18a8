//! RPC endpoint descriptors shown in the network selector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage key under which user-added endpoints are kept.
pub const CUSTOM_ENDPOINT_KEY: &str = "polkadot-app-custom-endpoints";

/// Translation options passed alongside a key and its default text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TOptions {
    pub ns: Option<String>,
    pub replace: BTreeMap<String, String>,
}

impl TOptions {
    pub fn ns(ns: &str) -> Self {
        Self {
            ns: Some(ns.to_string()),
            replace: BTreeMap::new(),
        }
    }

    pub fn with_replace(mut self, key: &str, value: &str) -> Self {
        self.replace.insert(key.to_string(), value.to_string());
        self
    }
}

/// Fallback translator: the `host` replacement if present, otherwise the
/// default text, otherwise the key itself.
pub fn default_t(key: &str, text: Option<&str>, options: Option<&TOptions>) -> String {
    if let Some(host) = options.and_then(|o| o.replace.get("host")) {
        if !host.is_empty() {
            return host.clone();
        }
    }
    match text {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => key.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkUi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default)]
    pub is_development: bool,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_header: bool,
    #[serde(default)]
    pub is_spaced: bool,
    pub text: String,
    pub text_by: String,
    #[serde(default)]
    pub ui: LinkUi,
    pub value: String,
}

impl LinkOption {
    fn header(text: String) -> Self {
        Self {
            is_header: true,
            text,
            ..Self::default()
        }
    }
}

/// Inputs for building the endpoint list.
#[derive(Debug, Clone, Default)]
pub struct EndpointSettings {
    /// Endpoint injected by the hosting environment (`WS_URL`).
    pub ws_url: Option<String>,
    /// Endpoints the user added by hand.
    pub own: Vec<String>,
    /// Descriptors declared in the config file, listed after user endpoints.
    pub links: Vec<LinkOption>,
}

impl EndpointSettings {
    pub fn from_env(own: Vec<String>) -> Self {
        let ws_url = std::env::var("WS_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        Self {
            ws_url,
            own,
            links: Vec::new(),
        }
    }
}

/// Parse the stored list of user endpoints. Malformed storage is logged and
/// treated as empty.
pub fn parse_own_endpoints(stored: Option<&str>) -> Vec<String> {
    let Some(raw) = stored else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::error!(key = CUSTOM_ENDPOINT_KEY, "invalid stored endpoints: {err}");
            Vec::new()
        }
    }
}

/// Header plus entry for the environment-provided endpoint, if any.
pub fn create_custom<T>(settings: &EndpointSettings, t: &T) -> Vec<LinkOption>
where
    T: Fn(&str, Option<&str>, Option<&TOptions>) -> String,
{
    let Some(ws_url) = settings.ws_url.as_deref() else {
        return Vec::new();
    };
    vec![
        LinkOption::header(t(
            "rpc.dev.custom",
            Some("Custom environment"),
            Some(&TOptions::ns("apps-config")),
        )),
        LinkOption {
            info: Some("WS_URL".to_string()),
            text: t(
                "rpc.dev.custom.entry",
                Some("Custom {{WS_URL}}"),
                Some(&TOptions::ns("apps-config").with_replace("WS_URL", ws_url)),
            ),
            text_by: ws_url.to_string(),
            value: ws_url.to_string(),
            ..LinkOption::default()
        },
    ]
}

/// Entries for endpoints the user stored.
pub fn create_own<T>(settings: &EndpointSettings, t: &T) -> Vec<LinkOption>
where
    T: Fn(&str, Option<&str>, Option<&TOptions>) -> String,
{
    settings
        .own
        .iter()
        .map(|url| LinkOption {
            info: Some("local".to_string()),
            text: t(
                "rpc.dev.custom.own",
                Some("Custom"),
                Some(&TOptions::ns("apps-config")),
            ),
            text_by: url.clone(),
            value: url.clone(),
            ..LinkOption::default()
        })
        .collect()
}

/// Full selector list: environment entries, the development header, user
/// endpoints, then configured descriptors, with disabled entries dropped.
pub fn create_ws_endpoints<T>(settings: &EndpointSettings, t: &T) -> Vec<LinkOption>
where
    T: Fn(&str, Option<&str>, Option<&TOptions>) -> String,
{
    let dev_header = LinkOption {
        is_development: true,
        is_spaced: true,
        ..LinkOption::header(t(
            "rpc.header.dev",
            Some("Development"),
            Some(&TOptions::ns("apps-config")),
        ))
    };
    create_custom(settings, t)
        .into_iter()
        .chain(std::iter::once(dev_header))
        .chain(create_own(settings, t))
        .chain(settings.links.iter().cloned())
        .filter(|option| !option.is_disabled)
        .collect()
}
