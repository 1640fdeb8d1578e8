//! Server list ping response model.
//!
//! Mirrors the JSON status payload the proxy sends back to clients. The host
//! proxy owns the real object; this model is what the responder reads and
//! rewrites.

use serde::{Deserialize, Serialize};

/// Rich-text value as produced by a markup renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component(pub serde_json::Value);

impl Component {
    /// A literal text component with no styling.
    pub fn text(text: impl Into<String>) -> Self {
        Self(serde_json::json!({ "text": text.into() }))
    }

    /// Concatenated plain text of the component tree.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        collect_text(&self.0, &mut out);
        out
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::text("")
    }
}

fn collect_text(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::String(s) => out.push_str(s),
        serde_json::Value::Array(parts) => parts.iter().for_each(|p| collect_text(p, out)),
        serde_json::Value::Object(obj) => {
            if let Some(serde_json::Value::String(s)) = obj.get("text") {
                out.push_str(s);
            }
            if let Some(extra) = obj.get("extra") {
                collect_text(extra, out);
            }
        }
        _ => {}
    }
}

/// Encoded server icon (`data:image/png;base64,...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favicon(pub String);

impl Favicon {
    pub fn as_data_uri(&self) -> &str {
        &self.0
    }
}

/// Protocol version advertised in the ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,
    pub protocol: i32,
}

/// One entry of the hover player sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePlayer {
    pub name: String,
    pub id: String,
}

/// Player counts and sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub max: i32,
    pub online: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample: Vec<SamplePlayer>,
}

/// Forge-style mod list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModInfo {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "modList", default)]
    pub mod_list: Vec<ModEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModEntry {
    pub modid: String,
    pub version: String,
}

/// Status payload returned for a server list ping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub version: Version,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Players>,

    #[serde(default)]
    pub description: Component,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<Favicon>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modinfo: Option<ModInfo>,
}

impl Default for PingResponse {
    fn default() -> Self {
        Self {
            version: Version {
                name: "Proxy".to_string(),
                protocol: 767,
            },
            players: Some(Players {
                max: 500,
                online: 0,
                sample: Vec::new(),
            }),
            description: Component::text("A Minecraft Server"),
            favicon: None,
            modinfo: None,
        }
    }
}
