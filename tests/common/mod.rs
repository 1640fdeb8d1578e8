//! Shared helpers for integration tests.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use per_host_motd::ping::{Component, Favicon, Players, SamplePlayer, Version};
use per_host_motd::{CommandSource, PingResponse, ReloadCommand};

/// Write `config.json` atomically (temp file + rename) so concurrent reloads
/// never read a half-written document.
pub fn write_config(data_dir: &Path, body: &str) {
    fs::create_dir_all(data_dir).unwrap();
    let tmp = data_dir.join("config.json.tmp");
    fs::write(&tmp, body).unwrap();
    fs::rename(&tmp, data_dir.join("config.json")).unwrap();
}

/// Minimal PNG header of the given size; enough for the icon loader.
#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);
    bytes
}

/// A realistic base ping as a proxy would build it.
pub fn base_ping() -> PingResponse {
    PingResponse {
        version: Version {
            name: "Velocity 1.7.2-1.21.1".into(),
            protocol: 767,
        },
        players: Some(Players {
            max: 200,
            online: 12,
            sample: vec![SamplePlayer {
                name: "Alex".into(),
                id: "ec561538-f3fd-461d-aff5-086b22154bce".into(),
            }],
        }),
        description: Component::text("Network default"),
        favicon: Some(Favicon("data:image/png;base64,BASE".into())),
        modinfo: None,
    }
}

/// Command source that records replies.
#[allow(dead_code)]
pub struct TestSource {
    pub permitted: bool,
    pub messages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl TestSource {
    pub fn admin() -> Self {
        Self {
            permitted: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn player() -> Self {
        Self {
            permitted: false,
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl CommandSource for TestSource {
    fn has_permission(&self, permission: &str) -> bool {
        self.permitted && permission == ReloadCommand::PERMISSION
    }

    fn send_plain_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
