use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the images and sounds the host will load.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named images: sprite name → file.
    #[serde(default)]
    pub images: HashMap<String, ImageDescriptor>,
    /// Named audio clips.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single image file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Relative path to the image (e.g., "enemy/snail.png").
    pub path: String,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// `SoundEvent` id that triggers this clip.
    #[serde(default)]
    pub event_id: Option<u8>,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_volume() -> f32 {
    1.0
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sounds": {
                "hit": { "path": "hit.mp3", "event_id": 0, "volume": 0.3 },
                "bg_music": { "path": "music.ogg" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);

        let hit = &manifest.sounds["hit"];
        assert_eq!(hit.event_id, Some(0));
        assert!((hit.volume - 0.3).abs() < 1e-6);

        let music = &manifest.sounds["bg_music"];
        assert_eq!(music.event_id, None);
        assert_eq!(music.volume, 1.0);
    }

    #[test]
    fn parse_images() {
        let json = r#"{ "images": { "tree": { "path": "background/banyan-tree.png" } } }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.images["tree"].path, "background/banyan-tree.png");
        assert!(manifest.sounds.is_empty());
    }
}
