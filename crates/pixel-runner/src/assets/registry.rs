use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;

/// Load state of every named image, built from an AssetManifest.
///
/// The host loads files asynchronously and reports back with `mark_ready`. Until then
/// `is_ready` is false and entities draw their placeholder shapes.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    images: HashMap<String, bool>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest. Nothing is ready yet.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let images = manifest
            .images
            .keys()
            .map(|name| (name.clone(), false))
            .collect();
        Self { images }
    }

    /// Flag an image as decoded. Returns false for names the manifest doesn't know.
    pub fn mark_ready(&mut self, name: &str) -> bool {
        match self.images.get_mut(name) {
            Some(ready) => {
                *ready = true;
                true
            }
            None => {
                log::warn!("mark_ready for unknown image '{}'", name);
                false
            }
        }
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.images.get(name).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_start_unready() {
        let json = r#"{ "images": { "coin": { "path": "coin.png" } } }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let mut reg = AssetRegistry::from_manifest(&manifest);

        assert_eq!(reg.len(), 1);
        assert!(!reg.is_ready("coin"));
        assert!(reg.mark_ready("coin"));
        assert!(reg.is_ready("coin"));
    }

    #[test]
    fn unknown_names_are_never_ready() {
        let mut reg = AssetRegistry::new();
        assert!(!reg.mark_ready("nonexistent"));
        assert!(!reg.is_ready("nonexistent"));
    }
}
