use serde::{Deserialize, Serialize};

/// Target size of a generated thumbnail. The serialized form keeps the pixel
/// literals the studio front ends already store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputSize {
    #[serde(rename = "1920x1080")]
    Landscape,
    #[serde(rename = "1080x1920")]
    Portrait,
}

impl OutputSize {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            OutputSize::Landscape => (1920, 1080),
            OutputSize::Portrait => (1080, 1920),
        }
    }

    /// Aspect-ratio token handed to the provider out-of-band. Never embedded in
    /// prompt text.
    pub fn aspect_ratio(&self) -> &'static str {
        match self {
            OutputSize::Landscape => "16:9",
            OutputSize::Portrait => "9:16",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Landscape => "1920x1080",
            OutputSize::Portrait => "1080x1920",
        }
    }
}

/// The two studio tabs. Each pins the output size it publishes to. Serialized
/// forms keep the ids the studio front ends already store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationTab {
    #[serde(rename = "YOUTUBE")]
    Youtube,
    #[serde(rename = "REELS_PRO")]
    ReelsPro,
}

impl GenerationTab {
    pub fn output_size(&self) -> OutputSize {
        match self {
            GenerationTab::Youtube => OutputSize::Landscape,
            GenerationTab::ReelsPro => OutputSize::Portrait,
        }
    }
}

impl Default for GenerationTab {
    fn default() -> Self {
        GenerationTab::Youtube
    }
}

/// Immutable style snapshot for one batch. Free-form short strings, exactly as
/// the settings form collects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub pose: String,
    pub style: String,
    pub camera_angle: String,
    pub emotion: String,
    pub lighting: String,
    pub background: String,
    /// Comma-separated icon list for the reel-cover overlay. Blank means no
    /// overlay mode.
    pub icons: Option<String>,
    pub size: OutputSize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            pose: "Pointing at camera".to_string(),
            style: "Cinematic".to_string(),
            camera_angle: "Eye-level".to_string(),
            emotion: "Shocked".to_string(),
            lighting: "Softbox Studio".to_string(),
            background: "Blurred Studio".to_string(),
            icons: None,
            size: OutputSize::Landscape,
        }
    }
}

impl StyleConfig {
    /// The icon list when overlay mode is active; whitespace-only input counts
    /// as absent.
    pub fn icon_overlay(&self) -> Option<&str> {
        self.icons
            .as_deref()
            .map(str::trim)
            .filter(|icons| !icons.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_covers_both_sizes() {
        assert_eq!(OutputSize::Landscape.aspect_ratio(), "16:9");
        assert_eq!(OutputSize::Portrait.aspect_ratio(), "9:16");
    }

    #[test]
    fn dimensions_match_the_published_formats() {
        assert_eq!(OutputSize::Landscape.dimensions(), (1920, 1080));
        assert_eq!(OutputSize::Portrait.dimensions(), (1080, 1920));
    }

    #[test]
    fn sizes_serialize_to_pixel_literals() {
        assert_eq!(
            serde_json::to_string(&OutputSize::Landscape).unwrap(),
            "\"1920x1080\""
        );
        assert_eq!(
            serde_json::to_string(&OutputSize::Portrait).unwrap(),
            "\"1080x1920\""
        );
    }

    #[test]
    fn tabs_pin_their_sizes() {
        assert_eq!(GenerationTab::Youtube.output_size(), OutputSize::Landscape);
        assert_eq!(GenerationTab::ReelsPro.output_size(), OutputSize::Portrait);
    }

    #[test]
    fn tabs_serialize_to_the_stored_ids() {
        assert_eq!(
            serde_json::to_string(&GenerationTab::Youtube).unwrap(),
            "\"YOUTUBE\""
        );
        assert_eq!(
            serde_json::to_string(&GenerationTab::ReelsPro).unwrap(),
            "\"REELS_PRO\""
        );
    }

    #[test]
    fn blank_icon_strings_do_not_enable_overlay_mode() {
        let mut config = StyleConfig::default();
        assert!(config.icon_overlay().is_none());

        config.icons = Some("   ".to_string());
        assert!(config.icon_overlay().is_none());

        config.icons = Some(" rocket, money bag ".to_string());
        assert_eq!(config.icon_overlay(), Some("rocket, money bag"));
    }
}
