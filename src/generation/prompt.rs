use crate::models::StyleConfig;

/// Renders a [`StyleConfig`] and the number of attached reference images into
/// the instruction text sent with every variation of a batch.
///
/// Pure function: identical inputs always produce byte-identical output. The
/// reference images themselves travel as binary attachments, so only their
/// count appears in the text. The aspect ratio is passed out of band via
/// [`OutputSize::aspect_ratio`](crate::models::OutputSize::aspect_ratio) and
/// is never embedded here.
pub fn build_prompt(config: &StyleConfig, reference_count: usize) -> String {
    let mut prompt = format!(
        "ROLE: Expert YouTube Thumbnail Designer.\n\
         \n\
         PRIMARY OBJECTIVE:\n\
         Generate a photorealistic image of the **SPECIFIC PERSON** shown in the {reference_count} attached reference image(s).\n\
         \n\
         CRITICAL IDENTITY LOCK (DO NOT IGNORE):\n\
         1. **FACE ID**: The generated face MUST BE AN EXACT MATCH to the reference images. Use the same eye shape, nose structure, jawline, and skin tone.\n\
         2. **NO GENERIC FACES**: Do not replace the person with a generic model. It must be recognizable as the person in the reference.\n\
         3. **DETAILS**: Preserve moles, scars, facial hair patterns, and unique features from the reference.\n\
         \n\
         EXPRESSION & ACTION (MORPHING):\n\
         1. **Target Emotion**: {emotion}.\n\
            - Apply this emotion to the reference face without changing the person's identity.\n\
            - If the emotion requires an open mouth (e.g., Shocked, Excited), ensure **REALISTIC TEETH** and a natural mouth interior are visible.\n\
         2. **Target Pose**: {pose}.\n\
         \n\
         SCENE SPECIFICATIONS:\n\
         - **Composition**: Subject is CENTERED in the frame. Upper body / Portrait shot.\n\
         - **Camera Angle**: {camera_angle}.\n",
        emotion = config.emotion,
        pose = config.pose,
        camera_angle = config.camera_angle,
    );

    match config.icon_overlay() {
        // Icon mode swaps the user's scene styling for a fixed Reel cover
        // treatment so the overlays stay legible.
        Some(icons) => {
            prompt.push_str(
                "- **Style**: High-impact Reel cover. Bold saturated colors, strong subject separation.\n\
                 - **Background**: Deep gradient backdrop with a subtle radial glow behind the subject.\n\
                 - **Lighting**: Punchy rim light plus a soft key light on the face.\n",
            );
            prompt.push_str(&format!(
                "\n\
                 ICON OVERLAYS:\n\
                 - Place one icon representing \"{icons}\" floating to the LEFT of the subject.\n\
                 - Place one icon representing \"{icons}\" floating to the RIGHT of the subject.\n\
                 - Render each icon as a glossy 3D sticker with a thick white outline and a soft drop shadow.\n",
            ));
        }
        None => {
            prompt.push_str(&format!(
                "- **Style**: {style}.\n\
                 - **Background**: {background}.\n\
                 - **Lighting**: {lighting}.\n",
                style = config.style,
                background = config.background,
                lighting = config.lighting,
            ));
        }
    }

    prompt.push_str(
        "\n\
         QUALITY STANDARDS:\n\
         - 8k UHD, Hyper-realistic, High Texture.\n\
         - **NO PLASTIC SKIN**: Keep natural skin pores and texture.\n\
         - **Sharp Focus**: Eyes must be perfectly sharp and detailed.\n\
         - NO TEXT OVERLAYS, no watermarks, no compression artifacts.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputSize;

    fn excited_config() -> StyleConfig {
        StyleConfig {
            pose: "Thumbs up".to_string(),
            style: "Cinematic".to_string(),
            emotion: "Excited".to_string(),
            size: OutputSize::Landscape,
            ..StyleConfig::default()
        }
    }

    #[test]
    fn identical_inputs_yield_identical_text() {
        let config = excited_config();
        assert_eq!(build_prompt(&config, 2), build_prompt(&config, 2));
    }

    #[test]
    fn selections_appear_verbatim() {
        let prompt = build_prompt(&excited_config(), 2);
        assert!(prompt.contains("Thumbs up"));
        assert!(prompt.contains("Excited"));
        assert!(prompt.contains("2 attached reference image(s)"));
    }

    #[test]
    fn zero_references_still_renders() {
        let prompt = build_prompt(&excited_config(), 0);
        assert!(prompt.contains("0 attached reference image(s)"));
    }

    #[test]
    fn no_icon_block_without_icons() {
        let mut config = excited_config();
        config.icons = None;
        assert!(!build_prompt(&config, 1).contains("ICON OVERLAYS"));

        config.icons = Some("   ".to_string());
        assert!(!build_prompt(&config, 1).contains("ICON OVERLAYS"));
    }

    #[test]
    fn icon_block_names_exactly_two_placements() {
        let mut config = excited_config();
        config.icons = Some("rocket, flame".to_string());
        let prompt = build_prompt(&config, 1);

        assert_eq!(prompt.matches("ICON OVERLAYS").count(), 1);
        assert_eq!(prompt.matches("LEFT of the subject").count(), 1);
        assert_eq!(prompt.matches("RIGHT of the subject").count(), 1);
        assert!(prompt.contains("rocket, flame"));
    }

    #[test]
    fn icon_mode_replaces_user_scene_styling() {
        let mut config = excited_config();
        config.background = "Neon Alley".to_string();
        config.icons = Some("rocket".to_string());

        let prompt = build_prompt(&config, 1);
        assert!(!prompt.contains("Neon Alley"));
        assert!(prompt.contains("High-impact Reel cover"));
    }

    #[test]
    fn quality_constraints_always_close_the_prompt() {
        let prompt = build_prompt(&excited_config(), 3);
        assert!(prompt.contains("NO TEXT OVERLAYS"));
        assert!(prompt.trim_end().ends_with("no compression artifacts."));
    }
}
