//! The prompt composer: passage + style selections to one Imagen prompt.

use crate::prompt::catalog::{is_sentinel, StyleField};

/// The six user-selected stylistic modifiers.
///
/// Each field holds one of its catalog choices, or its sentinel for "no
/// selection". `Default` sets every field to its own sentinel spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOptions {
    /// Rendering style.
    pub art_style: String,
    /// Emotional tone.
    pub mood: String,
    /// Colour treatment.
    pub color_palette: String,
    /// Level of rendered detail.
    pub detail_level: String,
    /// Camera framing.
    pub camera_focus: String,
    /// Time period / setting.
    pub era: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            art_style: StyleField::ArtStyle.sentinel().to_string(),
            mood: StyleField::Mood.sentinel().to_string(),
            color_palette: StyleField::ColorPalette.sentinel().to_string(),
            detail_level: StyleField::DetailLevel.sentinel().to_string(),
            camera_focus: StyleField::CameraFocus.sentinel().to_string(),
            era: StyleField::Era.sentinel().to_string(),
        }
    }
}

impl StyleOptions {
    /// Creates options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the art style.
    pub fn with_art_style(mut self, value: impl Into<String>) -> Self {
        self.art_style = value.into();
        self
    }

    /// Sets the mood.
    pub fn with_mood(mut self, value: impl Into<String>) -> Self {
        self.mood = value.into();
        self
    }

    /// Sets the colour palette.
    pub fn with_color_palette(mut self, value: impl Into<String>) -> Self {
        self.color_palette = value.into();
        self
    }

    /// Sets the detail level.
    pub fn with_detail_level(mut self, value: impl Into<String>) -> Self {
        self.detail_level = value.into();
        self
    }

    /// Sets the camera framing.
    pub fn with_camera_focus(mut self, value: impl Into<String>) -> Self {
        self.camera_focus = value.into();
        self
    }

    /// Sets the era.
    pub fn with_era(mut self, value: impl Into<String>) -> Self {
        self.era = value.into();
        self
    }

    /// The selected value for `field`.
    pub fn value(&self, field: StyleField) -> &str {
        match field {
            StyleField::ArtStyle => &self.art_style,
            StyleField::Mood => &self.mood,
            StyleField::ColorPalette => &self.color_palette,
            StyleField::DetailLevel => &self.detail_level,
            StyleField::CameraFocus => &self.camera_focus,
            StyleField::Era => &self.era,
        }
    }

    /// `(label, value)` pairs in the fixed composition order.
    pub fn labeled_values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        StyleField::ALL
            .into_iter()
            .map(move |field| (field.label(), self.value(field)))
    }
}

/// Combines a passage and style selections into a single Imagen prompt.
///
/// The trimmed passage comes first when non-empty, followed by a
/// `"Label: value"` segment for every field whose value is not a sentinel,
/// always in catalog order, joined with `" | "`. Pure and total: no input
/// produces an error, and all-sentinel options with a blank passage yield
/// the empty string.
pub fn compose_prompt(passage: &str, options: &StyleOptions) -> String {
    let mut parts: Vec<String> = Vec::new();

    let passage = passage.trim();
    if !passage.is_empty() {
        parts.push(passage.to_string());
    }

    for (label, value) in options.labeled_values() {
        if !is_sentinel(value) {
            parts.push(format!("{label}: {value}"));
        }
    }

    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::catalog::{SENTINEL_DEFAULT, SENTINEL_NOT_CHOSEN};

    #[test]
    fn test_all_sentinels_yield_trimmed_passage() {
        let options = StyleOptions::default();
        assert_eq!(compose_prompt("A dark castle.", &options), "A dark castle.");
        assert_eq!(
            compose_prompt("  A dark castle.\n", &options),
            "A dark castle."
        );
    }

    #[test]
    fn test_blank_passage_all_sentinels_is_empty() {
        let options = StyleOptions::default();
        assert_eq!(compose_prompt("", &options), "");
        assert_eq!(compose_prompt("  ", &options), "");
    }

    #[test]
    fn test_single_field_no_leading_delimiter() {
        let options = StyleOptions::default().with_mood("감성적인");
        assert_eq!(compose_prompt("", &options), "Mood: 감성적인");
        assert_eq!(compose_prompt("   ", &options), "Mood: 감성적인");
    }

    #[test]
    fn test_passage_with_one_style() {
        let options = StyleOptions::default().with_art_style("수채화 일러스트");
        assert_eq!(
            compose_prompt("A dark castle.", &options),
            "A dark castle. | Art style: 수채화 일러스트"
        );
    }

    #[test]
    fn test_field_order_is_catalog_order() {
        // Era set "before" mood still composes after it.
        let options = StyleOptions::default()
            .with_era("현대")
            .with_mood("따뜻하고 포근한");
        assert_eq!(
            compose_prompt("Ocean view", &options),
            "Ocean view | Mood: 따뜻하고 포근한 | Era: 현대"
        );
    }

    #[test]
    fn test_all_fields_set() {
        let options = StyleOptions::default()
            .with_art_style("유화")
            .with_mood("장엄하고 웅장한")
            .with_color_palette("모노톤")
            .with_detail_level("초고해상도")
            .with_camera_focus("드론 뷰")
            .with_era("중세 판타지");
        assert_eq!(
            compose_prompt("성벽 위의 기사", &options),
            "성벽 위의 기사 | Art style: 유화 | Mood: 장엄하고 웅장한 \
             | Colour palette: 모노톤 | Detail: 초고해상도 \
             | Camera: 드론 뷰 | Era: 중세 판타지"
        );
    }

    #[test]
    fn test_sentinel_spellings_are_interchangeable() {
        // Swapping one sentinel spelling for the other never changes output.
        let defaults = StyleOptions::default();
        let swapped = StyleOptions::default()
            .with_art_style(SENTINEL_NOT_CHOSEN)
            .with_era(SENTINEL_DEFAULT);
        let passage = "Ocean view";
        assert_eq!(
            compose_prompt(passage, &defaults),
            compose_prompt(passage, &swapped)
        );
    }

    #[test]
    fn test_empty_field_value_is_omitted() {
        let options = StyleOptions::default().with_mood("");
        assert_eq!(compose_prompt("Ocean view", &options), "Ocean view");
    }

    #[test]
    fn test_labeled_values_order() {
        let options = StyleOptions::default();
        let labels: Vec<&str> = options.labeled_values().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Art style",
                "Mood",
                "Colour palette",
                "Detail",
                "Camera",
                "Era"
            ]
        );
    }
}
