//! The option catalog: style fields, their choice lists, and sample passages.
//!
//! Choice values are the Korean display strings the studio UI shows; the
//! prompt labels are English. Each field carries its own "no selection"
//! sentinel as the first entry of its list — two spellings exist ("기본" and
//! "(선택 안 함)") and they are deliberately not unified per field.

/// Generic "use the default" sentinel.
pub const SENTINEL_DEFAULT: &str = "기본";

/// "Nothing chosen" sentinel used by the camera and era fields.
pub const SENTINEL_NOT_CHOSEN: &str = "(선택 안 함)";

/// Returns true if `value` means "omit this field from the prompt".
///
/// Either sentinel spelling is accepted on any field, as is an empty value.
pub fn is_sentinel(value: &str) -> bool {
    value.is_empty() || value == SENTINEL_DEFAULT || value == SENTINEL_NOT_CHOSEN
}

/// A stylistic modifier field, in prompt composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleField {
    /// Rendering style (watercolour, cinematic photo, ...).
    ArtStyle,
    /// Emotional tone of the scene.
    Mood,
    /// Colour treatment.
    ColorPalette,
    /// Level of rendered detail.
    DetailLevel,
    /// Camera framing.
    CameraFocus,
    /// Time period / setting.
    Era,
}

impl StyleField {
    /// All fields in the fixed order they appear in a composed prompt.
    pub const ALL: [StyleField; 6] = [
        Self::ArtStyle,
        Self::Mood,
        Self::ColorPalette,
        Self::DetailLevel,
        Self::CameraFocus,
        Self::Era,
    ];

    /// The English label emitted into the prompt for this field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ArtStyle => "Art style",
            Self::Mood => "Mood",
            Self::ColorPalette => "Colour palette",
            Self::DetailLevel => "Detail",
            Self::CameraFocus => "Camera",
            Self::Era => "Era",
        }
    }

    /// The ordered choice list for this field, sentinel first.
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            Self::ArtStyle => &[
                SENTINEL_DEFAULT,
                "수채화 일러스트",
                "시네마틱 사진",
                "디지털 페인팅",
                "유화",
                "픽셀 아트",
            ],
            Self::Mood => &[
                SENTINEL_DEFAULT,
                "따뜻하고 포근한",
                "어둡고 미스터리한",
                "서스펜스 넘치는",
                "감성적인",
                "장엄하고 웅장한",
            ],
            Self::ColorPalette => &[
                SENTINEL_DEFAULT,
                "따뜻한 색조",
                "차가운 색조",
                "모노톤",
                "파스텔",
                "선명한 대비",
            ],
            Self::DetailLevel => &[
                SENTINEL_DEFAULT,
                "초고해상도",
                "울트라 디테일",
                "꿈결 같은 소프트 포커스",
            ],
            Self::CameraFocus => &[
                SENTINEL_NOT_CHOSEN,
                "광각 뷰",
                "드론 뷰",
                "클로즈업",
                "시점 샷 (POV)",
                "시네마틱 와이드샷",
            ],
            Self::Era => &[
                SENTINEL_NOT_CHOSEN,
                "현대",
                "중세 판타지",
                "빅토리아 시대",
                "사이버펑크",
                "포스트 아포칼립스",
            ],
        }
    }

    /// This field's own sentinel spelling.
    pub fn sentinel(&self) -> &'static str {
        self.choices()[0]
    }

    /// Checks whether `value` is one of this field's enumerated choices.
    pub fn is_valid_choice(&self, value: &str) -> bool {
        self.choices().contains(&value)
    }
}

impl std::fmt::Display for StyleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Preset passages for quickly trying the studio, as `(label, passage)`.
pub const SAMPLE_PASSAGES: [(&str, &str); 3] = [
    (
        "마법 학교의 연회장",
        "촛불이 허공에 떠 있고 긴 식탁이 늘어선 고딕풍 연회장.",
    ),
    (
        "SF 우주 정거장",
        "거대한 유리창 너머로 푸른 행성이 보이고, 금속 질감의 복도가 이어진다.",
    ),
    (
        "고전 추리극",
        "비에 젖은 런던 골목, 가스등 아래 실루엣으로 보이는 탐정의 모습.",
    ),
];

/// Looks up a sample passage by its display label.
pub fn sample_passage(label: &str) -> Option<&'static str> {
    SAMPLE_PASSAGES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, passage)| *passage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_fixed() {
        assert_eq!(
            StyleField::ALL,
            [
                StyleField::ArtStyle,
                StyleField::Mood,
                StyleField::ColorPalette,
                StyleField::DetailLevel,
                StyleField::CameraFocus,
                StyleField::Era,
            ]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(StyleField::ArtStyle.label(), "Art style");
        assert_eq!(StyleField::ColorPalette.label(), "Colour palette");
        assert_eq!(StyleField::CameraFocus.label(), "Camera");
    }

    #[test]
    fn test_every_field_lists_its_sentinel_first() {
        for field in StyleField::ALL {
            assert!(is_sentinel(field.sentinel()), "{field} sentinel");
            assert_eq!(field.choices()[0], field.sentinel());
        }
    }

    #[test]
    fn test_per_field_sentinel_spellings() {
        assert_eq!(StyleField::ArtStyle.sentinel(), SENTINEL_DEFAULT);
        assert_eq!(StyleField::Mood.sentinel(), SENTINEL_DEFAULT);
        assert_eq!(StyleField::ColorPalette.sentinel(), SENTINEL_DEFAULT);
        assert_eq!(StyleField::DetailLevel.sentinel(), SENTINEL_DEFAULT);
        assert_eq!(StyleField::CameraFocus.sentinel(), SENTINEL_NOT_CHOSEN);
        assert_eq!(StyleField::Era.sentinel(), SENTINEL_NOT_CHOSEN);
    }

    #[test]
    fn test_is_sentinel_accepts_both_spellings() {
        assert!(is_sentinel("기본"));
        assert!(is_sentinel("(선택 안 함)"));
        assert!(is_sentinel(""));
        assert!(!is_sentinel("수채화 일러스트"));
    }

    #[test]
    fn test_choice_validation() {
        assert!(StyleField::ArtStyle.is_valid_choice("유화"));
        assert!(StyleField::ArtStyle.is_valid_choice(SENTINEL_DEFAULT));
        assert!(!StyleField::ArtStyle.is_valid_choice("현대"));
        assert!(StyleField::Era.is_valid_choice("현대"));
    }

    #[test]
    fn test_sample_passage_lookup() {
        assert_eq!(
            sample_passage("고전 추리극"),
            Some("비에 젖은 런던 골목, 가스등 아래 실루엣으로 보이는 탐정의 모습.")
        );
        assert_eq!(sample_passage("없는 장면"), None);
    }
}
