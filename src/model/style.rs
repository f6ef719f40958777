//! Text formatting model: sparse style sets and styled segments.

use serde::{Deserialize, Serialize};

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Map a DrawingML `algn` value. Unknown values (`dist`, `thaiDist`) yield `None`.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "l" => Some(TextAlign::Left),
            "ctr" => Some(TextAlign::Center),
            "r" => Some(TextAlign::Right),
            "just" => Some(TextAlign::Justify),
            _ => None,
        }
    }

    /// CSS `text-align` keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Sparse set of text attributes.
///
/// Every recognized key is enumerated here; an unset key is `None`. Styles
/// from different levels combine with [`StyleSet::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSet {
    /// Paragraph alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,

    /// Left margin in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<i64>,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Font family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    /// Foreground color, `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Highlight (background) color, `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl StyleSet {
    /// Create an empty style set.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == StyleSet::default()
    }

    /// Merge `upper` on top of `self`: every key set in `upper` wins.
    pub fn overlay(&self, upper: &StyleSet) -> StyleSet {
        StyleSet {
            align: upper.align.or(self.align),
            margin_left: upper.margin_left.or(self.margin_left),
            font_size: upper.font_size.or(self.font_size),
            font_family: upper
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            bold: upper.bold.or(self.bold),
            italic: upper.italic.or(self.italic),
            underline: upper.underline.or(self.underline),
            strikethrough: upper.strikethrough.or(self.strikethrough),
            color: upper.color.clone().or_else(|| self.color.clone()),
            highlight: upper.highlight.clone().or_else(|| self.highlight.clone()),
        }
    }

    /// Inline CSS declarations for this style.
    pub fn to_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();
        if let Some(align) = self.align {
            decls.push(format!("text-align:{}", align.as_css()));
        }
        if let Some(margin) = self.margin_left {
            decls.push(format!("margin-left:{}px", margin));
        }
        if let Some(size) = self.font_size {
            decls.push(format!("font-size:{}pt", size));
        }
        if let Some(ref family) = self.font_family {
            decls.push(format!("font-family:'{}'", family.replace('\'', "")));
        }
        if self.bold == Some(true) {
            decls.push("font-weight:bold".to_string());
        }
        if self.italic == Some(true) {
            decls.push("font-style:italic".to_string());
        }
        match (self.underline == Some(true), self.strikethrough == Some(true)) {
            (true, true) => decls.push("text-decoration:underline line-through".to_string()),
            (true, false) => decls.push("text-decoration:underline".to_string()),
            (false, true) => decls.push("text-decoration:line-through".to_string()),
            (false, false) => {}
        }
        if let Some(ref color) = self.color {
            decls.push(format!("color:{}", color));
        }
        if let Some(ref highlight) = self.highlight {
            decls.push(format!("background-color:{}", highlight));
        }
        decls.join(";")
    }
}

/// A piece of text with one resolved style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    pub text: String,

    #[serde(default, skip_serializing_if = "StyleSet::is_empty")]
    pub style: StyleSet,

    /// Marks a line separator; `text` carries no meaning
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_line_break: bool,
}

impl TextSegment {
    /// Create a styled segment.
    pub fn styled(text: impl Into<String>, style: StyleSet) -> Self {
        Self {
            text: text.into(),
            style,
            is_line_break: false,
        }
    }

    /// Create a line separator.
    pub fn line_break() -> Self {
        Self {
            text: " ".to_string(),
            style: StyleSet::default(),
            is_line_break: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_disjoint_keys() {
        let paragraph = StyleSet {
            align: Some(TextAlign::Center),
            ..Default::default()
        };
        let run = StyleSet {
            bold: Some(true),
            ..Default::default()
        };
        let merged = paragraph.overlay(&run);
        assert_eq!(
            merged,
            StyleSet {
                align: Some(TextAlign::Center),
                bold: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_overlay_collision_upper_wins() {
        let paragraph = StyleSet {
            font_size: Some(12.0),
            color: Some("#000000".into()),
            ..Default::default()
        };
        let run = StyleSet {
            font_size: Some(18.0),
            ..Default::default()
        };
        let merged = paragraph.overlay(&run);
        assert_eq!(merged.font_size, Some(18.0));
        assert_eq!(merged.color.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_explicit_false_overrides() {
        let lower = StyleSet {
            bold: Some(true),
            ..Default::default()
        };
        let upper = StyleSet {
            bold: Some(false),
            ..Default::default()
        };
        assert_eq!(lower.overlay(&upper).bold, Some(false));
    }

    #[test]
    fn test_is_empty() {
        assert!(StyleSet::new().is_empty());
        let style = StyleSet {
            italic: Some(false),
            ..Default::default()
        };
        assert!(!style.is_empty());
    }

    #[test]
    fn test_align_from_ooxml() {
        assert_eq!(TextAlign::from_ooxml("ctr"), Some(TextAlign::Center));
        assert_eq!(TextAlign::from_ooxml("just"), Some(TextAlign::Justify));
        assert_eq!(TextAlign::from_ooxml("dist"), None);
    }

    #[test]
    fn test_to_css() {
        let style = StyleSet {
            font_size: Some(24.0),
            bold: Some(true),
            underline: Some(true),
            strikethrough: Some(true),
            color: Some("#FF0000".into()),
            ..Default::default()
        };
        assert_eq!(
            style.to_css(),
            "font-size:24pt;font-weight:bold;text-decoration:underline line-through;color:#FF0000"
        );
        assert_eq!(StyleSet::new().to_css(), "");
    }

    #[test]
    fn test_segment_serialization_is_sparse() {
        let seg = TextSegment::styled("Hi", StyleSet::new());
        let json = serde_json::to_string(&seg).unwrap();
        assert_eq!(json, r#"{"text":"Hi"}"#);

        let json = serde_json::to_string(&TextSegment::line_break()).unwrap();
        assert!(json.contains(r#""isLineBreak":true"#));
    }
}
