//! Paragraph and run formatting.
//!
//! DrawingML spreads text attributes over `a:pPr` (paragraph), `a:rPr`
//! (run) and `a:defRPr` (paragraph defaults). Each is read into a sparse
//! [`StyleSet`]; the effective style of a run is its paragraph style with the
//! run style laid over it.

use crate::model::{emu_to_px, StyleSet, TextAlign};
use crate::xml::XmlNode;

/// Fixed theme palette used for `a:schemeClr` foreground colors.
const THEME_COLORS: &[(&str, &str)] = &[
    ("dk1", "#000000"),
    ("lt1", "#ffffff"),
    ("dk2", "#1F497D"),
    ("lt2", "#EEECE1"),
    ("accent1", "#4F81BD"),
    ("accent2", "#F79646"),
    ("accent3", "#9BBB59"),
    ("accent4", "#8064A2"),
    ("accent5", "#4BACC6"),
    ("accent6", "#F24992"),
];

/// Hyperlink entries that only apply to highlight colors.
const HIGHLIGHT_THEME_EXTRA: &[(&str, &str)] = &[("hlink", "#0563C1"), ("folHlink", "#954F72")];

/// Preset colors recognized in `a:highlight`.
const PRESET_COLORS: &[(&str, &str)] = &[
    ("yellow", "#FFFF00"),
    ("lime", "#00FF00"),
    ("cyan", "#00FFFF"),
    ("magenta", "#FF00FF"),
    ("blue", "#0000FF"),
    ("red", "#FF0000"),
    ("darkBlue", "#000080"),
    ("darkCyan", "#008080"),
    ("darkGreen", "#008000"),
    ("darkMagenta", "#800080"),
    ("darkRed", "#800000"),
    ("darkYellow", "#808000"),
    ("darkGray", "#808080"),
    ("lightGray", "#C0C0C0"),
    ("black", "#000000"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Theme color for a `schemeClr` value.
pub fn theme_color(name: &str) -> Option<&'static str> {
    lookup(THEME_COLORS, name)
}

/// Preset color for a `prstClr` value.
pub fn preset_color(name: &str) -> Option<&'static str> {
    lookup(PRESET_COLORS, name)
}

fn is_on(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

fn srgb(node: &XmlNode) -> Option<String> {
    node.first_descendant("a:srgbClr")
        .and_then(|c| c.attr("val"))
        .filter(|v| !v.is_empty())
        .map(|v| format!("#{}", v))
}

fn scheme<'a>(node: &'a XmlNode) -> Option<&'a str> {
    node.first_descendant("a:schemeClr").and_then(|c| c.attr("val"))
}

/// Foreground color of a run from its direct `a:solidFill`.
///
/// A theme color wins over an RGB value when both are present.
fn fill_color(rpr: &XmlNode) -> Option<String> {
    let fill = rpr.child("a:solidFill")?;
    let themed = scheme(fill).and_then(theme_color).map(String::from);
    themed.or_else(|| srgb(fill))
}

/// Highlight color of a run from `a:highlight`.
///
/// Preset colors override theme colors, which override RGB values.
fn highlight_color(rpr: &XmlNode) -> Option<String> {
    let highlight = rpr.first_descendant("a:highlight")?;
    let preset = highlight
        .first_descendant("a:prstClr")
        .and_then(|c| c.attr("val"))
        .and_then(preset_color);
    let themed = scheme(highlight)
        .and_then(|name| theme_color(name).or_else(|| lookup(HIGHLIGHT_THEME_EXTRA, name)));
    preset
        .or(themed)
        .map(String::from)
        .or_else(|| srgb(highlight))
}

fn font_family(rpr: &XmlNode) -> Option<String> {
    let typeface = |name: &str| {
        rpr.first_descendant(name)
            .and_then(|n| n.attr("typeface"))
            .filter(|t| !t.is_empty())
            .map(String::from)
    };
    // East Asian face first: CJK text needs it to render at all
    typeface("a:ea").or_else(|| typeface("a:latin"))
}

fn font_size(props: &XmlNode) -> Option<f32> {
    props.attr_i64("sz").map(|sz| sz as f32 / 100.0)
}

/// Alignment and left margin from the paragraph's first `a:pPr`.
pub fn paragraph_style(paragraph: &XmlNode) -> StyleSet {
    let mut style = StyleSet::new();
    let Some(ppr) = paragraph.first_descendant("a:pPr") else {
        return style;
    };
    style.align = ppr.attr("algn").and_then(TextAlign::from_ooxml);
    style.margin_left = ppr.attr_i64("marL").map(emu_to_px);
    style
}

/// Run attributes from the run's first `a:rPr`.
pub fn run_style(run: &XmlNode) -> StyleSet {
    let mut style = StyleSet::new();
    let Some(rpr) = run.first_descendant("a:rPr") else {
        return style;
    };

    style.font_size = font_size(rpr);
    if is_on(rpr.attr("b")) {
        style.bold = Some(true);
    }
    if is_on(rpr.attr("i")) {
        style.italic = Some(true);
    }
    if rpr.attr("u").is_some_and(|u| u != "none") {
        style.underline = Some(true);
    }
    if rpr.attr("strike").is_some_and(|s| s != "noStrike") {
        style.strikethrough = Some(true);
    }
    style.font_family = font_family(rpr);
    style.color = fill_color(rpr);
    style.highlight = highlight_color(rpr);
    style
}

/// Paragraph-level run defaults from `a:defRPr`: size and Latin face.
pub fn default_run_style(paragraph: &XmlNode) -> StyleSet {
    let mut style = StyleSet::new();
    let Some(def) = paragraph.first_descendant("a:defRPr") else {
        return style;
    };
    style.font_size = font_size(def);
    style.font_family = def
        .first_descendant("a:latin")
        .and_then(|n| n.attr("typeface"))
        .filter(|t| !t.is_empty())
        .map(String::from);
    style
}

/// Run style, falling back to the paragraph's defaults when the run sets
/// nothing itself.
pub fn resolved_run_style(run: &XmlNode, paragraph: Option<&XmlNode>) -> StyleSet {
    let style = run_style(run);
    match paragraph {
        Some(p) if style.is_empty() => default_run_style(p),
        _ => style,
    }
}

/// Effective style of a run: paragraph style overlaid by the run style.
pub fn effective_run_style(
    paragraph_style: &StyleSet,
    run: &XmlNode,
    paragraph: Option<&XmlNode>,
) -> StyleSet {
    paragraph_style.overlay(&resolved_run_style(run, paragraph))
}
