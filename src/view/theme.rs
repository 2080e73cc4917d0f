//! Brand colors and chart palettes

pub const BLACK: &str = "#333333";
pub const BROWN: &str = "#313715";
pub const RED: &str = "#A80050";
pub const DARK_GREEN: &str = "#939f5c";
pub const MID_GREEN: &str = "#bbce8a";
pub const LIGHT_GREEN: &str = "#E8F0DA";
pub const WHITE: &str = "#ffffff";

/// Categorical palette for pie slices
pub const PLOTTING_PALETTE_CAT: [&str; 8] = [
    "#a80050", "#84003d", "#F5F5F5", "#E8F0DA", "#bbce8a", "#939f5c", "#E07A5F", "#d33030",
];

/// Choropleth ramps by metric direction
pub const GREEN_SCALE: [&str; 5] = ["#e3f6d5", "#c1d88e", "#a5be91", "#6f946d", "#3a6649"];
pub const RED_SCALE: [&str; 5] = ["#fee5d9", "#fcbba1", "#fc9272", "#fb6a4a", "#de2d26"];
pub const GREY_SCALE: [&str; 5] = ["#f7f7f7", "#d9d9d9", "#bdbdbd", "#969696", "#636363"];

/// Marker colors for outlet layers, cycled in selection order
pub const OUTLET_PALETTE: [&str; 6] = ["#ff7f0e", "#9467bd", "#8c564b", "#e377c2", "#e8e826", "#17becf"];

/// Sankey link fill
pub const SANKEY_LINK: &str = "rgba(209, 231, 168, 0.5)";

pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Parse `#rrggbb` into its channels
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Perceived brightness, 0–255
pub fn luminance((r, g, b): (u8, u8, u8)) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Label color readable on top of `background`
pub fn text_color_on(background: &str) -> &'static str {
    match hex_to_rgb(background) {
        Some(rgb) if luminance(rgb) < 180.0 => "white",
        _ => BROWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_color_on_palette() {
        assert_eq!(text_color_on("#a80050"), "white");
        assert_eq!(text_color_on("#F5F5F5"), BROWN);
        assert_eq!(text_color_on("#939f5c"), "white");
        assert_eq!(text_color_on("not a color"), BROWN);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#E8F0DA"), Some((0xe8, 0xf0, 0xda)));
        assert_eq!(hex_to_rgb("#fff"), None);
    }
}
