//! Classic 2048 tile colours.

use serde::Serialize;

const DARK_TEXT: &str = "#776e65";
const LIGHT_TEXT: &str = "#f9f6f2";

/// Background and text colour for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileStyle {
    pub background: &'static str,
    pub foreground: &'static str,
}

pub fn tile_style(value: u32) -> TileStyle {
    let (background, foreground) = match value {
        0 => ("#cdc1b4", DARK_TEXT),
        2 => ("#eee4da", DARK_TEXT),
        4 => ("#ede0c8", DARK_TEXT),
        8 => ("#f2b179", LIGHT_TEXT),
        16 => ("#f59563", LIGHT_TEXT),
        32 => ("#f67c5f", LIGHT_TEXT),
        64 => ("#f65e3b", LIGHT_TEXT),
        128 => ("#edcf72", LIGHT_TEXT),
        256 => ("#edcc61", LIGHT_TEXT),
        512 => ("#edc850", LIGHT_TEXT),
        1024 => ("#edc53f", LIGHT_TEXT),
        2048 => ("#edc22e", LIGHT_TEXT),
        _ => ("#3c3a32", LIGHT_TEXT),
    };
    TileStyle {
        background,
        foreground,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_tiles_use_dark_text() {
        assert_eq!(tile_style(0).foreground, DARK_TEXT);
        assert_eq!(tile_style(4).foreground, DARK_TEXT);
        assert_eq!(tile_style(8).foreground, LIGHT_TEXT);
    }

    #[test]
    fn test_tiles_past_2048_share_fallback() {
        assert_eq!(tile_style(4096), tile_style(65536));
        assert_eq!(tile_style(2048).background, "#edc22e");
    }
}
