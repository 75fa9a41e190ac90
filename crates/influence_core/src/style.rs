//! Connector styling
//!
//! Styles are opaque to the layout code; they are carried along so the
//! rendering layer can draw chain arrows as a light-to-dark gradient and
//! feedback/branch arrows in a darker accent.

use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_hex(&self) -> u32 {
        let c = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xFF;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Light-to-dark blues used for successive chain arrows
pub const CHAIN_PALETTE: [u32; 4] = [0xC7E9F1, 0x9CDCEB, 0x58C4DD, 0x29ABCA];

/// Accent for out-of-band arrows
pub const ACCENT: u32 = 0x236B8E;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStyle {
    pub color: Color,
    pub stroke_width: f32,
}

impl ConnectorStyle {
    /// Style for chain connector `step`, counted from the top of the chain
    pub fn gradient(step: usize) -> Self {
        Self {
            color: Color::from_hex(CHAIN_PALETTE[step % CHAIN_PALETTE.len()]),
            stroke_width: 6.0,
        }
    }

    pub fn accent() -> Self {
        Self {
            color: Color::from_hex(ACCENT),
            stroke_width: 4.0,
        }
    }
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self::gradient(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_survives_conversion() {
        for hex in CHAIN_PALETTE.iter().copied().chain([ACCENT]) {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn gradient_cycles_through_palette() {
        assert_eq!(ConnectorStyle::gradient(0), ConnectorStyle::gradient(4));
        assert_ne!(ConnectorStyle::gradient(0), ConnectorStyle::gradient(1));
        assert!(ConnectorStyle::accent().stroke_width < ConnectorStyle::gradient(2).stroke_width);
    }
}
