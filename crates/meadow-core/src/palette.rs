//! Session color palettes.
//!
//! One palette is chosen per page load. Its first color is the background
//! shared by the clear color, the floor and the grass fade; the remaining four
//! colors are the grass palette. Ball and particles use the accent ("wisp")
//! color.

use crate::constants::{WISP_ACCENT_HEX, WISP_ACCENT_PALETTE_ID, WISP_DEFAULT_HEX};
use crate::error::{Result, SceneError};
use glam::Vec3;
use rand::Rng;

/// Catalogue ids that may be picked for a session.
pub const PALETTE_IDS: [u16; 12] = [6, 14, 15, 20, 40, 51, 57, 61, 66, 129, 135, 169];

// Rows 6, 14, 15 and 20 are the catalogue palettes. The remaining rows are
// stand-ins with the same id and a similar dark-background layout.
const PALETTE_TABLE: [(u16, [u32; 5]); 12] = [
    (6, [0x490a3d, 0xbd1550, 0xe97f02, 0xf8ca00, 0x8a9b0f]),
    (14, [0x343838, 0x005f6b, 0x008c9e, 0x00b4cc, 0x00dffc]),
    (15, [0x413e4a, 0x73626e, 0xb38184, 0xf0b49e, 0xf7e4be]),
    (20, [0x351330, 0x424254, 0x64908a, 0xe8caa4, 0xcc2a41]),
    (40, [0x2a2c31, 0x3e4147, 0xdfba69, 0xfffedf, 0x5a2e2e]),
    (51, [0x474843, 0xd88a8a, 0x9d9d93, 0xc5cfc6, 0xf8edd1]),
    (57, [0x1c2130, 0x028f76, 0xb3e099, 0xffeaad, 0xd14334]),
    (61, [0x2d2d29, 0x215a6d, 0x3ca2a2, 0x92c7a3, 0xdfece6]),
    (66, [0x1b325f, 0x9cc4e4, 0xe9f2f9, 0x3a89c9, 0xf26c4f]),
    (129, [0x2b222c, 0x5e4352, 0x965d62, 0xc7956d, 0xf2d974]),
    (135, [0x0c0f28, 0x2a1b5a, 0x4a3c9c, 0x8e7dfa, 0xcfc8ff]),
    (169, [0x1e1e20, 0x2a4b5e, 0x6ea49a, 0xe2d9b8, 0xf28f3b]),
];

/// Convert `0xRRGGBB` to linear-ish 0..1 RGB (no gamma conversion, matching
/// how the colors are consumed by the shaders).
#[inline]
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Uniform pick from a non-empty slice.
#[inline]
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionPalette {
    pub id: u16,
    pub background: Vec3,
    pub grass: [Vec3; 4],
    pub wisp: Vec3,
}

impl SessionPalette {
    pub fn by_id(id: u16) -> Result<Self> {
        PALETTE_TABLE
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(pid, hexes)| Self::from_row(*pid, hexes))
            .ok_or(SceneError::UnknownPalette(id))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (id, hexes) = pick(rng, &PALETTE_TABLE);
        Self::from_row(*id, hexes)
    }

    fn from_row(id: u16, hexes: &[u32; 5]) -> Self {
        // Hand-tuned: this palette reads better with a blue accent.
        let wisp = if id == WISP_ACCENT_PALETTE_ID {
            WISP_ACCENT_HEX
        } else {
            WISP_DEFAULT_HEX
        };
        Self {
            id,
            background: hex_to_rgb(hexes[0]),
            grass: [
                hex_to_rgb(hexes[1]),
                hex_to_rgb(hexes[2]),
                hex_to_rgb(hexes[3]),
                hex_to_rgb(hexes[4]),
            ],
            wisp: hex_to_rgb(wisp),
        }
    }

    /// Random grass color from the four-entry palette.
    #[inline]
    pub fn pick_grass<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        *pick(rng, &self.grass)
    }

    pub fn contains_grass(&self, rgb: Vec3) -> bool {
        self.grass.iter().any(|c| c.abs_diff_eq(rgb, 1e-6))
    }
}
