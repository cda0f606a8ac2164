//! Base colors the mosaic tiles are drawn from.

use std::path::Path;

use rand::Rng;
use tessella_core::Rgb;

/// Number of base colors in a palette.
pub const PALETTE_SIZE: usize = 4;

/// Built-in palette: coral, teal, gold, lavender.
pub const DEFAULT_COLORS: [Rgb; PALETTE_SIZE] = [
    Rgb::new(255, 107, 107),
    Rgb::new(78, 205, 196),
    Rgb::new(255, 209, 102),
    Rgb::new(155, 135, 245),
];

/// Edge length images are shrunk to before averaging.
const SAMPLE_EDGE: u32 = 64;

/// A fixed set of base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

impl Palette {
    pub const fn new(colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Pick a base color uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        self.colors[rng.random_range(0..PALETTE_SIZE)]
    }

    /// Build a palette from the average colors of gallery images.
    ///
    /// The first four references fill the four slots in order. A slot whose
    /// image is missing or cannot be decoded keeps its built-in color.
    pub fn from_images<P: AsRef<Path>>(images: &[P]) -> Self {
        let mut colors = DEFAULT_COLORS;
        for (slot, path) in colors.iter_mut().zip(images) {
            if let Some(avg) = average_color(path.as_ref()) {
                *slot = avg;
            }
        }
        Self { colors }
    }
}

/// Mean RGB of an image, or `None` if it cannot be read.
fn average_color(path: &Path) -> Option<Rgb> {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "skipping gallery image for palette");
            return None;
        }
    };
    let rgb = img.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE).to_rgb8();

    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for pixel in rgb.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += channel as u64;
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }

    let [r, g, b] = sums.map(|s| (s / count) as u8);
    Some(Rgb::new(r, g, b))
}
