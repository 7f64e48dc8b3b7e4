//! Read-only floating point RGB texture used for bump displacement.
//!
//! Decoding image files is the loader's business. This type only holds the
//! decoded texels and answers lookups.
use ultraviolet::{Vec2, Vec3};

use crate::{Error, Result};

/// A row-major grid of RGB texels.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Vec3>,
}

impl Texture {
    /// Creates a texture from row-major texel data.
    pub fn new(width: usize, height: usize, texels: Vec<Vec3>) -> Result<Self> {
        if texels.len() != width * height {
            return Err(Error::InvalidTexture {
                width,
                height,
                texels: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Creates a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Vec3) -> Self {
        let texels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            texels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the texel at `(x, y)`.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Result<Vec3> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(
                "texels",
                y.saturating_mul(self.width).saturating_add(x),
                self.texels.len(),
            ));
        }
        Ok(self.texels[y * self.width + x])
    }

    /// Nearest lookup at a normalized coordinate.
    ///
    /// `uv` maps to texel `((width - 1) * u, (height - 1) * v)`, truncated.
    /// Coordinates outside `[0, 1]` are an error, not wrapped.
    pub fn sample(&self, uv: Vec2) -> Result<Vec3> {
        let x = (self.width.saturating_sub(1)) as f32 * uv.x;
        let y = (self.height.saturating_sub(1)) as f32 * uv.y;
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            return Err(Error::out_of_bounds(
                "texels",
                (y.max(0.0) as usize)
                    .saturating_mul(self.width)
                    .saturating_add(x.max(0.0) as usize),
                self.texels.len(),
            ));
        }
        self.texel(x as usize, y as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_size_mismatch() {
        assert!(Texture::new(2, 2, vec![Vec3::zero(); 3]).is_err());
        assert!(Texture::new(2, 2, vec![Vec3::zero(); 4]).is_ok());
    }

    #[test]
    fn test_texture_sample() {
        let texture = Texture::from_fn(3, 2, |x, y| Vec3::new(x as f32, y as f32, 0.0));

        assert_eq!(texture.sample(Vec2::new(0.0, 0.0)).unwrap(), Vec3::zero());
        assert_eq!(
            texture.sample(Vec2::new(1.0, 1.0)).unwrap(),
            Vec3::new(2.0, 1.0, 0.0)
        );
        assert_eq!(
            texture.sample(Vec2::new(0.5, 0.0)).unwrap(),
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert!(texture.sample(Vec2::new(-0.5, 0.0)).is_err());
        assert!(texture.sample(Vec2::new(0.0, 7.0)).is_err());
    }
}
