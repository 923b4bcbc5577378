//! Declares the [Dimensions] type, the width and height of captured frames and
//! emulator surfaces.

use std::fmt::{self, Display, Formatter};
use std::num::NonZeroU32;

/// A width and a height, both guaranteed to be non-zero.
///
/// # Example
///
/// ```
/// use media::frame::Dimensions;
///
/// let d = Dimensions::new(640, 480).unwrap();
/// assert_eq!(d.width(), 640);
/// assert_eq!(d.height(), 480);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl Dimensions {
    /// A single pixel.
    pub const MIN: Self = Self {
        width: NonZeroU32::MIN,
        height: NonZeroU32::MIN,
    };

    /// Construct from a width and a height.
    ///
    /// This function will return [None] if the width or height are 0.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        let Some(width) = NonZeroU32::new(width) else {
            return None;
        };
        let Some(height) = NonZeroU32::new(height) else {
            return None;
        };

        Some(Self { width, height })
    }

    /// Like [Self::new], but for signed sides (as they come out of integer
    /// controls). Negative or zero sides give [None].
    pub fn from_signed(width: i64, height: i64) -> Option<Self> {
        Self::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?)
    }

    /// The dimensions' width. This will never be `0`.
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    /// The dimensions' height. This will never be `0`.
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// The number of pixels a frame with these dimensions holds.
    pub const fn area(&self) -> usize {
        self.width.get() as usize * self.height.get() as usize
    }

    /// Divide both sides by `factor` (rounding down).
    ///
    /// [None] is returned if either side would be `0` (or `factor` is `0`).
    ///
    /// # Example
    ///
    /// ```
    /// use media::frame::Dimensions;
    ///
    /// let d = Dimensions::new(642, 480).unwrap();
    /// assert_eq!(d.scaled_down(4), Dimensions::new(160, 120));
    /// assert_eq!(d.scaled_down(1000), None);
    /// ```
    pub const fn scaled_down(&self, factor: u32) -> Option<Self> {
        let Some(width) = self.width.get().checked_div(factor) else {
            return None;
        };
        let Some(height) = self.height.get().checked_div(factor) else {
            return None;
        };
        Self::new(width, height)
    }
}

/// When displayed, [Dimensions] will look like `WxH` (e.g. `640x480`).
impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<Dimensions> for (u32, u32) {
    fn from(dimensions: Dimensions) -> Self {
        (dimensions.width(), dimensions.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sides_are_rejected() {
        assert!(Dimensions::new(0, 10).is_none());
        assert!(Dimensions::new(10, 0).is_none());
        assert!(Dimensions::from_signed(-640, 480).is_none());
        assert_eq!(Dimensions::from_signed(640, 480), Dimensions::new(640, 480));
    }

    #[test]
    fn quarter_of_default_session_size() {
        let d = Dimensions::new(640, 480).unwrap();
        assert_eq!(d.scaled_down(4), Dimensions::new(160, 120));
        assert_eq!(d.scaled_down(0), None);
        assert_eq!(d.to_string(), "640x480");
    }
}
