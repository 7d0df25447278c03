//! # Utility Module
//!
//! Small numeric helpers shared by the parameter handling code.
//!
//! ## `clamp`
//!
//! Restricts a value to an inclusive range. Values below the minimum become
//! the minimum, values above the maximum become the maximum. Unlike
//! `Ord::clamp` it works for floats and never panics on an inverted range.

/// Clamps a value between a minimum and maximum.
///
/// # Examples
///
/// ```
/// use random_walking_splines::utils::util::clamp;
///
/// assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
/// assert_eq!(clamp(-5, 0, 10), 0);
/// assert_eq!(clamp(1500_u32, 1, 1024), 1024);
/// ```
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Like [`clamp`], but also reports whether the value had to move.
pub fn clamp_checked<T: PartialOrd + Copy>(value: T, min: T, max: T) -> (T, bool) {
    let clamped = clamp(value, min, max);
    (clamped, clamped != value)
}
