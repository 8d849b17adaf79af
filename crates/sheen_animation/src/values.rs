//! Value quantization
//!
//! Reduced-effects configurations animate in a few discrete frames instead
//! of continuously. [`digitize`] rounds a value down to the nearest of
//! `steps` equal steps; zero steps leaves values untouched.

/// Round `value` down to a multiple of `1 / steps`
///
/// `steps == 0` means continuous output.
pub fn digitize(value: f64, steps: u32) -> f64 {
    if steps > 0 {
        let steps = f64::from(steps);
        (value * steps).floor() / steps
    } else {
        value
    }
}
