//! Beat positions for each voice.
//!
//! All positions are in beats from the start of the timeline, where a beat is a
//! quarter note. Generators are pure: the same inputs always give the same output.

use super::{Pattern, Stroke};

/// One position per subdivision step: `step / subdivision` for
/// `bars * beats_per_bar * subdivision` steps.
///
/// The step count saturates at `u64::MAX`.
pub fn hihat_beats(bars: u32, beats_per_bar: u32, subdivision: u32) -> impl Iterator<Item = f64> {
    let steps = (bars as u64 * beats_per_bar as u64).saturating_mul(subdivision as u64);
    (0..steps).map(move |step| step as f64 / subdivision as f64)
}

/// Offset 2 of every bar.
pub fn snare_beats(bars: u32, beats_per_bar: u32) -> impl Iterator<Item = f64> {
    (0..bars as u64).map(move |bar| (bar * beats_per_bar as u64 + 2) as f64)
}

/// The start and offset 3 of every complete two-bar group.
///
/// With an odd `bars` the last bar gets no kick: `bars / 2` truncates.
pub fn kick_beats(bars: u32, beats_per_bar: u32) -> impl Iterator<Item = f64> {
    let group_len = 2 * beats_per_bar as u64;
    (0..(bars / 2) as u64).flat_map(move |group| {
        let base = group * group_len;
        [base as f64, (base + 3) as f64]
    })
}

/// Offsets 2.5, 3 and 3.5 of every bar.
pub fn open_hat_beats(bars: u32, beats_per_bar: u32) -> impl Iterator<Item = f64> {
    (0..bars as u64).flat_map(move |bar| {
        let base = (bar * beats_per_bar as u64) as f64;
        [base + 2.5, base + 3., base + 3.5]
    })
}

/// The downbeat of bars 0, 8, 16, …
pub fn cymbal_beats(bars: u32, beats_per_bar: u32) -> impl Iterator<Item = f64> {
    (0..bars as u64)
        .step_by(8)
        .map(move |bar| (bar * beats_per_bar as u64) as f64)
}

/// Hi-hat pattern with the default [`Stroke`].
///
/// A `subdivision` of zero gives an empty pattern.
pub fn generate_hihat(bars: u32, beats_per_bar: u32, subdivision: u32) -> Pattern {
    Stroke::default().pattern(hihat_beats(bars, beats_per_bar, subdivision))
}

/// Snare pattern with the default [`Stroke`].
pub fn generate_snare(bars: u32, beats_per_bar: u32) -> Pattern {
    Stroke::default().pattern(snare_beats(bars, beats_per_bar))
}

/// Kick pattern with the default [`Stroke`].
pub fn generate_kick(bars: u32, beats_per_bar: u32) -> Pattern {
    Stroke::default().pattern(kick_beats(bars, beats_per_bar))
}

/// Open hi-hat pattern with the default [`Stroke`].
pub fn generate_open_hat(bars: u32, beats_per_bar: u32) -> Pattern {
    Stroke::default().pattern(open_hat_beats(bars, beats_per_bar))
}

/// Cymbal pattern with the default [`Stroke`].
pub fn generate_cymbal(bars: u32, beats_per_bar: u32) -> Pattern {
    Stroke::default().pattern(cymbal_beats(bars, beats_per_bar))
}
