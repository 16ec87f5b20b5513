use crate::library::Locator;

use super::types::LoadStamp;

/// Imperative side of the audio boundary. Implementations never call back
/// into the controller directly; feedback travels as `AudioEvent`s tagged
/// with the `LoadStamp` given to `load`.
pub trait AudioElement {
    /// Replace the current source with `locator`, paused at the start.
    fn load(&mut self, stamp: LoadStamp, locator: &Locator);
    /// Drop the current source, if any.
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_rate(&mut self, rate: f32);
    fn set_volume(&mut self, volume: f32);
}
