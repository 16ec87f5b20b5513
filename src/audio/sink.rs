//! Utilities for creating `rodio` sinks from local files.
//!
//! Opening and decoding failures are returned as plain reasons so the
//! audio thread can report them as `LoadFailed` events.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

/// A paused sink for `path` together with the source duration, when known.
pub(super) fn create_sink(
    handle: &OutputStream,
    path: &Path,
) -> Result<(Sink, Option<Duration>), String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;

    let source =
        Decoder::try_from(file).map_err(|e| format!("cannot decode {}: {e}", path.display()))?;
    let duration = source
        .total_duration()
        .filter(|d| !d.is_zero())
        .or_else(|| probe_duration(path));

    let sink = Sink::connect_new(handle.mixer());
    sink.pause();
    sink.append(source);
    Ok((sink, duration))
}

/// Read the duration from the container headers. Decoders for some
/// formats (mp3 in particular) cannot tell the length up front.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
