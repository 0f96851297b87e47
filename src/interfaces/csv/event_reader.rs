use crate::domain::event::LifecycleEvent;
use crate::error::{LifecycleError, Result};
use std::io::Read;

/// Reads lifecycle events from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<LifecycleEvent>`. It handles whitespace trimming and flexible
/// record lengths automatically.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    /// Creates a new `EventReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes events.
    ///
    /// This allows for processing large replay files in a streaming fashion
    /// without loading the entire dataset into memory.
    pub fn events(self) -> impl Iterator<Item = Result<LifecycleEvent>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LifecycleError::from))
    }
}
