//! Transparent debug taps
//!
//! `value` and `list` log what flows through them at debug level and hand it back
//! untouched, so they can wrap any expression without changing control flow.

use std::fmt::Debug;

use tracing::debug;

/// Log a labelled value and return it
pub fn value<T: Debug>(name: &str, value: T) -> T {
    debug!("{} = {:?}", name, value);
    value
}

/// Log a labelled sequence element by element and return it
pub fn list<T: Debug>(name: &str, items: Vec<T>) -> Vec<T> {
    debug!("<list {} with {} elements>", name, items.len());
    for (i, item) in items.iter().enumerate() {
        debug!("{}[{}] : {:?}", name, i, item);
    }
    debug!("</list {}>", name);
    items
}
