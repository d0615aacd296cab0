/*! In-memory model of an editable transit feed.

A feed is a collection of CSV tables (stops, routes, trips, per-stop times,
shapes, service calendars) that reference each other through unique
identifiers. This crate deserializes those tables into Rust rows, keeps them
in an editable [Feed], and writes export-ready tables back out.

## Design decisions

### Raw strings for times

The editing layer must keep whatever a user typed into a time cell, including
half-finished values; rows therefore carry times as raw strings and the
[time] module provides the display/stored codec and a seconds parser on top.
Nothing in this crate raises an error for a malformed time — validation is a
downstream concern.

### Use of enums

Integer-coded columns (`pickup_type`, `direction_id`, `route_type`) are
represented as Rust enums with an `Unknown`/`Other` arm so imported rows
round-trip without loss.

### Errors only at the I/O boundary

Reading and writing files returns [Error]; everything operating on an
assembled [Feed] is best effort and silent, in line with the surrounding
editor surfacing counters instead of failures.
*/
#![warn(missing_docs)]

mod enums;
pub mod error;
mod export;
mod feed;
mod feed_reader;
mod feed_writer;
mod objects;
pub(crate) mod serde_helpers;
pub mod time;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use export::{ExportStopTime, ExportTrip};
pub use feed::Feed;
pub use feed_writer::write_export;
pub use objects::*;
