/*! Editing and export engine for transit schedule feeds.

The [gtfs_feed] crate holds the editable tables; this crate layers the
behavior of the schedule editor on top:

- [query] — a small boolean expression language for filtering table rows,
- [patterns] — reconstruction of the canonical stop visit patterns implied
  by the trips table,
- [restrictions] — per-(trip, stop) pickup/drop-off override rules,
- [compiler] — materialization of those rules into an export-ready table
  pair, splitting trips where an interchange-style rule requires two physical
  vehicle runs,
- [session] — the owner of the tables and rules, keeping both consistent
  across structural edits.

Everything is synchronous and single-threaded. The derivation components
take a snapshot of the tables and return fresh data; nothing holds references
across calls, so callers may recompute as often as they like (typically on
every keystroke of a filter box).
*/

pub mod compiler;
pub mod patterns;
pub mod query;
pub mod restrictions;
pub mod session;

pub use gtfs_feed;
