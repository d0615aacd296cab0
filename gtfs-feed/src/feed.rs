use crate::{objects::*, Error};
use log::info;
use rustc_hash::FxHashMap;

/// The complete set of in-memory tables for one transit dataset.
///
/// All tables are owned by the editing session; rows are mutated in place by
/// cell edits and removed by the structural operations below. Derived data
/// (patterns, filters, compiled exports) is recomputed from a snapshot of
/// this structure and never stored back into it.
#[derive(Debug, Default)]
pub struct Feed {
    /// All stops by `stop_id`
    pub stops: FxHashMap<String, Stop>,
    /// All routes by `route_id`
    pub routes: FxHashMap<String, Route>,
    /// All trips by `trip_id`; each trip owns its [StopTime] rows
    pub trips: FxHashMap<String, Trip>,
    /// All service calendars by `service_id`
    pub calendar: FxHashMap<String, Calendar>,
    /// All shape points by `shape_id`, sorted by point sequence
    pub shapes: FxHashMap<String, Vec<ShapePoint>>,
    /// All agencies. Not keyed, as `agency_id` is not a required field
    pub agencies: Vec<Agency>,
}

impl Feed {
    /// Reads a feed from a directory of CSV tables. See [crate::feed_reader].
    pub fn from_path<P>(path: P) -> Result<Feed, Error>
    where
        P: AsRef<std::path::Path>,
    {
        crate::feed_reader::read_from_directory(path.as_ref())
    }

    /// Builds the table set from freshly parsed rows, attaching each
    /// [StopTime] to its owning trip.
    ///
    /// Fails with [Error::Reference] if a stop time names a trip or stop that
    /// does not exist in the incoming rows.
    pub fn assemble(
        stops: Vec<Stop>,
        routes: Vec<Route>,
        trips: Vec<Trip>,
        stop_times: Vec<StopTime>,
        calendar: Vec<Calendar>,
        shapes: Vec<ShapePoint>,
        agencies: Vec<Agency>,
    ) -> Result<Feed, Error> {
        let stops = to_map(stops);
        let mut trips = to_map(trips);
        for stop_time in stop_times {
            if !stops.contains_key(&stop_time.stop_id) {
                return Err(Error::Reference(stop_time.stop_id));
            }
            let trip = trips
                .get_mut(&stop_time.trip_id)
                .ok_or_else(|| Error::Reference(stop_time.trip_id.clone()))?;
            trip.stop_times.push(stop_time);
        }
        for trip in trips.values_mut() {
            trip.stop_times.sort_by_key(|st| st.stop_sequence);
        }

        Ok(Feed {
            stops,
            routes: to_map(routes),
            trips,
            calendar: to_map(calendar),
            shapes: to_shape_map(shapes),
            agencies,
        })
    }

    /// Logs the table sizes. Mostly to be sure that everything was read.
    pub fn log_stats(&self) {
        info!("feed tables:");
        info!("  stops: {}", self.stops.len());
        info!("  routes: {}", self.routes.len());
        info!("  trips: {}", self.trips.len());
        info!("  calendars: {}", self.calendar.len());
        info!("  shapes: {}", self.shapes.len());
        info!("  agencies: {}", self.agencies.len());
    }

    /// Gets a [Stop] by its `stop_id`.
    pub fn get_stop<'a>(&'a self, id: &str) -> Result<&'a Stop, Error> {
        self.stops
            .get(id)
            .ok_or_else(|| Error::Reference(id.to_owned()))
    }

    /// Gets a [Trip] by its `trip_id`.
    pub fn get_trip<'a>(&'a self, id: &str) -> Result<&'a Trip, Error> {
        self.trips
            .get(id)
            .ok_or_else(|| Error::Reference(id.to_owned()))
    }

    /// Gets a [Route] by its `route_id`.
    pub fn get_route<'a>(&'a self, id: &str) -> Result<&'a Route, Error> {
        self.routes
            .get(id)
            .ok_or_else(|| Error::Reference(id.to_owned()))
    }

    /// True if `trip_id` currently has a stop time row visiting `stop_id`.
    pub fn has_visit(&self, trip_id: &str, stop_id: &str) -> bool {
        self.trips
            .get(trip_id)
            .map(|trip| trip.stop_times.iter().any(|st| st.stop_id == stop_id))
            .unwrap_or(false)
    }

    /// Removes a trip and its stop time rows, returning it if present.
    pub fn remove_trip(&mut self, trip_id: &str) -> Option<Trip> {
        self.trips.remove(trip_id)
    }

    /// Removes a route and every trip running along it.
    pub fn remove_route(&mut self, route_id: &str) -> Option<(Route, Vec<Trip>)> {
        let route = self.routes.remove(route_id)?;
        let doomed: Vec<String> = self
            .trips
            .values()
            .filter(|trip| trip.route_id == route_id)
            .map(|trip| trip.id.clone())
            .collect();
        let removed = doomed
            .iter()
            .filter_map(|id| self.trips.remove(id))
            .collect();
        Some((route, removed))
    }

    /// Removes the stop time row of `trip_id` at `stop_sequence`, returning
    /// it if present. Remaining rows keep their authored sequence numbers;
    /// dense renumbering happens at compilation, not here.
    pub fn remove_stop_time(&mut self, trip_id: &str, stop_sequence: u32) -> Option<StopTime> {
        let trip = self.trips.get_mut(trip_id)?;
        let index = trip
            .stop_times
            .iter()
            .position(|st| st.stop_sequence == stop_sequence)?;
        Some(trip.stop_times.remove(index))
    }
}

fn to_map<O: Id>(elements: impl IntoIterator<Item = O>) -> FxHashMap<String, O> {
    elements
        .into_iter()
        .map(|e| (e.id().to_owned(), e))
        .collect()
}

fn to_shape_map(points: Vec<ShapePoint>) -> FxHashMap<String, Vec<ShapePoint>> {
    let mut res: FxHashMap<String, Vec<ShapePoint>> = FxHashMap::default();
    for point in points {
        res.entry(point.id.clone()).or_default().push(point);
    }
    for shape in res.values_mut() {
        shape.sort_by_key(|p| p.sequence);
    }
    res
}
