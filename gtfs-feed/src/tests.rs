use crate::objects::*;
use crate::{Error, ExportStopTime, ExportTrip, Feed};

fn basic_feed() -> Feed {
    Feed::from_path("fixtures/basic").expect("impossible to read feed")
}

#[test]
fn read_tables() {
    let feed = basic_feed();
    assert_eq!(5, feed.stops.len());
    assert_eq!(2, feed.routes.len());
    assert_eq!(3, feed.trips.len());
    assert_eq!(2, feed.calendar.len());
    assert_eq!(1, feed.shapes.len());
    assert_eq!(1, feed.agencies.len());
    assert_eq!("Demo Transit Authority", feed.agencies[0].name);
}

#[test]
fn read_stops() {
    let feed = basic_feed();
    assert_eq!("Cedar Square", feed.get_stop("C").unwrap().name);
    assert_eq!("Main interchange", feed.get_stop("C").unwrap().description);
    assert_eq!(Some(47.599), feed.get_stop("A").unwrap().latitude);
    // E has a blank longitude cell
    assert_eq!(None, feed.get_stop("E").unwrap().longitude);
    assert!(feed.get_stop("Utopia").is_err());
}

#[test]
fn read_routes() {
    let feed = basic_feed();
    let route = feed.get_route("18").unwrap();
    assert_eq!(RouteType::Bus, route.route_type);
    assert_eq!(rgb::RGB8::new(0x1F, 0x6F, 0xB2), route.color);
    // blank colors fall back to white on black
    let plain = feed.get_route("9").unwrap();
    assert_eq!(rgb::RGB8::new(255, 255, 255), plain.color);
    assert_eq!(rgb::RGB8::new(0, 0, 0), plain.text_color);
    assert_eq!("Cedar Express", format!("{}", plain));
}

#[test]
fn read_trips_and_stop_times() {
    let feed = basic_feed();
    let trip = feed.get_trip("T1").unwrap();
    assert_eq!(Some(DirectionType::Outbound), trip.direction_id);
    assert_eq!(Some("shp1".to_owned()), trip.shape_id);
    assert_eq!(None, feed.get_trip("T2").unwrap().shape_id);

    assert_eq!(4, trip.stop_times.len());
    assert!(trip
        .stop_times
        .windows(2)
        .all(|w| w[0].stop_sequence < w[1].stop_sequence));

    // single-digit hours are kept verbatim, not normalized at load time
    assert_eq!("8:00:00", trip.stop_times[0].arrival_time);
    assert_eq!(PickupDropOffType::Regular, trip.stop_times[2].pickup_type);
    assert_eq!(
        PickupDropOffType::NotAvailable,
        trip.stop_times[2].drop_off_type
    );
}

#[test]
fn blank_rows_are_placeholders() {
    let feed = basic_feed();
    let trip = feed.get_trip("T1").unwrap();
    assert!(trip.stop_times[1].is_placeholder());
    assert_eq!("", trip.stop_times[1].arrival_time);
    assert!(!trip.stop_times[0].is_placeholder());
}

#[test]
fn read_calendar() {
    let feed = basic_feed();
    let weekday = &feed.calendar["WKDY"];
    assert!(weekday.monday);
    assert!(!weekday.saturday);
    // 2025-09-06 is a saturday
    let saturday = chrono::NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
    assert!(!weekday.valid_weekday(saturday));
    assert!(feed.calendar["SAT"].valid_weekday(saturday));
}

#[test]
fn shapes_are_sorted_by_sequence() {
    let feed = basic_feed();
    let points: Vec<usize> = feed.shapes["shp1"].iter().map(|p| p.sequence).collect();
    assert_eq!(vec![1, 6, 11], points);
}

#[test]
fn assemble_rejects_unknown_trip() {
    let orphan = StopTime {
        trip_id: "ghost".to_owned(),
        stop_id: "A".to_owned(),
        stop_sequence: 1,
        ..StopTime::default()
    };
    let stop = Stop {
        id: "A".to_owned(),
        name: "Alder Station".to_owned(),
        ..Stop::default()
    };
    let result = Feed::assemble(
        vec![stop],
        Vec::new(),
        Vec::new(),
        vec![orphan],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );
    assert!(matches!(result, Err(Error::Reference(id)) if id == "ghost"));
}

#[test]
fn has_visit_checks_the_exact_pair() {
    let feed = basic_feed();
    assert!(feed.has_visit("T1", "C"));
    assert!(!feed.has_visit("T1", "D"));
    assert!(!feed.has_visit("ghost", "C"));
}

#[test]
fn remove_route_cascades_through_trips() {
    let mut feed = basic_feed();
    let (route, removed) = feed.remove_route("18").unwrap();
    assert_eq!("18", route.id);
    assert_eq!(2, removed.len());
    assert!(feed.trips.contains_key("T3"));
    assert!(!feed.trips.contains_key("T1"));
    assert!(!feed.trips.contains_key("T2"));
}

#[test]
fn remove_stop_time_by_sequence() {
    let mut feed = basic_feed();
    let removed = feed.remove_stop_time("T1", 3).unwrap();
    assert_eq!("C", removed.stop_id);
    assert_eq!(3, feed.get_trip("T1").unwrap().stop_times.len());
    assert!(feed.remove_stop_time("T1", 99).is_none());
}

#[test]
fn rows_serialize_to_json_and_back() {
    let feed = basic_feed();
    let stops: Vec<&Stop> = feed.stops.values().collect();
    let text = serde_json::to_string(&stops).unwrap();
    let parsed: Vec<Stop> = serde_json::from_str(&text).unwrap();
    assert_eq!(stops.len(), parsed.len());

    let trip = feed.get_trip("T1").unwrap();
    let text = serde_json::to_string(&trip.stop_times).unwrap();
    let parsed: Vec<StopTime> = serde_json::from_str(&text).unwrap();
    assert_eq!("8:00:00", parsed[0].arrival_time);
}

#[test]
fn export_rows_write_the_expected_columns() {
    let trip = ExportTrip {
        route_id: "18".to_owned(),
        service_id: "WKDY".to_owned(),
        trip_id: "T1__segA".to_owned(),
        trip_headsign: Some("Elm Terminal".to_owned()),
        shape_id: None,
        direction_id: Some(DirectionType::Outbound),
    };
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.serialize(&trip).unwrap();
    let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
    assert_eq!(
        "route_id,service_id,trip_id,trip_headsign,shape_id,direction_id\n\
         18,WKDY,T1__segA,Elm Terminal,,0\n",
        out
    );

    let stop_time = ExportStopTime {
        trip_id: "T1__segA".to_owned(),
        arrival_time: "08:00:00".to_owned(),
        departure_time: "08:00:00".to_owned(),
        stop_id: "A".to_owned(),
        stop_sequence: 1,
        pickup_type: PickupDropOffType::Regular,
        drop_off_type: PickupDropOffType::NotAvailable,
    };
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.serialize(&stop_time).unwrap();
    let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
    assert_eq!(
        "trip_id,arrival_time,departure_time,stop_id,stop_sequence,pickup_type,drop_off_type\n\
         T1__segA,08:00:00,08:00:00,A,1,0,1\n",
        out
    );
}
