//! Integration test: load a full reference set from files on disk.

use std::fs;
use std::path::PathBuf;

use nox_calendar::SurveyTime;
use nox_reference::{ReferencePaths, ReferenceSet};

fn noon(month: u32, day: u32) -> i64 {
    SurveyTime::new(2012, month, day, 12, 0, 0)
        .unwrap()
        .epoch_seconds()
}

fn write_fixtures(dir: &std::path::Path) -> ReferencePaths {
    let transects = dir.join("transects.csv");
    fs::write(
        &transects,
        "1,1,leusden white,white,2012-4-1\n2,1,leusden red,red,2012-4-1\n5,4,askeld dark,dark,2012-4-1\n",
    )
    .unwrap();

    // Three consecutive May 2012 nights, dawn 06:00, dusk 18:00.
    let sun_data = dir.join("SunData.csv");
    fs::write(
        &sun_data,
        "5/1/2012 6:00:00,5/1/2012 18:00:00\n\
         5/2/2012 6:00:00,5/2/2012 18:00:00\n\
         5/3/2012 6:00:00,5/3/2012 18:00:00\n",
    )
    .unwrap();

    let allowed_nights = dir.join("allowed.csv");
    fs::write(&allowed_nights, "1,1\n1,2\n4,1\n").unwrap();

    let lights_log = dir.join("loglightsoff.csv");
    fs::write(&lights_log, "5/1/2012,lbh,off,scheduled dark night\n").unwrap();

    ReferencePaths {
        transects,
        sun_data,
        allowed_nights,
        lights_log,
    }
}

#[test]
fn full_set_loads_and_cross_references() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let paths = write_fixtures(dir.path());
    let set = ReferenceSet::load(&paths).expect("reference set loads");

    // Transect register.
    assert_eq!(set.transects.len(), 3);
    let info = set.transects.get(5).unwrap();
    assert_eq!((info.site, info.colour.as_str()), (4, "dark"));

    // Sun table: noons at 12:00 on May 1..3.
    assert_eq!(set.sun.len(), 3);
    assert_eq!(set.sun.resolve_night(noon(5, 1) - 1).unwrap(), 0);
    assert_eq!(set.sun.resolve_night(noon(5, 1)).unwrap(), 1);

    // Lights-off: 23:00 on May 1 is past that day's noon, so it falls in
    // night 1, recorded for site 1.
    assert!(set.nights.is_lights_off(1, 1).unwrap());
    assert!(!set.nights.is_lights_off(1, 2).unwrap());

    // Allowed nights per site.
    assert!(set.nights.is_allowed(1, 1).unwrap());
    assert!(!set.nights.is_allowed(1, 0).unwrap());
    assert!(set.nights.is_allowed(4, 1).unwrap());
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut paths = write_fixtures(dir.path());
    paths.sun_data = PathBuf::from(dir.path().join("nope.csv"));
    assert!(ReferenceSet::load(&paths).is_err());
}
