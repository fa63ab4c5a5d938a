//! End-to-end ingestion over on-disk fixtures.

use std::fs;
use std::path::Path;

use nox_calendar::SurveyTime;
use nox_ingest::{IngestError, SkipReason, ingest_files, write_records};
use nox_reference::{ReferencePaths, ReferenceSet};

/// Builds a classifier output line with 23 fields around `filename`.
fn classifier_line(filename: &str, i_buzz: i64) -> String {
    let filler = ",x".repeat(9);
    format!("survey_dir,{filename},PippiT,1,Pip,9,PippiT,8{filler},14,46,80,5,7,{i_buzz}")
}

/// Reference fixture: four May 2012 noons, site 1 (transect 1) with nights
/// 1 and 2 allowed and night 2 lights-off, site 2 (transect 2) with night 1
/// allowed.
fn load_references(dir: &Path) -> ReferenceSet {
    fs::write(
        dir.join("transects.csv"),
        "1,1,leusden white,white,2012-4-1\n2,2,voorst red,red,2012-4-1\n",
    )
    .unwrap();
    fs::write(
        dir.join("SunData.csv"),
        "5/1/2012 6:00:00,5/1/2012 18:00:00\n\
         5/2/2012 6:00:00,5/2/2012 18:00:00\n\
         5/3/2012 6:00:00,5/3/2012 18:00:00\n\
         5/4/2012 6:00:00,5/4/2012 18:00:00\n",
    )
    .unwrap();
    fs::write(dir.join("allowed.csv"), "1,1\n1,2\n2,1\n").unwrap();
    fs::write(
        dir.join("lights.csv"),
        "5/2/2012,lbh,off,scheduled dark night\n\
         5/3/2012,vst,off,generator failure\n",
    )
    .unwrap();
    ReferenceSet::load(&ReferencePaths {
        transects: dir.join("transects.csv"),
        sun_data: dir.join("SunData.csv"),
        allowed_nights: dir.join("allowed.csv"),
        lights_log: dir.join("lights.csv"),
    })
    .expect("fixture reference set loads")
}

#[test]
fn state_machine_outcomes() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let refs = load_references(dir.path());

    let input = dir.path().join("sonochiro_output_all.csv");
    let lines = [
        // Header: skipped as Header.
        "Directory,Filename,FinalId,Contact,Group,GroupIndex,Species,SpeciesIndex".to_string(),
        // Night 1 at site 1, allowed, lights on: included.
        classifier_line("tr1_d1_cf1_20120501_220000_000.wav", 0),
        // Night 2 at site 1, allowed but lights off: excluded.
        classifier_line("tr1_d1_cf1_20120502_220000_000.wav", 3),
        // Night 0 at site 1 (before the first noon): not allowed, excluded.
        classifier_line("tr1_d1_cf1_20120501_100000_000.wav", 0),
        // Invalid filename: skipped with the name retained.
        classifier_line("scrambled.wav", 0),
        // Corrupted rename batch: skipped.
        classifier_line("20130827_220000_000", 0),
        // Night 1 at site 2 via the typo grammar: included.
        classifier_line("tr2_1_cf9a_20120501_233000_000.wav", 2),
    ];
    fs::write(&input, lines.join("\n")).unwrap();

    let output = ingest_files(&[&input], &refs).expect("run succeeds");

    assert_eq!(output.records.len(), 2);
    assert_eq!(output.skipped.len(), 3);
    assert_eq!(output.excluded, 2);
    assert_eq!(output.total_lines(), 7);

    // Included order follows input encounter order.
    let first = &output.records[0];
    assert_eq!(first.transect, 1);
    assert_eq!(first.site, 1);
    assert_eq!(first.colour, "white");
    assert_eq!(first.night, 1);
    assert_eq!(
        first.total_time_sec,
        SurveyTime::new(2012, 5, 1, 22, 0, 0).unwrap().epoch_seconds()
    );
    assert_eq!((first.detector, first.comp_fl.as_str()), (1, "1"));
    assert_eq!(first.final_id, "PippiT");
    assert_eq!(
        (first.group_index, first.species_index, first.i_buzz),
        (9, 8, 0)
    );

    let second = &output.records[1];
    assert_eq!((second.transect, second.site), (2, 2));
    assert_eq!((second.detector, second.comp_fl.as_str()), (1, "9a"));
    assert_eq!(second.i_buzz, 2);

    // Skip reasons, in encounter order.
    assert_eq!(output.skipped[0].reason, SkipReason::Header);
    assert_eq!(output.skipped[0].line, 1);
    assert_eq!(
        output.skipped[1].reason,
        SkipReason::InvalidFilename("scrambled.wav".to_string())
    );
    assert_eq!(
        output.skipped[2].reason,
        SkipReason::InvalidFilename("20130827_220000_000".to_string())
    );
}

#[test]
fn multiple_files_concatenate_in_order() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let refs = load_references(dir.path());

    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    fs::write(&a, classifier_line("tr1_d1_cf1_20120501_220000_000.wav", 0)).unwrap();
    fs::write(&b, classifier_line("tr2_d2_cf2_20120501_230000_000.wav", 0)).unwrap();

    let output = ingest_files(&[&a, &b], &refs).expect("run succeeds");
    let transects: Vec<u32> = output.records.iter().map(|r| r.transect).collect();
    assert_eq!(transects, vec![1, 2]);
}

#[test]
fn bad_metric_aborts_run() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let refs = load_references(dir.path());

    let input = dir.path().join("bad.csv");
    let good = classifier_line("tr1_d1_cf1_20120501_220000_000.wav", 0);
    let bad = good.replace(",14,46,", ",fourteen,46,");
    fs::write(&input, format!("{good}\n{bad}")).unwrap();

    let err = ingest_files(&[&input], &refs).unwrap_err();
    match err {
        IngestError::Numeric { line, field, value, .. } => {
            assert_eq!(line, 2);
            assert_eq!(field, "nb_calls");
            assert_eq!(value, "fourteen");
        }
        other => panic!("expected Numeric error, got {other}"),
    }
}

#[test]
fn unknown_transect_aborts_run() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let refs = load_references(dir.path());

    let input = dir.path().join("unknown.csv");
    fs::write(&input, classifier_line("tr9_d1_cf1_20120501_220000_000.wav", 0)).unwrap();

    let err = ingest_files(&[&input], &refs).unwrap_err();
    assert!(err.to_string().contains("transect 9"));
}

#[test]
fn timestamp_past_sun_table_aborts_run() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let refs = load_references(dir.path());

    let input = dir.path().join("late.csv");
    fs::write(&input, classifier_line("tr1_d1_cf1_20161231_220000_000.wav", 0)).unwrap();

    let err = ingest_files(&[&input], &refs).unwrap_err();
    assert!(err.to_string().contains("beyond the sun table"));
}

#[test]
fn written_dataset_round_trips_through_text() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let refs = load_references(dir.path());

    let input = dir.path().join("in.csv");
    fs::write(&input, classifier_line("tr1_d1_cf1_20120501_220000_000.wav", 0)).unwrap();
    let output = ingest_files(&[&input], &refs).expect("run succeeds");

    let out_path = dir.path().join("dataset.csv");
    write_records(&out_path, &output.records).unwrap();
    let text = fs::read_to_string(&out_path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("filename,transect,site"));
    let row = lines.next().unwrap();
    assert!(row.contains(",white,1,"));
    assert!(row.ends_with(",14,46,80,5,7,0"));
}
