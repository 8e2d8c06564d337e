use series_plot::api::{
    FILE_INSTRUCTION, FieldKind, PlotSession, PlotSessionConfig, SeriesField, TRACE_INSTRUCTION,
    TitleStage,
};
use series_plot::core::{CellValue, Dataset, SeriesId};
use series_plot::error::PlotError;
use series_plot::ingest::parse_csv;
use series_plot::render::{RecordingChart, TraceCommand};

const SAMPLE_CSV: &[u8] = b"time,dist\n1,10\n2,20\n3,30\n4,40\n";

fn numbers(values: &[f64]) -> Vec<CellValue> {
    values.iter().copied().map(CellValue::from).collect()
}

fn start(config: PlotSessionConfig) -> (PlotSession, RecordingChart) {
    let (session, batch) = PlotSession::new(config).expect("session init");
    let mut chart = RecordingChart::default();
    batch.apply_to(&mut chart).expect("apply create batch");
    (session, chart)
}

fn load(session: &mut PlotSession, chart: &mut RecordingChart, name: &str, bytes: &[u8]) {
    let ticket = session.begin_load(name);
    let batch = session.ingest_csv(&ticket, bytes).expect("csv loads");
    batch.apply_to(chart).expect("apply load batch");
}

fn set_y(session: &mut PlotSession, chart: &mut RecordingChart, id: SeriesId, column: &str) {
    session
        .on_field_update(id, SeriesField::YColumn(Some(column.to_owned())))
        .expect("y update")
        .apply_to(chart)
        .expect("apply y update");
}

fn first_id(session: &PlotSession) -> SeriesId {
    session.series_at(0).expect("initial series").id()
}

#[test]
fn title_walks_through_instructions() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    assert_eq!(chart.layout().title.as_deref(), Some(FILE_INSTRUCTION));
    assert_eq!(session.title_stage(), TitleStage::AwaitingFile);

    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    assert_eq!(chart.layout().title.as_deref(), Some(TRACE_INSTRUCTION));
    assert_eq!(session.title(), Some(TRACE_INSTRUCTION));

    let id = first_id(&session);
    set_y(&mut session, &mut chart, id, "dist");
    assert_eq!(chart.layout().title.as_deref(), Some(""));
    assert_eq!(session.title_stage(), TitleStage::Done);

    load(&mut session, &mut chart, "b.csv", SAMPLE_CSV);
    assert_eq!(chart.layout().title.as_deref(), Some(""));
}

#[test]
fn user_authored_title_is_never_overwritten() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    assert!(session.on_title_edited("Bench run 7"));

    chart.clear_log();
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    assert!(
        !chart
            .log()
            .iter()
            .any(|command| matches!(command, TraceCommand::Relayout { patch } if patch.title.is_some()))
    );
    assert_eq!(session.title(), Some("Bench run 7"));
    assert_eq!(session.title_stage(), TitleStage::UserAuthored);
}

#[test]
fn disabled_title_guide_creates_untitled_chart() {
    let (mut session, mut chart) = start(PlotSessionConfig::default().with_title_guide(false));
    assert_eq!(chart.layout().title, None);
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    assert_eq!(chart.layout().title, None);
}

#[test]
fn superseded_load_completion_is_discarded() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    let older = session.begin_load("a.csv");
    let newer = session.begin_load("a.csv");

    let stale = session
        .ingest_csv(&older, b"time,dist\n1,99\n")
        .expect("stale completion is not an error");
    assert!(stale.is_empty());
    assert!(session.datasets().is_empty());
    assert!(session.is_loading("a.csv"));

    session
        .ingest_csv(&newer, SAMPLE_CSV)
        .expect("current completion")
        .apply_to(&mut chart)
        .expect("apply load");
    let dataset = session.datasets().get("a.csv").expect("loaded");
    assert_eq!(dataset.row_count(), 4);

    let replay = session
        .ingest_csv(&newer, SAMPLE_CSV)
        .expect("second completion is stale");
    assert!(replay.is_empty());
}

#[test]
fn cancelled_load_never_lands() {
    let (mut session, _chart) = start(PlotSessionConfig::default());
    let ticket = session.begin_load("a.csv");
    assert!(session.cancel_load("a.csv"));
    assert!(!session.cancel_load("a.csv"));

    let batch = session.ingest_csv(&ticket, SAMPLE_CSV).expect("stale");
    assert!(batch.is_empty());
    assert!(!session.datasets().contains("a.csv"));
}

#[test]
fn parse_failure_leaves_store_untouched() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    let id = first_id(&session);
    set_y(&mut session, &mut chart, id, "dist");

    let ticket = session.begin_load("a.csv");
    let err = session
        .ingest_csv(&ticket, b"time,dist\n1,10,5\n2\n")
        .expect_err("mismatched field counts");
    match &err {
        PlotError::Parse { file, issues } => {
            assert_eq!(file, "a.csv");
            assert_eq!(issues.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("failed to load file `a.csv`"));

    let dataset = session.datasets().get("a.csv").expect("old version kept");
    assert_eq!(dataset.row_count(), 4);
    assert_eq!(
        session.trace_of(id).expect("trace").y,
        numbers(&[10.0, 20.0, 30.0, 40.0])
    );
    assert!(!session.is_loading("a.csv"));
}

#[test]
fn complete_load_accepts_external_parse_results() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    let ticket = session.begin_load("upload-1");
    let parsed = parse_csv("ignored.csv", SAMPLE_CSV);

    session
        .complete_load(&ticket, parsed)
        .expect("load")
        .apply_to(&mut chart)
        .expect("apply load");
    assert_eq!(session.datasets().names(), vec!["upload-1"]);
}

#[test]
fn reload_replaces_dataset_and_revalidates_columns() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    let id = first_id(&session);
    set_y(&mut session, &mut chart, id, "dist");

    load(&mut session, &mut chart, "a.csv", b"time,dist\n5,1\n6,2\n");
    assert_eq!(chart.traces()[0].x, numbers(&[5.0, 6.0]));
    assert_eq!(chart.traces()[0].y, numbers(&[1.0, 2.0]));

    chart.clear_log();
    load(&mut session, &mut chart, "a.csv", b"time,speed\n5,1\n6,2\n");
    let config = session.series_by_id(id).expect("series").config().clone();
    assert_eq!(config.x_column.as_deref(), Some("time"));
    assert_eq!(config.y_column, None);
    assert!(chart.traces()[0].y.is_empty());
    assert!(matches!(
        chart.log(),
        [TraceCommand::Restyle { index: 0, .. }]
    ));
    assert_eq!(
        session.datasets().columns("a.csv").expect("columns"),
        vec!["time", "speed"]
    );
}

#[test]
fn later_datasets_do_not_rebind_bound_series() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);

    let ticket = session.begin_load("b.csv");
    let batch = session.ingest_csv(&ticket, SAMPLE_CSV).expect("load b");
    assert!(batch.is_empty());
    assert_eq!(
        session.series_at(0).expect("series").config().dataset.as_deref(),
        Some("a.csv")
    );
    assert_eq!(session.datasets().names(), vec!["a.csv", "b.csv"]);
}

#[test]
fn pending_dataset_binding_resolves_when_load_completes() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    let id = first_id(&session);
    for (kind, raw) in [
        (FieldKind::Dataset, "late.csv"),
        (FieldKind::XColumn, "time"),
        (FieldKind::YColumn, "dist"),
    ] {
        let field = SeriesField::parse(kind, raw).expect("parse");
        session
            .on_field_update(id, field)
            .expect("update")
            .apply_to(&mut chart)
            .expect("apply update");
    }
    assert!(chart.traces()[0].x.is_empty());

    load(&mut session, &mut chart, "late.csv", SAMPLE_CSV);
    assert_eq!(chart.traces()[0].y, numbers(&[10.0, 20.0, 30.0, 40.0]));
    assert_eq!(chart.layout().title.as_deref(), Some(""));
}

#[test]
fn removing_dataset_unbinds_dependent_series() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    let id = first_id(&session);
    set_y(&mut session, &mut chart, id, "dist");

    let batch = session.remove_dataset("a.csv").expect("remove");
    batch.apply_to(&mut chart).expect("apply remove");
    assert_eq!(batch.len(), 1);
    let config = session.series_by_id(id).expect("series").config().clone();
    assert_eq!(config.dataset, None);
    assert_eq!(config.x_column, None);
    assert!(chart.traces()[0].x.is_empty());

    assert!(matches!(
        session.remove_dataset("a.csv"),
        Err(PlotError::DatasetNotFound { .. })
    ));
}

#[test]
fn auto_select_can_be_disabled() {
    let config = PlotSessionConfig::default()
        .with_auto_select_first_dataset(false)
        .with_auto_select_first_column(false);
    let (mut session, mut chart) = start(config);
    load(&mut session, &mut chart, "a.csv", SAMPLE_CSV);
    assert_eq!(session.series_at(0).expect("series").config().dataset, None);

    let id = first_id(&session);
    session
        .on_field_update(id, SeriesField::Dataset(Some("a.csv".to_owned())))
        .expect("bind")
        .apply_to(&mut chart)
        .expect("apply bind");
    assert_eq!(session.series_at(0).expect("series").config().x_column, None);
}

#[test]
fn dataset_loaded_directly_syncs_series() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    let dataset = Dataset::from_columns(
        "mem",
        [
            ("t", numbers(&[3.0, 1.0, 2.0])),
            ("v", numbers(&[30.0, 10.0, 20.0])),
        ],
    );
    session
        .on_dataset_loaded(dataset)
        .apply_to(&mut chart)
        .expect("apply load");
    let id = first_id(&session);
    set_y(&mut session, &mut chart, id, "v");
    assert_eq!(chart.traces()[0].x, numbers(&[1.0, 2.0, 3.0]));
    assert_eq!(chart.traces()[0].y, numbers(&[10.0, 20.0, 30.0]));
}

#[test]
fn direct_load_supersedes_pending_file_load() {
    let (mut session, mut chart) = start(PlotSessionConfig::default());
    let ticket = session.begin_load("a.csv");

    let fresh = Dataset::from_columns(
        "a.csv",
        [
            ("t", numbers(&[1.0, 2.0])),
            ("v", numbers(&[5.0, 6.0])),
        ],
    );
    session
        .on_dataset_loaded(fresh)
        .apply_to(&mut chart)
        .expect("apply direct load");
    assert!(!session.is_loading("a.csv"));
    let id = first_id(&session);
    set_y(&mut session, &mut chart, id, "v");

    let outdated = Dataset::from_columns("a.csv", [("old", numbers(&[9.0]))]);
    let stale = session
        .complete_load(&ticket, Ok(outdated))
        .expect("stale completion is not an error");
    assert!(stale.is_empty());
    assert_eq!(
        session.datasets().columns("a.csv").expect("columns"),
        vec!["t", "v"]
    );
    let config = session.series_by_id(id).expect("series").config().clone();
    assert_eq!(config.x_column.as_deref(), Some("t"));
    assert_eq!(config.y_column.as_deref(), Some("v"));
    assert_eq!(chart.traces()[0].y, numbers(&[5.0, 6.0]));
}
