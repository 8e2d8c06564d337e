use approx::relative_eq;
use proptest::prelude::*;
use series_plot::api::{PlotSession, PlotSessionConfig, SeriesField};
use series_plot::core::{
    AxisAllocation, AxisId, CellValue, Dataset, DisplayMode, PlotGroup, TransformParams,
    compute_trace,
};
use series_plot::render::{RecordingChart, TraceSpec};

#[derive(Debug, Clone)]
enum SessionOp {
    Add,
    Remove(usize),
    Group(usize, u32),
    Mode(usize, bool),
    BindY(usize),
}

fn session_op() -> impl Strategy<Value = SessionOp> {
    prop_oneof![
        3 => Just(SessionOp::Add),
        2 => any::<usize>().prop_map(SessionOp::Remove),
        2 => (any::<usize>(), 1u32..6).prop_map(|(at, group)| SessionOp::Group(at, group)),
        1 => (any::<usize>(), any::<bool>()).prop_map(|(at, lines)| SessionOp::Mode(at, lines)),
        1 => any::<usize>().prop_map(SessionOp::BindY),
    ]
}

fn cell(value: Option<f64>) -> CellValue {
    value.map_or(CellValue::Null, CellValue::from)
}

fn xy_dataset(rows: &[(Option<f64>, Option<f64>)]) -> Dataset {
    Dataset::from_columns(
        "p.csv",
        [
            ("x", rows.iter().map(|(x, _)| cell(*x)).collect::<Vec<_>>()),
            ("y", rows.iter().map(|(_, y)| cell(*y)).collect::<Vec<_>>()),
        ],
    )
}

fn rows_strategy() -> impl Strategy<Value = Vec<(Option<f64>, Option<f64>)>> {
    prop::collection::vec(
        (
            prop::option::weighted(0.9, -1_000.0f64..1_000.0),
            prop::option::weighted(0.9, -1_000.0f64..1_000.0),
        ),
        0..60,
    )
}

fn numbers(values: &[CellValue]) -> Vec<f64> {
    values.iter().filter_map(CellValue::as_number).collect()
}

proptest! {
    #[test]
    fn chart_traces_track_series_positions(ops in prop::collection::vec(session_op(), 0..40)) {
        let (mut session, batch) = PlotSession::new(PlotSessionConfig::default()).expect("session init");
        let mut chart = RecordingChart::default();
        batch.apply_to(&mut chart).expect("apply create");
        session
            .on_dataset_loaded(xy_dataset(&[(Some(2.0), Some(1.0)), (Some(1.0), Some(3.0))]))
            .apply_to(&mut chart)
            .expect("apply load");

        for op in ops {
            let len = session.series().len();
            let pick = |at: usize| session.series_at(at % len.max(1)).map(|series| series.id());
            let batch = match op {
                SessionOp::Add => session.on_add_series(),
                SessionOp::Remove(at) => match pick(at) {
                    Some(id) => session.on_remove_series(id).expect("remove live series"),
                    None => continue,
                },
                SessionOp::Group(at, group) => match pick(at) {
                    Some(id) => session
                        .on_field_update(id, SeriesField::PlotGroup(group))
                        .expect("group update"),
                    None => continue,
                },
                SessionOp::Mode(at, lines) => match pick(at) {
                    Some(id) => session
                        .on_field_update(id, SeriesField::Lines(lines))
                        .expect("mode update"),
                    None => continue,
                },
                SessionOp::BindY(at) => match pick(at) {
                    Some(id) => session
                        .on_field_update(id, SeriesField::YColumn(Some("y".to_owned())))
                        .expect("bind y"),
                    None => continue,
                },
            };
            batch.apply_to(&mut chart).expect("command stream stays addressable");

            prop_assert_eq!(chart.traces().len(), session.series().len());
            for (index, series) in session.series().iter().enumerate() {
                prop_assert_eq!(series.position(), index);
                let expected = TraceSpec::new(
                    session.trace_of(series.id()).expect("trace"),
                    series.config().mode,
                    AxisId::for_group(series.config().plot_group),
                );
                prop_assert_eq!(&chart.traces()[index], &expected);
            }

            let max_group = session
                .series()
                .iter()
                .map(|series| series.config().plot_group.raw())
                .max()
                .unwrap_or(1);
            prop_assert_eq!(session.axis_count(), max_group.max(1));
            for group in &session.axis_allocation().groups_in_use {
                let key = AxisId::for_group(PlotGroup::new(*group)).layout_key();
                prop_assert!(chart.layout().axes.contains_key(&key));
            }
        }
    }

    #[test]
    fn pipeline_is_pure_sorted_and_strided(
        rows in rows_strategy(),
        downsample in 1usize..6,
        x_zero in any::<bool>()
    ) {
        let dataset = xy_dataset(&rows);
        let before = dataset.clone();
        let params = TransformParams {
            x_zero,
            downsample,
            ..TransformParams::default()
        };

        let first = compute_trace(Some(&dataset), Some("x"), Some("y"), &params);
        let second = compute_trace(Some(&dataset), Some("x"), Some("y"), &params);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&dataset, &before);

        let valid = rows.iter().filter(|(x, y)| x.is_some() && y.is_some()).count();
        prop_assert_eq!(first.len(), valid.div_ceil(downsample));
        prop_assert_eq!(first.x.len(), first.y.len());

        let xs = numbers(&first.x);
        prop_assert_eq!(xs.len(), first.x.len());
        prop_assert!(xs.windows(2).all(|pair| pair[0] <= pair[1]));
        if x_zero && !xs.is_empty() {
            prop_assert_eq!(xs[0], 0.0);
        }
    }

    #[test]
    fn affine_transform_matches_identity_run(
        rows in rows_strategy(),
        y_scale in -50.0f64..50.0,
        y_offset in -500.0f64..500.0,
        x_scale in 0.1f64..50.0
    ) {
        let dataset = xy_dataset(&rows);
        let identity = compute_trace(Some(&dataset), Some("x"), Some("y"), &TransformParams::default());
        let params = TransformParams {
            x_scale,
            y_scale,
            y_offset,
            ..TransformParams::default()
        };
        let scaled = compute_trace(Some(&dataset), Some("x"), Some("y"), &params);
        prop_assert_eq!(identity.len(), scaled.len());

        let pairs = numbers(&identity.y).into_iter().zip(numbers(&scaled.y));
        for (raw, out) in pairs {
            let expected = raw * y_scale + y_offset;
            prop_assert!(relative_eq!(out, expected, epsilon = 1e-9, max_relative = 1e-12));
        }
        let pairs = numbers(&identity.x).into_iter().zip(numbers(&scaled.x));
        for (raw, out) in pairs {
            prop_assert!(relative_eq!(out, raw * x_scale, epsilon = 1e-9, max_relative = 1e-12));
        }
    }

    #[test]
    fn axis_count_is_highest_group_in_use(groups in prop::collection::vec(1u32..12, 0..20)) {
        let allocation = AxisAllocation::recompute(groups.iter().copied().map(PlotGroup::new));
        let expected = groups.iter().copied().max().unwrap_or(1);
        prop_assert_eq!(allocation.axis_count, expected);
        prop_assert_eq!(allocation.axis_for_series.len(), groups.len());
        for (axis, group) in allocation.axis_for_series.iter().zip(&groups) {
            prop_assert_eq!(axis.group().raw(), *group);
        }
    }

    #[test]
    fn toggles_round_trip_through_display_mode(markers in any::<bool>(), lines in any::<bool>()) {
        let mode = DisplayMode::from_toggles(markers, lines);
        prop_assert_eq!(mode.shows_markers(), markers);
        prop_assert_eq!(mode.shows_lines(), lines);
        prop_assert_eq!(DisplayMode::parse(mode.as_str()), Some(mode));
    }
}
