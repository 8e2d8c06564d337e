use serde::{Deserialize, Serialize};
use series_plot::api::{FieldKind, PlotSession, PlotSessionConfig, SeriesField, SessionSnapshot};
use series_plot::core::SeriesId;
use series_plot::render::{NullChart, SyncBatch, TraceCommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct CliArgs {
    script: PathBuf,
    output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReplayScript {
    #[serde(default)]
    config: PlotSessionConfig,
    steps: Vec<ReplayStep>,
}

/// Series are addressed by their position at the time the step runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ReplayStep {
    LoadCsv {
        path: PathBuf,
        #[serde(default)]
        name: Option<String>,
    },
    AddSeries,
    AddSeriesFrom {
        position: usize,
    },
    UpdateField {
        position: usize,
        field: FieldKind,
        value: String,
    },
    RemoveSeries {
        position: usize,
    },
    SetDefault {
        position: usize,
    },
    ClearDefault,
    RemoveDataset {
        name: String,
    },
    EditTitle {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize)]
struct ReplayOutput {
    create: Vec<TraceCommand>,
    steps: Vec<StepOutcome>,
    trace_count: usize,
    snapshot: SessionSnapshot,
}

#[derive(Debug, Clone, Serialize)]
struct StepOutcome {
    step: ReplayStep,
    commands: Vec<TraceCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let _ = series_plot::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.script)
        .map_err(|err| format!("failed to read `{}`: {err}", args.script.display()))?;
    let script: ReplayScript =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    let base_dir = args
        .script
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let (mut session, create) =
        PlotSession::new(script.config).map_err(|err| format!("invalid config: {err}"))?;
    let mut chart = NullChart::default();
    apply(&create, &mut chart)?;

    let mut steps = Vec::with_capacity(script.steps.len());
    for step in script.steps {
        let outcome = match run_step(&mut session, &step, &base_dir)? {
            Ok(batch) => {
                apply(&batch, &mut chart)?;
                StepOutcome {
                    step,
                    commands: batch.into_commands(),
                    error: None,
                }
            }
            Err(error) => StepOutcome {
                step,
                commands: Vec::new(),
                error: Some(error),
            },
        };
        steps.push(outcome);
    }

    if chart.trace_count != session.series().len() {
        return Err(format!(
            "chart holds {} traces for {} series",
            chart.trace_count,
            session.series().len()
        ));
    }

    let output = ReplayOutput {
        create: create.into_commands(),
        steps,
        trace_count: chart.trace_count,
        snapshot: session.snapshot(),
    };
    write_json(&args.output, &output)
}

/// Runs one step. The outer error aborts the replay; the inner one is a
/// session-level failure recorded in the output.
fn run_step(
    session: &mut PlotSession,
    step: &ReplayStep,
    base_dir: &Path,
) -> Result<Result<SyncBatch, String>, String> {
    let result = match step {
        ReplayStep::LoadCsv { path, name } => {
            let full_path = base_dir.join(path);
            let bytes = fs::read(&full_path)
                .map_err(|err| format!("failed to read `{}`: {err}", full_path.display()))?;
            let name = name.clone().unwrap_or_else(|| file_name(path));
            let ticket = session.begin_load(&name);
            session.ingest_csv(&ticket, &bytes)
        }
        ReplayStep::AddSeries => Ok(session.on_add_series()),
        ReplayStep::AddSeriesFrom { position } => {
            let id = series_at(session, *position)?;
            session.on_add_series_from(id)
        }
        ReplayStep::UpdateField {
            position,
            field,
            value,
        } => {
            let id = series_at(session, *position)?;
            SeriesField::parse(*field, value).and_then(|field| session.on_field_update(id, field))
        }
        ReplayStep::RemoveSeries { position } => {
            let id = series_at(session, *position)?;
            session.on_remove_series(id)
        }
        ReplayStep::SetDefault { position } => {
            let id = series_at(session, *position)?;
            session.set_default(id).map(|()| SyncBatch::new())
        }
        ReplayStep::ClearDefault => {
            session.clear_default();
            Ok(SyncBatch::new())
        }
        ReplayStep::RemoveDataset { name } => session.remove_dataset(name),
        ReplayStep::EditTitle { text } => {
            session.on_title_edited(text);
            Ok(SyncBatch::new())
        }
    };
    Ok(result.map_err(|err| err.to_string()))
}

fn series_at(session: &PlotSession, position: usize) -> Result<SeriesId, String> {
    session
        .series_at(position)
        .map(|series| series.id())
        .ok_or_else(|| {
            format!(
                "no series at position {position} ({} series)",
                session.series().len()
            )
        })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn apply(batch: &SyncBatch, chart: &mut NullChart) -> Result<(), String> {
    batch
        .apply_to(chart)
        .map_err(|err| format!("chart rejected command stream: {err}"))
}

fn write_json<T: Serialize>(path: &PathBuf, value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    fs::write(path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut script = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--script" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --script".to_owned())?;
                script = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                return Err("usage: session_replay_tool --script <path> --output <path>".to_owned());
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(CliArgs {
        script: script.ok_or_else(|| "missing --script <path>".to_owned())?,
        output: output.ok_or_else(|| "missing --output <path>".to_owned())?,
    })
}
