use cell_scatter::api::{PlotConfig, PlotInput, ScatterPlot};
use cell_scatter::render::{Legend, NullRenderer};
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: export_scatter_svg --input <plot.json> --output <plot.svg> \
[--config <config.json>] [--legend <legend.json>] [--width <px>] [--height <px>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    legend: Option<PathBuf>,
    width: u32,
    height: u32,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = cell_scatter::telemetry::init_default_tracing();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => PlotConfig::from_json_str(&read_text(path)?).map_err(|e| e.to_string())?,
        None => PlotConfig::new(args.width, args.height),
    };
    let input = PlotInput::from_json_str(&read_text(&args.input)?).map_err(|e| e.to_string())?;
    let legend = match &args.legend {
        Some(path) => Some(
            serde_json::from_str::<Legend>(&read_text(path)?)
                .map_err(|e| format!("failed to parse legend {}: {e}", path.display()))?,
        ),
        None => None,
    };

    let mut plot = ScatterPlot::new(NullRenderer::default(), config).map_err(|e| e.to_string())?;
    plot.load_input(input).map_err(|e| e.to_string())?;
    let svg = plot.export_svg(legend.as_ref()).map_err(|e| e.to_string())?;
    fs::write(&args.output, svg)
        .map_err(|e| format!("failed to write {}: {e}", args.output.display()))?;
    println!(
        "wrote {} ({} points, {} visible)",
        args.output.display(),
        plot.point_count(),
        plot.visible_count()
    );
    Ok(())
}

fn read_text(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut legend = None::<PathBuf>;
    let mut width = 800_u32;
    let mut height = 600_u32;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--legend" => legend = Some(PathBuf::from(value()?)),
            "--width" => {
                width = value()?
                    .parse()
                    .map_err(|e| format!("invalid --width: {e}"))?;
            }
            "--height" => {
                height = value()?
                    .parse()
                    .map_err(|e| format!("invalid --height: {e}"))?;
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag: {other}\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output: output.ok_or_else(|| USAGE.to_owned())?,
        config,
        legend,
        width,
        height,
    })
}
