use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum, ValueHint};
use log::{error, info, warn};

use demographrs::config::RenderConfig;
use demographrs::dashboard::render_text;
use demographrs::{DashboardConfig, DashboardData, Result, Session, ViewModel};

#[derive(Parser, Debug)]
#[command(author, version, about = "Customer demography dashboard", long_about = None)]
struct Cli {
    /// Configuration file (.toml, .yaml or .yml)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Customer table (.json or .csv), overrides the config
    #[arg(long, value_hint = ValueHint::FilePath)]
    customers: Option<PathBuf>,

    /// Province coordinate CSV, overrides the config
    #[arg(long, value_hint = ValueHint::FilePath)]
    coordinates: Option<PathBuf>,

    /// Initial gender selection
    #[arg(short, long)]
    gender: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Read gender selections from stdin, one per line, re-rendering after each
    #[arg(short, long)]
    interactive: bool,

    /// Write the bar charts as SVG files into this directory
    #[cfg(feature = "visualization")]
    #[arg(long, value_hint = ValueHint::DirPath)]
    svg_dir: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = cli.customers {
        config.data.customers = path;
    }
    if let Some(path) = cli.coordinates {
        config.data.coordinates = path;
    }

    let data = DashboardData::load(&config.data.customers, &config.data.coordinates)?;
    let mut session = Session::new(data, config);

    let view = match &cli.gender {
        Some(label) => session.select(label)?,
        None => session.view()?,
    };
    let render_config = session.config().render.clone();
    let format = cli.format;
    let publish = |view: &ViewModel| -> Result<()> {
        emit(view, format, &render_config)?;
        #[cfg(feature = "visualization")]
        write_svgs(view, cli.svg_dir.as_deref())?;
        Ok(())
    };
    publish(&view)?;

    if !cli.interactive {
        return Ok(());
    }

    info!("reading gender selections from stdin");
    let stdin = io::stdin();
    let lines = stdin.lock().lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            warn!("stopped reading stdin: {}", e);
            None
        }
    });
    let rendered = session.apply_selections(lines, publish)?;
    info!("rendered {} selection(s)", rendered);
    Ok(())
}

fn emit(view: &ViewModel, format: OutputFormat, render: &RenderConfig) -> Result<()> {
    let text = match format {
        OutputFormat::Text => render_text(view, render),
        OutputFormat::Json => view.to_json()?,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}

#[cfg(feature = "visualization")]
fn write_svgs(view: &ViewModel, dir: Option<&std::path::Path>) -> Result<()> {
    use demographrs::dashboard::Widget;
    use demographrs::vis::{bar_chart_svg, ChartSpec, PlotSettings};

    let Some(dir) = dir else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)?;
    let mut index = 0;
    for slot in view.slots() {
        if let Widget::Chart {
            chart: ChartSpec::Bar(spec),
        } = &slot.widget
        {
            index += 1;
            let settings = PlotSettings {
                title: slot
                    .heading
                    .as_ref()
                    .map(|h| h.text.clone())
                    .unwrap_or_default(),
                ..PlotSettings::default()
            };
            let path = dir.join(format!("chart_{}.svg", index));
            std::fs::write(&path, bar_chart_svg(spec, &settings)?)?;
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}
