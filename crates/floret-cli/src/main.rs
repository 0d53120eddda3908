use floret::{GroupingDescriptor, LayoutConfig, Ordering, Placement, Record};
use futures::executor::block_on;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(floret::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<floret::Error> for CliError {
    fn from(value: floret::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Clusters,
    #[default]
    Bar,
    Force,
}

impl Command {
    fn placement(self) -> Placement {
        match self {
            Command::Clusters => Placement::None,
            Command::Bar => Placement::Bar,
            Command::Force => Placement::Force,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OrderingArg(Ordering);

impl FromStr for OrderingArg {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summit" => Ok(Self(Ordering::Summit)),
            "valley" => Ok(Self(Ordering::Valley)),
            "input" => Ok(Self(Ordering::Input)),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    width: Option<f64>,
    height: Option<f64>,
    seed: Option<u64>,
    ordering: Option<Ordering>,
}

#[derive(Debug, Deserialize)]
struct Document {
    grouping: GroupingDescriptor,
    #[serde(default)]
    records: Vec<Record>,
}

fn usage() -> &'static str {
    "floret-cli\n\
\n\
USAGE:\n\
  floret-cli [clusters|bar|force] [--width <w>] [--height <h>] [--config <path>] [--ordering summit|valley|input] [--seed <n>] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON object: { \"grouping\": { \"name\", \"values\", \"color\" }, \"records\": [...] }.\n\
  - clusters prints the clusters in local coordinates; bar and force also place them on the canvas.\n\
  - --config loads a JSON layout config; --width/--height/--ordering/--seed override it.\n\
"
}

fn parse_extent(value: Option<&String>) -> Result<f64, CliError> {
    let Some(v) = value else {
        return Err(CliError::Usage(usage()));
    };
    let v = v.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !(v.is_finite() && v >= 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "clusters" => args.command = Command::Clusters,
            "bar" => args.command = Command::Bar,
            "force" => args.command = Command::Force,
            "--pretty" => args.pretty = true,
            "--width" => args.width = Some(parse_extent(it.next())?),
            "--height" => args.height = Some(parse_extent(it.next())?),
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--ordering" => {
                let Some(ordering) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let OrderingArg(ordering) = ordering
                    .parse::<OrderingArg>()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.ordering = Some(ordering);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<LayoutConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => LayoutConfig::from_path(path)?,
        None => LayoutConfig::default(),
    };
    if let Some(w) = args.width {
        config.canvas.width = w;
    }
    if let Some(h) = args.height {
        config.canvas.height = h;
    }
    if let Some(ordering) = args.ordering {
        config.ordering = ordering;
    }
    if let Some(seed) = args.seed {
        config.simulation.random_seed = seed;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let text = read_input(args.input.as_deref())?;
    let doc: Document = serde_json::from_str(&text)?;

    let clusters = block_on(floret::layout(
        &doc.grouping,
        &doc.records,
        &config.radius_scale,
        &config,
        args.command.placement(),
    ))?;
    write_json(&clusters, args.pretty)?;
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
