use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use shiplabel_core::{
    AddressField, AddressParser, AutoFill, Axis, GeminiParser, HtmlConfig, JsonConfig, LabelEditor, LabelError,
    RenderOptions, ReplayParser, Settings, Side, SkipReason, TextConfig, convert_to_html, convert_to_json,
    convert_to_text,
};
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{print_banner, print_detail, print_info, print_step, print_success, print_timing, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the rendered label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, html, json", s)),
        }
    }
}

/// A manual `FIELD=VALUE` address edit
#[derive(Debug, Clone)]
struct FieldEdit {
    field: AddressField,
    value: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected FIELD=VALUE, got: {}", s))?;
        let field = field.trim().parse::<AddressField>().map_err(|e| {
            format!("{}. Valid fields: name, street1, city, state, country, phone", e)
        })?;
        Ok(Self { field, value: value.to_string() })
    }
}

/// Compose a shipping label, optionally auto-filling addresses from free text
#[derive(Parser, Debug)]
#[command(name = "shiplabel")]
#[command(author = "shiplabel contributors")]
#[command(version)]
#[command(about = "Compose and print shipping labels", long_about = None)]
struct Args {
    /// Free-text sender address to auto-fill from ("-" for stdin)
    #[arg(long, value_name = "TEXT")]
    from_text: Option<String>,

    /// Free-text receiver address to auto-fill from ("-" for stdin)
    #[arg(long, value_name = "TEXT")]
    to_text: Option<String>,

    /// Set a sender field, applied after auto-fill (repeatable)
    #[arg(long = "from", value_name = "FIELD=VALUE")]
    from_fields: Vec<FieldEdit>,

    /// Set a receiver field, applied after auto-fill (repeatable)
    #[arg(long = "to", value_name = "FIELD=VALUE")]
    to_fields: Vec<FieldEdit>,

    /// Package weight in pounds (free-form)
    #[arg(short, long, value_name = "LBS")]
    weight: Option<String>,

    /// Label size (4x6, 4x4, custom)
    #[arg(short, long, value_name = "SIZE")]
    size: Option<String>,

    /// Custom label width in inches (with --size custom)
    #[arg(long, value_name = "INCHES")]
    width: Option<f64>,

    /// Custom label height in inches (with --size custom)
    #[arg(long, value_name = "INCHES")]
    height: Option<f64>,

    /// Output format (text, html, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Open the print dialog when the HTML label is loaded
    #[arg(long)]
    print: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Use a saved generateContent response instead of calling the service
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Settings file (default: <config dir>/shiplabel/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Gemini API base URL
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Fallback country for empty or unclear addresses
    #[arg(long, value_name = "COUNTRY")]
    country: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Settings given on the command line, to layer over file and env
    fn settings(&self) -> Settings {
        Settings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            default_country: self.country.clone(),
            timeout_secs: self.timeout,
            default_label_size: self.size.clone(),
            default_weight: self.weight.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "shiplabel_core=debug,shiplabel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Resolve "-" to the contents of stdin
fn resolve_text(from: Option<String>, to: Option<String>) -> anyhow::Result<(Option<String>, Option<String>)> {
    if from.as_deref() == Some("-") && to.as_deref() == Some("-") {
        bail!("Only one of --from-text and --to-text can read from stdin");
    }

    let read_stdin = || -> anyhow::Result<String> {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    };

    let from = match from {
        Some(text) if text == "-" => Some(read_stdin()?),
        other => other,
    };
    let to = match to {
        Some(text) if text == "-" => Some(read_stdin()?),
        other => other,
    };
    Ok((from, to))
}

/// Build the parser used for auto-fill
fn build_parser(replay: Option<&PathBuf>, settings: &Settings) -> Result<Box<dyn AddressParser>, LabelError> {
    match replay {
        Some(path) => Ok(Box::new(ReplayParser::from_file(path, settings.default_country())?)),
        None => Ok(Box::new(GeminiParser::new(settings.gemini_config())?)),
    }
}

/// Run auto-fill for one side if text was given
async fn auto_fill(
    editor: &LabelEditor, side: Side, text: Option<&str>, parser: &dyn AddressParser,
) -> Option<Result<AutoFill, LabelError>> {
    let text = text?;
    Some(editor.request_auto_fill(side, text, parser).await)
}

/// Tell the user how an auto-fill went
fn report_auto_fill(side: Side, outcome: Option<Result<AutoFill, LabelError>>, verbose: bool) {
    match outcome {
        None => {}
        Some(Ok(AutoFill::Applied(address))) => {
            if verbose {
                print_success(&format!("Auto-filled {} address", side));
                print_detail("Name", &address.name);
                print_detail("Street", &address.street1);
                print_detail("City", &address.city);
                print_detail("Country", &address.country);
            }
        }
        Some(Ok(AutoFill::Skipped(SkipReason::EmptyInput))) => {
            print_info(&format!("No {} text to auto-fill from, skipping", side));
        }
        Some(Ok(AutoFill::Skipped(SkipReason::InFlight))) => {
            print_info(&format!("An auto-fill for the {} is already running, skipping", side));
        }
        Some(Err(e)) => {
            print_warning(&format!("Failed to parse {} address. Please try again. ({})", side, e));
        }
    }
}

fn apply_edits(editor: &LabelEditor, side: Side, edits: &[FieldEdit]) {
    for edit in edits {
        editor.edit_field(side, edit.field, edit.value.clone());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    settings.merge(args.settings());
    let editor = settings.editor().context("Invalid label settings")?;
    tracing::debug!(size = %editor.label_size(), country = editor.default_country(), "settings loaded");

    if args.verbose {
        print_banner(&editor.label_size(), &editor.weight(), editor.default_country());
        print_step(1, 4, "Settings loaded");
        let source = args.config.clone().or_else(|| Settings::default_path().filter(|p| p.is_file()));
        match source {
            Some(path) => print_detail("File", &path.display().to_string()),
            None => print_detail("File", "none (defaults and environment)"),
        }
        eprintln!();
    }

    let (from_text, to_text) = resolve_text(args.from_text.clone(), args.to_text.clone())?;
    let wants_auto_fill = [&from_text, &to_text]
        .iter()
        .any(|t| t.as_deref().is_some_and(|t| !t.trim().is_empty()));

    if wants_auto_fill {
        if args.verbose {
            print_step(2, 4, "Auto-filling addresses");
        }

        match build_parser(args.replay.as_ref(), &settings) {
            Ok(parser) => {
                let started = Instant::now();
                let (sender, receiver) = tokio::join!(
                    auto_fill(&editor, Side::Sender, from_text.as_deref(), parser.as_ref()),
                    auto_fill(&editor, Side::Receiver, to_text.as_deref(), parser.as_ref()),
                );
                if args.verbose {
                    print_timing(parser.name(), started.elapsed());
                }
                report_auto_fill(Side::Sender, sender, args.verbose);
                report_auto_fill(Side::Receiver, receiver, args.verbose);
            }
            Err(e) => print_warning(&format!("Auto-fill unavailable: {}", e)),
        }

        if args.verbose {
            eprintln!();
        }
    }

    if args.verbose {
        print_step(3, 4, "Applying edits");
    }

    apply_edits(&editor, Side::Sender, &args.from_fields);
    apply_edits(&editor, Side::Receiver, &args.to_fields);

    for (axis, value, flag) in [(Axis::Width, args.width, "--width"), (Axis::Height, args.height, "--height")] {
        if let Some(inches) = value
            && !editor.set_custom_dimension(axis, inches)
        {
            print_warning(&format!(
                "Ignoring {} {}: only positive sizes apply, and only with --size custom",
                flag, inches
            ));
        }
    }

    if args.verbose {
        print_step(4, 4, "Rendering label");
        print_detail("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    let preview = editor.preview();
    let options = RenderOptions::default();
    let output = match args.format {
        OutputFormat::Text => convert_to_text(&preview, &options, &TextConfig::default()),
        OutputFormat::Html => convert_to_html(&preview, &options, &HtmlConfig { auto_print: args.print }),
        OutputFormat::Json => {
            convert_to_json(&preview, &options, &JsonConfig { pretty: true }).context("Failed to render JSON")?
        }
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Label written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
