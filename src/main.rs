use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use json_plan_md::{generate_plan, render_markdown, Error, Node, Plan};

const EXIT_INPUT_ERROR: u8 = 3;
const EXIT_VALIDATION_ERROR: u8 = 4;

/// Convert JSON to Markdown under a declarative plan.
#[derive(Parser, Debug)]
#[command(name = "jpmd", version, about)]
struct Cli {
    /// Log evaluation progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer a plan from a JSON document with a flat shape
    Plan {
        #[command(flatten)]
        input: JsonInput,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render a JSON document to Markdown using a plan
    Render {
        #[command(flatten)]
        input: JsonInput,

        #[command(flatten)]
        plan: PlanInput,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct JsonInput {
    /// JSON document (inline)
    #[arg(long)]
    json: Option<String>,

    /// JSON document from file
    #[arg(long)]
    json_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct PlanInput {
    /// Plan JSON (inline)
    #[arg(long)]
    plan: Option<String>,

    /// Plan JSON from file
    #[arg(long)]
    plan_file: Option<PathBuf>,
}

enum CliError {
    Input(String),
    Library(Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Input(_) => EXIT_INPUT_ERROR,
            CliError::Library(Error::Document(_)) | CliError::Library(Error::Plan(_)) => {
                EXIT_INPUT_ERROR
            }
            CliError::Library(_) => EXIT_VALIDATION_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            CliError::Input(message) => format!("Error: {message}"),
            CliError::Library(err) => err.report(),
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        CliError::Library(err)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.message());
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Plan { input, out } => {
            let root = parse_document(&input)?;
            let plan = generate_plan(&root)?;
            write_output(out.as_deref(), &plan.to_json()?)
        }
        Command::Render { input, plan, out } => {
            let root = parse_document(&input)?;
            let plan_bytes = read_plan(&plan)?;
            let parsed = Plan::parse(&plan_bytes)?;
            debug!(directives = parsed.directives.len(), "plan parsed");
            let markdown = render_markdown(&root, &parsed)?;
            write_output(out.as_deref(), &markdown)
        }
    }
}

fn parse_document(input: &JsonInput) -> Result<Node, CliError> {
    let data = read_document(input)?;
    let root = Node::parse(&data)?;
    debug!(bytes = data.len(), kind = %root.kind(), "JSON document parsed");
    Ok(root)
}

/// Inline flag, file flag, or stdin, in that order of preference.
fn read_document(input: &JsonInput) -> Result<Vec<u8>, CliError> {
    if let Some(inline) = &input.json {
        return Ok(inline.clone().into_bytes());
    }
    if let Some(path) = &input.json_file {
        return read_file(path);
    }

    let mut data = Vec::new();
    io::stdin()
        .read_to_end(&mut data)
        .map_err(|err| CliError::Input(format!("failed to read stdin: {err}")))?;
    if data.is_empty() {
        return Err(CliError::Input("missing JSON input".to_string()));
    }
    Ok(data)
}

fn read_plan(input: &PlanInput) -> Result<Vec<u8>, CliError> {
    if let Some(inline) = &input.plan {
        return Ok(inline.clone().into_bytes());
    }
    if let Some(path) = &input.plan_file {
        return read_file(path);
    }
    // clap enforces that one of the two flags is present
    Err(CliError::Input("missing plan input".to_string()))
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|err| CliError::Input(format!("failed to read {}: {err}", path.display())))
}

fn write_output(out: Option<&Path>, data: &str) -> Result<(), CliError> {
    match out {
        Some(path) => fs::write(path, data)
            .map_err(|err| CliError::Input(format!("failed to write {}: {err}", path.display()))),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{data}")
                .map_err(|err| CliError::Input(format!("failed to write stdout: {err}")))
        }
    }
}
