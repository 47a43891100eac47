//! `stencil` — render `{{ key }}` templates from the command line.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};
use stencil::{
    Lookup, Template,
    ctx::Ctx,
    render::{self, Mode},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEMO_TEMPLATE: &str = "Hello, {{ Name }}! You are {{Age}} years old.";

#[derive(Parser)]
#[command(name = "stencil", about = "Minimal {{ key }} template renderer")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render one template to stdout or a file
    Render {
        /// Template file, or `-` for stdin
        template: PathBuf,
        #[command(flatten)]
        vars: VarArgs,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render every *.tpl under TEMPLATES into OUT, replacing OUT atomically
    Tree {
        templates: PathBuf,
        out: PathBuf,
        /// Templates here shadow same-named ones in TEMPLATES
        #[arg(long)]
        overlay: Option<PathBuf>,
        #[command(flatten)]
        vars: VarArgs,
    },

    /// List the variables a template references
    Keys {
        /// Template file, or `-` for stdin
        template: PathBuf,
    },

    /// Render the built-in greeting example
    Demo,
}

#[derive(Args)]
struct VarArgs {
    /// TOML file of variables; repeatable, later files win
    #[arg(long = "vars", value_name = "FILE")]
    files: Vec<PathBuf>,
    /// Single variable as KEY=VALUE; applied after --vars files
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pairs: Vec<String>,
    /// Fail on unterminated markers and missing variables
    #[arg(long)]
    strict: bool,
}

impl VarArgs {
    fn mode(&self) -> Mode {
        if self.strict { Mode::Strict } else { Mode::Lenient }
    }

    fn lookup(&self) -> Result<Lookup> {
        let mut lookup = Lookup::new();
        for file in &self.files {
            lookup.extend(Lookup::load(file)?);
        }
        for pair in &self.pairs {
            lookup.set_pair(pair)?;
        }
        debug!(count = lookup.len(), "variables loaded");
        Ok(lookup)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Cmd::Render {
            template,
            vars,
            out,
        } => cmd_render(&template, &vars, out.as_deref()),

        Cmd::Tree {
            templates,
            out,
            overlay,
            vars,
        } => {
            let ctx = Ctx::new(&templates, overlay.as_deref(), &out).context("initialise context")?;
            let report = render::render_tree(&ctx, &vars.lookup()?, vars.mode())?;
            for rel in &report.rendered {
                info!(template = %rel.display(), "rendered");
            }
            Ok(())
        }

        Cmd::Keys { template } => {
            let tpl = Template::parse(&read_source(&template)?);
            let mut stdout = io::stdout().lock();
            for key in tpl.keys() {
                writeln!(stdout, "{key}")?;
            }
            Ok(())
        }

        Cmd::Demo => {
            let vars = Lookup::new().with("Name", "fengfeng").with("Age", 21);
            println!("{}", stencil::render(&stencil::parse(DEMO_TEMPLATE), &vars));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn cmd_render(template: &Path, vars: &VarArgs, out: Option<&Path>) -> Result<()> {
    let src = read_source(template)?;
    let rendered = render::engine::expand(&src, &vars.lookup()?, vars.mode())
        .with_context(|| format!("render {}", template.display()))?;

    match out {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))
        }
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("write stdout"),
    }
}

/// Read a template from `path`, or stdin for `-`.
fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("read template {}", path.display()))
}
