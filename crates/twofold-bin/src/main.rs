//! twofold entrypoint.
mod gate;

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Alert, EditEngine, EngineSettings, Session, SessionObserver};
use core_codec::{DocumentCodec, LineWrapper};
use core_config::Config;
use core_terminal::{CrosstermBackend, TerminalBackend};
use gate::{ArgumentGate, Dump, Request, UsageError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "twofold.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "twofold",
    version,
    about = "Edit the revised copy of a document while keeping the original"
)]
struct Args {
    /// Document to edit. Plain files are converted on first open.
    files: Vec<PathBuf>,
    /// Print the original section to stderr and exit.
    #[arg(short = 'o', long = "original")]
    original: bool,
    /// Print the revised section to stderr and exit.
    #[arg(short = 'r', long = "revised")]
    revised: bool,
    /// Configuration file path (overrides discovery of `twofold.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

/// Why the process stops early.
enum Failure {
    Usage(UsageError),
    Runtime(anyhow::Error),
}

impl From<UsageError> for Failure {
    fn from(e: UsageError) -> Self {
        Failure::Usage(e)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(e: anyhow::Error) -> Self {
        Failure::Runtime(e)
    }
}

/// Rings the terminal bell for every alert.
struct Bell<'a, B: TerminalBackend> {
    backend: &'a mut B,
}

impl<B: TerminalBackend> SessionObserver for Bell<'_, B> {
    fn on_alert(&mut self, alert: Alert) {
        debug!(target: "runtime", %alert, "alert");
        if let Err(e) = self.backend.bell() {
            warn!(target: "terminal", error = %e, "bell_failed");
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match core_config::load_from(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("twofold: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = configure_logging(&config.log_dir());
    install_panic_hook();
    info!(target: "runtime", config = ?config.source, "startup");

    match run(&args, &config) {
        Ok(()) => {
            info!(target: "runtime", "shutdown");
            ExitCode::SUCCESS
        }
        Err(Failure::Usage(e)) => {
            warn!(target: "runtime", code = e.exit_code(), error = %e, "usage_error");
            eprintln!("twofold: {e}");
            ExitCode::from(e.exit_code())
        }
        Err(Failure::Runtime(e)) => {
            error!(target: "runtime", error = %format!("{e:#}"), "fatal");
            eprintln!("twofold: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<(), Failure> {
    let request = ArgumentGate::new(&args.files, args.original, args.revised).check()?;
    let mut backend = CrosstermBackend::new();
    if request.dump.is_none() {
        let geometry = backend.geometry()?;
        gate::check_geometry(geometry)?;
    }

    let codec = DocumentCodec::new(LineWrapper::new(config.file.wrap.width));
    let document = codec
        .load(&request.path)
        .with_context(|| format!("cannot open {}", request.path.display()))?;
    info!(
        target: "runtime.startup",
        file = %request.path.display(),
        initialized = document.was_initialized(),
        dump = ?request.dump,
        "document_loaded"
    );

    match request.dump {
        Some(dump) => {
            let lines = match dump {
                Dump::Original => codec.extract_original(&document),
                Dump::Revised => codec.extract_revised(&document),
            };
            dump_lines(&lines)?;
            Ok(())
        }
        None => edit(&request, config, codec, document, &mut backend),
    }
}

fn dump_lines(lines: &[String]) -> Result<()> {
    let mut err = std::io::stderr().lock();
    for line in lines {
        writeln!(err, "{line}").context("write dump")?;
    }
    err.flush().context("flush dump")?;
    Ok(())
}

fn edit(
    request: &Request,
    config: &Config,
    codec: DocumentCodec,
    document: core_codec::Document,
    backend: &mut CrosstermBackend,
) -> Result<(), Failure> {
    let engine = EditEngine::new(document, codec, EngineSettings::from(config));
    let mut session = Session::new(engine, config.file.session.save_on_exit);

    let mut guard = backend.enter_guard()?;
    let mut bell = Bell {
        backend: guard.backend(),
    };
    let end = session
        .run(std::io::stdin().lock(), &mut bell)
        .with_context(|| format!("editing {}", request.path.display()))?;
    drop(guard);

    info!(
        target: "runtime",
        ?end,
        unsaved = session.engine().state().is_dirty(),
        "session_finished"
    );
    Ok(())
}

fn configure_logging(log_dir: &Path) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(log_dir).is_err() {
        return None;
    }
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            // Raw mode is left by the guard's Drop during unwinding.
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
