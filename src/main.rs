use anyhow::Result;
use clap::Parser;
use kitty::cli::{self, Cli, Command};
use kitty::{open_backend, util, App, Config, Ledger};
use std::fs::{self, OpenOptions};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Cli::parse();
    util::init_data_dir(args.data_dir);

    // Initialize logging to file (~/.kitty/logs/kitty.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let mut config = Config::load();
    if let Some(backend) = args.backend {
        config = config.with_backend(backend);
    }

    let backend = open_backend(config.backend, &util::data_dir())?;
    let mut ledger = Ledger::load(backend, config.ledger_settings());

    match args.command.unwrap_or(Command::Show) {
        Command::Tui => {
            let mut app = App::new(ledger, config);
            app.run()
        }
        command => {
            let currency = config.currency.clone();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            cli::run(command, &mut ledger, &currency, &mut out)
        }
    }
}
