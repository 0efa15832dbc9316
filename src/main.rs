mod backup;
mod calc;
mod config;
mod console;
mod model;
mod roster;
mod store;

use anyhow::{anyhow, Context};
use config::{Cmd, Options};
use roster::Roster;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

fn init_logging(opts: &Options) {
    let fmt = fmt::layer()
        .without_time()
        .with_target(false)
        .with_ansi(!opts.no_color)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(fmt)
        .with(opts.log_level())
        .init();
}

fn interactive(opts: &Options) -> anyhow::Result<()> {
    let (mut roster, load_error) = Roster::load(&opts.data);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = console::Session::new(&mut roster, opts.data.clone(), stdin.lock(), stdout.lock())
        .with_clear_screen(!opts.no_color);

    let outcome = match load_error {
        Some(e) => console::warn_load_failure(&mut session, &e).and_then(|_| console::run(&mut session)),
        None => console::run(&mut session),
    };
    match outcome {
        Ok(end) => {
            tracing::debug!(?end, "session finished");
            Ok(())
        }
        Err(console::ConsoleError::InputClosed) => Ok(()),
        Err(e) => Err(e).context("console session failed"),
    }
}

fn print_report(opts: &Options, class_name: &str, json: bool) -> anyhow::Result<()> {
    let (roster, load_error) = Roster::load(&opts.data);
    if let Some(e) = load_error {
        return Err(e);
    }
    if !roster.has_class(class_name) && roster.students_by_class(class_name).is_empty() {
        return Err(anyhow!("unknown class: {}", class_name));
    }

    let report = calc::compute_class_report(class_name, roster.students_by_class(class_name));
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &report).context("failed to write report")?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", console::render_report(&report))?;
    }
    stdout.flush()?;
    Ok(())
}

fn export(opts: &Options, bundle: &std::path::Path) -> anyhow::Result<()> {
    let (roster, load_error) = Roster::load(&opts.data);
    if let Some(e) = load_error {
        return Err(e);
    }
    let summary = backup::export_bundle(&roster.snapshot(), bundle)?;
    println!(
        "Exported {} students and {} classes to {} ({}, sha256 {})",
        summary.student_count,
        summary.class_count,
        bundle.display(),
        summary.bundle_format,
        summary.data_sha256
    );
    Ok(())
}

fn import(opts: &Options, bundle: &std::path::Path) -> anyhow::Result<()> {
    let summary = backup::import_bundle(bundle, &opts.data)?;
    println!(
        "Imported {} students and {} classes from {} ({}) into {}",
        summary.student_count,
        summary.class_count,
        bundle.display(),
        summary.bundle_format_detected,
        opts.data.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let opts = config::options().run();
    if opts.no_color {
        colored::control::set_override(false);
    }
    init_logging(&opts);

    let result = match &opts.cmd {
        Cmd::Interactive => interactive(&opts),
        Cmd::Report { json, class_name } => print_report(&opts, class_name, *json),
        Cmd::Export(bundle) => export(&opts, bundle),
        Cmd::Import(bundle) => import(&opts, bundle),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
