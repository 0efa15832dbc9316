use crate::store::DEFAULT_DATA_FILE;
use bpaf::*;
use std::path::PathBuf;
use tracing::metadata::LevelFilter;

/// What to do after the options are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Menu-driven session on stdin/stdout
    Interactive,
    /// Print the summary report for one class and exit
    Report { json: bool, class_name: String },
    /// Write a backup bundle of the data file
    Export(PathBuf),
    /// Replace the data file from a bundle or a plain data file
    Import(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Options {
    pub data: PathBuf,
    pub no_color: bool,
    pub verbose: usize,
    pub cmd: Cmd,
}

impl Options {
    /// Default is warnings only; each `-v` widens it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

pub fn options() -> OptionParser<Options> {
    let data = long("data")
        .short('d')
        .env("GRADETRACK_DATA")
        .help("Path to the JSON data file")
        .argument::<PathBuf>("PATH")
        .fallback(PathBuf::from(DEFAULT_DATA_FILE));

    let no_color = long("no-color")
        .help("Disable colors and screen clearing")
        .switch();

    let verbose = short('v')
        .long("verbose")
        .help("Log more; repeat for more detail")
        .req_flag(())
        .many()
        .map(|v| v.len());

    let json = long("json").help("Print the report as JSON").switch();
    let class_name = positional::<String>("CLASS").help("Class to report on");
    let report = construct!(Cmd::Report { json, class_name })
        .to_options()
        .descr("Print the summary report for one class")
        .command("report");

    let bundle = positional::<PathBuf>("BUNDLE").help("Path of the backup bundle to write");
    let export = construct!(Cmd::Export(bundle))
        .to_options()
        .descr("Write a backup bundle of the data file")
        .command("export");

    let bundle = positional::<PathBuf>("BUNDLE").help("Backup bundle or plain data file to restore");
    let import = construct!(Cmd::Import(bundle))
        .to_options()
        .descr("Replace the data file from a backup")
        .command("import");

    let cmd = construct!([report, export, import]).fallback(Cmd::Interactive);

    construct!(Options {
        data,
        no_color,
        verbose,
        cmd
    })
    .to_options()
    .descr("Student grade tracker")
    .version(env!("CARGO_PKG_VERSION"))
}
