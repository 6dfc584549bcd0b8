// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::{anyhow, Result};
use binout_core::{Archive, Type};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use std::io;

trait CliCommand {
    fn run(&self) -> Result<()>;
}

#[derive(Args)]
struct ArchiveSource {
    /// Glob pattern matching the member files of a binout archive.
    #[arg(long)]
    pub pattern: Option<String>,
}

impl ArchiveSource {
    fn open(&self) -> Result<Archive> {
        let pattern = self
            .pattern
            .clone()
            .ok_or_else(|| anyhow!("must define source"))?;

        let archive = Archive::open(&pattern);

        if let Some(err) = archive.open_error() {
            log::warn!("{err}");
        }

        Ok(archive)
    }
}

#[derive(Parser)]
struct ReadVar {
    #[command(flatten)]
    source: ArchiveSource,

    /// Path of the variable to read, e.g. /rcforc/fx.
    path: String,
}

impl CliCommand for ReadVar {
    fn run(&self) -> Result<()> {
        let archive = self.source.open()?;

        match archive.get_type_id(&self.path) {
            Type::Int8 => println!("{:?}", archive.read_int8(&self.path)),
            Type::Int16 => println!("{:?}", archive.read_int16(&self.path)),
            Type::Int32 => println!("{:?}", archive.read_int32(&self.path)),
            Type::Int64 => println!("{:?}", archive.read_int64(&self.path)),
            Type::Uint8 => println!("{:?}", archive.read_uint8(&self.path)),
            Type::Uint16 => println!("{:?}", archive.read_uint16(&self.path)),
            Type::Uint32 => println!("{:?}", archive.read_uint32(&self.path)),
            Type::Uint64 => println!("{:?}", archive.read_uint64(&self.path)),
            Type::Float32 => println!("{:?}", archive.read_float32(&self.path)),
            Type::Float64 => println!("{:?}", archive.read_float64(&self.path)),
            Type::Invalid(_) => {
                if let Some(err) = archive.error_string() {
                    return Err(anyhow!(err));
                }
                return Err(anyhow!("variable not found: {}", self.path));
            }
        }

        Ok(())
    }
}

#[derive(Parser)]
struct TypeId {
    #[command(flatten)]
    source: ArchiveSource,

    /// Path of the variable to query.
    path: String,
}

impl CliCommand for TypeId {
    fn run(&self) -> Result<()> {
        let archive = self.source.open()?;
        let type_id = archive.get_type_id(&self.path);

        if let Some(err) = archive.error_string() {
            return Err(anyhow!(err));
        }

        println!("{}", type_id.name());

        Ok(())
    }
}

#[derive(Parser)]
struct Exists {
    #[command(flatten)]
    source: ArchiveSource,

    /// Path of the variable to check.
    path: String,
}

impl CliCommand for Exists {
    fn run(&self) -> Result<()> {
        let archive = self.source.open()?;
        println!("{}", archive.variable_exists(&self.path));

        Ok(())
    }
}

#[derive(Parser)]
struct Children {
    #[command(flatten)]
    source: ArchiveSource,

    /// Path whose immediate children should be listed; the archive root if
    /// omitted.
    #[arg(default_value = "")]
    path: String,
}

impl CliCommand for Children {
    fn run(&self) -> Result<()> {
        let archive = self.source.open()?;

        for child in archive.get_children(&self.path) {
            println!("{child}");
        }

        Ok(())
    }
}

#[derive(Parser)]
struct OpenErrors {
    #[command(flatten)]
    source: ArchiveSource,
}

impl CliCommand for OpenErrors {
    fn run(&self) -> Result<()> {
        let archive = self.source.open()?;

        match archive.open_error() {
            Some(err) => println!("{err}"),
            None => println!("{} file(s) opened with no errors", archive.num_files()),
        }

        Ok(())
    }
}

#[derive(Parser)]
struct PrintRecords {
    #[command(flatten)]
    source: ArchiveSource,
}

impl CliCommand for PrintRecords {
    fn run(&self) -> Result<()> {
        let archive = self.source.open()?;
        archive.print_records(&mut io::stdout())?;

        Ok(())
    }
}

#[derive(Subcommand)]
enum Subcommands {
    /// Read the payload of a variable and print it as a Rust debug vector.
    ReadVar(ReadVar),
    /// Print the type name of a variable.
    TypeId(TypeId),
    /// Print whether a variable exists at an exact path.
    Exists(Exists),
    /// List the immediate children of a path.
    Children(Children),
    /// Print accumulated per-file open/parse errors, if any.
    OpenErrors(OpenErrors),
    /// Dump every file's data pointers and records.
    PrintRecords(PrintRecords),
}

impl Subcommands {
    fn as_cli_command(&self) -> &dyn CliCommand {
        match self {
            Self::ReadVar(c) => c,
            Self::TypeId(c) => c,
            Self::Exists(c) => c,
            Self::Children(c) => c,
            Self::OpenErrors(c) => c,
            Self::PrintRecords(c) => c,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// Increase logging verbosity. Can be specified multiple times
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Subcommands,
}

impl Cli {
    fn run() -> Result<()> {
        let cli = Self::parse();

        let log_level = match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level.as_str()),
        );

        builder.init();

        let command = cli.command.as_cli_command();

        command.run()
    }
}

fn main() {
    let exit_code = match Cli::run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    };

    std::process::exit(exit_code)
}
