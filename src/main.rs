use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::error;

use enpass2keepass::convert::{convert, ConvertOptions};
use enpass2keepass::keepass::xml_writer::{GroupNames, DEFAULT_DATABASE_NAME, DEFAULT_GROUP_NAME};

/// Convert an Enpass .txt export into a KeePass 2.x XML import file.
#[derive(Parser, Debug)]
#[command(name = "enpass2keepass", version, about)]
struct Cli {
    /// Enpass exported .txt file
    input: PathBuf,

    /// Directory the KeePass XML file is written to
    output_dir: PathBuf,

    /// Name of the KeePass database group
    #[arg(long, env = "ENPASS2KEEPASS_DATABASE_NAME", default_value = DEFAULT_DATABASE_NAME)]
    database_name: String,

    /// Name of the group holding the imported entries
    #[arg(long, env = "ENPASS2KEEPASS_GROUP_NAME", default_value = DEFAULT_GROUP_NAME)]
    group_name: String,

    /// Output file name (default: Enpass2KeePass_<timestamp>.xml)
    #[arg(long)]
    file_name: Option<String>,

    /// Seed for reproducible UUIDs
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            names: GroupNames {
                database: self.database_name.clone(),
                container: self.group_name.clone(),
            },
            file_name: self.file_name.clone(),
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match convert(&cli.input, &cli.output_dir, &cli.options()) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
