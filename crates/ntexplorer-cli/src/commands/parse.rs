use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use ntexplorer_core::parse_recommendations;

use super::CmdResult;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// File holding the raw reply text; stdin if omitted
    pub file: Option<PathBuf>,
}

pub fn run(args: ParseArgs) -> CmdResult {
    let raw = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let cards = parse_recommendations(&raw)?;
    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}
