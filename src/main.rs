use a5bench::{run, Args};
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    run(args)
}
