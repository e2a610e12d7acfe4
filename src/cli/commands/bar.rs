//! `dgroup bar` command

use miette::Result;

pub fn run() -> Result<()> {
    println!("bar");
    Ok(())
}
