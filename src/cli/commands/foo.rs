//! `dgroup foo` command - the default command

use miette::Result;

#[derive(clap::Args, Debug)]
pub struct FooArgs {
    /// Extra value, printed after the --foo value
    pub value: Option<String>,

    /// Value to print
    #[arg(long, default_value = "foo")]
    pub foo: String,
}

pub fn run(args: FooArgs) -> Result<()> {
    println!("{}", args.foo);
    if let Some(value) = args.value {
        println!("{}", value);
    }
    Ok(())
}
