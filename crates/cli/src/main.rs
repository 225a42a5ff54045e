use anyhow::{Result, bail};
use tracing_subscriber::{EnvFilter, fmt};

use declargs::{Parser, binding};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let mut parser = Parser::new("accum");
    let numbers = binding::<Vec<i64>>();
    parser
        .add_int(Some('n'), "number", "Numbers to accumulate")
        .multi_value(1)
        .positional()
        .store_all(&numbers);
    parser
        .add_flag(Some('s'), "sum", "Add the numbers")
        .default_value(false);
    parser
        .add_flag(Some('m'), "mult", "Multiply the numbers")
        .default_value(false);
    parser
        .add_help(Some('h'), "help", "Show help information")
        .default_value(false);

    if let Err(err) = parser.parse(&args) {
        bail!("invalid arguments: {err} (try --help)");
    }

    if parser.help_requested() {
        print!("{}", parser.help_text());
        return Ok(());
    }

    tracing::debug!(count = numbers.borrow().len(), "accumulating");

    let numbers = numbers.borrow();
    if parser.flag("sum") {
        println!("{}", numbers.iter().sum::<i64>());
    } else if parser.flag("mult") {
        println!("{}", numbers.iter().product::<i64>());
    } else {
        bail!("no accumulator selected (try --sum or --mult)");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}
