//! Words command - spell out an amount in Spanish.

use clap::Args;

use cobro_core::words::to_words;

/// Arguments for the words command.
#[derive(Args)]
pub struct WordsArgs {
    /// Whole amount (one million or more prints the out-of-range wording)
    value: u64,

    /// Append the configured currency wording
    #[arg(long)]
    currency: bool,
}

pub async fn run(args: WordsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let words = to_words(args.value);

    if args.currency {
        let config = super::load_config(config_path)?;
        println!("{} {}", words, config.document.currency_words);
    } else {
        println!("{}", words);
    }

    Ok(())
}
