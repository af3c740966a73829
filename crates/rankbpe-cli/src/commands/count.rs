use std::io::Read;

use rankbpe::{EncodeMode, TokenEncoder};

use crate::{encoding_selector::EncodingSelectorArgs, input_output::InputArgs};

/// Args for the count command.
#[derive(clap::Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    selector: EncodingSelectorArgs,

    #[command(flatten)]
    input: InputArgs,

    /// Treat special token literals as plain text.
    #[arg(long)]
    ordinary: bool,
}

impl CountArgs {
    /// Run the count command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let encoding = self.selector.load_encoding()?;

        let mut text = String::new();
        self.input.open_reader()?.read_to_string(&mut text)?;

        let mode = if self.ordinary {
            EncodeMode::Ordinary
        } else {
            EncodeMode::Strict
        };
        println!("{}", encoding.try_count_with(&text, mode)?);

        Ok(())
    }
}
