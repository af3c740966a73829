use std::io::{BufRead, Write};

use rankbpe::{RankBpeError, TokenDecoder};

use crate::{
    encoding_selector::EncodingSelectorArgs,
    input_output::{InputArgs, OutputArgs},
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    selector: EncodingSelectorArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Skip unknown tokens and replace invalid UTF-8.
    #[arg(long)]
    lossy: bool,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let encoding = self.selector.load_encoding()?;

        let reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        for line in reader.lines() {
            let tokens = parse_tokens(&line?)?;

            if self.lossy {
                let bytes = encoding.decode_bytes_lossy(&tokens);
                write!(writer, "{}", String::from_utf8_lossy(&bytes))?;
            } else {
                let text = encoding.try_decode_to_string(&tokens)?.try_result()?;
                write!(writer, "{text}")?;
            }
            writer.flush()?;
        }

        Ok(())
    }
}

fn parse_tokens(line: &str) -> Result<Vec<u32>, RankBpeError> {
    line.split_whitespace()
        .map(|s| {
            s.parse()
                .map_err(|err| RankBpeError::Parse(format!("token {s:?}: {err}")))
        })
        .collect()
}
