use std::io::{BufRead, Write};

use rankbpe::{EncodeMode, TokenEncoder};

use crate::{
    encoding_selector::EncodingSelectorArgs,
    input_output::{InputArgs, OutputArgs},
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    selector: EncodingSelectorArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Treat special token literals as plain text.
    #[arg(long, conflicts_with = "with_specials")]
    ordinary: bool,

    /// Encode special token literals as their reserved tokens.
    #[arg(long)]
    with_specials: bool,

    /// Maximum number of tokens per line.
    #[arg(long)]
    max_tokens: Option<usize>,
}

impl EncodeArgs {
    fn mode(&self) -> EncodeMode {
        if self.ordinary {
            EncodeMode::Ordinary
        } else if self.with_specials {
            EncodeMode::WithSpecials
        } else {
            EncodeMode::Strict
        }
    }

    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let encoding = self.selector.load_encoding()?;
        let mode = self.mode();

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        // Read lines, but keep the end-of-line characters.
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let result = encoding.try_encode_with(&line, mode, self.max_tokens)?;
            if result.truncated {
                log::debug!("line truncated after {} bytes", result.processed_len());
            }

            write_tokens(&mut writer, &result.tokens)?;
            writer.flush()?;
            line.clear();
        }

        Ok(())
    }
}

fn write_tokens(
    writer: &mut dyn Write,
    tokens: &[u32],
) -> std::io::Result<()> {
    for (idx, token) in tokens.iter().enumerate() {
        write!(writer, "{}{}", if idx == 0 { "" } else { " " }, token)?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_tokens() {
        let mut buf: Vec<u8> = Vec::new();
        write_tokens(&mut buf, &[15339, 1917]).unwrap();
        write_tokens(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "15339 1917\n\n");
    }
}
