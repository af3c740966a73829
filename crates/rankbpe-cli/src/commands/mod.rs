mod count;
mod decode;
mod encode;
mod list_models;

/// Subcommands for rankbpe.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Encode text to tokens, line by line.
    Encode(encode::EncodeArgs),

    /// Decode tokens to text, line by line.
    Decode(decode::DecodeArgs),

    /// Count the tokens of the whole input.
    Count(count::CountArgs),

    /// List the known models and their encodings.
    ListModels(list_models::ListModelsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Count(cmd) => cmd.run(),
            Commands::ListModels(cmd) => cmd.run(),
        }
    }
}
