use rankbpe::pretrained::openai::{EncodingType, OA_MODEL_TYPES};
use strum::IntoEnumIterator;

/// Args for the model listing command.
#[derive(clap::Args, Debug)]
pub struct ListModelsArgs {
    /// List the encodings and their vocabulary files instead.
    #[arg(long)]
    encodings: bool,
}

impl ListModelsArgs {
    /// Run the model listing command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.encodings {
            for ty in EncodingType::iter() {
                println!("\"{ty}\" - {}", ty.vocab_file_name());
            }
            return Ok(());
        }

        for model in OA_MODEL_TYPES {
            println!(
                "\"{}\" - {} ({} tokens)",
                model.name(),
                model.encoding(),
                model.max_context_length()
            );
        }

        Ok(())
    }
}
