//! Prompt command implementation.

use std::io::{self, Write};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Run the prompt command.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let prompts = config.prompt_list();
    let prompt = prompts.choose(&mut rand::thread_rng());

    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => writeln!(out, "{}", serde_json::json!({ "prompt": prompt }))?,
        OutputFormat::Text => writeln!(out, "{prompt}")?,
    }
    Ok(())
}
