//! Writing prompts.
//!
//! A fixed list of prompts ships with the binary. Configuration may append
//! more, but the list can never be empty.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{JournalError, Result};

/// Prompts compiled into the binary.
pub const DEFAULT_PROMPTS: &[&str] = &[
    "What made you smile today?",
    "Describe a challenge you faced recently and how you handled it.",
    "What are three things you are grateful for right now?",
    "Write about a person who has influenced your life.",
    "What is something you learned this week?",
    "Describe your ideal day from start to finish.",
    "What is a goal you are working toward, and what is the next step?",
    "Write a letter to your younger self.",
    "What does a good night's sleep feel like to you?",
    "Describe a place where you feel completely at peace.",
    "What is a habit you would like to build or break?",
    "Write about a recent conversation that stayed with you.",
    "What are you looking forward to?",
    "Describe a mistake that taught you something valuable.",
    "What would you do if you knew you could not fail?",
    "How have you changed over the last year?",
    "What does success mean to you today?",
    "Write about a book, song, or film that moved you.",
    "What is something you need to let go of?",
    "Describe a small act of kindness you witnessed or performed.",
];

/// Ordered, non-empty list of prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptList {
    prompts: Vec<String>,
}

impl PromptList {
    /// Create a list from explicit prompts.
    pub fn new(prompts: Vec<String>) -> Result<Self> {
        let prompts: Vec<String> = prompts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        if prompts.is_empty() {
            return Err(JournalError::EmptyPromptList);
        }
        Ok(Self { prompts })
    }

    /// The built-in prompts.
    pub fn with_defaults() -> Self {
        Self {
            prompts: DEFAULT_PROMPTS.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Append extra prompts, skipping blanks and ones already present.
    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prompt in extra {
            let prompt = prompt.into();
            if !prompt.trim().is_empty() && !self.prompts.contains(&prompt) {
                self.prompts.push(prompt);
            }
        }
    }

    /// Pick one prompt uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Never empty, see the constructors.
        self.prompts
            .choose(rng)
            .map_or(DEFAULT_PROMPTS[0], String::as_str)
    }

    /// Whether `prompt` is in the list.
    pub fn contains(&self, prompt: &str) -> bool {
        self.prompts.iter().any(|p| p == prompt)
    }

    /// Number of prompts.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Iterate over the prompts in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prompts.iter().map(String::as_str)
    }
}

impl Default for PromptList {
    fn default() -> Self {
        Self::with_defaults()
    }
}
