//! Charm-style prompts using cliclack

use crate::prompt::Prompter;
use std::io;

/// Interactive prompter for a real terminal
#[derive(Debug, Default)]
pub struct ClackPrompter;

impl ClackPrompter {
    pub fn new() -> Self {
        Self
    }

    pub fn intro(&self, title: &str) -> io::Result<()> {
        cliclack::intro(title)
    }

    pub fn outro(&self, message: &str) -> io::Result<()> {
        cliclack::outro(message)
    }
}

impl Prompter for ClackPrompter {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        cliclack::confirm(question).initial_value(false).interact()
    }

    fn input(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        let mut prompt = cliclack::input(question).required(false);
        if let Some(d) = default {
            prompt = prompt.placeholder(d).default_input(d);
        }
        let answer: String = prompt.interact()?;
        Ok(answer.trim().to_string())
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::success(message)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::warning(message)
    }
}
