use std::error::Error;
use std::io::IsTerminal;

use owo_colors::OwoColorize;

use super::code::Language;
use super::PromptOpsError;

/// Formats PromptOpsError for CLI output
pub struct ErrorFormatter {
    verbose: bool,
    use_color: bool,
    language: Language,
}

impl ErrorFormatter {
    /// Creates a new ErrorFormatter with default TTY detection
    pub fn new(verbose: bool, language: Language) -> Self {
        Self::with_color_detection(verbose, language, Self::default_should_use_color)
    }

    /// Creates a new ErrorFormatter with injectable TTY detection for testing
    pub fn with_color_detection(
        verbose: bool,
        language: Language,
        detect_color: fn() -> bool,
    ) -> Self {
        let use_color = detect_color();
        Self {
            verbose,
            use_color,
            language,
        }
    }

    fn default_should_use_color() -> bool {
        std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
    }

    /// Formats the error for display
    pub fn format(&self, error: &PromptOpsError) -> String {
        let code = error.code();
        let mut output = format!("error[{}]: {}", code.as_str(), error);
        output.push_str(&format!("\n  = {}", code.message(self.language)));

        if self.verbose {
            output.push_str("\n  |");
            output.push_str("\n  | Remediation:");
            for line in code.remediation().lines() {
                output.push_str(&format!("\n  |   {}", line));
            }

            let chain = Self::format_source_chain(error);
            if !chain.is_empty() {
                output.push_str("\n  |");
                output.push_str(&format!("\n  | Source chain:\n{}", chain));
            }
        }

        if self.use_color {
            Self::apply_color(&output)
        } else {
            output
        }
    }

    fn format_source_chain(error: &PromptOpsError) -> String {
        let mut chain = Vec::new();
        let mut current: Option<&(dyn Error + 'static)> = error.source();

        while let Some(err) = current {
            chain.push(format!("  |   - {}", err));
            current = err.source();
        }

        chain.join("\n")
    }

    fn apply_color(text: &str) -> String {
        text.lines()
            .map(|line| {
                if line.starts_with("error[") {
                    let bracket_end = line.find(']').map(|i| i + 1).unwrap_or(0);
                    let (prefix, rest) = line.split_at(bracket_end);
                    format!("{}{}", prefix.red().bold(), rest.bold())
                } else if line.starts_with("  =") {
                    line.yellow().to_string()
                } else if line.starts_with("  | Remediation:") {
                    line.green().to_string()
                } else if line.starts_with("  |   -") {
                    line.dimmed().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
