//! Input, output, and failure plumbing for the hosting CI runner.
//!
//! Inputs arrive as `INPUT_<NAME>` environment variables. Outputs append to
//! the file named by `$GITHUB_OUTPUT`, falling back to the legacy
//! `::set-output` stdout command so that local runs still show theirs.
//! Failure surfaces as an `::error::` workflow command plus a failed exit
//! status.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::process;

/// Read a step input, treating whitespace-only values as absent.
pub fn get_input(name: &str) -> Option<String> {
    env::var(input_env_var(name))
        .ok()
        .map(|x| x.trim().to_owned())
        .filter(|x| !x.is_empty())
}

/// The environment variable a given input arrives in. Spaces become
/// underscores and the rest is uppercased verbatim, hyphens included.
fn input_env_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Write a step output for later workflow steps to pick up.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    match env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;

            writeln!(file, "{}", output_entry(name, value))
        }
        _ => {
            println!("::set-output name={}::{}", name, escape_data(value));
            Ok(())
        }
    }
}

/// A single `$GITHUB_OUTPUT` entry. Multi-line values take the heredoc
/// form; everything else is a plain `name=value` line.
fn output_entry(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!("{}<<IRIS_EOF\n{}\nIRIS_EOF", name, value)
    } else {
        format!("{}={}", name, value)
    }
}

/// Mark the run failed and terminate. The annotation shows up on the
/// workflow summary; the exit status fails the step.
pub fn set_failed(message: &str) -> ! {
    println!("::error::{}", escape_data(message));
    process::exit(1);
}

/// Escaping for data carried in workflow commands.
///
/// <https://github.com/actions/toolkit/blob/main/docs/commands.md>
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_env_var() {
        assert_eq!(input_env_var("payload"), "INPUT_PAYLOAD");
        assert_eq!(input_env_var("channel-id"), "INPUT_CHANNEL-ID");
        assert_eq!(input_env_var("some input"), "INPUT_SOME_INPUT");
    }

    #[test]
    fn test_output_entry() {
        assert_eq!(
            output_entry("ts", "1503435956.000247"),
            "ts=1503435956.000247"
        );
    }

    #[test]
    fn test_multiline_output_entry() {
        assert_eq!(
            output_entry("report", "one\ntwo"),
            "report<<IRIS_EOF\none\ntwo\nIRIS_EOF"
        );
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("50% done\r\n"), "50%25 done%0D%0A");
    }
}
