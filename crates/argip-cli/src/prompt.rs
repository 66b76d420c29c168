//! Interactive prompts: passwords and delete confirmation.

use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use argip_api_models::validation;

use crate::client::{CliError, CliResult};

/// Yes/no question asked before destructive commands.
pub(crate) trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> CliResult<bool>;
}

/// Asks on stderr and reads the answer from stdin.
pub(crate) struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> CliResult<bool> {
        if !io::stdin().is_terminal() {
            return Err(CliError::validation(
                "confirmation required; pass --yes when running non-interactively",
            ));
        }
        eprint!("{question} [y/N]: ");
        io::stderr()
            .flush()
            .map_err(|err| CliError::failure(anyhow!("failed to write prompt: {err}")))?;
        let mut answer = String::new();
        io::stdin()
            .read_line(&mut answer)
            .map_err(|err| CliError::failure(anyhow!("failed to read answer: {err}")))?;
        Ok(is_affirmative(&answer))
    }
}

pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "t" | "tak"
    )
}

/// `--yes` skips the question entirely.
pub(crate) fn confirm_delete(
    confirm: &dyn Confirm,
    assume_yes: bool,
    question: &str,
) -> CliResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    confirm.confirm(question)
}

/// Password for `login`: the flag value, or a hidden prompt on a terminal.
pub(crate) fn resolve_password(flag: Option<String>) -> CliResult<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    if io::stdin().is_terminal() {
        read_hidden("Password: ")
    } else {
        Err(CliError::validation(
            "password required; supply via --password when running non-interactively",
        ))
    }
}

/// Password for `register`: the flag value, or two matching hidden prompts.
pub(crate) fn resolve_new_password(flag: Option<String>) -> CliResult<String> {
    if let Some(value) = flag {
        validation::validate_password(&value)?;
        return Ok(value);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::validation(
            "password required; supply via --password when running non-interactively",
        ));
    }
    let password = read_hidden("Password: ")?;
    let confirmation = read_hidden("Confirm password: ")?;
    validation::validate_new_password(&password, &confirmation)?;
    Ok(password)
}

fn read_hidden(prompt: &str) -> CliResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|err| CliError::failure(anyhow!("failed to read password from stdin: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl Confirm for Unreachable {
        fn confirm(&self, _question: &str) -> CliResult<bool> {
            Err(CliError::validation("prompt should not be shown"))
        }
    }

    #[test]
    fn affirmative_answers_accept_english_and_polish() {
        for answer in ["y", "YES\n", " t ", "Tak"] {
            assert!(is_affirmative(answer), "{answer:?}");
        }
        for answer in ["", "n", "no", "nie", "maybe"] {
            assert!(!is_affirmative(answer), "{answer:?}");
        }
    }

    #[test]
    fn assume_yes_skips_the_prompt() {
        assert!(confirm_delete(&Unreachable, true, "Delete?").expect("confirmed"));
        assert!(confirm_delete(&Unreachable, false, "Delete?").is_err());
    }

    #[test]
    fn new_password_flag_is_length_checked() {
        let err = resolve_new_password(Some("12345".to_string())).expect_err("too short");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            resolve_new_password(Some("sekret1".to_string())).expect("valid"),
            "sekret1"
        );
    }

    #[test]
    fn login_password_flag_is_passed_through() {
        assert_eq!(
            resolve_password(Some("anything".to_string())).expect("flag"),
            "anything"
        );
    }
}
