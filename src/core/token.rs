use crate::utils::error::{ExpandError, Result};
use std::fs;

/// Resolves the API token: the environment variable wins when set and
/// non-empty, otherwise the trimmed contents of the token file. The file is
/// only touched when the environment does not yield a value.
pub fn resolve_token(env_var: &str, file_path: &str) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        let value = value.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }

    match fs::read_to_string(file_path) {
        Ok(contents) => {
            let token = contents.trim();
            if token.is_empty() {
                Err(ExpandError::MissingCredential)
            } else {
                Ok(token.to_string())
            }
        }
        Err(_) => Err(ExpandError::MissingCredential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn env_var_wins_over_file() {
        let var = "LINK_EXPANDER_TEST_TOKEN_ENV_WINS";
        std::env::set_var(var, "env-token");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "file-token").unwrap();

        let token = resolve_token(var, file.path().to_str().unwrap()).unwrap();
        assert_eq!(token, "env-token");

        std::env::remove_var(var);
    }

    #[test]
    fn falls_back_to_trimmed_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  file-token  ").unwrap();

        let token = resolve_token(
            "LINK_EXPANDER_TEST_TOKEN_UNSET_1",
            file.path().to_str().unwrap(),
        )
        .unwrap();
        assert_eq!(token, "file-token");
    }

    #[test]
    fn empty_env_value_falls_through_to_file() {
        let var = "LINK_EXPANDER_TEST_TOKEN_EMPTY_ENV";
        std::env::set_var(var, "   ");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "file-token").unwrap();

        let token = resolve_token(var, file.path().to_str().unwrap()).unwrap();
        assert_eq!(token, "file-token");

        std::env::remove_var(var);
    }

    #[test]
    fn missing_everything_is_missing_credential() {
        let err = resolve_token(
            "LINK_EXPANDER_TEST_TOKEN_UNSET_2",
            "/nonexistent/token/file",
        )
        .unwrap_err();
        assert!(matches!(err, ExpandError::MissingCredential));
    }

    #[test]
    fn whitespace_only_file_is_missing_credential() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        let err = resolve_token(
            "LINK_EXPANDER_TEST_TOKEN_UNSET_3",
            file.path().to_str().unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ExpandError::MissingCredential));
    }
}
