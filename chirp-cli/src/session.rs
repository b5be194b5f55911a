use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chirp_client::Session;

/// Сессия CLI: токен identity provider'а в файле рядом с рабочей директорией.
#[derive(Debug, Clone)]
pub(crate) struct TokenFileSession {
    path: PathBuf,
}

impl TokenFileSession {
    pub(crate) fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub(crate) fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(parse_token_content(&raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn store(&self, token: &str) -> io::Result<()> {
        fs::write(&self.path, token.trim())
    }
}

impl Session for TokenFileSession {
    type Error = io::Error;

    fn is_signed_in(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }

    fn sign_out(&self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

pub(crate) fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
