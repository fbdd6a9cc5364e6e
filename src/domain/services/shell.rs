//! Remote shell command composition

/// Quote a word for a POSIX shell, leaving plain words untouched
pub fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:@%+=,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

/// Quote a remote path; a leading `~/` stays bare so the remote shell expands it
pub fn quote_remote_path(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some("") => "~/".to_string(),
        Some(rest) => format!("~/{}", quote(rest)),
        None if path == "~" => path.to_string(),
        None => quote(path),
    }
}

/// Run `command` from inside `dir`; nothing runs if `dir` is missing
pub fn in_dir(dir: &str, command: &str) -> String {
    format!("cd {} && {}", quote_remote_path(dir), command)
}
