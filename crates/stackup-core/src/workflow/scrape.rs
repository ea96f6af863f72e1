//! Recover the project name from create-vite's human-oriented output
//!
//! The generator cannot report the name it chose, only a `  cd <name>` hint
//! in its closing instructions. That line is the only thing parsed here.

/// Prefix of the "change directory" hint line
pub const CD_HINT_PREFIX: &str = "  cd ";

/// Name from the first hint line, trimmed; `None` when there is no usable hint
///
/// Names containing spaces are printed quoted (`  cd "my app"`); the quotes
/// are not part of the folder name.
pub fn extract_project_name(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(CD_HINT_PREFIX))
        .map(str::trim)
        .map(unquote)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

fn unquote(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(name)
}
