use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CollateError;

/// Name of the document written into the collated directory.
pub const OUTPUT_FILE_NAME: &str = "result.txt";

/// Extensions (without the dot) that are picked up, matched case-sensitively.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["cpp", "hpp"];

/// Dashes on each side of the filename in a header line.
pub const HEADER_DASHES: usize = 18;

/// Dashes in the closing line.
pub const FOOTER_DASHES: usize = 36;

/// What a finished run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Collated filenames, in the order they appear in the output.
    pub files: Vec<String>,
    pub output: PathBuf,
    pub bytes: u64,
}

/// Collates the C++ sources found directly inside `root` into `root/result.txt`.
#[derive(Debug, Clone)]
pub struct Collator {
    root: PathBuf,
}

impl Collator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(OUTPUT_FILE_NAME)
    }

    /// Lists the regular `.cpp`/`.hpp` files directly under the root, sorted by name.
    ///
    /// Symlinks are followed, so a link to a regular file is included and a link
    /// to a directory is not. Any error while reading the listing aborts.
    pub fn list_sources(&self) -> Result<Vec<String>, CollateError> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| CollateError::list_dir(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CollateError::list_dir(&self.root, e))?;
            let path = entry.path();

            if !has_source_extension(&path) {
                continue;
            }
            if !path.is_file() {
                debug!(path = %path.display(), "skipping non-regular entry");
                continue;
            }

            let name = entry
                .file_name()
                .into_string()
                .map_err(|raw| CollateError::NonUtf8Name {
                    name: raw.to_string_lossy().into_owned(),
                })?;
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Runs one full pass: list, sort, then write every block and the closing line.
    ///
    /// The output is truncated before the first source is read. On error it is
    /// left as far as it got.
    pub fn collate(&self) -> Result<Summary, CollateError> {
        let files = self.list_sources()?;
        let output = self.output_path();

        let file = File::create(&output).map_err(|e| CollateError::write_output(&output, e))?;
        let mut writer = BufWriter::new(file);
        let mut bytes = 0u64;

        for name in &files {
            let header = format_header(name);
            writer
                .write_all(header.as_bytes())
                .map_err(|e| CollateError::write_output(&output, e))?;

            let path = self.root.join(name);
            let content =
                fs::read_to_string(&path).map_err(|e| CollateError::read_source(&path, e))?;
            let content = normalize_newline(translate_newlines(&content));
            debug!(file = %name, len = content.len(), "collating");

            writer
                .write_all(content.as_bytes())
                .map_err(|e| CollateError::write_output(&output, e))?;
            bytes += (header.len() + content.len()) as u64;
        }

        let footer = format_footer();
        writer
            .write_all(footer.as_bytes())
            .map_err(|e| CollateError::write_output(&output, e))?;
        writer
            .flush()
            .map_err(|e| CollateError::write_output(&output, e))?;
        bytes += footer.len() as u64;

        Ok(Summary {
            files,
            output,
            bytes,
        })
    }
}

/// True when the final extension of `path` is one of [`SOURCE_EXTENSIONS`].
///
/// Leading dots belong to the stem, so `.cpp` and `..cpp` have no extension.
pub fn has_source_extension(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let bytes = name.as_encoded_bytes();
    let start = bytes.iter().take_while(|&&b| b == b'.').count();
    let stem_and_ext = &bytes[start..];

    match stem_and_ext.iter().rposition(|&b| b == b'.') {
        Some(dot) => {
            let ext = &stem_and_ext[dot + 1..];
            SOURCE_EXTENSIONS.iter().any(|e| ext == e.as_bytes())
        }
        None => false,
    }
}

pub fn format_header(name: &str) -> String {
    let dashes = "-".repeat(HEADER_DASHES);
    format!("{}{}{}\n", dashes, name, dashes)
}

pub fn format_footer() -> String {
    format!("{}\n", "-".repeat(FOOTER_DASHES))
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn translate_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Appends a single `\n` to non-empty content that does not already end with one.
pub fn normalize_newline(mut content: String) -> String {
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_has_fixed_dashes() {
        assert_eq!(
            format_header("a.cpp"),
            "------------------a.cpp------------------\n"
        );
        assert_eq!(format_footer(), "------------------------------------\n");
    }

    #[test]
    fn test_normalize_newline() {
        assert_eq!(normalize_newline(String::new()), "");
        assert_eq!(normalize_newline("int x;".into()), "int x;\n");
        assert_eq!(normalize_newline("int x;\n".into()), "int x;\n");
        assert_eq!(normalize_newline("\n\n".into()), "\n\n");
    }

    #[test]
    fn test_translate_newlines() {
        assert_eq!(translate_newlines("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(translate_newlines("x\r\ny\r"), "x\ny\n");
        assert_eq!(translate_newlines("\r\r\n"), "\n\n");
        assert_eq!(normalize_newline(translate_newlines("a\r")), "a\n");
    }

    #[test]
    fn test_extension_matching() {
        assert!(has_source_extension(Path::new("main.cpp")));
        assert!(has_source_extension(Path::new("a.b.hpp")));
        assert!(!has_source_extension(Path::new("main.CPP")));
        assert!(!has_source_extension(Path::new("main.cc")));
        assert!(!has_source_extension(Path::new("main.h")));
        assert!(!has_source_extension(Path::new("main.cpp.txt")));
        assert!(!has_source_extension(Path::new(".cpp")));
        assert!(!has_source_extension(Path::new("..cpp")));
        assert!(!has_source_extension(Path::new("...hpp")));
        assert!(has_source_extension(Path::new(".hidden.cpp")));
        assert!(!has_source_extension(Path::new("a.")));
        assert!(!has_source_extension(Path::new("cpp")));
    }
}
