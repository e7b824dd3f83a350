//! Minimal INI reader for the main configuration and application descriptors.
use std::path::Path;

use crate::error::ConfigError;

/// A parsed `[section]` with its options in declaration order.
///
/// # Examples
///
/// ```
/// use dotfiles_status::config::ini::IniSection;
///
/// let section = IniSection {
///     name: "configuration_files".to_string(),
///     options: vec![(".vimrc".to_string(), None)],
/// };
/// assert_eq!(section.option_names().collect::<Vec<_>>(), [".vimrc"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    /// Section name, case preserved.
    pub name: String,
    /// `(option, value)` pairs; options declared without `=`/`:` have no value.
    pub options: Vec<(String, Option<String>)>,
}

impl IniSection {
    /// Iterate over option names in declaration order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|(k, _)| k.as_str())
    }

    /// Look up the value of `option`.
    ///
    /// Returns `None` both when the option is absent and when it was declared
    /// without a value.
    #[must_use]
    pub fn get(&self, option: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == option)
            .and_then(|(_, v)| v.as_deref())
    }

    fn insert(&mut self, option: String, value: Option<String>) {
        if let Some(slot) = self.options.iter_mut().find(|(k, _)| *k == option) {
            slot.1 = value;
        } else {
            self.options.push((option, value));
        }
    }
}

/// A whole INI file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    /// Sections in first-declaration order.
    pub sections: Vec<IniSection>,
}

impl IniDocument {
    /// Return the section called `name`, if present.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up `option` in `section`.
    #[must_use]
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.section(section)?.get(option)
    }

    /// Iterate over the option names of `section`; empty when it is absent.
    pub fn option_names<'a>(&'a self, section: &str) -> impl Iterator<Item = &'a str> {
        self.section(section)
            .into_iter()
            .flat_map(IniSection::option_names)
    }
}

/// Read and parse an INI file.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist,
/// [`ConfigError::Io`] if it cannot be read, or
/// [`ConfigError::InvalidSyntax`] if an option appears outside a section.
pub fn parse_file(path: &Path) -> Result<IniDocument, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let label = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    parse_str(&content, &label)
}

/// Parse INI content from a string.
///
/// Format:
/// ```ini
/// ; comment
/// [section]
/// key = value
/// key: value
/// bare-option
/// ```
///
/// Section and option names keep their case. A section declared twice is
/// merged into its first occurrence; a repeated option keeps its first
/// position and takes the last value.
///
/// # Examples
///
/// ```
/// use dotfiles_status::config::ini::parse_str;
///
/// let doc = parse_str("[core]\nMETHOD = symlink\n[ignore_paths]\n.*\\.swp\n", "x.cfg").unwrap();
/// assert_eq!(doc.get("core", "METHOD"), Some("symlink"));
/// assert_eq!(doc.option_names("ignore_paths").collect::<Vec<_>>(), [".*\\.swp"]);
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if an option appears outside a
/// section or a header is empty.
pub fn parse_str(content: &str, file: &str) -> Result<IniDocument, ConfigError> {
    let mut doc = IniDocument::default();
    let mut current: Option<usize> = None;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let syntax_error = |message: &str| ConfigError::InvalidSyntax {
            file: file.to_string(),
            line: line_num + 1,
            message: message.to_string(),
        };

        if let Some(inner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let name = inner.trim();
            if name.is_empty() {
                return Err(syntax_error("empty section header"));
            }
            current = Some(
                doc.sections
                    .iter()
                    .position(|s| s.name == name)
                    .unwrap_or_else(|| {
                        doc.sections.push(IniSection {
                            name: name.to_string(),
                            options: Vec::new(),
                        });
                        doc.sections.len() - 1
                    }),
            );
        } else if let Some(section) = current.and_then(|idx| doc.sections.get_mut(idx)) {
            let (key, value) = split_option(trimmed);
            if key.is_empty() {
                return Err(syntax_error("option without a name"));
            }
            section.insert(key.to_string(), value.map(str::to_string));
        } else {
            return Err(syntax_error(&format!("option outside of section: {trimmed}")));
        }
    }

    Ok(doc)
}

/// Split an option line on the first `=` or `:` delimiter.
fn split_option(line: &str) -> (&str, Option<&str>) {
    line.find(['=', ':']).map_or((line, None), |idx| {
        let (key, rest) = line.split_at(idx);
        (key.trim(), Some(rest.get(1..).unwrap_or_default().trim()))
    })
}
