//! Loading render inputs from disk.
//!
//! Inputs are YAML documents; since YAML is a superset of JSON, JSON files
//! load through the same path.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::manifest::{PropertyTree, RenderInput};

/// Loads [`RenderInput`] documents.
///
/// # Examples
///
/// ```
/// use jobconf::manifest::InputLoader;
/// use std::path::Path;
///
/// let input = InputLoader::parse_str(
///     Path::new("inline.yml"),
///     "properties:\n  tag_length: 2\n",
/// ).unwrap();
/// assert!(input.links.is_empty());
/// ```
pub struct InputLoader;

impl InputLoader {
    /// Load and parse a render input file with `properties`, `links` and
    /// `instance` sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid input
    /// document.
    pub fn load_file(path: &Path) -> Result<RenderInput> {
        let contents = fs::read_to_string(path)?;
        Self::parse_str(path, &contents)
    }

    /// Load a file that holds only a property tree (no `properties:` wrapper).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a mapping.
    pub fn load_properties_file(path: &Path) -> Result<RenderInput> {
        let contents = fs::read_to_string(path)?;
        let properties: PropertyTree =
            serde_yaml::from_str(&contents).map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(RenderInput::new(properties))
    }

    /// Parse a render input from a string. `origin` is only used in error
    /// messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the document is malformed. An empty
    /// document yields an empty input.
    pub fn parse_str(origin: &Path, contents: &str) -> Result<RenderInput> {
        if contents.trim().is_empty() {
            return Ok(RenderInput::default());
        }
        let input: Option<RenderInput> =
            serde_yaml::from_str(contents).map_err(|source| Error::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        let input = input.unwrap_or_default();
        log::debug!(
            "loaded {} with {} link(s){}",
            origin.display(),
            input.links.len(),
            if input.instance.is_some() {
                " and an instance spec"
            } else {
                ""
            }
        );
        Ok(input)
    }
}
