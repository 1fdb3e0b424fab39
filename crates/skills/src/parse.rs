use std::ops::Range;

use serde::Deserialize;

use crate::{error::ManifestError, repair::repair_manifest, types::SkillMetadata};

/// Loose view of the frontmatter; required fields are checked after parsing so
/// a missing `name` is reported as such rather than as a YAML error.
#[derive(Deserialize)]
struct RawFrontmatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    package: Option<String>,
}

/// Byte layout of a manifest: the frontmatter block between the opening and
/// closing `---` lines, and the offset where the body starts.
pub(crate) struct Layout {
    pub block: Range<usize>,
    pub body: usize,
}

/// Locate the frontmatter. A leading BOM and blank lines are skipped, and
/// both delimiters must be lines consisting of `---` alone.
pub(crate) fn layout(content: &str) -> Result<Layout, ManifestError> {
    let unmarked = content.strip_prefix('\u{feff}').unwrap_or(content);
    let trimmed = unmarked.trim_start();
    let open = content.len() - trimmed.len();
    let first_line = trimmed.split_inclusive('\n').next().unwrap_or_default();
    if first_line.trim_end() != "---" {
        return Err(ManifestError::MissingFrontmatter);
    }

    let block_start = open + first_line.len();
    let mut offset = block_start;
    for line in content[block_start..].split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Ok(Layout {
                block: block_start..offset,
                body: offset + line.len(),
            });
        }
        offset += line.len();
    }
    Err(ManifestError::UnclosedFrontmatter)
}

/// Split manifest content at `---` delimiters into (frontmatter, body).
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), ManifestError> {
    let layout = layout(content)?;
    Ok((
        content[layout.block].trim(),
        content[layout.body..].trim(),
    ))
}

/// Parse a manifest into metadata.
///
/// The frontmatter is repaired first (see [`repair_manifest`]). `name` and
/// `description` are required; `package` is passed through verbatim.
pub fn parse_metadata(content: &str) -> Result<SkillMetadata, ManifestError> {
    let repaired = repair_manifest(content);
    let (frontmatter, _body) = split_frontmatter(&repaired)?;
    let raw: RawFrontmatter = serde_yaml::from_str(frontmatter)?;

    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or(ManifestError::MissingField("name"))?;
    let description = raw
        .description
        .map(|d| d.trim().to_string())
        .ok_or(ManifestError::MissingField("description"))?;

    Ok(SkillMetadata {
        name,
        description,
        package: raw.package,
    })
}
