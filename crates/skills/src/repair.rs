//! Pre-parse repair for a known frontmatter defect.
//!
//! Many manifests declare npm scoped packages as `package: @azure/foo`. `@` is
//! a reserved indicator in YAML and cannot start a plain scalar, so those
//! manifests fail to parse. The repair quotes such values, touching nothing
//! else: only single `package:` lines inside the frontmatter block are
//! rewritten, and the markdown body is copied through byte for byte.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::parse::layout;

#[allow(clippy::expect_used)]
static SCOPED_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[ \t]*package:[ \t]*)(?P<value>@.*?)[ \t]*$")
        .expect("scoped package pattern is valid")
});

/// Repair the frontmatter of a whole manifest. Idempotent.
///
/// Content without a well-formed frontmatter block is returned unchanged; the
/// parser reports that problem.
pub fn repair_manifest(content: &str) -> Cow<'_, str> {
    let Ok(layout) = layout(content) else {
        return Cow::Borrowed(content);
    };
    let span = layout.block;
    match repair_frontmatter(&content[span.clone()]) {
        Cow::Borrowed(_) => Cow::Borrowed(content),
        Cow::Owned(fixed) => {
            let mut out = String::with_capacity(content.len() + 2);
            out.push_str(&content[..span.start]);
            out.push_str(&fixed);
            out.push_str(&content[span.end..]);
            Cow::Owned(out)
        },
    }
}

/// Quote every `package: @...` line of a frontmatter block. Idempotent.
pub fn repair_frontmatter(block: &str) -> Cow<'_, str> {
    if !block.contains('@') {
        return Cow::Borrowed(block);
    }

    let mut out = String::with_capacity(block.len() + 2);
    let mut changed = false;
    for line in block.split_inclusive('\n') {
        let (text, ending) = split_line_ending(line);
        match SCOPED_PACKAGE.captures(text) {
            Some(caps) => {
                out.push_str(&caps["key"]);
                out.push_str(&quote(&caps["value"]));
                out.push_str(ending);
                changed = true;
            },
            None => out.push_str(line),
        }
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(block)
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    let text = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    (text, &line[text.len()..])
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
