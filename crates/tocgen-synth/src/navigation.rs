//! Navigation-only indices for gap directories.

use tocgen_docs::path::join;

use crate::assemble::finish;
use crate::context::Context;
use crate::document::{DocumentKind, GeneratedDocument, IndexDocument};

/// Build the navigation index of a gap directory.
///
/// Lists every immediate index-producing child with its topic count and
/// short description.
pub(crate) fn navigate(ctx: &Context<'_>, dir: &str) -> GeneratedDocument {
    let doc = IndexDocument {
        title: ctx.title(dir),
        description: ctx.description(dir),
        child_links: ctx
            .plan
            .children(dir)
            .iter()
            .map(|child| ctx.index_link(dir, child))
            .collect(),
        ..IndexDocument::default()
    };

    if doc.estimate_lines() > ctx.options.hard_budget {
        tracing::warn!(
            dir = %dir,
            children = doc.child_links.len(),
            "Navigation index exceeds hard budget"
        );
    }

    let path = join(dir, &ctx.options.index_name);
    finish(dir, DocumentKind::Navigation, path, &doc, false)
}
