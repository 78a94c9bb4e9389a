//! Budget-aware assembly of content directory indices.
//!
//! Each content directory is handled independently:
//!
//! 1. curated sections are resolved (child references negotiate with the
//!    child's offers, standalone sections list arbitrary entries);
//! 2. the local section collects the directory's remaining documents;
//! 3. the line estimate decides whether the local section overflows into
//!    an extended index;
//! 4. child indices and related topics are appended and the result is
//!    rendered.

use std::collections::BTreeSet;

use tocgen_custom::{RelatedTopic, SectionDefinition, resolve_relative};
use tocgen_docs::path::{join, strip_dir};

use crate::context::Context;
use crate::document::{
    DocumentKind, GeneratedDocument, GuidanceBlock, IndexDocument, LinkEntry, Section, one_line,
};
use crate::render::render;

/// Heading of the local section when curated sections exist.
const OTHER_TOPICS: &str = "Other Topics";

/// Heading of a guidance block without a title.
const DEFAULT_GUIDANCE_TITLE: &str = "Guidance";

/// Link text of the extended index link.
const OVERFLOW_LINK_TITLE: &str = "Additional Topics";

/// Output of assembling one content directory.
pub(crate) struct Assembly {
    /// Primary index, then the extended index if any.
    pub documents: Vec<GeneratedDocument>,
    /// Child-reference section paths that name no subdirectory.
    pub skipped_sections: Vec<String>,
}

/// Assemble the primary index (and extended index, if any) of a content directory.
pub(crate) fn assemble(ctx: &Context<'_>, dir: &str) -> Assembly {
    let mut doc = header(ctx, dir);

    let curated = curated_sections(ctx, dir);
    let linked: BTreeSet<&str> = curated
        .sections
        .iter()
        .flat_map(|s| s.links.iter().map(|l| l.target.as_str()))
        .collect();

    let own_links = local_links(ctx, dir, &linked);
    let local_count = own_links.len();
    let local = (!own_links.is_empty()).then(|| Section {
        name: (!curated.sections.is_empty()).then(|| OTHER_TOPICS.to_owned()),
        description: None,
        priority: 0,
        links: own_links,
    });

    doc.sections = curated.sections;
    doc.child_links = ctx
        .plan
        .children(dir)
        .iter()
        .filter(|child| !curated.referenced.contains(child.as_str()))
        .map(|child| ctx.index_link(dir, child))
        .collect();
    doc.related = related_links(ctx, dir, ctx.store.related(dir));

    let leaf = ctx.plan.children(dir).is_empty();
    let mut with_local = doc.clone();
    with_local.sections.extend(local.clone());
    let estimate = with_local.estimate_lines();

    let overflows = !leaf && estimate > ctx.options.hard_budget && local_count > 1;

    let mut generated = Vec::with_capacity(2);
    if overflows {
        let overflow_path = join(dir, &ctx.options.overflow_name);
        doc.child_links.insert(
            0,
            LinkEntry {
                title: OVERFLOW_LINK_TITLE.to_owned(),
                href: ctx.links.href(dir, &overflow_path),
                metric: Some(additional_topics(local_count)),
                description: None,
                target: overflow_path.clone(),
            },
        );
        tracing::info!(
            dir = %dir,
            estimate,
            hard = ctx.options.hard_budget,
            moved = local_count,
            "Local topics moved to extended index"
        );

        let overflow = IndexDocument {
            title: format!("{}: {OVERFLOW_LINK_TITLE}", doc.title),
            description: Some(format!(
                "Continued from [{}]({}).",
                doc.title,
                ctx.links.index_href(dir, dir, &ctx.options.index_name)
            )),
            sections: local.into_iter().collect(),
            ..IndexDocument::default()
        };
        generated.push(finish(dir, DocumentKind::Overflow, overflow_path, &overflow, leaf));
    } else {
        doc = with_local;
        let ceiling = if leaf {
            ctx.options.leaf_ceiling()
        } else {
            ctx.options.hard_budget
        };
        if estimate > ceiling {
            tracing::warn!(dir = %dir, lines = estimate, ceiling, "Index exceeds hard budget");
        } else if estimate > ctx.options.soft_budget {
            tracing::info!(
                dir = %dir,
                lines = estimate,
                soft = ctx.options.soft_budget,
                "Index over soft budget"
            );
        }
    }

    let primary_path = join(dir, &ctx.options.index_name);
    generated.insert(0, finish(dir, DocumentKind::Primary, primary_path, &doc, leaf));
    Assembly {
        documents: generated,
        skipped_sections: curated.skipped,
    }
}

/// Title, description, preamble and guidance of a directory index.
pub(crate) fn header(ctx: &Context<'_>, dir: &str) -> IndexDocument {
    let custom = ctx.store.get(dir);

    let preamble = custom
        .and_then(|c| c.preamble.as_deref())
        .map(|text| {
            text.trim()
                .lines()
                .map(|line| line.trim_end().to_owned())
                .collect()
        })
        .unwrap_or_default();

    let guidance = ctx.store.guidance(dir).and_then(|g| {
        let intro = g.intro.as_deref().and_then(one_line);
        let items: Vec<String> = g.items.iter().filter_map(|i| one_line(i)).collect();
        (intro.is_some() || !items.is_empty()).then(|| GuidanceBlock {
            title: g
                .title
                .as_deref()
                .and_then(one_line)
                .unwrap_or_else(|| DEFAULT_GUIDANCE_TITLE.to_owned()),
            intro,
            items,
        })
    });

    IndexDocument {
        title: ctx.title(dir),
        description: ctx.description(dir),
        preamble,
        guidance,
        ..IndexDocument::default()
    }
}

/// Render an index document into a generated document.
pub(crate) fn finish(
    dir: &str,
    kind: DocumentKind,
    path: String,
    doc: &IndexDocument,
    leaf: bool,
) -> GeneratedDocument {
    let content = render(doc);
    let lines = content.lines().count();
    debug_assert_eq!(lines, doc.estimate_lines(), "estimate drifted from render");
    GeneratedDocument {
        dir: dir.to_owned(),
        kind,
        path,
        content,
        lines,
        leaf,
    }
}

fn additional_topics(count: usize) -> String {
    if count == 1 {
        "1 additional topic".to_owned()
    } else {
        format!("{count} additional topics")
    }
}

/// Resolved curated sections of a directory.
struct Curated {
    /// Non-empty sections, priority descending then name.
    sections: Vec<Section>,
    /// Child directories covered by a kept child-reference section.
    referenced: BTreeSet<String>,
    /// Child-reference paths that name no subdirectory.
    skipped: Vec<String>,
}

fn curated_sections(ctx: &Context<'_>, dir: &str) -> Curated {
    let mut sections = Vec::new();
    let mut referenced = BTreeSet::new();
    let mut skipped = Vec::new();

    for definition in ctx.store.sections(dir) {
        let priority = definition.priority();
        match definition {
            SectionDefinition::ChildReference { path, include, .. } => {
                let Some(child) = resolve_relative(dir, path)
                    .filter(|child| strip_dir(child, dir).is_some_and(|rest| !rest.is_empty()))
                else {
                    tracing::warn!(
                        dir = %dir,
                        path = %path,
                        "Section path names no subdirectory, skipping"
                    );
                    skipped.push(path.clone());
                    continue;
                };
                let section = child_reference(ctx, dir, &child, priority, include.as_deref());
                if !section.links.is_empty() {
                    referenced.insert(child);
                    sections.push(section);
                }
            }
            SectionDefinition::Standalone { name, include, .. } => {
                let mut links: Vec<LinkEntry> = Vec::new();
                for entry in include {
                    let Some(path) = tocgen_docs::path::normalize(entry) else {
                        tracing::debug!(dir = %dir, entry = %entry, "Entry escapes tree root");
                        continue;
                    };
                    if let Some(link) = ctx.resolve_entry(dir, &path) {
                        push_unique(&mut links, link);
                    }
                }
                sections.push(Section {
                    name: one_line(name),
                    description: None,
                    priority,
                    links,
                });
            }
        }
    }

    sections.retain(|s| !s.links.is_empty());
    sections.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.name.cmp(&b.name))
    });

    Curated {
        sections,
        referenced,
        skipped,
    }
}

fn child_reference(
    ctx: &Context<'_>,
    dir: &str,
    child: &str,
    priority: u8,
    include: Option<&[String]>,
) -> Section {
    let mut links = Vec::new();
    if ctx.plan.produces_index(child) {
        let mut index = ctx.index_link(dir, child);
        // The section description already carries it.
        index.description = None;
        links.push(index);
    }

    let offers = ctx.store.offers(child);
    for entry in select_entries(include.unwrap_or_default(), offers, priority) {
        let Some(path) = resolve_relative(child, entry) else {
            tracing::debug!(dir = %dir, entry = %entry, "Entry escapes tree root");
            continue;
        };
        if let Some(link) = ctx.resolve_entry(dir, &path) {
            push_unique(&mut links, link);
        }
    }

    Section {
        name: Some(ctx.title(child)),
        description: ctx.short_description(child),
        priority,
        links,
    }
}

/// Entries a child-reference section lists, in order.
///
/// Explicit includes come first. Offers then fill the section up to
/// `ceil(offers × priority / 100)` entries (never more than the number of
/// offers), skipping duplicates.
pub(crate) fn select_entries<'e>(
    include: &'e [String],
    offers: &'e [String],
    priority: u8,
) -> Vec<&'e str> {
    let slots = (offers.len() * usize::from(priority))
        .div_ceil(100)
        .min(offers.len());

    let mut entries: Vec<&str> = Vec::with_capacity(include.len().max(slots));
    for entry in include {
        if !entries.contains(&entry.as_str()) {
            entries.push(entry);
        }
    }
    for offer in offers {
        if entries.len() >= slots {
            break;
        }
        if !entries.contains(&offer.as_str()) {
            entries.push(offer);
        }
    }
    entries
}

fn push_unique(links: &mut Vec<LinkEntry>, link: LinkEntry) {
    if !links.iter().any(|l| l.target == link.target) {
        links.push(link);
    }
}

/// Links to the directory's own documents not listed in curated sections.
///
/// Documents named in the directory's offers come first, in offer order.
fn local_links(ctx: &Context<'_>, dir: &str, linked: &BTreeSet<&str>) -> Vec<LinkEntry> {
    let mut remaining: Vec<&str> = ctx
        .plan
        .documents(dir)
        .iter()
        .map(String::as_str)
        .filter(|path| !linked.contains(path))
        .collect();

    let mut ordered: Vec<&str> = Vec::with_capacity(remaining.len());
    for offer in ctx.store.offers(dir) {
        let Some(path) = resolve_relative(dir, offer) else {
            continue;
        };
        let with_ext = format!("{path}.{}", ctx.options.extension);
        if let Some(pos) = remaining
            .iter()
            .position(|doc| *doc == path || *doc == with_ext)
        {
            ordered.push(remaining.remove(pos));
        }
    }
    ordered.extend(remaining);

    ordered
        .into_iter()
        .filter_map(|path| ctx.index.get(path))
        .map(|record| ctx.document_link(dir, record))
        .collect()
}

/// Related-topic links, weight descending then path.
pub(crate) fn related_links(
    ctx: &Context<'_>,
    dir: &str,
    related: &[RelatedTopic],
) -> Vec<LinkEntry> {
    let mut resolved: Vec<(u32, String, LinkEntry)> = related
        .iter()
        .filter_map(|topic| {
            let Some(target) = resolve_relative(dir, &topic.path) else {
                tracing::debug!(dir = %dir, path = %topic.path, "Related path escapes tree root");
                return None;
            };
            let mut link = ctx.resolve_entry(dir, &target)?;
            link.metric = None;
            link.description = related_description(topic).or(link.description);
            Some((topic.weight, target, link))
        })
        .collect();

    resolved.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    resolved.into_iter().map(|(_, _, link)| link).collect()
}

fn related_description(topic: &RelatedTopic) -> Option<String> {
    let reason = topic.reason.as_deref().and_then(one_line);
    let keywords = (!topic.keywords.is_empty()).then(|| topic.keywords.join(", "));
    match (reason, keywords) {
        (Some(reason), Some(keywords)) => Some(format!("{reason} (keywords: {keywords})")),
        (Some(reason), None) => Some(reason),
        (None, Some(keywords)) => Some(format!("keywords: {keywords}")),
        (None, None) => None,
    }
}
