//! Scoped overrides of the ambient formats
//!
//! [`stack_format`] snapshots the facets named in [`StackFormatOptions`], applies each facet's
//! policy, runs the callback and puts the snapshots back. Whatever the callback returns
//! (including an `Err`) the outer values are restored exactly once, so sibling subtrees never
//! observe each other's formatting.

use super::context::{DomToModelContext, ListContext};
use crate::model::{Code, FormatMap, Link, ParagraphDecorator};

/// How a facet starts out inside the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatPolicy {
    /// Copy of the outer value.
    ShallowClone,
    /// Copy without keys that stay on their block (`backgroundColor`).
    ShallowCloneForBlock,
    /// Copy without box keys that must not inherit into a nested group.
    ShallowCloneForGroup,
    /// Start from nothing.
    Empty,
    /// Copy with the default link format merged under it.
    LinkDefault,
    /// Copy with the default code format merged under it.
    CodeDefault,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StackFormatOptions {
    pub segment: Option<FormatPolicy>,
    pub paragraph: Option<FormatPolicy>,
    pub link: Option<FormatPolicy>,
    pub code: Option<FormatPolicy>,
    pub block_decorator: Option<FormatPolicy>,
    pub list: Option<FormatPolicy>,
}

const BLOCK_ONLY_KEYS: &[&str] = &["backgroundColor"];

const GROUP_BOUNDARY_PREFIXES: &[&str] =
    &["margin", "padding", "border", "backgroundColor", "textIndent"];

pub fn default_link_format() -> FormatMap {
    [("underline", true)].into_iter().collect()
}

pub fn default_code_format() -> FormatMap {
    [("fontFamily", "monospace")].into_iter().collect()
}

fn apply_policy(format: &FormatMap, policy: FormatPolicy) -> FormatMap {
    match policy {
        FormatPolicy::ShallowClone => format.clone(),
        FormatPolicy::ShallowCloneForBlock => format.without(BLOCK_ONLY_KEYS),
        FormatPolicy::ShallowCloneForGroup => {
            let mut copy = format.clone();
            copy.retain(|key, _| !GROUP_BOUNDARY_PREFIXES.iter().any(|p| key.starts_with(p)));
            copy
        }
        FormatPolicy::Empty => FormatMap::new(),
        FormatPolicy::LinkDefault => {
            let mut copy = format.clone();
            copy.merge_under(&default_link_format());
            copy
        }
        FormatPolicy::CodeDefault => {
            let mut copy = format.clone();
            copy.merge_under(&default_code_format());
            copy
        }
    }
}

struct Snapshot {
    segment: Option<FormatMap>,
    paragraph: Option<FormatMap>,
    link: Option<Link>,
    code: Option<Code>,
    block_decorator: Option<Option<ParagraphDecorator>>,
    list: Option<ListContext>,
}

impl Snapshot {
    fn take(context: &mut DomToModelContext, options: &StackFormatOptions) -> Self {
        let segment = options.segment.map(|policy| {
            let scoped = apply_policy(&context.segment_format, policy);
            std::mem::replace(&mut context.segment_format, scoped)
        });

        let paragraph = options.paragraph.map(|policy| {
            let scoped = apply_policy(&context.block_format, policy);
            std::mem::replace(&mut context.block_format, scoped)
        });

        let link = options.link.map(|policy| {
            let scoped = match policy {
                FormatPolicy::Empty => Link::default(),
                _ => Link {
                    format: apply_policy(&context.link.format, policy),
                    dataset: context.link.dataset.clone(),
                },
            };
            std::mem::replace(&mut context.link, scoped)
        });

        let code = options.code.map(|policy| {
            let scoped = Code {
                format: apply_policy(&context.code.format, policy),
            };
            std::mem::replace(&mut context.code, scoped)
        });

        let block_decorator = options.block_decorator.map(|policy| {
            let scoped = match policy {
                FormatPolicy::Empty => None,
                _ => context.block_decorator.clone(),
            };
            std::mem::replace(&mut context.block_decorator, scoped)
        });

        let list = options.list.map(|policy| {
            let scoped = match policy {
                FormatPolicy::Empty => ListContext::default(),
                _ => context.list.clone(),
            };
            std::mem::replace(&mut context.list, scoped)
        });

        Self {
            segment,
            paragraph,
            link,
            code,
            block_decorator,
            list,
        }
    }

    fn restore(self, context: &mut DomToModelContext) {
        if let Some(segment) = self.segment {
            context.segment_format = segment;
        }
        if let Some(paragraph) = self.paragraph {
            context.block_format = paragraph;
        }
        if let Some(link) = self.link {
            context.link = link;
        }
        if let Some(code) = self.code {
            context.code = code;
        }
        if let Some(decorator) = self.block_decorator {
            context.block_decorator = decorator;
        }
        if let Some(list) = self.list {
            context.list = list;
        }
    }
}

/// Holds the saved facets until dropped, so a panicking callback still restores them.
struct Scope<'a> {
    context: &'a mut DomToModelContext,
    snapshot: Option<Snapshot>,
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore(self.context);
        }
    }
}

/// Run `callback` with the facets in `options` overridden, restoring them afterwards.
pub fn stack_format<R>(
    context: &mut DomToModelContext,
    options: StackFormatOptions,
    callback: impl FnOnce(&mut DomToModelContext) -> R,
) -> R {
    let snapshot = Snapshot::take(context, &options);
    let mut scope = Scope {
        context,
        snapshot: Some(snapshot),
    };
    callback(&mut *scope.context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_to_model::DomToModelOptions;

    fn context() -> DomToModelContext {
        DomToModelContext::new(&DomToModelOptions::default())
    }

    #[test]
    fn restores_after_mutation() {
        let mut ctx = context();
        ctx.segment_format.set("bold", true);
        let options = StackFormatOptions {
            segment: Some(FormatPolicy::ShallowClone),
            ..Default::default()
        };
        stack_format(&mut ctx, options, |ctx| {
            assert!(ctx.segment_format.flag("bold"));
            ctx.segment_format.set("italic", true);
        });
        assert!(ctx.segment_format.flag("bold"));
        assert!(!ctx.segment_format.contains("italic"));
    }

    #[test]
    fn restores_when_callback_fails() {
        let mut ctx = context();
        ctx.block_format.set("textAlign", "center");
        let options = StackFormatOptions {
            paragraph: Some(FormatPolicy::Empty),
            ..Default::default()
        };
        let result: Result<(), String> = stack_format(&mut ctx, options, |ctx| {
            assert!(ctx.block_format.is_empty());
            ctx.block_format.set("direction", "rtl");
            Err("boom".to_string())
        });
        assert!(result.is_err());
        assert_eq!(ctx.block_format.get_str("textAlign"), Some("center"));
        assert!(!ctx.block_format.contains("direction"));
    }

    #[test]
    fn restores_when_callback_panics() {
        let mut ctx = context();
        ctx.segment_format.set("bold", true);
        let options = StackFormatOptions {
            segment: Some(FormatPolicy::Empty),
            ..Default::default()
        };
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: () = stack_format(&mut ctx, options, |ctx| {
                ctx.segment_format.set("italic", true);
                panic!("processor failed");
            });
        }));
        assert!(outcome.is_err());
        assert!(ctx.segment_format.flag("bold"));
        assert!(!ctx.segment_format.contains("italic"));
    }

    #[test]
    fn block_and_group_boundaries_drop_scoped_keys() {
        let mut ctx = context();
        ctx.segment_format.set("backgroundColor", "red");
        ctx.segment_format.set("fontFamily", "Arial");
        ctx.block_format.set("marginLeft", "40px");
        ctx.block_format.set("paddingTop", "2px");
        ctx.block_format.set("direction", "rtl");
        let options = StackFormatOptions {
            segment: Some(FormatPolicy::ShallowCloneForBlock),
            paragraph: Some(FormatPolicy::ShallowCloneForGroup),
            ..Default::default()
        };
        stack_format(&mut ctx, options, |ctx| {
            assert!(!ctx.segment_format.contains("backgroundColor"));
            assert_eq!(ctx.segment_format.get_str("fontFamily"), Some("Arial"));
            assert!(!ctx.block_format.contains("marginLeft"));
            assert!(!ctx.block_format.contains("paddingTop"));
            assert_eq!(ctx.block_format.get_str("direction"), Some("rtl"));
        });
        assert_eq!(ctx.block_format.get_str("marginLeft"), Some("40px"));
    }

    #[test]
    fn link_default_merges_under_current() {
        let mut ctx = context();
        let options = StackFormatOptions {
            link: Some(FormatPolicy::LinkDefault),
            code: Some(FormatPolicy::CodeDefault),
            ..Default::default()
        };
        stack_format(&mut ctx, options, |ctx| {
            assert!(ctx.link.format.flag("underline"));
            assert_eq!(ctx.code.format.get_str("fontFamily"), Some("monospace"));
        });
        assert!(ctx.link.format.is_empty());
        assert!(ctx.code.format.is_empty());
    }

    #[test]
    fn empty_list_policy_starts_a_fresh_thread() {
        let mut ctx = context();
        ctx.list.thread_counts = vec![3];
        let options = StackFormatOptions {
            list: Some(FormatPolicy::Empty),
            ..Default::default()
        };
        stack_format(&mut ctx, options, |ctx| {
            assert!(ctx.list.thread_counts.is_empty());
            ctx.list.thread_counts.push(9);
        });
        assert_eq!(ctx.list.thread_counts, vec![3]);
    }
}
