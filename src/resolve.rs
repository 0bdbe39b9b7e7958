//! Fallback resolution engine.
//!
//! Wraps [`TranslationTree::resolve`] with the default-language fallback
//! policy: requested language first, then the default language, then the
//! path itself as a visible "broken key" signal. Resolution never fails and
//! never panics; completeness problems are observable through
//! [`ResolveEvent`] and a `tracing` diagnostic instead.

use std::collections::BTreeMap;

use crate::tree::TranslationTree;

/// Diagnostic events emitted during fallback resolution.
///
/// The silent cross-language fallback is intentional UX behavior (the caller
/// receives a default-language string without being told), so integrators
/// that want to monitor it subscribe here rather than changing the return
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveEvent<'a> {
    /// The requested language missed and the default language answered.
    FallbackUsed {
        /// Language that was asked for.
        language: &'a str,
        /// Language that actually provided the string.
        default_language: &'a str,
        /// The requested path.
        path: &'a str,
    },
    /// The path is absent from both languages; the path itself was returned.
    KeyMissing {
        /// Language that was asked for.
        language: &'a str,
        /// Default language that was also consulted.
        default_language: &'a str,
        /// The requested path, doubling as the returned placeholder.
        path: &'a str,
    },
}

/// Observer callback for [`resolve_with_fallback`].
pub type EventSink<'a> = &'a dyn Fn(ResolveEvent<'_>);

/// Resolve `path` in `requested_language`, falling back to
/// `default_language`, and finally to the path itself.
///
/// Always returns a string; the worst case is the path echoed back, which
/// keeps partially translated pages rendering while making the broken key
/// visible. The terminal fallback also logs a `tracing::warn!` so missing
/// keys show up in monitoring even without an event sink.
pub fn resolve_with_fallback<'t>(
    trees: &'t BTreeMap<String, TranslationTree>,
    requested_language: &str,
    default_language: &str,
    path: &'t str,
    on_event: Option<EventSink<'_>>,
) -> &'t str {
    if let Some(value) = trees.get(requested_language).and_then(|tree| tree.resolve(path)) {
        return value;
    }

    if requested_language != default_language
        && let Some(value) = trees.get(default_language).and_then(|tree| tree.resolve(path))
    {
        if let Some(sink) = on_event {
            sink(ResolveEvent::FallbackUsed {
                language: requested_language,
                default_language,
                path,
            });
        }
        return value;
    }

    tracing::warn!(
        language = requested_language,
        default_language,
        path,
        "translation key not found in any language"
    );
    if let Some(sink) = on_event {
        sink(ResolveEvent::KeyMissing { language: requested_language, default_language, path });
    }

    path
}
