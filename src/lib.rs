//! i18n-kit
//!
//! Translation resolution and management engine for multi-language content
//! sites: hierarchical key lookup with default-language fallback, `{{name}}`
//! interpolation, flatten/unflatten round-tripping, CSV export/import for
//! external editing, and cross-language key validation.
//!
//! The engine is pure and synchronous: trees are built once (at startup or
//! on admin import), published atomically, and only read afterwards. Missing
//! content never raises a hard failure; a broken key resolves to the key
//! path itself so partially translated pages keep rendering.

pub mod config;
pub mod csv;
pub mod flatten;
pub mod interpolate;
pub mod loader;
pub mod report;
pub mod resolve;
pub mod store;
pub mod tree;

pub use config::{
    ConfigError,
    I18nSettings,
    load_settings,
};
pub use csv::{
    CsvError,
    export_csv,
    import_csv,
};
pub use flatten::{
    FlatMap,
    StructuralConflict,
    flatten,
    unflatten,
};
pub use interpolate::{
    Params,
    interpolate,
};
pub use loader::{
    LoadError,
    load_translation_set,
};
pub use report::{
    KeyDiff,
    diff,
    diff_languages,
};
pub use resolve::{
    ResolveEvent,
    resolve_with_fallback,
};
pub use store::{
    TranslationSet,
    TranslationStore,
};
pub use tree::{
    TranslationTree,
    TreeNode,
};
