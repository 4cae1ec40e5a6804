//! Configuration for the theme behavior layer.
//!
//! Selectors and thresholds mirror the markup contract of the theme: the
//! article body lives in `.content`, archive pages carry the `archives`
//! marker class and get no TOC, and the `.tags` block stays visible even
//! inside a collapsed heading scope.

/// Container holding the rendered article body.
pub const CONTENT_SELECTOR: &str = ".content";

/// Marker class on `.content` for archive pages (no TOC, no collapse).
pub const ARCHIVES_CLASS: &str = "archives";

/// Heading elements inside the content container, in document order.
pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Class marking a heading whose scope is hidden. May arrive pre-set from
/// server-rendered markup and is honored on first scan.
pub const COLLAPSED_CLASS: &str = "collapsed";

/// The "always visible" exception: never hidden by ancestor collapse.
pub const TAGS_CLASS: &str = "tags";

/// Prefix for ids assigned to headings that lack one.
pub const HEADING_ID_PREFIX: &str = "heading-";

/// Custom document event fired by the mutation observer when new content
/// subtrees are injected. Binders listen for it and re-scan idempotently.
pub const CONTENT_CHANGED_EVENT: &str = "inkstone:content-changed";

/// localStorage key for the chosen UI language (single scalar, no schema).
pub const LANG_STORAGE_KEY: &str = "siteLanguage";

/// Width of the left-edge strip that reveals the navigation on desktop.
pub const NAV_TRIGGER_ZONE_PX: f64 = 50.0;

/// Delay before the navigation hides after the pointer leaves it.
pub const NAV_HIDE_DELAY_MS: u32 = 300;

/// Media query separating desktop hover behavior from mobile tap behavior.
pub const DESKTOP_MEDIA_QUERY: &str = "(min-width: 1099px)";

/// Scroll classification runs at most once per this window; stale ticks are
/// dropped, not queued.
pub const CLASSIFY_THROTTLE_MS: f64 = 50.0;

/// Code blocks taller than this get an expand-to-fullscreen button.
pub const CODE_MAX_HEIGHT_PX: i32 = 400;

/// How long the copy button shows its "copied" label.
pub const COPY_RESET_MS: u32 = 2000;

/// Image zoom bounds and per-wheel-step increment.
pub const ZOOM_MIN_SCALE: f64 = 0.2;
/// Upper zoom bound.
pub const ZOOM_MAX_SCALE: f64 = 6.0;
/// Scale delta applied per wheel notch.
pub const ZOOM_WHEEL_STEP: f64 = 0.12;

/// How long the zoom overlay usage hint stays fully visible.
pub const ZOOM_HINT_FADE_MS: u32 = 3000;

/// Window width above which the map page gets a header-sized left margin.
pub const MAP_WIDE_MIN_WIDTH: f64 = 1100.0;

/// How long the language-switch toast stays on screen.
pub const LANG_TOAST_MS: u32 = 2000;
