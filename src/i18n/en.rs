//! English string table. Keys are the English source strings used in markup,
//! so most entries map to themselves.

pub(super) fn lookup(key: &str) -> Option<&'static str> {
    Some(match key {
        // Navigation menu
        "Home" => "Home",
        "Archives" => "Archives",
        "About" => "About",

        // Tooltips
        "Bilibili" => "Bilibili",
        "Instagram" => "Instagram",
        "Douban" => "Douban",
        "Email" => "Email",
        "RSS" => "RSS",
        "Language" => "Language",

        // Footer
        "Copyright" => "Copyright",
        "Powered by" => "Powered by",
        "Modified based on" => "Modified based on",
        "theme" => "theme",

        // Pagination
        "Older Posts" => "Older Posts",
        "Newer Posts" => "Newer Posts",

        // Other
        "Comments" => "Comments",

        // Behavior-layer chrome
        "Copy Code" => "Copy code",
        "Copied" => "Copied ✓",
        "Expand Code" => "Expand code",
        "Close" => "Close",
        "zoomHint" => "Scroll to zoom, drag to pan, double-click to close",
        "languageSwitched" => "Switched to English",

        _ => return None,
    })
}
