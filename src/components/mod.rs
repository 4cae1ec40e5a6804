pub mod image_overlay;
pub mod lang_toggle;
pub mod nav;
pub mod toc_panel;
pub mod tooltip;
