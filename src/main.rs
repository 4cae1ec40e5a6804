//! Client-side behavior layer for the Inkstone blog theme.
//!
//! The page body arrives fully rendered from the static site generator; this
//! binary mounts the floating chrome (TOC panel, image zoom overlay, language
//! toggle, nav auto-hide, tooltips) and runs idempotent decoration passes
//! (heading collapse, code block buttons, ShaderToy embeds) over the content.

mod components;
mod config;
mod content;
mod hooks;
mod i18n;
mod lang;
mod outline;
mod utils;

use wasm_bindgen::JsValue;
use yew::prelude::*;

use components::{
    image_overlay::ImageZoomOverlay, lang_toggle::LangToggle, nav::NavAutoHide,
    toc_panel::TocPanel, tooltip::TooltipLayer,
};
use hooks::{use_content_changed, use_window_event};

#[function_component(App)]
fn app() -> Html {
    // body 上的变更观察者，把注入的内容变成统一的通知事件
    use_effect_with((), |_| {
        let observer = content::install_observer();
        move || {
            if let Some((observer, closure)) = observer {
                observer.disconnect();
                drop(closure);
            }
        }
    });

    // 不带组件状态的内容装饰，全部幂等，可重复跑
    use_content_changed(Callback::from(|_| {
        content::code_block::bind_all();
        content::shadertoy::rewrite_all();
        content::map::resize_map();
    }));
    use_window_event("resize", Callback::from(|_| content::map::resize_map()));

    html! {
        <>
            <NavAutoHide />
            <TooltipLayer />
            <TocPanel />
            <ImageZoomOverlay />
            <LangToggle />
        </>
    }
}

fn main() {
    // 页面主体由静态站点生成器渲染，应用挂在自己的容器里
    let host = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| {
            let body = doc.body()?;
            let host = doc.create_element("div").ok()?;
            host.set_id("theme-chrome");
            body.append_child(&host).ok()?;
            Some(host)
        });
    match host {
        Some(host) => {
            yew::Renderer::<App>::with_root(host).render();
        },
        None => web_sys::console::error_1(&JsValue::from_str(
            "theme chrome: no document body to mount into",
        )),
    }
}
