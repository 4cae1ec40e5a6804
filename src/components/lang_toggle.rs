//! Floating language switch button plus its confirmation toast.

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::{config, i18n::Lang, lang};

fn button_label(target: Lang) -> &'static str {
    match target {
        Lang::ZhCn => "中",
        Lang::En => "EN",
    }
}

#[function_component(LangToggle)]
pub fn lang_toggle() -> Html {
    let current = use_state(lang::preferred_language);
    let toast = use_state(|| Option::<String>::None);

    // 挂载时套用既存偏好，必要时跳转到对应语言版本
    use_effect_with((), |_| {
        lang::init_language();
    });

    let onclick = {
        let current = current.clone();
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| {
            let current = current.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let message = lang::switch_language().await;
                current.set(lang::preferred_language());
                // 有备用页面时已经跳转，这里只处理原地切换
                if let Some(message) = message {
                    toast.set(Some(message));
                    let toast = toast.clone();
                    Timeout::new(config::LANG_TOAST_MS, move || {
                        toast.set(None);
                    })
                    .forget();
                }
            });
        })
    };

    let target = current.other();
    let title = match target {
        Lang::ZhCn => "切换到中文",
        Lang::En => "Switch to English",
    };

    html! {
        <>
            <button class="lang-toggle" {onclick} title={title}>
                { button_label(target) }
            </button>
            if let Some(message) = &*toast {
                <div class="lang-toast">{ message.clone() }</div>
            }
        </>
    }
}
