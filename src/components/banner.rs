use yew::prelude::*;

use crate::storage;

#[derive(Properties, PartialEq)]
pub struct BannerProps {
    pub id: AttrValue,
    pub text: AttrValue,
}

#[function_component(AnnouncementBanner)]
pub fn announcement_banner(props: &BannerProps) -> Html {
    let hidden = {
        let id = props.id.clone();
        use_state(move || storage::announcement_dismissed(&id))
    };

    if *hidden {
        return html! {};
    }

    let on_close = {
        let id = props.id.clone();
        let hidden = hidden.clone();
        Callback::from(move |_: MouseEvent| {
            storage::dismiss_announcement(&id);
            hidden.set(true);
        })
    };

    html! {
      <div class="banner">
        <span>{ props.text.clone() }</span>
        <button class="secondary" aria-label="Dismiss" onclick={on_close}>{ "×" }</button>
      </div>
    }
}
