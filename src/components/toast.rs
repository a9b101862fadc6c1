use yew::prelude::*;

use crate::state::Notice;

#[derive(Properties, PartialEq)]
pub struct ToastsProps {
    pub items: Vec<Notice>,
    pub on_dismiss: Callback<u64>,
}

/// Bottom-of-screen notices. They also expire on their own (see `App`).
#[function_component(Toasts)]
pub fn toasts(props: &ToastsProps) -> Html {
    if props.items.is_empty() {
        return html! {};
    }
    html! {
      <div class="toasts">
        { for props.items.iter().map(|n| {
            let on_dismiss = props.on_dismiss.clone();
            let id = n.id;
            html! {
              <div key={id} class={n.level.class()} role="status"
                   onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(id))}>
                { n.text.clone() }
              </div>
            }
        }) }
      </div>
    }
}
