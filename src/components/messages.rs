use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::hooks::{use_model, ModelHandle};
use super::wizard_form::{Submission, WizardForm};
use super::{dispatch, use_app};
use crate::api::ApiHandle;
use crate::form::catalog::COMPOSE_MESSAGE;
use crate::form::validator::value_of;
use crate::model::Author;
use crate::state::inbox::{load_conversations, open_thread};
use crate::state::{Inbox, Mutation, Refresh};

fn show_thread(api: ApiHandle, inbox: ModelHandle<Inbox>, conversation_id: String) {
    let ticket = inbox.update(|i| i.begin_thread(&conversation_id));
    spawn_local(async move {
        let result = api.list_messages(&conversation_id).await;
        inbox.update(|i| i.finish_thread(ticket, result));
    });
}

#[function_component(MessagesScreen)]
pub fn messages_screen() -> Html {
    let ctx = use_app();
    let inbox = use_model(Inbox::default);
    // Bumped after each send so the compose box starts empty again.
    let sent = use_state(|| 0u32);

    {
        let api = ctx.api.clone();
        let inbox = inbox.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                load_conversations(&*api, inbox.cell()).await;
                inbox.redraw();
            });
            || ()
        });
    }

    let on_send = {
        let ctx = ctx.clone();
        let inbox = inbox.clone();
        let sent = sent.clone();
        Callback::from(move |sub: Submission| {
            let Some(conversation_id) = inbox.borrow().open().map(str::to_string) else {
                sub.finish.emit(());
                return;
            };
            let ctx = ctx.clone();
            let inbox = inbox.clone();
            let sent = sent.clone();
            let m = Mutation::SendMessage {
                conversation_id,
                body: value_of(&sub.record, "body").to_string(),
            };
            spawn_local(async move {
                match dispatch(&ctx, &m).await {
                    Some(Refresh::Thread(id)) => {
                        sent.set(*sent + 1);
                        open_thread(&*ctx.api, inbox.cell(), &id).await;
                        inbox.redraw();
                    }
                    _ => sub.finish.emit(()),
                }
            });
        })
    };

    let i = inbox.borrow();

    let list = i.conversations().iter().map(|c| {
        let api = ctx.api.clone();
        let inbox = inbox.clone();
        let id = c.id.clone();
        let onclick = Callback::from(move |_: MouseEvent| show_thread(api.clone(), inbox.clone(), id.clone()));
        let active = i.open() == Some(c.id.as_str());
        html! {
          <li key={c.id.clone()} class={classes!("conversation", active.then_some("active"))} {onclick}>
            <div class="title">
              { c.counterpart.clone() }
              if c.unread > 0 { <span class="badge">{ c.unread.to_string() }</span> }
            </div>
            <div class="small">{ c.preview.clone() }</div>
          </li>
        }
    });

    let thread = match i.open() {
        None => html! { <div class="small">{ "Pick a conversation." }</div> },
        Some(id) => {
            let body = if let Some(err) = i.error() {
                html! { <div class="err">{ err.to_string() }</div> }
            } else if i.is_loading() && i.thread().is_empty() {
                html! { <div class="small">{ "Loading messages…" }</div> }
            } else {
                html! {
                  <ul class="thread">
                    { for i.thread().iter().map(|m| {
                        let side = match m.author { Author::Me => "mine", Author::Them => "theirs" };
                        html! {
                          <li key={m.id.clone()} class={classes!("message", side)}>
                            <div class="text">{ m.body.clone() }</div>
                            <div class="small">{ m.sent_at.clone() }</div>
                          </li>
                        }
                    }) }
                  </ul>
                }
            };
            html! {
              <>
                { body }
                <WizardForm key={format!("{id}-{}", *sent)} spec={COMPOSE_MESSAGE} on_submit={on_send} />
              </>
            }
        }
    };

    let sidebar = if i.conversations().is_empty() {
        html! { <div class="small">{ "No conversations yet." }</div> }
    } else {
        html! { <ul class="conversations">{ for list }</ul> }
    };

    html! {
      <section class="messages">
        <aside>{ sidebar }</aside>
        <div class="pane">{ thread }</div>
      </section>
    }
}
