//! Creator dashboard: one tab per gig status.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::hooks::{use_model, ModelHandle};
use super::{dispatch, use_app};
use crate::api::ApiHandle;
use crate::model::{Gig, GigAction, GigStatus};
use crate::state::registry::load_tab;
use crate::state::{GigBoard, Mutation, Refresh};

/// Switches the board to `tab` and fetches it. Shows the spinner right away.
fn open_tab(api: ApiHandle, board: ModelHandle<GigBoard>, tab: GigStatus) {
    let ticket = board.update(|b| b.begin_load(tab));
    spawn_local(async move {
        let result = api.list_gigs(tab).await;
        board.update(|b| b.finish_load(ticket, result));
    });
}

#[function_component(CreatorDashboard)]
pub fn creator_dashboard() -> Html {
    let ctx = use_app();
    let board = use_model(GigBoard::default);

    {
        let api = ctx.api.clone();
        let board = board.clone();
        use_effect_with((), move |_| {
            open_tab(api, board, GigStatus::Recommended);
            || ()
        });
    }

    let on_action = {
        let ctx = ctx.clone();
        let board = board.clone();
        Callback::from(move |(gig_id, action): (String, GigAction)| {
            let ctx = ctx.clone();
            let board = board.clone();
            spawn_local(async move {
                let m = Mutation::Gig { gig_id, action };
                if dispatch(&ctx, &m).await == Some(Refresh::GigTab) {
                    let tab = board.borrow().active();
                    load_tab(&*ctx.api, board.cell(), tab).await;
                    board.redraw();
                }
            });
        })
    };

    let b = board.borrow();
    let tabs = GigStatus::ALL.iter().map(|&tab| {
        let api = ctx.api.clone();
        let board = board.clone();
        let onclick = Callback::from(move |_: MouseEvent| open_tab(api.clone(), board.clone(), tab));
        html! {
          <button class={classes!("chip", (b.active() == tab).then_some("active"))} {onclick}>
            { tab.label() }
          </button>
        }
    });

    let content = if b.is_loading() && b.visible().is_empty() {
        html! { <div class="small">{ "Loading campaigns…" }</div> }
    } else if let Some(err) = b.error() {
        html! { <div class="err">{ err.to_string() }</div> }
    } else if b.visible().is_empty() {
        html! { <div class="small">{ empty_text(b.active()) }</div> }
    } else {
        html! {
          <div class="grid">
            { for b.visible().iter().map(|g| html! {
                <GigCard key={g.id.clone()} gig={g.clone()} on_action={on_action.clone()} />
            }) }
          </div>
        }
    };

    html! {
      <section>
        <div class="chips">{ for tabs }</div>
        { content }
      </section>
    }
}

fn empty_text(tab: GigStatus) -> &'static str {
    match tab {
        GigStatus::Recommended => "No recommendations right now. Check back soon.",
        GigStatus::Saved => "Nothing saved yet.",
        GigStatus::Applied => "You haven't applied to anything yet.",
        GigStatus::InProgress => "No campaigns in progress.",
        GigStatus::Canceled => "No canceled campaigns.",
    }
}

#[derive(Properties, PartialEq)]
struct GigCardProps {
    gig: Gig,
    on_action: Callback<(String, GigAction)>,
}

#[function_component(GigCard)]
fn gig_card(props: &GigCardProps) -> Html {
    let gig = &props.gig;

    let buttons = gig.status.actions().iter().map(|&action| {
        let on_action = props.on_action.clone();
        let id = gig.id.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_action.emit((id.clone(), action)));
        let class = if action == GigAction::Apply { "" } else { "secondary" };
        html! { <button {class} {onclick}>{ action.label() }</button> }
    });

    html! {
      <div class="card gig">
        <img class="cover" src={gig.image.clone()} alt="" />
        <div class="kicker">{ gig.status.label() }</div>
        <div class="title">{ gig.title.clone() }</div>
        <div class="text">{ gig.description.clone() }</div>
        <dl class="stats">
          { for gig.stats.iter().map(|s| html! {
              <>
                <dt>{ s.label.clone() }</dt>
                <dd>{ s.value.clone() }</dd>
              </>
          }) }
        </dl>
        <div class="controls">{ for buttons }</div>
      </div>
    }
}
