//! Brand side: applicants per campaign, contact and contract actions, deliverables.

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::hooks::{use_model, ModelHandle};
use super::wizard_form::{Submission, WizardForm};
use super::{dispatch, use_app, AppContext};
use crate::api::NewDeliverable;
use crate::form::catalog::ADD_DELIVERABLE;
use crate::model::{Contact, CreatorApplication, Deliverable, DeliverableStatus};
use crate::state::roster::{load_all, load_campaign};
use crate::state::{Mutation, Refresh, Roster};

fn open_campaign(ctx: &AppContext, roster: ModelHandle<Roster>, campaign_id: String) {
    let api = ctx.api.clone();
    let ticket = roster.update(|r| r.begin_load(&campaign_id));
    spawn_local(async move {
        let result = api.list_applications(&campaign_id).await;
        roster.update(|r| r.finish_load(ticket, result));
    });
}

/// Sends `m`; on success reloads the open campaign. Returns whether it succeeded.
async fn mutate(ctx: &AppContext, roster: &ModelHandle<Roster>, m: Mutation) -> bool {
    let refresh = dispatch(ctx, &m).await;
    if refresh == Some(Refresh::Roster) {
        let open = roster.borrow().campaign_id().map(str::to_string);
        if let Some(id) = open {
            load_campaign(&*ctx.api, roster.cell(), &id).await;
            roster.redraw();
        }
    }
    refresh.is_some()
}

#[function_component(SelectedCreators)]
pub fn selected_creators() -> Html {
    let ctx = use_app();
    let roster = use_model(Roster::default);

    {
        let api = ctx.api.clone();
        let roster = roster.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                load_all(&*api, roster.cell()).await;
                roster.redraw();
            });
            || ()
        });
    }

    let on_campaign = {
        let ctx = ctx.clone();
        let roster = roster.clone();
        Callback::from(move |e: Event| {
            let el: HtmlSelectElement = e.target_unchecked_into();
            open_campaign(&ctx, roster.clone(), el.value());
        })
    };

    let r = roster.borrow();
    let selected = r.campaign_id().unwrap_or_default();

    let picker = if r.campaigns().is_empty() {
        html! {}
    } else {
        html! {
          <select class="campaign-picker" onchange={on_campaign}>
            { for r.campaigns().iter().map(|c| html! {
                <option value={c.id.clone()} selected={c.id == selected}>
                  { format!("{} ({} applicants)", c.title, c.applicants) }
                </option>
            }) }
          </select>
        }
    };

    let content = if let Some(err) = r.error() {
        html! { <div class="err">{ err.to_string() }</div> }
    } else if r.is_loading() && r.applications().is_empty() {
        html! { <div class="small">{ "Loading applicants…" }</div> }
    } else if r.campaigns().is_empty() {
        html! { <div class="small">{ "You have no campaigns yet." }</div> }
    } else if r.applications().is_empty() {
        html! { <div class="small">{ "No creators have applied to this campaign yet." }</div> }
    } else {
        html! {
          <div class="grid">
            { for r.applications().iter().map(|a| html! {
                <ApplicationCard key={a.id.clone()} application={a.clone()} roster={RosterRef(roster.clone())} />
            }) }
          </div>
        }
    };

    html! {
      <section>
        <div class="toprow">
          <h2>{ "Selected creators" }</h2>
          { picker }
        </div>
        { content }
      </section>
    }
}

/// Props wrapper; cards always share their parent's roster.
#[derive(Clone)]
struct RosterRef(ModelHandle<Roster>);

impl PartialEq for RosterRef {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

#[derive(Properties, PartialEq)]
struct ApplicationCardProps {
    application: CreatorApplication,
    roster: RosterRef,
}

#[function_component(ApplicationCard)]
fn application_card(props: &ApplicationCardProps) -> Html {
    let ctx = use_app();
    let adding = use_state(|| false);
    let app = &props.application;

    let run = {
        let ctx = ctx.clone();
        let roster = props.roster.0.clone();
        move |m: Mutation| {
            let ctx = ctx.clone();
            let roster = roster.clone();
            spawn_local(async move {
                mutate(&ctx, &roster, m).await;
            });
        }
    };

    let contact = match &app.contact {
        Contact::Revealed { email, phone } => html! {
          <span class="badge">
            <a href={format!("mailto:{email}")}>{ email.clone() }</a>
            if let Some(p) = phone { { format!(" · {p}") } }
          </span>
        },
        _ if app.can_request_contact() => {
            let run = run.clone();
            let id = app.id.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                run(Mutation::RequestContact { application_id: id.clone() })
            });
            html! { <button class="secondary" {onclick}>{ "Request contact" }</button> }
        }
        _ => html! { <span class="badge">{ "Contact requested" }</span> },
    };

    let contract = if app.can_send_contract() {
        let run = run.clone();
        let id = app.id.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            run(Mutation::SendContract { application_id: id.clone() })
        });
        html! { <button {onclick}>{ "Send contract" }</button> }
    } else {
        html! {}
    };

    let on_status = {
        let run = run.clone();
        let application_id = app.id.clone();
        Callback::from(move |(d, to): (Deliverable, DeliverableStatus)| {
            run(Mutation::SetDeliverableStatus {
                application_id: application_id.clone(),
                deliverable_id: d.id,
                from: d.status,
                to,
            })
        })
    };

    let add_form = if !app.can_add_deliverable() {
        html! {}
    } else if *adding {
        let on_submit = {
            let ctx = ctx.clone();
            let roster = props.roster.0.clone();
            let adding = adding.clone();
            let application_id = app.id.clone();
            Callback::from(move |sub: Submission| {
                let ctx = ctx.clone();
                let roster = roster.clone();
                let adding = adding.clone();
                let m = Mutation::AddDeliverable {
                    application_id: application_id.clone(),
                    deliverable: NewDeliverable::from_record(&sub.record),
                };
                spawn_local(async move {
                    if mutate(&ctx, &roster, m).await {
                        adding.set(false);
                    } else {
                        sub.finish.emit(());
                    }
                });
            })
        };
        html! { <WizardForm spec={ADD_DELIVERABLE} {on_submit} /> }
    } else {
        let adding = adding.clone();
        html! {
          <button class="secondary" onclick={Callback::from(move |_: MouseEvent| adding.set(true))}>
            { "Add deliverable" }
          </button>
        }
    };

    html! {
      <div class="card application">
        <div class="title">{ app.creator_name.clone() }</div>
        <div class="small">
          { format!("{} on {}", app.handle, app.platform) }
          if let Some(n) = app.followers { { format!(" · {n} followers") } }
        </div>
        <div class="badges">
          <span class="badge"><strong>{ "Contract: " }</strong>{ app.contract.label() }</span>
          { contact }
        </div>
        <div class="controls">{ contract }</div>

        <div class="label">
          { format!("Deliverables ({} of {} completed)", app.completed_deliverables(), app.deliverables.len()) }
        </div>
        <ul class="deliverables">
          { for app.deliverables.iter().map(|d| deliverable_row(d, &on_status)) }
        </ul>
        { add_form }
      </div>
    }
}

fn deliverable_row(d: &Deliverable, on_status: &Callback<(Deliverable, DeliverableStatus)>) -> Html {
    let onchange = {
        let on_status = on_status.clone();
        let d = d.clone();
        Callback::from(move |e: Event| {
            let el: HtmlSelectElement = e.target_unchecked_into();
            match DeliverableStatus::parse(&el.value()) {
                Some(to) if to != d.status => on_status.emit((d.clone(), to)),
                Some(_) => {}
                None => tracing::warn!(value = %el.value(), "status select sent an unknown value"),
            }
        })
    };

    html! {
      <li key={d.id.clone()} class={classes!("deliverable", d.status.is_terminal().then_some("done"))}>
        <span class="title">{ d.title.clone() }</span>
        if let Some(due) = &d.due_date { <span class="small">{ format!(" due {due}") }</span> }
        <select {onchange}>
          { for DeliverableStatus::ALL.iter().map(|s| html! {
              <option value={s.as_str()} selected={*s == d.status}>{ s.label() }</option>
          }) }
        </select>
      </li>
    }
}
