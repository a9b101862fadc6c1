use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::hooks::use_model;
use crate::form::{Advance, FieldKind, FieldSpec, FormRecord, Wizard, WizardSpec};

/// A validated record handed to the owner. `finish` re-enables the form;
/// call it when the request failed and the user should be able to retry.
pub struct Submission {
    pub record: FormRecord,
    pub finish: Callback<()>,
}

#[derive(Properties, PartialEq)]
pub struct WizardFormProps {
    pub spec: WizardSpec,
    #[prop_or_default]
    pub prefill: Vec<(&'static str, String)>,
    pub on_submit: Callback<Submission>,
    /// Rendered under the buttons (e.g. "resend code").
    #[prop_or_default]
    pub children: Html,
}

#[function_component(WizardForm)]
pub fn wizard_form(props: &WizardFormProps) -> Html {
    let wizard = {
        let spec = props.spec;
        let prefill = props.prefill.clone();
        use_model(move || Wizard::prefilled(spec, &prefill))
    };

    let on_edit = {
        let wizard = wizard.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            wizard.update(|w| w.edit(name, value))
        })
    };

    let on_next = {
        let wizard = wizard.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if wizard.update(|w| w.advance()) != Advance::Submit {
                return;
            }
            let record = wizard.update(|w| {
                w.begin_submit();
                w.record().clone()
            });
            let finish = {
                let wizard = wizard.clone();
                Callback::from(move |_| wizard.update(|w| w.finish_submit()))
            };
            on_submit.emit(Submission { record, finish });
        })
    };

    let on_back = {
        let wizard = wizard.clone();
        Callback::from(move |_: MouseEvent| wizard.update(|w| w.retreat()))
    };

    let w = wizard.borrow();
    let spec = *w.spec();
    let step = w.current();
    let busy = w.is_submitting();
    let label = if busy {
        "Sending…"
    } else if w.is_terminal() {
        spec.submit_label
    } else {
        "Continue"
    };

    html! {
      <form class="card wizard" onsubmit={on_next}>
        <div class="kicker">{ spec.title }</div>
        if spec.step_count() > 1 {
          <div class="small">{ format!("Step {} of {}", w.step(), spec.step_count()) }</div>
        }
        <h2>{ step.title }</h2>

        { for step.fields.iter()
            .filter(|f| f.is_visible(w.record()))
            .map(|f| field_view(f, w.value(f.name), w.error(f.name), &on_edit, busy)) }

        <div class="controls">
          if w.step() > 1 {
            <button type="button" class="secondary" onclick={on_back} disabled={busy}>{ "Back" }</button>
          }
          <button type="submit" disabled={busy}>{ label }</button>
        </div>
        { props.children.clone() }
      </form>
    }
}

fn field_view(
    field: &'static FieldSpec,
    value: &str,
    error: Option<&str>,
    on_edit: &Callback<(&'static str, String)>,
    busy: bool,
) -> Html {
    let name = field.name;
    let on_edit = on_edit.clone();

    let control = match field.kind {
        FieldKind::Select(options) => {
            let onchange = Callback::from(move |e: Event| {
                let el: HtmlSelectElement = e.target_unchecked_into();
                on_edit.emit((name, el.value()));
            });
            html! {
              <select id={name} {onchange} disabled={busy}>
                { for options.iter().map(|(v, l)| html! {
                    <option value={*v} selected={value == *v}>{ *l }</option>
                }) }
              </select>
            }
        }
        FieldKind::TextArea => {
            let oninput = Callback::from(move |e: InputEvent| {
                let el: HtmlTextAreaElement = e.target_unchecked_into();
                on_edit.emit((name, el.value()));
            });
            html! {
              <textarea id={name} rows="5" value={value.to_string()}
                placeholder={field.placeholder} {oninput} disabled={busy} />
            }
        }
        kind => {
            // Number and email stay plain text so the browser never blocks
            // submit with its own messages.
            let input_type = match kind {
                FieldKind::Password => "password",
                FieldKind::Date => "date",
                _ => "text",
            };
            let oninput = Callback::from(move |e: InputEvent| {
                let el: HtmlInputElement = e.target_unchecked_into();
                on_edit.emit((name, el.value()));
            });
            html! {
              <input id={name} type={input_type} value={value.to_string()}
                placeholder={field.placeholder} {oninput} disabled={busy} />
            }
        }
    };

    html! {
      <div class={classes!("field", error.is_some().then_some("invalid"))}>
        <label for={name}>
          { field.label }
          if field.is_required() { <span class="req">{ " *" }</span> }
        </label>
        { control }
        if let Some(msg) = error {
          <div class="field-error">{ msg.to_string() }</div>
        }
      </div>
    }
}
