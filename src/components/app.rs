use leptos::{component, create_signal, view, IntoView, SignalGet, SignalSet};
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use std::collections::BTreeMap;

use crate::components::time_picker_field::TimePickerField;
use crate::field::FieldConfig;
use crate::form::{FieldHandle, FormControl};
use crate::log;

/// Demo hosting page: two picker fields inside a form, validated and
/// collected through their handles on submit.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let opens_at = FieldHandle::new(FieldConfig {
        id: "opens-at".to_string(),
        name: "opens_at".to_string(),
        label: "Opens at".to_string(),
        value: "9:00 AM".to_string(),
        required: true,
        ..FieldConfig::default()
    });
    let closes_at = FieldHandle::new(FieldConfig {
        id: "closes-at".to_string(),
        name: "closes_at".to_string(),
        label: "Closes at".to_string(),
        interval: 1800,
        ..FieldConfig::default()
    });
    let handles = vec![opens_at.clone(), closes_at.clone()];

    let (errors, set_errors) = create_signal(Vec::<String>::new());
    let (submitted, set_submitted) = create_signal(String::new());

    let on_submit = {
        let handles = handles.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();

            let failures: Vec<String> = handles
                .iter()
                .filter_map(|handle| handle.validate().err())
                .map(|error| error.to_string())
                .collect();

            if failures.is_empty() {
                let payload: BTreeMap<&str, String> = handles
                    .iter()
                    .map(|handle| (handle.config().name.as_str(), handle.submission_value()))
                    .collect();
                let body = serde_json::to_string(&payload).unwrap_or_default();
                log!("submitting {body}");
                set_submitted.set(body);
                set_errors.set(Vec::new());
            } else {
                set_errors.set(failures);
                set_submitted.set(String::new());
            }
        }
    };

    let on_reset = {
        let handles = handles.clone();
        move |_| {
            for handle in &handles {
                handle.reset();
            }
            set_errors.set(Vec::new());
            set_submitted.set(String::new());
        }
    };

    view! {
        <Stylesheet id="leptos" href="/pkg/timefield.css"/>
        <Title text="Opening Hours"/>

        <div class="app">
            <h1>"Opening hours"</h1>
            <form class="opening-hours-form" on:submit=on_submit>
                <TimePickerField handle=opens_at/>
                <TimePickerField handle=closes_at/>

                {move || {
                    errors
                        .get()
                        .into_iter()
                        .map(|message| view! { <p class="form-error">{message}</p> })
                        .collect::<Vec<_>>()
                }}

                <div class="form-actions">
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=on_reset>"Reset"</button>
                </div>
            </form>

            {move || {
                let body = submitted.get();
                (!body.is_empty()).then(|| {
                    view! {
                        <p class="submitted-payload">"Submitted: " <code>{body.clone()}</code></p>
                    }
                })
            }}
        </div>
    }
}
