use leptos::{
    component, create_effect, create_node_ref, create_rw_signal, event_target_value, html,
    on_cleanup, view, CollectView, IntoView, Portal, SignalGet, SignalSet,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;

use crate::field::TIME_PATTERN;
use crate::form::{FieldHandle, FormControl};
use crate::log;
use crate::picker::{EnterAction, ListNav};

fn slot_item(list: &web_sys::Element, index: usize) -> Option<web_sys::HtmlElement> {
    let selector = format!("li[data-index='{index}']");
    list.query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|item| item.dyn_into::<web_sys::HtmlElement>().ok())
}

fn focus_entry(list: &web_sys::Element, index: usize) {
    if let Some(item) = slot_item(list, index) {
        let _ = item.focus();
    }
}

fn scroll_to_entry(list: &web_sys::Element, index: usize) {
    if let Some(item) = slot_item(list, index) {
        list.set_scroll_top(item.offset_top());
    }
}

/// A text field synchronized with an overlay list of fixed-interval times.
///
/// The list markup lives in a `Portal` mounted at the top of the document,
/// which escapes any stacking-order constraints of the surrounding form; it
/// is rendered once and toggled with a class for the field's lifetime. The
/// hosting page creates the [`FieldHandle`] and keeps it for form lifecycle
/// calls (validation, submission value, reset).
#[component]
pub fn TimePickerField(handle: FieldHandle) -> impl IntoView {
    let config = handle.config().clone();
    let state = handle.state();
    let list_id = config.list_id();

    let input_ref = create_node_ref::<html::Input>();
    let list_ref = create_node_ref::<html::Ul>();

    let visible = create_rw_signal(false);
    let candidate = create_rw_signal(state.borrow().candidate());
    let display_text = create_rw_signal(state.borrow().text().to_string());
    let canonical = create_rw_signal(state.borrow().submission_value());
    let position = create_rw_signal(String::new());

    // Register the mounted elements with the handle so the form lifecycle
    // contract (native validation, reset, destroy) can reach the DOM.
    create_effect({
        let handle = handle.clone();
        move |_| {
            if let Some(input_el) = input_ref.get() {
                handle.attach_input((*input_el).clone());
            }
            if let Some(list_el) = list_ref.get() {
                handle.attach_list(web_sys::Element::from((*list_el).clone()));
            }
        }
    });

    // A form reset goes through the handle, not through an event on this
    // component, so it pushes the restored state back into the signals here.
    handle.attach_refresh({
        let state = Rc::clone(&state);
        move || {
            let state = state.borrow();
            display_text.set(state.text().to_string());
            canonical.set(state.submission_value());
            visible.set(false);
            candidate.set(None);
        }
    });

    // Positioning always precedes the visibility toggle within a handler, so
    // the list is never shown at a stale position.
    let reposition = move || {
        if let Some(input_el) = input_ref.get() {
            let rect = input_el.get_bounding_client_rect();
            let scroll_top = leptos::window().scroll_y().unwrap_or(0.0);
            position.set(format!(
                "left: {}px; top: {}px; width: {}px;",
                rect.left(),
                rect.bottom() + scroll_top,
                rect.width()
            ));
        }
    };

    let hide = {
        let state = Rc::clone(&state);
        move || {
            state.borrow_mut().hide();
            visible.set(false);
            candidate.set(None);
        }
    };

    let do_commit = {
        let state = Rc::clone(&state);
        move |index: usize| {
            let committed = state.borrow_mut().commit(index);
            if let Some(display) = committed {
                display_text.set(display.clone());
                let value = state.borrow().submission_value();
                canonical.set(value.clone());
                if let Some(input_el) = input_ref.get() {
                    input_el.set_value(&display);
                    // Refresh native constraint state after the programmatic change.
                    let _ = input_el.check_validity();
                }
                log!("time picker committed {value}");
            }
            visible.set(false);
            candidate.set(None);
        }
    };

    let entries = state.borrow().slots().entries().to_vec();
    let items = entries
        .into_iter()
        .map(|entry| {
            let index = entry.index;
            let on_click = {
                let do_commit = do_commit.clone();
                move |_| do_commit(index)
            };
            let on_keydown = {
                let state = Rc::clone(&state);
                let do_commit = do_commit.clone();
                move |ev: web_sys::KeyboardEvent| {
                    let key = ev.key();
                    if !matches!(key.as_str(), "ArrowDown" | "ArrowUp" | "Enter") {
                        return;
                    }
                    // Navigation keys must not scroll the page or submit the form.
                    ev.prevent_default();
                    let nav = state.borrow().list_nav(&key, index);
                    match nav {
                        Some(ListNav::FocusEntry(next)) => {
                            if let Some(list_el) = list_ref.get() {
                                focus_entry(&list_el, next);
                            }
                        }
                        Some(ListNav::FocusField) => {
                            if let Some(input_el) = input_ref.get() {
                                let _ = input_el.focus();
                            }
                        }
                        Some(ListNav::Commit(committed)) => do_commit(committed),
                        None => {}
                    }
                }
            };

            view! {
                <li
                    tabindex="0"
                    data-index=index.to_string()
                    data-text=entry.display.clone()
                    data-value=entry.canonical.clone()
                    class="time-picker-field__time-list__item"
                    class=("time-picker-field__time-list__item--candidate", move || {
                        candidate.get() == Some(index)
                    })
                    on:click=on_click
                    on:keydown=on_keydown
                >
                    {entry.display}
                </li>
            }
        })
        .collect_view();

    let on_focus = {
        let state = Rc::clone(&state);
        move |_| {
            reposition();
            state.borrow_mut().show();
            visible.set(true);
        }
    };

    let on_blur = {
        move |ev: web_sys::FocusEvent| {
            // Focus moving from the field into the list must not collapse it.
            if let (Some(related), Some(list_el)) = (ev.related_target(), list_ref.get()) {
                if let Ok(node) = related.dyn_into::<web_sys::Node>() {
                    if list_el.contains(Some(&node)) {
                        return;
                    }
                }
            }
            hide();
        }
    };

    let on_input = {
        let state = Rc::clone(&state);
        move |ev| {
            let text = event_target_value(&ev);
            display_text.set(text.clone());
            reposition();
            let matched = state.borrow_mut().on_input(&text);
            visible.set(true);
            canonical.set(state.borrow().submission_value());
            if let Some(index) = matched {
                candidate.set(Some(index));
                if let Some(list_el) = list_ref.get() {
                    scroll_to_entry(&list_el, index);
                }
            }
        }
    };

    let on_keydown = {
        let state = Rc::clone(&state);
        let do_commit = do_commit.clone();
        move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                if let Some(list_el) = list_ref.get() {
                    focus_entry(&list_el, 0);
                }
            }
            "Enter" => {
                // Committing (or just closing) must not submit an enclosing form.
                ev.prevent_default();
                let action = state.borrow_mut().on_field_enter();
                match action {
                    EnterAction::Commit(index) => do_commit(index),
                    EnterAction::HideOnly => {
                        visible.set(false);
                        candidate.set(None);
                    }
                }
            }
            _ => {}
        }
    };

    {
        let handle = handle.clone();
        on_cleanup(move || handle.destroy());
    }

    // The canonical value travels on a hidden input carrying the field name,
    // so the display text never reaches the form payload and each field name
    // is submitted exactly once.
    view! {
        <div
            class="time-picker-field"
            class=("time-picker-field--filled", move || !display_text.get().is_empty())
        >
            <label class="time-picker-field__label">
                {config.label.clone()}
                <input
                    type="text"
                    id=config.id.clone()
                    class="time-picker-field__input"
                    autocomplete="off"
                    pattern=TIME_PATTERN
                    placeholder="e.g. 2:30 PM"
                    required=config.required
                    data-time-list-id=list_id.clone()
                    prop:value=move || display_text.get()
                    node_ref=input_ref
                    on:focus=on_focus
                    on:blur=on_blur
                    on:input=on_input
                    on:keydown=on_keydown
                />
            </label>
            <input type="hidden" name=config.name.clone() prop:value=move || canonical.get()/>
            <Portal>
                <ul
                    id=list_id.clone()
                    class="time-picker-field__time-list"
                    class=("v-hidden", move || !visible.get())
                    style=move || position.get()
                    node_ref=list_ref
                >
                    {items.clone()}
                </ul>
            </Portal>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::field::FieldConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    // Each test mounts under its own field id; the shared test page is never
    // torn down between tests.
    fn mount_field(id: &str) -> (web_sys::HtmlInputElement, web_sys::Element) {
        let config = FieldConfig {
            id: id.to_string(),
            name: id.replace('-', "_"),
            interval: 3600,
            ..FieldConfig::default()
        };
        let list_id = config.list_id();
        let handle = FieldHandle::new(config);
        leptos::mount_to_body(move || view! { <TimePickerField handle=handle/> });

        let document = leptos::document();
        let input = document
            .get_element_by_id(id)
            .expect("input should be mounted")
            .dyn_into::<web_sys::HtmlInputElement>()
            .expect("element should be an input");
        let list = document
            .get_element_by_id(&list_id)
            .expect("list should be mounted");
        (input, list)
    }

    #[wasm_bindgen_test]
    fn test_list_hidden_until_field_focus() {
        let (input, list) = mount_field("focus-field");

        assert!(list.class_list().contains("v-hidden"));
        let entries = list.query_selector_all("li").expect("should query entries");
        assert_eq!(entries.length(), 24);

        input.focus().expect("should focus");
        assert!(!list.class_list().contains("v-hidden"));
    }

    #[wasm_bindgen_test]
    fn test_blur_into_list_keeps_it_open() {
        let (input, list) = mount_field("blur-field");

        input.focus().expect("should focus");
        assert!(!list.class_list().contains("v-hidden"));

        // Moving focus onto an entry blurs the field with the entry as the
        // related target, which must not collapse the list.
        let entry = slot_item(&list, 0).expect("first entry should exist");
        entry.focus().expect("should focus");
        assert!(!list.class_list().contains("v-hidden"));
    }
}
