use std::fmt::Display;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// The last value that passed validation.
    pub value: T,
    /// Validation message for the current text, if it was rejected.
    pub error: Option<String>,
    /// Callback for the input's `oninput` event.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text; used for `onchange` and Enter.
    pub on_commit: Callback<()>,
    /// Commit on Enter.
    pub on_keydown: Callback<KeyboardEvent>,
}

/// Text input that only publishes values accepted by `parse_and_validate`.
///
/// A rejected commit keeps the previous value and exposes the error message.
#[hook]
pub fn use_validated_input<T, E>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, E>>,
) -> ValidatedInput<T>
where
    T: Clone + PartialEq + Display + 'static,
    E: Display + 'static,
{
    let value_handle: UseStateHandle<T> = use_state(|| initial_value.clone());
    let text_handle: UseStateHandle<String> = use_state(|| initial_value.to_string());
    let error_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text_handle = text_handle.clone();
        let value_setter = value_handle.clone();
        let error_setter = error_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_: ()| match parse_fn(&text_handle) {
            Ok(parsed) => {
                text_handle.set(parsed.to_string()); // canonical form
                value_setter.set(parsed);
                error_setter.set(None);
            }
            Err(err) => {
                error_setter.set(Some(err.to_string()));
            }
        })
    };

    let on_keydown = {
        let commit = on_commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    ValidatedInput {
        text: (*text_handle).clone(),
        value: (*value_handle).clone(),
        error: (*error_handle).clone(),
        on_text_input,
        on_commit,
        on_keydown,
    }
}
