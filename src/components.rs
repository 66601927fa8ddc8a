//! Pure Yew view components for the Number Rush UI.
//!
//! Every component renders from props only; game state lives in the
//! controller owned by `Main`.

use number_rush::config::{CANVAS_HEIGHT, CANVAS_WIDTH, MAX_COUNT, MIN_COUNT, TARGET_RADIUS};
use number_rush::{TargetView, Tone};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub headline: AttrValue,
    pub tone: Tone,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <h1 style={format!("color: {}", props.tone.css_color())}>{ props.headline.clone() }</h1>
    }
}

/// "Point:" input for the number of targets.
#[derive(Properties, PartialEq)]
pub struct CountInputProps {
    pub text: AttrValue,
    pub error: Option<AttrValue>,
    pub oninput: Callback<InputEvent>,
    pub onchange: Callback<()>,
    pub onkeydown: Callback<KeyboardEvent>,
}

#[function_component(CountInput)]
pub fn count_input(props: &CountInputProps) -> Html {
    html! {
        <div class="form-group">
            <label for="point_count">
                { "Point:" }
                <input
                    type="number"
                    id="point_count"
                    min={MIN_COUNT.to_string()}
                    max={MAX_COUNT.to_string()}
                    style="width: 200px"
                    value={props.text.clone()}
                    class={if props.error.is_some() { "invalid" } else { "" }}
                    oninput={props.oninput.clone()}
                    onchange={props.onchange.reform(|_| ())}
                    onkeydown={props.onkeydown.clone()}
                />
            </label>
            if let Some(ref err) = props.error {
                <div class="input-error">{ err.clone() }</div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusPanelProps {
    pub message: AttrValue,
    pub clock: AttrValue,
}

#[function_component(StatusPanel)]
pub fn status_panel(props: &StatusPanelProps) -> Html {
    html! {
        <div>
            <p>{ props.message.clone() }</p>
            <p>{ props.clock.clone() }</p>
        </div>
    }
}

/// Inline style for one circular target.
fn target_style(target: &TargetView, clickable: bool) -> String {
    let diameter = 2.0 * TARGET_RADIUS;
    format!(
        "position: absolute; left: {}px; top: {}px; width: {d}px; height: {d}px; \
         background-color: {}; color: black; border-radius: 50%; display: flex; \
         align-items: center; justify-content: center; cursor: {}; font-size: 20px; \
         border: 2px solid black; opacity: {}; transition: opacity 1s ease; z-index: {}",
        target.x,
        target.y,
        if target.clicked { "#FF0000" } else { "#FFFFFF" },
        if clickable { "pointer" } else { "default" },
        if target.fading { 0 } else { 1 },
        target.z_index,
        d = diameter,
    )
}

fn render_target(target: &TargetView, clickable: bool, onclick: &Callback<u32>) -> Html {
    let id = target.id;
    html! {
        <div
            key={id}
            class="container__btn"
            style={target_style(target, clickable)}
            onclick={onclick.reform(move |_: MouseEvent| id)}
        >
            { id }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BoardProps {
    pub targets: Vec<TargetView>,
    pub clickable: bool,
    pub onclick: Callback<u32>,
}

/// The play area with every target still on the board.
#[function_component(Board)]
pub fn board(props: &BoardProps) -> Html {
    let style = format!(
        "position: relative; width: {}px; height: {}px; border: 1px solid black",
        CANVAS_WIDTH, CANVAS_HEIGHT
    );
    html! {
        <div class="container__AreaGame" style={style}>
            { props.targets.iter().map(|t| render_target(t, props.clickable, &props.onclick)).collect::<Html>() }
        </div>
    }
}
