//! Main module for the Number Rush application using Yew.
//! Wires the game controller, the count input and the board.

use number_rush::{format_clock, BrowserScheduler, ConfigError, Game, GameConfig, GameStatus};
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;

use components::{Board, CountInput, Header, StatusPanel};
use hooks::use_validated_input;

/// Primary application component wiring the controller to the view.
#[function_component(Main)]
fn main_component() -> Html {
    let game = use_mut_ref(|| Game::new(BrowserScheduler));
    let snapshot = use_state(|| game.borrow().snapshot());

    let count_input = use_validated_input::<GameConfig, ConfigError>(
        GameConfig::default(),
        Rc::new(GameConfig::from_input),
    );

    // Repaint on every controller change; stop the timers on unmount.
    {
        let game = game.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            game.borrow().subscribe(move |next| snapshot.set(next));
            move || game.borrow().reset()
        });
    }

    // Committed counts apply to the next round.
    {
        let game = game.clone();
        use_effect_with(count_input.value, move |config| {
            game.borrow().configure(*config);
            || ()
        });
    }

    let on_play = {
        let game = game.clone();
        Callback::from(move |_: MouseEvent| {
            let game = game.borrow();
            if game.is_running() {
                game.reset();
            } else {
                game.start();
            }
        })
    };

    let on_target = {
        let game = game.clone();
        Callback::from(move |id: u32| game.borrow().click(id))
    };

    let clickable = snapshot.status == GameStatus::Active;

    html! {
        <div class="container">
            <Header headline={snapshot.headline} tone={snapshot.tone} />
            <div class="container__title">
                <CountInput
                    text={count_input.text.clone()}
                    error={count_input.error.clone().map(AttrValue::from)}
                    oninput={count_input.on_text_input.clone()}
                    onchange={count_input.on_commit.clone()}
                    onkeydown={count_input.on_keydown.clone()}
                />
                <StatusPanel
                    message={snapshot.message.clone()}
                    clock={format_clock(&snapshot)}
                />
                <button onclick={on_play}>{ snapshot.play_button_label }</button>
            </div>
            <Board targets={snapshot.targets.clone()} {clickable} onclick={on_target} />
        </div>
    }
}

/// Entry point: installs logging and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    // A second init only fails because a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Number Rush starting...");
    yew::Renderer::<Main>::new().render();
}
