use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use orion_chrome::login::{
  SIMULATED_SUBMIT_DELAY,
  SignInForm
};
use web_sys::{
  HtmlInputElement,
  InputEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Reducible,
  TargetCast,
  function_component,
  html,
  use_reducer
};

use crate::api::ui_log;
use crate::components::AuroraBackground;

enum LoginAction {
  SetUsername(String),
  TogglePassword,
  BeginSubmit,
  FinishSubmit
}

#[derive(Default, PartialEq)]
struct LoginState(SignInForm);

impl Reducible for LoginState {
  type Action = LoginAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut form = self.0.clone();
    match action {
      | LoginAction::SetUsername(value) => {
        form.set_username(value)
      }
      | LoginAction::TogglePassword => {
        form.toggle_password_visibility()
      }
      | LoginAction::BeginSubmit => {
        if !form.begin_submit() {
          return self;
        }
      }
      | LoginAction::FinishSubmit => {
        form.finish_submit()
      }
    }
    Rc::new(Self(form))
  }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
  let state =
    use_reducer(LoginState::default);
  let form = &state.0;

  let on_username = {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      state.dispatch(
        LoginAction::SetUsername(
          input.value()
        )
      );
    })
  };

  let on_toggle_password = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(
        LoginAction::TogglePassword
      )
    })
  };

  let on_submit = {
    let state = state.clone();
    let in_flight = form.is_loading();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      if in_flight {
        return;
      }
      ui_log(
        "login.submit",
        "simulating sign-in"
      );
      state
        .dispatch(LoginAction::BeginSubmit);
      let state = state.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let delay_ms = u32::try_from(
            SIMULATED_SUBMIT_DELAY
              .as_millis()
          )
          .unwrap_or(u32::MAX);
          TimeoutFuture::new(delay_ms)
            .await;
          state.dispatch(
            LoginAction::FinishSubmit
          );
        }
      );
    })
  };

  let password_type =
    if form.password_visible() {
      "text"
    } else {
      "password"
    };
  let reveal_label =
    if form.password_visible() {
      "Hide password"
    } else {
      "Show password"
    };

  html! {
      <div class="login-page">
          <AuroraBackground />
          <div class="login-card">
              <h2>{ "Welcome to Seiri" }</h2>
              <p class="subtitle">{ "Sign in to continue monitoring the cosmos" }</p>
              <form onsubmit={on_submit}>
                  <div class="field">
                      <label for="username">{ "Username or Email" }</label>
                      <input
                          id="username"
                          type="text"
                          placeholder="Enter your username or email"
                          value={form.username().to_string()}
                          oninput={on_username}
                      />
                  </div>
                  <div class="field">
                      <label for="password">{ "Password" }</label>
                      <div class="password-row">
                          <input
                              id="password"
                              type={password_type}
                              placeholder="Enter your password"
                          />
                          <button
                              class="reveal-btn"
                              type="button"
                              aria-label={reveal_label}
                              onclick={on_toggle_password}
                          >
                              { if form.password_visible() { "Hide" } else { "Show" } }
                          </button>
                      </div>
                  </div>
                  <button class="submit-btn" type="submit" disabled={form.is_loading()}>
                      { form.submit_label() }
                  </button>
              </form>
              <p class="legal">
                  { "By continuing, you agree to our " }
                  <a href="/terms">{ "Terms and Conditions" }</a>
                  { " and " }
                  <a href="/privacy">{ "Privacy Policy" }</a>
                  { "." }
              </p>
          </div>
      </div>
  }
}
