use orion_chrome::{
  ControlView,
  MaximizeIcon,
  WindowControl
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WindowControlsProps {
  pub controls:      Vec<ControlView>,
  pub maximize_icon: MaximizeIcon,
  pub on_action:     Callback<WindowControl>,
  pub on_hover:
    Callback<Option<WindowControl>>
}

fn glyph(
  control: WindowControl,
  maximize_icon: MaximizeIcon
) -> &'static str {
  match (control, maximize_icon) {
    | (WindowControl::Minimize, _) => "\u{2013}",
    | (
      WindowControl::Maximize,
      MaximizeIcon::Maximize
    ) => "\u{25A1}",
    | (
      WindowControl::Maximize,
      MaximizeIcon::Restore
    ) => "\u{2750}",
    | (WindowControl::Close, _) => "\u{2715}"
  }
}

fn class_name(
  control: WindowControl
) -> &'static str {
  match control {
    | WindowControl::Minimize => "minimize",
    | WindowControl::Maximize => "maximize",
    | WindowControl::Close => "close"
  }
}

#[function_component(WindowControls)]
pub fn window_controls(
  props: &WindowControlsProps
) -> Html {
  let button = |view: &ControlView| {
    let control = view.control;
    let onclick = {
      let on_action = props.on_action.clone();
      move |_: MouseEvent| on_action.emit(control)
    };
    let onmouseenter = {
      let on_hover = props.on_hover.clone();
      move |_: MouseEvent| on_hover.emit(Some(control))
    };
    let onmouseleave = {
      let on_hover = props.on_hover.clone();
      move |_: MouseEvent| on_hover.emit(None)
    };

    html! {
        <button
            class={classes!("window-btn", class_name(control), view.highlighted.then_some("hot"))}
            type="button"
            title={view.label}
            aria-label={view.label}
            {onclick}
            {onmouseenter}
            {onmouseleave}
        >
            <span>{ glyph(control, props.maximize_icon) }</span>
        </button>
    }
  };

  html! {
      <div class="window-controls" data-tauri-drag-region="false">
          { for props.controls.iter().map(button) }
      </div>
  }
}
