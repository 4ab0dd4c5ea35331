use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WindowBrandProps {
  pub title:     String,
  pub show_icon: bool
}

#[function_component(WindowBrand)]
pub fn window_brand(
  props: &WindowBrandProps
) -> Html {
  html! {
      <div class="window-brand">
          if props.show_icon {
              <span class="brand-icon" aria-hidden="true">{ "\u{2726}" }</span>
          }
          <h1>{ props.title.clone() }</h1>
          <span class="status-dot" aria-hidden="true"></span>
      </div>
  }
}
