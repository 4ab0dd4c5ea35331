use yew::{
  Html,
  function_component,
  html
};

#[function_component(AuroraBackground)]
pub fn aurora_background() -> Html {
  html! {
      <div class="aurora" aria-hidden="true"></div>
  }
}
