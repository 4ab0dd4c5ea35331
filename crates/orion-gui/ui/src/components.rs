mod aurora_background;
mod window_brand;
mod window_chrome;
mod window_controls;

pub use aurora_background::AuroraBackground;
pub use window_brand::WindowBrand;
pub use window_chrome::WindowChrome;
pub use window_controls::WindowControls;
