pub mod css;
pub mod debounce;
pub mod loading_spinner;
