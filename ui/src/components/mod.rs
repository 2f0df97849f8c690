pub mod app_navbar;
pub use app_navbar::{register_nav, AppNavbar, NavBuilder};

mod auth_panel;
pub use auth_panel::AuthPanel;

mod dial;
pub use dial::DialInput;

mod medication_inputs;
pub use medication_inputs::MedicationInputs;
