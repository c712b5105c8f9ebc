//! UI Components
//!
//! Reusable Leptos components.

mod activity_form;
mod activity_list;
mod app_link;
mod calculator_modal;
mod cost_calculator;
mod cycle_card;
mod cycle_form;
mod delete_confirm_button;
mod farm_setup;
mod harvest_calculator;
mod investment_calculator;
mod modal;
mod nav_bar;
mod permission_editor;
mod summary_cards;
mod toast_host;
mod variety_select;

pub use activity_form::ActivityForm;
pub use activity_list::ActivityList;
pub use app_link::AppLink;
pub use calculator_modal::{CalculatorKind, CalculatorModal};
pub use cost_calculator::CostCalculator;
pub use cycle_card::CycleCard;
pub use cycle_form::CycleForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use farm_setup::FarmSetup;
pub use harvest_calculator::HarvestCalculator;
pub use investment_calculator::InvestmentCalculator;
pub use modal::Modal;
pub use nav_bar::NavBar;
pub use permission_editor::PermissionEditor;
pub use summary_cards::SummaryCards;
pub use toast_host::ToastHost;
pub use variety_select::VarietySelect;
