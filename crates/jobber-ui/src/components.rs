mod badges;
mod delete_task;
mod detail_modal;
mod due_badge;
mod header;
mod highlights;
mod job_card;
mod tab_bar;
mod task_form;
mod task_table;
mod toaster;

pub use badges::{
  PriorityBadge,
  StatusBadge
};
pub use delete_task::DeleteTask;
pub use detail_modal::DetailModal;
pub use due_badge::DueBadgeView;
pub use header::Header;
pub use highlights::Highlights;
pub use job_card::JobCard;
pub use tab_bar::TabBar;
pub use task_form::TaskFormDialog;
pub use task_table::TaskTable;
pub use toaster::Toaster;

pub(crate) const PLACEHOLDER_IMAGE: &str =
  "/assets/placeholder.svg";
