pub mod cache;
pub mod config;
pub mod due;
pub mod filter;
pub mod form;
pub mod gateway;
pub mod memory;
pub mod mutation;
pub mod selection;
pub mod task;
pub mod views;

pub use cache::{
  LoadState,
  QueryKey,
  RequestScope,
  ScopeSet,
  TaskCache
};
pub use config::{
  AppConfig,
  GatewayKind
};
pub use due::DueBadge;
pub use filter::TaskFilter;
pub use form::{
  FormKind,
  TaskForm,
  ValidationError
};
pub use gateway::{
  Endpoints,
  GatewayError,
  ImageSource,
  TaskFields,
  TaskGateway
};
pub use memory::{
  MemoryGateway,
  MemoryImage
};
pub use mutation::{
  DeleteConfirmation,
  DeletePhase,
  Mutation,
  SettleStrategy,
  SubmitError
};
pub use selection::ModalSelection;
pub use task::{
  Task,
  TaskId,
  TaskPriority,
  TaskStatus
};
pub use views::{
  DetailState,
  HighlightContent,
  TableBody
};
