//! Budget dashboard presentation.
//!
//! - `session` - one mount: loader plus view state
//! - `state` - tab, expanded rows, selected row
//! - `view` - serializable render output
//! - `format` - compact/full amounts and percentages
//! - `chat` - prompt construction and navigation hand-off

pub mod chat;
pub mod format;
pub mod session;
pub mod state;
pub mod view;

pub use chat::{Navigator, RecordingNavigator, chat_route, row_prompt};
pub use format::{AmountFormat, percent, signed_percent};
pub use session::DashboardSession;
pub use state::DashboardViewState;
pub use view::{
    AmountModel, ChartModel, ChartPoint, ChildRowModel, DashboardModel, HeaderModel,
    PercentModel, RowModel, TabModel, render,
};
