pub mod forms;
pub mod page;
pub mod work_order;

pub use page::{Empty, Page};
pub use work_order::{UnknownStatus, WorkOrderStatus};
