mod construct;
mod props;

pub use construct::Budget;
pub use props::{BudgetOverrides, BudgetProps};
