//! Transaction Handlers

pub(crate) mod admin_index;
pub(crate) mod check;
pub(crate) mod design_stats;
pub(crate) mod my_orders;
pub(crate) mod order;
pub(crate) mod verify;
