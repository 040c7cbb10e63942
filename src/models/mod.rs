pub mod category;
pub mod channel;
pub mod operational_quantity;
pub mod sales_plan;
pub mod season;
pub mod set_product;
pub mod user;
