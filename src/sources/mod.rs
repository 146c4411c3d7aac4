pub mod fetch;
pub mod lark;
