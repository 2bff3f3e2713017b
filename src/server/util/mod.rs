pub mod naming;
pub mod pacer;
pub mod parse;
