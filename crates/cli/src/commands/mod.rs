pub mod gateway;
pub mod respond;
pub mod skills;
