// Engine orchestration: the bounded attempt loop and artifact delivery.

pub mod decision;
pub mod resolver;
pub mod retriever;
pub mod transfer;
