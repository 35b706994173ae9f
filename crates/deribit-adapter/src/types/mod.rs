/*
[INPUT]:  Deribit v2 params and result shapes
[OUTPUT]: Request params, result models, and per-entry extraction wrappers
[POS]:    Data layer - JSON-RPC params and results
[UPDATE]: When a method gains params or result fields
*/

pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;

pub use enums::*;
pub use models::*;
pub use requests::*;
pub use responses::*;
