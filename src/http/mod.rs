mod health;
mod webhook;

pub(crate) use health::liveness_check;
pub(crate) use webhook::receive_update;
