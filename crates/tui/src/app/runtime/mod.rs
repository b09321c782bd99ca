mod client;
mod dispatch;
pub(crate) mod gateway;
mod orchestrator;
mod parser;
#[cfg(test)]
pub(crate) mod testing;

pub(crate) use client::ProcessGateway;
pub(crate) use dispatch::{Action, AppEvent, Dispatcher};
pub(crate) use gateway::{GatewayError, MailListing, MailPart, MailRecord};
pub(crate) use orchestrator::{LoginFailure, LoginField, LoginRequest, SessionOrchestrator};
