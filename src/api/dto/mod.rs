//! Request and response DTOs for the REST layer.

pub mod auth_dto;
pub mod event_dto;

pub use auth_dto::{SessionResponse, SignInRequest};
pub use event_dto::{EventListResponse, EventPayload, EventResponse, ShareLinkResponse};
