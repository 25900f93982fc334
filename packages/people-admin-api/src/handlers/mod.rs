//! HTTP endpoint implementations for the people admin gateway.

pub mod people_handlers;
pub mod request_utils;
pub mod response;

pub use people_handlers::{
    create_person, delete_people, delete_person, list_people, read_person, restore_person,
    update_person,
};
pub use response::{error_response, success_response, ApiResponse, ErrorResponse};
