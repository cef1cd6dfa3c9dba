//! leasedesk-core: inquiry domain types shared by the server and the console
//!
//! Holds the inquiry record, its status lifecycle, request validation,
//! the response envelope and the civil clock used for `created_at`.

pub mod admin;
pub mod clock;
pub mod envelope;
pub mod inquiry;
pub mod validation;

pub use admin::{ChangePasswordRequest, LoginRequest, PasswordChange};
pub use clock::{parse_timestamp, CivilClock, DEFAULT_UTC_OFFSET_HOURS};
pub use envelope::Envelope;
pub use inquiry::{
    parse_id, validate_id, CreateInquiryRequest, Inquiry, InquiryChange, InquiryStatus,
    NewInquiry, StatusFilter, UpdateInquiryRequest,
};
pub use validation::ValidationError;
